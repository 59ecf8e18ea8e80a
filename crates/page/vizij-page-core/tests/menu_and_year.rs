mod common;

use common::{click, find, mounted, YEAR};
use vizij_page_core::{
    Document, FixedCalendar, HostRequest, MemoryDocument, MenuState, PageEngine,
};
use vizij_test_fixtures::pages;

#[test]
fn toggle_opens_and_link_closes() {
    let (mut eng, mut doc, _) = mounted("landing");
    let body = doc.body().unwrap();
    let toggle = find(&doc, ".nav-toggle");
    let link = doc.query_selector_all(".main-nav a")[1];
    assert_eq!(eng.menu_state(), Some(MenuState::Closed));

    click(&mut eng, &mut doc, toggle);
    assert_eq!(eng.menu_state(), Some(MenuState::Open));
    assert!(doc.classes(body).contains(&"nav-open"));
    assert_eq!(doc.attribute(toggle, "aria-expanded").as_deref(), Some("true"));

    click(&mut eng, &mut doc, link);
    assert_eq!(eng.menu_state(), Some(MenuState::Closed));
    assert!(!doc.classes(body).contains(&"nav-open"));
    assert_eq!(doc.attribute(toggle, "aria-expanded").as_deref(), Some("false"));
}

#[test]
fn toggle_flips_back_and_link_close_is_idempotent() {
    let (mut eng, mut doc, _) = mounted("landing");
    let toggle = find(&doc, ".nav-toggle");
    let link = doc.query_selector_all(".main-nav a")[0];

    click(&mut eng, &mut doc, toggle);
    click(&mut eng, &mut doc, toggle);
    assert_eq!(eng.menu_state(), Some(MenuState::Closed));

    let out = click(&mut eng, &mut doc, link);
    assert_eq!(eng.menu_state(), Some(MenuState::Closed));
    assert_eq!(doc.attribute(toggle, "aria-expanded").as_deref(), Some("false"));
    assert_eq!(out.mutations.len(), 2);
}

#[test]
fn links_outside_the_nav_do_nothing() {
    let (mut eng, mut doc, _) = mounted("landing");
    let logo = find(&doc, ".logo");
    assert!(click(&mut eng, &mut doc, logo).is_empty());
}

#[test]
fn menu_listens_on_toggle_and_nav_links_only() {
    let (_eng, doc, out) = mounted("landing");
    let toggle = find(&doc, ".nav-toggle");
    let links = doc.query_selector_all(".main-nav a");
    let listened: Vec<_> = out
        .requests
        .iter()
        .filter_map(|r| match r {
            HostRequest::ListenClick {
                element,
                prevent_default: false,
            } => Some(*element),
            _ => None,
        })
        .collect();
    let mut expected = vec![toggle];
    expected.extend(links);
    assert_eq!(listened, expected);
}

#[test]
fn back_to_top_prevents_default_and_scrolls_smoothly() {
    let (mut eng, mut doc, init) = mounted("landing");
    let button = find(&doc, ".back-to-top");
    assert!(init.requests.contains(&HostRequest::ListenClick {
        element: button,
        prevent_default: true,
    }));

    let out = click(&mut eng, &mut doc, button);
    assert!(out.mutations.is_empty());
    assert_eq!(
        out.requests,
        vec![HostRequest::ScrollTo {
            top: 0.0,
            smooth: true
        }]
    );
}

#[test]
fn year_is_written_once_as_plain_text() {
    let (_eng, doc, _) = mounted("landing");
    let year = doc.element_by_id("year").unwrap();
    assert_eq!(doc.text(year), Some(YEAR.to_string().as_str()));
}

#[test]
fn year_is_stable_across_engines_in_the_same_year() {
    let json = pages::json("landing").unwrap();
    let texts: Vec<String> = (0..3)
        .map(|_| {
            let mut doc = MemoryDocument::from_json(&json).unwrap();
            let mut eng = PageEngine::default();
            let out = eng.init(&doc, &FixedCalendar(2031)).clone();
            doc.apply(&out);
            let year = doc.element_by_id("year").unwrap();
            doc.text(year).unwrap().to_string()
        })
        .collect();
    assert_eq!(texts, vec!["2031", "2031", "2031"]);
}

#[test]
fn custom_year_id_is_honoured() {
    let (_eng, doc, _) = mounted("compact");
    let year = doc.element_by_id("copyright-year").unwrap();
    assert_eq!(doc.text(year), Some("2026"));
}
