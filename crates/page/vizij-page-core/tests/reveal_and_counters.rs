mod common;

use common::{dispatch, find, frame, intersect, mounted};
use vizij_page_core::{
    Document, HostRequest, IntersectionEntry, Mutation, PageEvent, RevealState,
};

#[test]
fn entrance_reveals_hero_elements_with_delays() {
    let (_eng, doc, _) = mounted("landing");
    let hero = find(&doc, ".hero-content");
    let animated = doc.query_within(hero, "[data-animation]");
    assert_eq!(animated.len(), 3);

    let delays: Vec<_> = animated
        .iter()
        .map(|&el| doc.style(el, "transition-delay"))
        .collect();
    // malformed "soon" falls back to 0ms
    assert_eq!(delays, vec![Some("0ms"), Some("200ms"), Some("0ms")]);
    for el in animated {
        assert!(doc.classes(el).contains(&"is-visible"));
    }
}

#[test]
fn init_observes_every_marked_element() {
    let (eng, doc, out) = mounted("landing");
    let marked = doc.query_selector_all(".animate-on-scroll");
    let observed: Vec<_> = out
        .requests
        .iter()
        .filter_map(|r| match r {
            HostRequest::Observe { element } => Some(*element),
            _ => None,
        })
        .collect();
    assert_eq!(observed, marked);
    assert_eq!(eng.watching(), 3);
}

#[test]
fn reveal_applies_kind_delay_and_unobserves() {
    let (mut eng, mut doc, _) = mounted("landing");
    let about = find(&doc, "#about");

    let out = intersect(&mut eng, &mut doc, about, 0.25);
    assert_eq!(
        out.mutations,
        vec![
            Mutation::SetStyle {
                element: about,
                property: "transition-delay".into(),
                value: "100ms".into(),
            },
            Mutation::AddClass {
                element: about,
                class: "slide-left".into(),
            },
            Mutation::AddClass {
                element: about,
                class: "is-visible".into(),
            },
        ]
    );
    assert_eq!(out.requests, vec![HostRequest::Unobserve { element: about }]);
    assert_eq!(eng.reveal_state(about), Some(RevealState::Revealed));
}

#[test]
fn empty_animation_kind_falls_back_to_fade_up() {
    let (mut eng, mut doc, _) = mounted("landing");
    let features = find(&doc, "#features");
    intersect(&mut eng, &mut doc, features, 1.0);
    let classes = doc.classes(features);
    assert!(classes.contains(&"fade-up"));
    assert!(classes.contains(&"is-visible"));
    assert_eq!(doc.style(features, "transition-delay"), Some("0ms"));
}

#[test]
fn non_intersecting_entry_does_not_reveal() {
    let (mut eng, mut doc, _) = mounted("landing");
    let about = find(&doc, "#about");
    let out = dispatch(
        &mut eng,
        &mut doc,
        PageEvent::Intersection {
            entries: vec![IntersectionEntry {
                element: about,
                is_intersecting: false,
                ratio: 0.5,
            }],
        },
    );
    assert!(out.is_empty());
    assert_eq!(eng.reveal_state(about), Some(RevealState::Watching));
}

#[test]
fn tall_element_reveals_below_threshold_ratio() {
    // taller than ten viewports: intersecting, but the ratio never reaches 0.1
    let (mut eng, mut doc, _) = mounted("landing");
    let about = find(&doc, "#about");
    let out = intersect(&mut eng, &mut doc, about, 0.08);
    assert!(out
        .requests
        .contains(&HostRequest::Unobserve { element: about }));
    assert_eq!(eng.reveal_state(about), Some(RevealState::Revealed));
    assert!(doc.classes(about).contains(&"is-visible"));
}

#[test]
fn second_intersection_is_ignored() {
    let (mut eng, mut doc, _) = mounted("landing");
    let about = find(&doc, "#about");
    assert!(!intersect(&mut eng, &mut doc, about, 0.5).is_empty());
    assert!(intersect(&mut eng, &mut doc, about, 0.9).is_empty());
    assert_eq!(eng.watching(), 2);
}

#[test]
fn unwatched_elements_are_ignored() {
    let (mut eng, mut doc, _) = mounted("landing");
    let header = find(&doc, ".main-header");
    assert!(intersect(&mut eng, &mut doc, header, 1.0).is_empty());
    assert_eq!(eng.reveal_state(header), None);
}

#[test]
fn batch_entries_are_processed_in_order() {
    let (mut eng, mut doc, _) = mounted("landing");
    let about = find(&doc, "#about");
    let features = find(&doc, "#features");
    let out = dispatch(
        &mut eng,
        &mut doc,
        PageEvent::Intersection {
            entries: vec![
                IntersectionEntry::visible(features, 0.3),
                IntersectionEntry::visible(about, 0.3),
            ],
        },
    );
    assert_eq!(
        out.requests,
        vec![
            HostRequest::Unobserve { element: features },
            HostRequest::Unobserve { element: about },
        ]
    );
}

#[test]
fn stats_reveal_counts_up_to_targets() {
    let (mut eng, mut doc, _) = mounted("landing");
    let stats = find(&doc, "#stats");
    let numbers = doc.query_within(stats, ".stat-number");
    assert_eq!(numbers.len(), 4);

    let out = intersect(&mut eng, &mut doc, stats, 0.2);
    assert!(out.requests.contains(&HostRequest::RequestFrame));
    assert_eq!(
        out.requests.last(),
        Some(&HostRequest::Unobserve { element: stats })
    );
    assert_eq!(eng.active_animations(), 4);

    frame(&mut eng, &mut doc, 1000.0);
    assert_eq!(doc.text(numbers[0]), Some("0"));

    let out = frame(&mut eng, &mut doc, 2000.0);
    assert_eq!(doc.text(numbers[0]), Some("218"));
    assert_eq!(doc.text(numbers[1]), Some("1050"));
    assert_eq!(out.requests, vec![HostRequest::RequestFrame]);

    let out = frame(&mut eng, &mut doc, 3000.0);
    assert_eq!(doc.text(numbers[0]), Some("250"));
    assert_eq!(doc.text(numbers[1]), Some("1200"));
    // malformed and missing targets count to 0
    assert_eq!(doc.text(numbers[2]), Some("0"));
    assert_eq!(doc.text(numbers[3]), Some("0"));
    assert!(out.requests.is_empty());
    assert_eq!(eng.active_animations(), 0);
}

#[test]
fn full_window_lands_exactly_on_target() {
    let (mut eng, mut doc, _) = mounted("landing");
    let stats = find(&doc, "#stats");
    let first = doc.query_within(stats, ".stat-number")[0];
    intersect(&mut eng, &mut doc, stats, 1.0);

    let mut ts = 0.0;
    let mut seen = Vec::new();
    while eng.active_animations() > 0 {
        frame(&mut eng, &mut doc, ts);
        seen.push(doc.text(first).unwrap_or_default().to_string());
        ts += 16.0;
    }
    assert_eq!(seen.last().map(String::as_str), Some("250"));
    let values: Vec<u32> = seen.iter().map(|s| s.parse().unwrap()).collect();
    assert!(values.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn compact_config_uses_animation_and_duration() {
    let (mut eng, mut doc, _) = mounted("compact");
    let stats = find(&doc, ".about-stats");
    let number = find(&doc, ".stat-number");

    intersect(&mut eng, &mut doc, stats, 0.6);
    assert!(doc.classes(stats).contains(&"fade-in"));

    frame(&mut eng, &mut doc, 0.0);
    frame(&mut eng, &mut doc, 250.0);
    assert_eq!(doc.text(number), Some("35"));
    frame(&mut eng, &mut doc, 500.0);
    assert_eq!(doc.text(number), Some("40"));
}

#[test]
fn direct_counter_restart_runs_independently() {
    let (mut eng, mut doc, _) = mounted("landing");
    let stats = find(&doc, "#stats");
    let first = doc.query_within(stats, ".stat-number")[0];

    let (a, _) = eng.start_counter(&doc, first);
    frame(&mut eng, &mut doc, 0.0);
    frame(&mut eng, &mut doc, 1000.0);
    let (b, out) = eng.start_counter(&doc, first);
    assert_ne!(a, b);
    assert_eq!(out.requests, vec![HostRequest::RequestFrame]);
    assert_eq!(eng.active_animations(), 2);

    // the restarted task starts from 0 and writes after the first one
    frame(&mut eng, &mut doc, 1500.0);
    assert_eq!(doc.text(first), Some("0"));
    frame(&mut eng, &mut doc, 3000.0);
    assert_eq!(doc.text(first), Some("246"));
    assert_eq!(eng.active_animations(), 1);
    frame(&mut eng, &mut doc, 3500.0);
    assert_eq!(doc.text(first), Some("250"));
    assert_eq!(eng.active_animations(), 0);
}
