#![allow(dead_code)]
use vizij_page_core::{
    Config, Document, ElementId, FixedCalendar, IntersectionEntry, MemoryDocument, Outputs,
    PageEngine, PageEvent,
};
use vizij_test_fixtures::pages;

pub const YEAR: i32 = 2026;

/// Load a fixture page, build an engine for it and run init (applied to the doc).
pub fn mounted(name: &str) -> (PageEngine, MemoryDocument, Outputs) {
    let json = pages::json(name).expect("page fixture");
    let mut doc = MemoryDocument::from_json(&json).expect("page json");
    let cfg: Config = pages::config(name).expect("page config").unwrap_or_default();
    let mut engine = PageEngine::try_new(cfg).expect("valid config");
    let out = engine.init(&doc, &FixedCalendar(YEAR)).clone();
    doc.apply(&out);
    (engine, doc, out)
}

pub fn dispatch(engine: &mut PageEngine, doc: &mut MemoryDocument, event: PageEvent) -> Outputs {
    let out = engine.dispatch(doc, &event).clone();
    doc.apply(&out);
    out
}

pub fn scroll(engine: &mut PageEngine, doc: &mut MemoryDocument, scroll_y: f64) -> Outputs {
    dispatch(engine, doc, PageEvent::Scroll { scroll_y })
}

pub fn click(engine: &mut PageEngine, doc: &mut MemoryDocument, element: ElementId) -> Outputs {
    dispatch(engine, doc, PageEvent::Click { element })
}

pub fn intersect(
    engine: &mut PageEngine,
    doc: &mut MemoryDocument,
    element: ElementId,
    ratio: f64,
) -> Outputs {
    dispatch(
        engine,
        doc,
        PageEvent::Intersection {
            entries: vec![IntersectionEntry::visible(element, ratio)],
        },
    )
}

pub fn frame(engine: &mut PageEngine, doc: &mut MemoryDocument, timestamp_ms: f64) -> Outputs {
    dispatch(engine, doc, PageEvent::Frame { timestamp_ms })
}

pub fn find(doc: &MemoryDocument, selector: &str) -> ElementId {
    doc.query_selector(selector)
        .unwrap_or_else(|| panic!("fixture has no {selector}"))
}
