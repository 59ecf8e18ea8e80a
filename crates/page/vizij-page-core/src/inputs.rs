//! Input contracts for the page engine.
//!
//! Adapters translate host callbacks (scroll, intersection observer, click,
//! animation frame) into these events and pass them to
//! [`crate::PageEngine::dispatch`].

use serde::{Deserialize, Serialize};

use crate::ids::ElementId;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageEvent {
    /// Vertical scroll offset in CSS pixels. May be negative during overscroll.
    Scroll { scroll_y: f64 },
    /// One batch of intersection observer entries, in delivery order.
    Intersection { entries: Vec<IntersectionEntry> },
    /// Activation of a listened element.
    Click { element: ElementId },
    /// Animation frame callback timestamp in milliseconds.
    Frame { timestamp_ms: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntersectionEntry {
    pub element: ElementId,
    pub is_intersecting: bool,
    /// Visible fraction of the element in [0, 1].
    pub ratio: f64,
}

impl IntersectionEntry {
    pub fn visible(element: ElementId, ratio: f64) -> Self {
        Self {
            element,
            is_intersecting: ratio > 0.0,
            ratio,
        }
    }
}
