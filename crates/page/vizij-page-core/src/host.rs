//! Capability traits the engine reads the page through.
//!
//! The engine never mutates the host directly; it only queries through
//! these traits and emits [`crate::Outputs`] for the adapter to apply.

use crate::ids::ElementId;

/// Read-only view of the page's element tree.
///
/// Query results are in document order. Selector support is whatever the
/// host offers; the engine only passes through the configured selectors.
pub trait Document {
    fn query_selector(&self, selector: &str) -> Option<ElementId>;
    fn query_selector_all(&self, selector: &str) -> Vec<ElementId>;
    /// Descendants of `root` matching `selector`.
    fn query_within(&self, root: ElementId, selector: &str) -> Vec<ElementId>;
    fn element_by_id(&self, id: &str) -> Option<ElementId>;
    fn body(&self) -> Option<ElementId>;
    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;
    fn has_class(&self, element: ElementId, class: &str) -> bool;
}

/// Source of the current calendar year.
pub trait Calendar {
    fn current_year(&self) -> i32;
}

/// Calendar pinned to one year.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FixedCalendar(pub i32);

impl Calendar for FixedCalendar {
    fn current_year(&self) -> i32 {
        self.0
    }
}
