//! Output contracts from the page engine.
//!
//! Outputs carry the DOM mutations produced by one engine call plus the
//! host requests (listeners, observation, frames, scrolling) the adapter
//! has to honour. Mutations must be applied in order.

use serde::{Deserialize, Serialize};

use crate::ids::ElementId;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Mutation {
    /// Force a class on or off (`classList.toggle(class, on)`).
    SetClass {
        element: ElementId,
        class: String,
        on: bool,
    },
    AddClass {
        element: ElementId,
        class: String,
    },
    /// Inline style property, e.g. `transition-delay` or `transform`.
    SetStyle {
        element: ElementId,
        property: String,
        value: String,
    },
    SetAttribute {
        element: ElementId,
        name: String,
        value: String,
    },
    SetText {
        element: ElementId,
        text: String,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "request", rename_all = "snake_case")]
pub enum HostRequest {
    /// Subscribe to window scroll events.
    ListenScroll { passive: bool },
    /// Subscribe to activation of `element`.
    ListenClick {
        element: ElementId,
        prevent_default: bool,
    },
    Observe { element: ElementId },
    Unobserve { element: ElementId },
    /// Deliver a [`crate::PageEvent::Frame`] on the next animation frame.
    RequestFrame,
    ScrollTo { top: f64, smooth: bool },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub mutations: Vec<Mutation>,
    #[serde(default)]
    pub requests: Vec<HostRequest>,
}

impl Outputs {
    pub fn clear(&mut self) {
        self.mutations.clear();
        self.requests.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty() && self.requests.is_empty()
    }

    pub fn set_class(&mut self, element: ElementId, class: &str, on: bool) {
        self.mutations.push(Mutation::SetClass {
            element,
            class: class.to_string(),
            on,
        });
    }

    pub fn add_class(&mut self, element: ElementId, class: &str) {
        self.mutations.push(Mutation::AddClass {
            element,
            class: class.to_string(),
        });
    }

    pub fn set_style(&mut self, element: ElementId, property: &str, value: String) {
        self.mutations.push(Mutation::SetStyle {
            element,
            property: property.to_string(),
            value,
        });
    }

    pub fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        self.mutations.push(Mutation::SetAttribute {
            element,
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    pub fn set_text(&mut self, element: ElementId, text: String) {
        self.mutations.push(Mutation::SetText { element, text });
    }

    pub fn request(&mut self, request: HostRequest) {
        self.requests.push(request);
    }

    /// Queue a frame request unless one is already queued in this batch.
    pub fn request_frame(&mut self) {
        if !self.requests.contains(&HostRequest::RequestFrame) {
            self.requests.push(HostRequest::RequestFrame);
        }
    }

    /// Last text written to `element` in this batch.
    pub fn text_of(&self, element: ElementId) -> Option<&str> {
        self.mutations.iter().rev().find_map(|m| match m {
            Mutation::SetText { element: e, text } if *e == element => Some(text.as_str()),
            _ => None,
        })
    }
}
