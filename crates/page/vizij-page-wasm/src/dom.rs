//! `web-sys` implementation of the core `Document` trait.
//!
//! Elements are interned on first sight and keep their `ElementId` for the
//! lifetime of the page handle.

use std::cell::RefCell;

use log::warn;
use vizij_page_core::{Document, ElementId, Mutation};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement, NodeList};

pub struct DomDocument {
    document: web_sys::Document,
    elements: RefCell<Vec<Element>>,
}

impl DomDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self {
            document,
            elements: RefCell::new(Vec::new()),
        }
    }

    pub fn document(&self) -> &web_sys::Document {
        &self.document
    }

    /// Handle for `el`, allocating one the first time it is seen.
    pub fn intern(&self, el: Element) -> ElementId {
        let mut elements = self.elements.borrow_mut();
        if let Some(i) = elements.iter().position(|e| *e == el) {
            return ElementId(i as u32);
        }
        elements.push(el);
        ElementId((elements.len() - 1) as u32)
    }

    pub fn element(&self, id: ElementId) -> Option<Element> {
        self.elements.borrow().get(id.0 as usize).cloned()
    }

    fn collect(&self, list: NodeList) -> Vec<ElementId> {
        let mut out = Vec::with_capacity(list.length() as usize);
        for i in 0..list.length() {
            if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                out.push(self.intern(el));
            }
        }
        out
    }

    /// Apply one engine mutation. Failures are logged and skipped.
    pub fn apply(&self, mutation: &Mutation) {
        let (id, result) = match mutation {
            Mutation::SetClass { element, class, on } => (
                *element,
                self.with(*element, |el| {
                    el.class_list().toggle_with_force(class, *on).map(|_| ())
                }),
            ),
            Mutation::AddClass { element, class } => (
                *element,
                self.with(*element, |el| el.class_list().add_1(class)),
            ),
            Mutation::SetStyle {
                element,
                property,
                value,
            } => (
                *element,
                self.with(*element, |el| match el.dyn_ref::<HtmlElement>() {
                    Some(html) => html.style().set_property(property, value),
                    None => Err(JsValue::from_str("not an HTML element")),
                }),
            ),
            Mutation::SetAttribute {
                element,
                name,
                value,
            } => (
                *element,
                self.with(*element, |el| el.set_attribute(name, value)),
            ),
            Mutation::SetText { element, text } => (
                *element,
                self.with(*element, |el| {
                    el.set_text_content(Some(text));
                    Ok(())
                }),
            ),
        };
        if let Err(e) = result {
            warn!("failed to apply {mutation:?} to {id}: {e:?}");
        }
    }

    fn with(
        &self,
        id: ElementId,
        f: impl FnOnce(&Element) -> Result<(), JsValue>,
    ) -> Result<(), JsValue> {
        match self.element(id) {
            Some(el) => f(&el),
            None => Err(JsValue::from_str("unknown element")),
        }
    }
}

impl Document for DomDocument {
    fn query_selector(&self, selector: &str) -> Option<ElementId> {
        match self.document.query_selector(selector) {
            Ok(found) => found.map(|el| self.intern(el)),
            Err(e) => {
                warn!("query_selector({selector}) failed: {e:?}");
                None
            }
        }
    }

    fn query_selector_all(&self, selector: &str) -> Vec<ElementId> {
        match self.document.query_selector_all(selector) {
            Ok(list) => self.collect(list),
            Err(e) => {
                warn!("query_selector_all({selector}) failed: {e:?}");
                Vec::new()
            }
        }
    }

    fn query_within(&self, root: ElementId, selector: &str) -> Vec<ElementId> {
        let Some(root) = self.element(root) else {
            return Vec::new();
        };
        match root.query_selector_all(selector) {
            Ok(list) => self.collect(list),
            Err(e) => {
                warn!("query_selector_all({selector}) failed: {e:?}");
                Vec::new()
            }
        }
    }

    fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.document.get_element_by_id(id).map(|el| self.intern(el))
    }

    fn body(&self) -> Option<ElementId> {
        self.document.body().map(|b| self.intern(b.into()))
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.element(element)?.get_attribute(name)
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.element(element)
            .map(|el| el.class_list().contains(class))
            .unwrap_or(false)
    }
}
