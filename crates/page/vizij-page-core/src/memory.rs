//! In-memory [`Document`] for tests and headless hosts.
//!
//! Pages are described as a JSON element tree:
//!
//! ```json
//! { "tag": "body", "children": [
//!     { "tag": "header", "attrs": { "class": "main-header" } }
//! ] }
//! ```
//!
//! Selector support covers what the page markup needs: compound selectors
//! made of a tag, `#id`, `.class` and `[attr]` / `[attr="value"]` parts,
//! joined by descendant combinators (whitespace).
//! [`MemoryDocument::apply`] replays engine outputs so tests can assert on
//! the resulting page state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::host::Document;
use crate::ids::{ElementId, IdAllocator};
use crate::outputs::{Mutation, Outputs};

/// Serialized element tree.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub tag: String,
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub children: Vec<NodeSpec>,
}

#[derive(Clone, Debug)]
struct Node {
    tag: String,
    parent: Option<ElementId>,
    attrs: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    text: String,
}

/// Flattened element tree in document (pre-)order. `ElementId(n)` is the
/// n-th element.
#[derive(Clone, Debug, Default)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
}

impl MemoryDocument {
    pub fn from_spec(root: &NodeSpec) -> Self {
        let mut doc = Self::default();
        let mut ids = IdAllocator::new();
        doc.push(root, None, &mut ids);
        doc
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let spec: NodeSpec = serde_json::from_str(json)?;
        Ok(Self::from_spec(&spec))
    }

    fn push(&mut self, spec: &NodeSpec, parent: Option<ElementId>, ids: &mut IdAllocator) {
        let id = ids.alloc_element();
        self.nodes.push(Node {
            tag: spec.tag.to_ascii_lowercase(),
            parent,
            attrs: spec.attrs.clone(),
            style: BTreeMap::new(),
            text: spec.text.clone(),
        });
        for child in &spec.children {
            self.push(child, Some(id), ids);
        }
    }

    fn node(&self, el: ElementId) -> Option<&Node> {
        self.nodes.get(el.0 as usize)
    }

    fn node_mut(&mut self, el: ElementId) -> Option<&mut Node> {
        self.nodes.get_mut(el.0 as usize)
    }

    fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        (0..self.nodes.len() as u32).map(ElementId)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn text(&self, el: ElementId) -> Option<&str> {
        self.node(el).map(|n| n.text.as_str())
    }

    pub fn style(&self, el: ElementId, property: &str) -> Option<&str> {
        self.node(el)
            .and_then(|n| n.style.get(property))
            .map(String::as_str)
    }

    pub fn classes(&self, el: ElementId) -> Vec<&str> {
        self.node(el)
            .and_then(|n| n.attrs.get("class"))
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    fn set_class(&mut self, el: ElementId, class: &str, on: bool) {
        let Some(node) = self.node_mut(el) else {
            return;
        };
        let current = node.attrs.get("class").cloned().unwrap_or_default();
        let mut list: Vec<&str> = current.split_whitespace().collect();
        let present = list.contains(&class);
        if on && !present {
            list.push(class);
        } else if !on && present {
            list.retain(|c| *c != class);
        }
        node.attrs.insert("class".into(), list.join(" "));
    }

    /// Apply mutations in order. Host requests are ignored.
    pub fn apply(&mut self, outputs: &Outputs) {
        for m in &outputs.mutations {
            match m {
                Mutation::SetClass { element, class, on } => self.set_class(*element, class, *on),
                Mutation::AddClass { element, class } => self.set_class(*element, class, true),
                Mutation::SetStyle {
                    element,
                    property,
                    value,
                } => {
                    if let Some(n) = self.node_mut(*element) {
                        n.style.insert(property.clone(), value.clone());
                    }
                }
                Mutation::SetAttribute {
                    element,
                    name,
                    value,
                } => {
                    if let Some(n) = self.node_mut(*element) {
                        n.attrs.insert(name.clone(), value.clone());
                    }
                }
                Mutation::SetText { element, text } => {
                    if let Some(n) = self.node_mut(*element) {
                        n.text = text.clone();
                    }
                }
            }
        }
    }

    fn is_descendant(&self, el: ElementId, root: ElementId) -> bool {
        let mut cur = self.node(el).and_then(|n| n.parent);
        while let Some(p) = cur {
            if p == root {
                return true;
            }
            cur = self.node(p).and_then(|n| n.parent);
        }
        false
    }

    fn matches(&self, el: ElementId, chain: &[Compound]) -> bool {
        let Some((last, ancestors)) = chain.split_last() else {
            return false;
        };
        if !self.matches_compound(el, last) {
            return false;
        }
        // descendant combinators: match ancestors right to left, greedily
        let mut pending: Vec<&Compound> = ancestors.iter().collect();
        let mut cur = self.node(el).and_then(|n| n.parent);
        while let Some(p) = cur {
            let Some(compound) = pending.last() else {
                break;
            };
            if self.matches_compound(p, compound) {
                pending.pop();
            }
            cur = self.node(p).and_then(|n| n.parent);
        }
        pending.is_empty()
    }

    fn matches_compound(&self, el: ElementId, c: &Compound) -> bool {
        let Some(node) = self.node(el) else {
            return false;
        };
        if let Some(tag) = &c.tag {
            if *tag != node.tag {
                return false;
            }
        }
        if let Some(id) = &c.id {
            if node.attrs.get("id") != Some(id) {
                return false;
            }
        }
        let classes = self.classes(el);
        if !c.classes.iter().all(|cl| classes.contains(&cl.as_str())) {
            return false;
        }
        c.attrs.iter().all(|(name, value)| match (node.attrs.get(name), value) {
            (Some(_), None) => true,
            (Some(actual), Some(expected)) => actual == expected,
            (None, _) => false,
        })
    }
}

impl Document for MemoryDocument {
    fn query_selector(&self, selector: &str) -> Option<ElementId> {
        let chain = parse_selector(selector);
        self.ids().find(|&el| self.matches(el, &chain))
    }

    fn query_selector_all(&self, selector: &str) -> Vec<ElementId> {
        let chain = parse_selector(selector);
        self.ids().filter(|&el| self.matches(el, &chain)).collect()
    }

    fn query_within(&self, root: ElementId, selector: &str) -> Vec<ElementId> {
        let chain = parse_selector(selector);
        self.ids()
            .filter(|&el| self.is_descendant(el, root) && self.matches(el, &chain))
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.ids()
            .find(|&el| self.node(el).and_then(|n| n.attrs.get("id")).map(String::as_str) == Some(id))
    }

    fn body(&self) -> Option<ElementId> {
        self.ids()
            .find(|&el| self.node(el).map(|n| n.tag == "body").unwrap_or(false))
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.node(element).and_then(|n| n.attrs.get(name).cloned())
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.classes(element).contains(&class)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, Option<String>)>,
}

fn parse_selector(selector: &str) -> Vec<Compound> {
    selector.split_whitespace().map(parse_compound).collect()
}

fn is_part_start(ch: char) -> bool {
    matches!(ch, '.' | '#' | '[')
}

fn parse_compound(s: &str) -> Compound {
    let mut c = Compound::default();
    let end = s.find(is_part_start).unwrap_or(s.len());
    let tag = &s[..end];
    if !tag.is_empty() && tag != "*" {
        c.tag = Some(tag.to_ascii_lowercase());
    }

    let mut rest = &s[end..];
    while let Some(ch) = rest.chars().next() {
        match ch {
            '.' | '#' => {
                let body = &rest[1..];
                let end = body.find(is_part_start).unwrap_or(body.len());
                let name = body[..end].to_string();
                if ch == '.' {
                    c.classes.push(name);
                } else {
                    c.id = Some(name);
                }
                rest = &body[end..];
            }
            '[' => {
                let close = rest.find(']').unwrap_or(rest.len());
                let inner = &rest[1..close];
                let attr = match inner.split_once('=') {
                    Some((name, value)) => (
                        name.trim().to_string(),
                        Some(value.trim().trim_matches(|q: char| q == '"' || q == '\'').to_string()),
                    ),
                    None => (inner.trim().to_string(), None),
                };
                c.attrs.push(attr);
                rest = rest.get(close + 1..).unwrap_or("");
            }
            _ => break,
        }
    }
    c
}
