//! Mobile navigation toggle.
//!
//! Two states on one flag (the body's `nav-open` class), mirrored into the
//! toggle's `aria-expanded`. Any link inside the nav closes the menu.

use log::debug;

use crate::config::Config;
use crate::host::Document;
use crate::ids::ElementId;
use crate::outputs::{HostRequest, Outputs};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl MenuState {
    pub fn is_open(self) -> bool {
        self == MenuState::Open
    }

    fn flipped(self) -> Self {
        match self {
            MenuState::Closed => MenuState::Open,
            MenuState::Open => MenuState::Closed,
        }
    }
}

#[derive(Clone, Debug)]
pub struct MobileMenu {
    state: MenuState,
    toggle: ElementId,
    body: Option<ElementId>,
    links: Vec<ElementId>,
}

impl MobileMenu {
    /// Requires both the toggle and the nav container.
    pub fn install(cfg: &Config, doc: &dyn Document, out: &mut Outputs) -> Option<Self> {
        let toggle = doc.query_selector(&cfg.selectors.nav_toggle)?;
        let nav = doc.query_selector(&cfg.selectors.nav)?;
        let body = doc.body();
        let state = match body {
            Some(b) if doc.has_class(b, &cfg.classes.nav_open) => MenuState::Open,
            _ => MenuState::Closed,
        };
        let links = doc.query_within(nav, &cfg.selectors.nav_link);

        out.request(HostRequest::ListenClick {
            element: toggle,
            prevent_default: false,
        });
        for &link in &links {
            out.request(HostRequest::ListenClick {
                element: link,
                prevent_default: false,
            });
        }
        Some(Self {
            state,
            toggle,
            body,
            links,
        })
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    /// Returns true if `element` belongs to the menu.
    pub fn on_click(&mut self, cfg: &Config, element: ElementId, out: &mut Outputs) -> bool {
        let mut handled = false;
        if element == self.toggle {
            self.set(cfg, self.state.flipped(), out);
            handled = true;
        }
        if self.links.contains(&element) {
            self.set(cfg, MenuState::Closed, out);
            handled = true;
        }
        handled
    }

    fn set(&mut self, cfg: &Config, state: MenuState, out: &mut Outputs) {
        debug!("menu {:?} -> {:?}", self.state, state);
        self.state = state;
        if let Some(body) = self.body {
            out.set_class(body, &cfg.classes.nav_open, state.is_open());
        }
        let expanded = if state.is_open() { "true" } else { "false" };
        out.set_attribute(self.toggle, &cfg.attributes.aria_expanded, expanded);
    }
}
