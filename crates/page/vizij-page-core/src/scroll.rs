//! Scroll-derived effects: header style, parallax background, back-to-top.
//!
//! Each effect is a pure function of the current scroll offset, so handlers
//! may run at native event rate and repeated offsets produce identical
//! output.

use crate::config::{Config, ScrollCfg};
use crate::host::Document;
use crate::ids::ElementId;
use crate::markup::format_number;
use crate::outputs::{HostRequest, Outputs};

#[inline]
pub fn header_scrolled(cfg: &ScrollCfg, scroll_y: f64) -> bool {
    scroll_y > cfg.header_px
}

#[inline]
pub fn back_to_top_visible(cfg: &ScrollCfg, scroll_y: f64) -> bool {
    scroll_y > cfg.back_to_top_px
}

#[inline]
pub fn parallax_offset(cfg: &ScrollCfg, scroll_y: f64) -> f64 {
    scroll_y * cfg.parallax_factor
}

pub fn parallax_transform(cfg: &ScrollCfg, scroll_y: f64) -> String {
    format!("translateY({}px)", format_number(parallax_offset(cfg, scroll_y)))
}

/// Toggles the header's `scrolled` class.
#[derive(Copy, Clone, Debug)]
pub struct HeaderToggle {
    header: ElementId,
}

impl HeaderToggle {
    pub fn install(cfg: &Config, doc: &dyn Document) -> Option<Self> {
        doc.query_selector(&cfg.selectors.header)
            .map(|header| Self { header })
    }

    pub fn on_scroll(&self, cfg: &Config, scroll_y: f64, out: &mut Outputs) {
        out.set_class(
            self.header,
            &cfg.classes.scrolled,
            header_scrolled(&cfg.scroll, scroll_y),
        );
    }
}

/// Moves the hero background at a fraction of the scroll speed.
#[derive(Copy, Clone, Debug)]
pub struct Parallax {
    background: ElementId,
}

impl Parallax {
    pub fn install(cfg: &Config, doc: &dyn Document) -> Option<Self> {
        doc.query_selector(&cfg.selectors.hero_background)
            .map(|background| Self { background })
    }

    pub fn on_scroll(&self, cfg: &Config, scroll_y: f64, out: &mut Outputs) {
        out.set_style(
            self.background,
            "transform",
            parallax_transform(&cfg.scroll, scroll_y),
        );
    }
}

/// Shows the back-to-top control past a threshold and scrolls home on click.
#[derive(Copy, Clone, Debug)]
pub struct BackToTop {
    button: ElementId,
}

impl BackToTop {
    pub fn install(cfg: &Config, doc: &dyn Document, out: &mut Outputs) -> Option<Self> {
        let button = doc.query_selector(&cfg.selectors.back_to_top)?;
        out.request(HostRequest::ListenClick {
            element: button,
            prevent_default: true,
        });
        Some(Self { button })
    }

    pub fn on_scroll(&self, cfg: &Config, scroll_y: f64, out: &mut Outputs) {
        out.set_class(
            self.button,
            &cfg.classes.back_to_top_visible,
            back_to_top_visible(&cfg.scroll, scroll_y),
        );
    }

    /// Returns true if `element` was this control.
    pub fn on_click(&self, cfg: &Config, element: ElementId, out: &mut Outputs) -> bool {
        if element != self.button {
            return false;
        }
        out.request(HostRequest::ScrollTo {
            top: 0.0,
            smooth: cfg.scroll.smooth_scroll,
        });
        true
    }
}
