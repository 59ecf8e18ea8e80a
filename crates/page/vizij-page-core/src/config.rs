//! Core configuration for vizij-page-core.
//!
//! Every field has a documented default matching the stock landing page
//! markup. All sections are `#[serde(default)]`, so hosts may pass partial
//! objects (for example only `{ "scroll": { "parallax_factor": 0.2 } }`).

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration for a [`crate::PageEngine`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub selectors: Selectors,
    pub attributes: Attributes,
    pub classes: Classes,
    pub scroll: ScrollCfg,
    pub reveal: RevealCfg,
    pub counter: CounterCfg,
}

/// CSS selectors (and one element id) the components look up at init.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    /// Fixed header toggled by scroll. Default `.main-header`.
    pub header: String,
    /// Container of the entrance-animated elements. Default `.hero-content`.
    pub hero_content: String,
    /// Entrance marker inside `hero_content`. Default `[data-animation]`.
    pub entrance_marker: String,
    /// Scroll-triggered reveal marker. Default `.animate-on-scroll`.
    pub reveal_marker: String,
    /// Counter elements inside a stats container. Default `.stat-number`.
    pub stat_number: String,
    /// Parallax layer. Default `.hero-background`.
    pub hero_background: String,
    /// Mobile navigation toggle. Default `.nav-toggle`.
    pub nav_toggle: String,
    /// Navigation container. Default `.main-nav`.
    pub nav: String,
    /// Links inside `nav` that close the menu. Default `a`.
    pub nav_link: String,
    /// Element id (not a selector) for the copyright year. Default `year`.
    pub year_id: String,
    /// Back-to-top control. Default `.back-to-top`.
    pub back_to_top: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            header: ".main-header".into(),
            hero_content: ".hero-content".into(),
            entrance_marker: "[data-animation]".into(),
            reveal_marker: ".animate-on-scroll".into(),
            stat_number: ".stat-number".into(),
            hero_background: ".hero-background".into(),
            nav_toggle: ".nav-toggle".into(),
            nav: ".main-nav".into(),
            nav_link: "a".into(),
            year_id: "year".into(),
            back_to_top: ".back-to-top".into(),
        }
    }
}

/// Attribute names read from (or written to) the markup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attributes {
    pub delay: String,
    pub animation: String,
    pub target: String,
    pub aria_expanded: String,
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            delay: "data-delay".into(),
            animation: "data-animation".into(),
            target: "data-target".into(),
            aria_expanded: "aria-expanded".into(),
        }
    }
}

/// Class names toggled by the components.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Classes {
    /// Header class while scrolled past `scroll.header_px`.
    pub scrolled: String,
    /// Added to every revealed element.
    pub visible: String,
    /// Reveal containers with this class drive counter animations.
    pub stats_container: String,
    /// Body class while the mobile menu is open.
    pub nav_open: String,
    /// Back-to-top class while scrolled past `scroll.back_to_top_px`.
    pub back_to_top_visible: String,
}

impl Default for Classes {
    fn default() -> Self {
        Self {
            scrolled: "scrolled".into(),
            visible: "is-visible".into(),
            stats_container: "about-stats".into(),
            nav_open: "nav-open".into(),
            back_to_top_visible: "visible".into(),
        }
    }
}

/// Scroll-derived style parameters. Comparisons are strict (`scroll_y > px`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollCfg {
    pub header_px: f64,
    pub back_to_top_px: f64,
    /// Background offset per scrolled pixel.
    pub parallax_factor: f64,
    /// Register the scroll listener as passive.
    pub passive: bool,
    /// Use smooth behaviour for the back-to-top scroll.
    pub smooth_scroll: bool,
}

impl Default for ScrollCfg {
    fn default() -> Self {
        Self {
            header_px: 50.0,
            back_to_top_px: 300.0,
            parallax_factor: 0.4,
            passive: true,
            smooth_scroll: true,
        }
    }
}

/// Viewport reveal parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealCfg {
    /// Visible fraction in [0, 1] required to reveal an element.
    pub threshold: f64,
    /// Animation class used when `data-animation` is missing or empty.
    pub default_animation: String,
}

impl Default for RevealCfg {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            default_animation: "fade-up".into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterCfg {
    pub duration_ms: f64,
}

impl Default for CounterCfg {
    fn default() -> Self {
        Self {
            duration_ms: 2000.0,
        }
    }
}

impl Config {
    /// Reject values the components cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = self.reveal.threshold;
        if !(0.0..=1.0).contains(&t) {
            return Err(ConfigError::ThresholdOutOfRange(t));
        }
        let d = self.counter.duration_ms;
        if !d.is_finite() || d < 0.0 {
            return Err(ConfigError::InvalidDuration(d));
        }
        for (field, v) in [
            ("scroll.header_px", self.scroll.header_px),
            ("scroll.back_to_top_px", self.scroll.back_to_top_px),
            ("scroll.parallax_factor", self.scroll.parallax_factor),
        ] {
            if !v.is_finite() {
                return Err(ConfigError::NotFinite { field, value: v });
            }
        }

        let s = &self.selectors;
        let a = &self.attributes;
        let c = &self.classes;
        let names: &[(&'static str, &str)] = &[
            ("selectors.header", &s.header),
            ("selectors.hero_content", &s.hero_content),
            ("selectors.entrance_marker", &s.entrance_marker),
            ("selectors.reveal_marker", &s.reveal_marker),
            ("selectors.stat_number", &s.stat_number),
            ("selectors.hero_background", &s.hero_background),
            ("selectors.nav_toggle", &s.nav_toggle),
            ("selectors.nav", &s.nav),
            ("selectors.nav_link", &s.nav_link),
            ("selectors.year_id", &s.year_id),
            ("selectors.back_to_top", &s.back_to_top),
            ("attributes.delay", &a.delay),
            ("attributes.animation", &a.animation),
            ("attributes.target", &a.target),
            ("attributes.aria_expanded", &a.aria_expanded),
            ("classes.scrolled", &c.scrolled),
            ("classes.visible", &c.visible),
            ("classes.stats_container", &c.stats_container),
            ("classes.nav_open", &c.nav_open),
            ("classes.back_to_top_visible", &c.back_to_top_visible),
            ("reveal.default_animation", &self.reveal.default_animation),
        ];
        for &(field, value) in names {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyName(field));
            }
        }
        Ok(())
    }
}
