//! Vizij Page Core (host-agnostic)
//!
//! Scroll-driven effects for Vizij landing pages: header style, entrance and
//! viewport reveals, counter animations, parallax, mobile menu, footer year
//! and back-to-top. The engine reads the page through the [`Document`] and
//! [`Calendar`] traits, consumes [`PageEvent`]s and emits [`Outputs`]
//! (mutations plus host requests). Adapters (wasm) own the real DOM.

pub mod config;
pub mod counter;
pub mod easing;
pub mod engine;
pub mod error;
pub mod host;
pub mod ids;
pub mod inputs;
pub mod markup;
pub mod memory;
pub mod menu;
pub mod outputs;
pub mod reveal;
pub mod scheduler;
pub mod scroll;
pub mod year;

// Re-exports for consumers (adapters)
pub use config::Config;
pub use counter::CounterAnimator;
pub use engine::PageEngine;
pub use error::{ConfigError, MarkupError};
pub use host::{Calendar, Document, FixedCalendar};
pub use ids::{ElementId, TaskId};
pub use inputs::{IntersectionEntry, PageEvent};
pub use memory::{MemoryDocument, NodeSpec};
pub use menu::MenuState;
pub use outputs::{HostRequest, Mutation, Outputs};
pub use reveal::RevealState;
pub use scheduler::FrameScheduler;
