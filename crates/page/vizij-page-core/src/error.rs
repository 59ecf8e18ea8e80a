//! Error types for vizij-page-core.
//!
//! Only configuration can fail outright. Markup errors are reported to
//! callers that then substitute the documented default.

use thiserror::Error;

use crate::ids::ElementId;

/// Rejected [`crate::Config`] values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("reveal.threshold must be within [0, 1], got {0}")]
    ThresholdOutOfRange(f64),
    #[error("counter.duration_ms must be finite and non-negative, got {0}")]
    InvalidDuration(f64),
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f64 },
    #[error("{0} must not be empty")]
    EmptyName(&'static str),
}

/// A declared attribute that could not be parsed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MarkupError {
    #[error("{element}: {attribute}=\"{raw}\" is not a number of milliseconds")]
    InvalidDelay {
        element: ElementId,
        attribute: String,
        raw: String,
    },
    #[error("{element}: {attribute}=\"{raw}\" is not a number")]
    InvalidTarget {
        element: ElementId,
        attribute: String,
        raw: String,
    },
}
