//! Typed readers for the declared markup attributes.
//!
//! Missing or empty attributes resolve to their defaults silently. Values
//! that are present but malformed resolve to the same defaults with a
//! warning, so the page never ends up with a half-applied effect.

use log::warn;

use crate::error::MarkupError;
use crate::host::Document;
use crate::ids::ElementId;

/// Transition delay in milliseconds (`data-delay`). Defaults to 0.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DelayMs(pub f64);

impl DelayMs {
    /// CSS value for `transition-delay`, e.g. `150ms`.
    pub fn css(&self) -> String {
        format!("{}ms", format_number(self.0))
    }
}

/// Counter end value (`data-target`). Missing or empty means 0.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CounterTarget(pub f64);

/// Animation class (`data-animation`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationKind(pub String);

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn parse_delay(
    element: ElementId,
    attribute: &str,
    raw: Option<String>,
) -> Result<DelayMs, MarkupError> {
    let Some(raw) = non_empty(raw) else {
        return Ok(DelayMs::default());
    };
    match parse_finite(&raw) {
        Some(v) => Ok(DelayMs(v)),
        None => Err(MarkupError::InvalidDelay {
            element,
            attribute: attribute.to_string(),
            raw,
        }),
    }
}

pub fn parse_target(
    element: ElementId,
    attribute: &str,
    raw: Option<String>,
) -> Result<CounterTarget, MarkupError> {
    let Some(raw) = non_empty(raw) else {
        return Ok(CounterTarget::default());
    };
    match parse_finite(&raw) {
        Some(v) => Ok(CounterTarget(v)),
        None => Err(MarkupError::InvalidTarget {
            element,
            attribute: attribute.to_string(),
            raw,
        }),
    }
}

pub fn parse_animation(raw: Option<String>, default: &str) -> AnimationKind {
    AnimationKind(non_empty(raw).unwrap_or_else(|| default.to_string()))
}

/// Read `attribute` as a delay, falling back to 0ms.
pub fn read_delay(doc: &dyn Document, element: ElementId, attribute: &str) -> DelayMs {
    parse_delay(element, attribute, doc.attribute(element, attribute)).unwrap_or_else(|e| {
        warn!("{e}; using 0ms");
        DelayMs::default()
    })
}

/// Read `attribute` as a counter target, falling back to 0.
pub fn read_target(doc: &dyn Document, element: ElementId, attribute: &str) -> CounterTarget {
    parse_target(element, attribute, doc.attribute(element, attribute)).unwrap_or_else(|e| {
        warn!("{e}; counting to 0");
        CounterTarget::default()
    })
}

pub fn read_animation(
    doc: &dyn Document,
    element: ElementId,
    attribute: &str,
    default: &str,
) -> AnimationKind {
    parse_animation(doc.attribute(element, attribute), default)
}

/// Shortest round-trip rendering of a number for text and CSS values.
/// Whole numbers print without a fractional part and `-0` prints as `0`.
///
/// Matches JavaScript's `String(n)` for magnitudes in `[1e-6, 1e21)`.
/// Outside that range Rust never switches to exponent notation: `1e-7`
/// prints as `0.0000001` (JS: `1e-7`) and `1e21` as
/// `1000000000000000000000` (JS: `1e+21`).
pub fn format_number(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EL: ElementId = ElementId(3);

    #[test]
    fn delay_defaults_and_parses() {
        assert_eq!(parse_delay(EL, "data-delay", None), Ok(DelayMs(0.0)));
        assert_eq!(parse_delay(EL, "data-delay", Some("".into())), Ok(DelayMs(0.0)));
        assert_eq!(parse_delay(EL, "data-delay", Some(" 200 ".into())), Ok(DelayMs(200.0)));
        assert_eq!(DelayMs(200.0).css(), "200ms");
        assert_eq!(DelayMs(0.0).css(), "0ms");
    }

    #[test]
    fn malformed_delay_is_an_error() {
        let err = parse_delay(EL, "data-delay", Some("soon".into())).unwrap_err();
        assert_eq!(
            err.to_string(),
            "element#3: data-delay=\"soon\" is not a number of milliseconds"
        );
    }

    #[test]
    fn target_rejects_non_finite() {
        assert_eq!(parse_target(EL, "data-target", Some("250".into())), Ok(CounterTarget(250.0)));
        assert!(parse_target(EL, "data-target", Some("NaN".into())).is_err());
        assert!(parse_target(EL, "data-target", Some("inf".into())).is_err());
        assert!(parse_target(EL, "data-target", Some("12k".into())).is_err());
    }

    #[test]
    fn empty_animation_falls_back() {
        assert_eq!(parse_animation(Some("".into()), "fade-up").0, "fade-up");
        assert_eq!(parse_animation(None, "fade-up").0, "fade-up");
        assert_eq!(parse_animation(Some("zoom-in".into()), "fade-up").0, "zoom-in");
    }

    #[test]
    fn number_formatting() {
        assert_eq!(format_number(250.0), "250");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(-4.0), "-4");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(3.0 * 0.4), "1.2000000000000002");
    }

    #[test]
    fn number_formatting_outside_js_range_stays_positional() {
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(1e21), "1000000000000000000000");
        assert_eq!(format_number(0.000001), "0.000001");
        assert_eq!(format_number(1e-7), "0.0000001");
    }
}
