//! Easing curves for frame-driven tweens.

/// Cubic ease-out: `1 - (1 - t)^3`, with `t` clamped to [0, 1].
#[inline]
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Fraction of `duration_ms` covered by `elapsed_ms`, clamped to [0, 1].
/// A zero duration is complete immediately.
#[inline]
pub fn progress(elapsed_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    (elapsed_ms / duration_ms).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_and_midpoint() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(0.5), 0.875);
    }

    #[test]
    fn clamps_out_of_range() {
        assert_eq!(ease_out_cubic(-2.0), 0.0);
        assert_eq!(ease_out_cubic(3.0), 1.0);
        assert_eq!(progress(-10.0, 2000.0), 0.0);
        assert_eq!(progress(5000.0, 2000.0), 1.0);
        assert_eq!(progress(0.0, 0.0), 1.0);
    }

    #[test]
    fn monotonic_and_decelerating() {
        let samples: Vec<f64> = (0..=10).map(|i| ease_out_cubic(i as f64 / 10.0)).collect();
        for w in samples.windows(3) {
            assert!(w[1] >= w[0]);
            assert!(w[2] - w[1] <= w[1] - w[0] + 1e-12);
        }
    }
}
