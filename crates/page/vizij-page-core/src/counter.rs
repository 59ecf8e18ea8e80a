//! Counter animation: eased count-up of numeric text.

use log::debug;

use crate::config::CounterCfg;
use crate::easing::ease_out_cubic;
use crate::ids::{ElementId, TaskId};
use crate::markup::{format_number, CounterTarget};
use crate::outputs::Outputs;
use crate::scheduler::FrameScheduler;

/// Displayed value at `progress`: `floor(ease_out_cubic(progress) * target)`.
#[inline]
pub fn counter_value(progress: f64, target: f64) -> f64 {
    (ease_out_cubic(progress) * target).floor()
}

#[derive(Clone, Copy, Debug)]
pub struct CounterAnimator {
    duration_ms: f64,
}

impl CounterAnimator {
    pub fn new(cfg: &CounterCfg) -> Self {
        Self {
            duration_ms: cfg.duration_ms,
        }
    }

    /// Start counting `element` up from 0 to `target`. The last frame writes
    /// the exact target. Starting twice on one element runs two independent
    /// tasks.
    pub fn start(
        &self,
        element: ElementId,
        target: CounterTarget,
        scheduler: &mut FrameScheduler,
        out: &mut Outputs,
    ) -> TaskId {
        let target = target.0;
        debug!("counter {element}: 0 -> {target} over {}ms", self.duration_ms);
        scheduler.schedule(
            self.duration_ms,
            Box::new(move |p, out| out.set_text(element, format_number(counter_value(p, target)))),
            Box::new(move |out| out.set_text(element, format_number(target))),
            out,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(target: f64, frames: &[f64]) -> Vec<String> {
        let mut s = FrameScheduler::new();
        let mut out = Outputs::default();
        let el = ElementId(1);
        CounterAnimator::new(&CounterCfg::default()).start(el, CounterTarget(target), &mut s, &mut out);
        frames
            .iter()
            .map(|&ts| {
                out.clear();
                s.tick(ts, &mut out);
                out.text_of(el).unwrap_or_default().to_string()
            })
            .collect()
    }

    #[test]
    fn midpoint_of_100_is_87() {
        assert_eq!(counter_value(0.5, 100.0), 87.0);
        assert_eq!(run(100.0, &[0.0, 1000.0]), vec!["0", "87"]);
    }

    #[test]
    fn ends_exactly_on_target() {
        let texts = run(250.0, &[10.0, 500.0, 1999.0, 2010.0]);
        assert_eq!(texts.last().map(String::as_str), Some("250"));
        assert_eq!(texts[2], "249");
    }

    #[test]
    fn fractional_target_keeps_fraction_at_end() {
        let texts = run(99.5, &[0.0, 2000.0]);
        assert_eq!(texts, vec!["0", "99.5"]);
    }

    #[test]
    fn zero_target_stays_zero() {
        assert_eq!(run(0.0, &[0.0, 700.0, 2000.0]), vec!["0", "0", "0"]);
    }
}
