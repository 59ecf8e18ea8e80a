//! Entrance and viewport reveal animations.
//!
//! - `EntranceRevealer` marks the hero elements visible once at load.
//! - `ViewportRevealer` watches marked elements and reveals each one the
//!   first time enough of it is visible, then stops watching it.

use hashbrown::HashMap;
use log::debug;

use crate::config::Config;
use crate::counter::CounterAnimator;
use crate::host::Document;
use crate::ids::ElementId;
use crate::inputs::IntersectionEntry;
use crate::markup::{read_animation, read_delay, read_target};
use crate::outputs::{HostRequest, Outputs};
use crate::scheduler::FrameScheduler;

const TRANSITION_DELAY: &str = "transition-delay";

/// Reveal the `[data-animation]` elements inside the hero block.
/// Returns how many elements were revealed.
pub fn run_entrance(cfg: &Config, doc: &dyn Document, out: &mut Outputs) -> usize {
    let Some(hero) = doc.query_selector(&cfg.selectors.hero_content) else {
        return 0;
    };
    let elements = doc.query_within(hero, &cfg.selectors.entrance_marker);
    for &el in &elements {
        let delay = read_delay(doc, el, &cfg.attributes.delay);
        out.set_style(el, TRANSITION_DELAY, delay.css());
        out.add_class(el, &cfg.classes.visible);
    }
    elements.len()
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealState {
    Watching,
    Revealed,
}

/// Fire-once reveal tracking. The visibility threshold belongs to the host's
/// observer: any entry reported as intersecting reveals its element, whatever
/// its ratio.
#[derive(Debug, Default)]
pub struct ViewportRevealer {
    states: HashMap<ElementId, RevealState>,
}

impl ViewportRevealer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start watching every reveal-marked element. Returns the number of
    /// newly watched elements.
    pub fn watch(&mut self, cfg: &Config, doc: &dyn Document, out: &mut Outputs) -> usize {
        let mut added = 0;
        for el in doc.query_selector_all(&cfg.selectors.reveal_marker) {
            if self.states.contains_key(&el) {
                continue;
            }
            self.states.insert(el, RevealState::Watching);
            out.request(HostRequest::Observe { element: el });
            added += 1;
        }
        added
    }

    /// Process one batch of intersection entries in delivery order.
    pub fn on_intersections(
        &mut self,
        cfg: &Config,
        doc: &dyn Document,
        entries: &[IntersectionEntry],
        counter: &CounterAnimator,
        scheduler: &mut FrameScheduler,
        out: &mut Outputs,
    ) {
        for entry in entries {
            if !entry.is_intersecting {
                continue;
            }
            let el = entry.element;
            match self.states.get_mut(&el) {
                Some(state @ RevealState::Watching) => *state = RevealState::Revealed,
                _ => continue,
            }

            let delay = read_delay(doc, el, &cfg.attributes.delay);
            let kind = read_animation(
                doc,
                el,
                &cfg.attributes.animation,
                &cfg.reveal.default_animation,
            );
            debug!("reveal {el}: {} after {}", kind.0, delay.css());
            out.set_style(el, TRANSITION_DELAY, delay.css());
            out.add_class(el, &kind.0);
            out.add_class(el, &cfg.classes.visible);

            if doc.has_class(el, &cfg.classes.stats_container) {
                for stat in doc.query_within(el, &cfg.selectors.stat_number) {
                    let target = read_target(doc, stat, &cfg.attributes.target);
                    counter.start(stat, target, scheduler, out);
                }
            }

            out.request(HostRequest::Unobserve { element: el });
        }
    }

    pub fn state(&self, element: ElementId) -> Option<RevealState> {
        self.states.get(&element).copied()
    }

    /// Elements still waiting for their first intersection.
    pub fn watching(&self) -> usize {
        self.states
            .values()
            .filter(|s| **s == RevealState::Watching)
            .count()
    }
}
