//! Engine: owns component state and routes page events to components.
//!
//! Methods:
//! - new/try_new, init (wire components against a Document), dispatch (scroll,
//!   intersection, click, frame), start_counter

use log::{debug, warn};

use crate::config::Config;
use crate::counter::CounterAnimator;
use crate::error::ConfigError;
use crate::host::{Calendar, Document};
use crate::ids::{ElementId, TaskId};
use crate::inputs::PageEvent;
use crate::markup::read_target;
use crate::menu::{MenuState, MobileMenu};
use crate::outputs::{HostRequest, Outputs};
use crate::reveal::{run_entrance, RevealState, ViewportRevealer};
use crate::scheduler::FrameScheduler;
use crate::scroll::{BackToTop, HeaderToggle, Parallax};
use crate::year::update_year;

#[derive(Debug)]
pub struct PageEngine {
    cfg: Config,
    initialized: bool,

    // Components (None when their elements are absent)
    header: Option<HeaderToggle>,
    parallax: Option<Parallax>,
    back_to_top: Option<BackToTop>,
    menu: Option<MobileMenu>,
    revealer: ViewportRevealer,
    counter: CounterAnimator,
    year: Option<ElementId>,

    scheduler: FrameScheduler,

    // Per-call outputs
    outputs: Outputs,
}

impl PageEngine {
    /// Create an engine without validating `cfg`.
    pub fn new(cfg: Config) -> Self {
        Self {
            revealer: ViewportRevealer::new(),
            counter: CounterAnimator::new(&cfg.counter),
            cfg,
            initialized: false,
            header: None,
            parallax: None,
            back_to_top: None,
            menu: None,
            year: None,
            scheduler: FrameScheduler::new(),
            outputs: Outputs::default(),
        }
    }

    pub fn try_new(cfg: Config) -> Result<Self, ConfigError> {
        cfg.validate()?;
        Ok(Self::new(cfg))
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Run every component's load-time setup against `doc`. The returned
    /// outputs include the listener and observation requests the host must
    /// wire up. A second call does nothing.
    pub fn init(&mut self, doc: &dyn Document, calendar: &dyn Calendar) -> &Outputs {
        self.outputs.clear();
        if self.initialized {
            warn!("page engine already initialised; ignoring init");
            return &self.outputs;
        }
        self.initialized = true;

        let cfg = &self.cfg;
        let out = &mut self.outputs;

        self.header = HeaderToggle::install(cfg, doc);
        let entrance = run_entrance(cfg, doc, out);
        let watched = self.revealer.watch(cfg, doc, out);
        self.parallax = Parallax::install(cfg, doc);
        self.menu = MobileMenu::install(cfg, doc, out);
        self.year = update_year(cfg, doc, calendar, out);
        self.back_to_top = BackToTop::install(cfg, doc, out);

        if self.header.is_some() || self.parallax.is_some() || self.back_to_top.is_some() {
            out.request(HostRequest::ListenScroll {
                passive: cfg.scroll.passive,
            });
        }

        debug!(
            "page init: header={} entrance={} watched={} parallax={} menu={} year={} back_to_top={}",
            self.header.is_some(),
            entrance,
            watched,
            self.parallax.is_some(),
            self.menu.is_some(),
            self.year.is_some(),
            self.back_to_top.is_some(),
        );
        &self.outputs
    }

    /// Route one host event. Events before `init` produce no outputs.
    pub fn dispatch(&mut self, doc: &dyn Document, event: &PageEvent) -> &Outputs {
        self.outputs.clear();
        if !self.initialized {
            return &self.outputs;
        }

        let cfg = &self.cfg;
        let out = &mut self.outputs;
        match event {
            PageEvent::Scroll { scroll_y } => {
                let y = *scroll_y;
                if let Some(h) = &self.header {
                    h.on_scroll(cfg, y, out);
                }
                if let Some(p) = &self.parallax {
                    p.on_scroll(cfg, y, out);
                }
                if let Some(b) = &self.back_to_top {
                    b.on_scroll(cfg, y, out);
                }
            }
            PageEvent::Intersection { entries } => {
                self.revealer.on_intersections(
                    cfg,
                    doc,
                    entries,
                    &self.counter,
                    &mut self.scheduler,
                    out,
                );
            }
            PageEvent::Click { element } => {
                let mut handled = false;
                if let Some(menu) = &mut self.menu {
                    handled |= menu.on_click(cfg, *element, out);
                }
                if let Some(b) = &self.back_to_top {
                    handled |= b.on_click(cfg, *element, out);
                }
                if !handled {
                    debug!("click on {element} has no handler");
                }
            }
            PageEvent::Frame { timestamp_ms } => {
                self.scheduler.tick(*timestamp_ms, out);
            }
        }
        &self.outputs
    }

    /// Start a counter on `element` outside the reveal path. No guard against
    /// an animation already running on the same element.
    pub fn start_counter(&mut self, doc: &dyn Document, element: ElementId) -> (TaskId, &Outputs) {
        self.outputs.clear();
        let target = read_target(doc, element, &self.cfg.attributes.target);
        let id = self
            .counter
            .start(element, target, &mut self.scheduler, &mut self.outputs);
        (id, &self.outputs)
    }

    pub fn menu_state(&self) -> Option<MenuState> {
        self.menu.as_ref().map(MobileMenu::state)
    }

    pub fn reveal_state(&self, element: ElementId) -> Option<RevealState> {
        self.revealer.state(element)
    }

    /// Elements still waiting to be revealed.
    pub fn watching(&self) -> usize {
        self.revealer.watching()
    }

    /// Counter animations still running.
    pub fn active_animations(&self) -> usize {
        self.scheduler.len()
    }

    pub fn outputs(&self) -> &Outputs {
        &self.outputs
    }
}

impl Default for PageEngine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
