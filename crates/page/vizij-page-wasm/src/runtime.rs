//! Browser runtime: forwards DOM events to the core engine and applies its
//! outputs.
//!
//! Closures hold a `Weak` back-reference, so dropping the last `Rc<Runtime>`
//! tears everything down. No `RefCell` borrow of the engine is held while
//! outputs are applied.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use log::warn;
use vizij_page_core::{
    Calendar, Config, ElementId, HostRequest, IntersectionEntry, Outputs, PageEngine, PageEvent,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Event, EventTarget, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ScrollBehavior, ScrollToOptions, Window,
};

use crate::dom::DomDocument;

/// Current year from the JS `Date` clock.
struct BrowserCalendar;

impl Calendar for BrowserCalendar {
    fn current_year(&self) -> i32 {
        js_sys::Date::new_0().get_full_year() as i32
    }
}

type EventClosure = Closure<dyn FnMut(Event)>;
type IntersectClosure = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: EventClosure,
}

pub struct Runtime {
    window: Window,
    dom: DomDocument,
    engine: RefCell<PageEngine>,
    listeners: RefCell<Vec<Listener>>,
    observer: RefCell<Option<(IntersectionObserver, IntersectClosure)>>,
    on_frame: RefCell<Option<Closure<dyn FnMut(f64)>>>,
    frame_pending: Cell<bool>,
}

impl Runtime {
    pub fn new(window: Window, document: web_sys::Document, cfg: Config) -> Rc<Self> {
        Rc::new(Self {
            window,
            dom: DomDocument::new(document),
            engine: RefCell::new(PageEngine::new(cfg)),
            listeners: RefCell::new(Vec::new()),
            observer: RefCell::new(None),
            on_frame: RefCell::new(None),
            frame_pending: Cell::new(false),
        })
    }

    pub fn dom(&self) -> &DomDocument {
        &self.dom
    }

    pub fn is_initialized(&self) -> bool {
        self.engine.borrow().is_initialized()
    }

    pub fn document_loading(&self) -> bool {
        self.dom.document().ready_state() == "loading"
    }

    /// Initialise now, or on `DOMContentLoaded` while the document is loading.
    pub fn mount(self: &Rc<Self>) {
        if !self.document_loading() {
            self.init();
            return;
        }
        let weak = Rc::downgrade(self);
        let callback = EventClosure::new(move |_: Event| {
            if let Some(rt) = weak.upgrade() {
                rt.init();
            }
        });
        let target: EventTarget = self.dom.document().clone().into();
        self.listen(target, "DOMContentLoaded", callback, None);
    }

    pub fn init(self: &Rc<Self>) -> Outputs {
        let out = self
            .engine
            .borrow_mut()
            .init(&self.dom, &BrowserCalendar)
            .clone();
        self.apply(&out);
        out
    }

    pub fn dispatch(self: &Rc<Self>, event: PageEvent) -> Outputs {
        let out = self.engine.borrow_mut().dispatch(&self.dom, &event).clone();
        self.apply(&out);
        out
    }

    fn apply(self: &Rc<Self>, out: &Outputs) {
        for m in &out.mutations {
            self.dom.apply(m);
        }
        for req in &out.requests {
            match req {
                HostRequest::ListenScroll { passive } => self.listen_scroll(*passive),
                HostRequest::ListenClick {
                    element,
                    prevent_default,
                } => self.listen_click(*element, *prevent_default),
                HostRequest::Observe { element } => self.observe(*element),
                HostRequest::Unobserve { element } => self.unobserve(*element),
                HostRequest::RequestFrame => self.request_frame(),
                HostRequest::ScrollTo { top, smooth } => self.scroll_to(*top, *smooth),
            }
        }
    }

    fn listen(
        &self,
        target: EventTarget,
        kind: &'static str,
        callback: EventClosure,
        options: Option<&AddEventListenerOptions>,
    ) {
        let f = callback.as_ref().unchecked_ref();
        let res = match options {
            Some(opts) => {
                target.add_event_listener_with_callback_and_add_event_listener_options(kind, f, opts)
            }
            None => target.add_event_listener_with_callback(kind, f),
        };
        match res {
            Ok(()) => self.listeners.borrow_mut().push(Listener {
                target,
                kind,
                callback,
            }),
            Err(e) => warn!("addEventListener({kind}) failed: {e:?}"),
        }
    }

    fn listen_scroll(self: &Rc<Self>, passive: bool) {
        let weak = Rc::downgrade(self);
        let callback = EventClosure::new(move |_: Event| {
            let Some(rt) = weak.upgrade() else {
                return;
            };
            match rt.window.scroll_y() {
                Ok(scroll_y) => {
                    rt.dispatch(PageEvent::Scroll { scroll_y });
                }
                Err(e) => warn!("scrollY unavailable: {e:?}"),
            }
        });
        let opts = AddEventListenerOptions::new();
        opts.set_passive(passive);
        let target: EventTarget = self.window.clone().into();
        self.listen(target, "scroll", callback, Some(&opts));
    }

    fn listen_click(self: &Rc<Self>, element: ElementId, prevent_default: bool) {
        let Some(el) = self.dom.element(element) else {
            return;
        };
        let weak = Rc::downgrade(self);
        let callback = EventClosure::new(move |ev: Event| {
            if prevent_default {
                ev.prevent_default();
            }
            if let Some(rt) = weak.upgrade() {
                rt.dispatch(PageEvent::Click { element });
            }
        });
        self.listen(el.into(), "click", callback, None);
    }

    fn observer(self: &Rc<Self>) -> Option<IntersectionObserver> {
        if let Some((obs, _)) = self.observer.borrow().as_ref() {
            return Some(obs.clone());
        }

        let weak: Weak<Self> = Rc::downgrade(self);
        let callback = IntersectClosure::new(move |entries: js_sys::Array, _: IntersectionObserver| {
            let Some(rt) = weak.upgrade() else {
                return;
            };
            let entries = entries
                .iter()
                .filter_map(|v| v.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|e| IntersectionEntry {
                    element: rt.dom.intern(e.target()),
                    is_intersecting: e.is_intersecting(),
                    ratio: e.intersection_ratio(),
                })
                .collect();
            rt.dispatch(PageEvent::Intersection { entries });
        });

        let init = IntersectionObserverInit::new();
        let threshold = self.engine.borrow().config().reveal.threshold;
        init.set_threshold(&JsValue::from_f64(threshold));
        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(obs) => {
                *self.observer.borrow_mut() = Some((obs.clone(), callback));
                Some(obs)
            }
            Err(e) => {
                warn!("IntersectionObserver unavailable: {e:?}");
                None
            }
        }
    }

    fn observe(self: &Rc<Self>, element: ElementId) {
        if let (Some(obs), Some(el)) = (self.observer(), self.dom.element(element)) {
            obs.observe(&el);
        }
    }

    fn unobserve(&self, element: ElementId) {
        let observer = self.observer.borrow();
        if let (Some((obs, _)), Some(el)) = (observer.as_ref(), self.dom.element(element)) {
            obs.unobserve(&el);
        }
    }

    /// Arm one `requestAnimationFrame`; further requests before it fires are
    /// coalesced.
    fn request_frame(self: &Rc<Self>) {
        if self.frame_pending.get() {
            return;
        }
        if self.on_frame.borrow().is_none() {
            let weak = Rc::downgrade(self);
            let callback = Closure::<dyn FnMut(f64)>::new(move |timestamp_ms: f64| {
                if let Some(rt) = weak.upgrade() {
                    rt.frame_pending.set(false);
                    rt.dispatch(PageEvent::Frame { timestamp_ms });
                }
            });
            *self.on_frame.borrow_mut() = Some(callback);
        }

        let on_frame = self.on_frame.borrow();
        if let Some(callback) = on_frame.as_ref() {
            match self
                .window
                .request_animation_frame(callback.as_ref().unchecked_ref())
            {
                Ok(_) => self.frame_pending.set(true),
                Err(e) => warn!("requestAnimationFrame failed: {e:?}"),
            }
        }
    }

    fn scroll_to(&self, top: f64, smooth: bool) {
        let opts = ScrollToOptions::new();
        opts.set_top(top);
        opts.set_behavior(if smooth {
            ScrollBehavior::Smooth
        } else {
            ScrollBehavior::Auto
        });
        self.window.scroll_to_with_scroll_to_options(&opts);
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        for l in self.listeners.get_mut().drain(..) {
            if let Err(e) = l
                .target
                .remove_event_listener_with_callback(l.kind, l.callback.as_ref().unchecked_ref())
            {
                warn!("removeEventListener({}) failed: {e:?}", l.kind);
            }
        }
        if let Some((obs, _)) = self.observer.get_mut().take() {
            obs.disconnect();
        }
    }
}
