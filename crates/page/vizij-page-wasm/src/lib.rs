use std::rc::Rc;

use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use vizij_page_core::{Config, Document, Outputs, PageEvent};

mod dom;
mod logging;
mod runtime;

use runtime::Runtime;

/// Page effects bound to the current browser document.
#[wasm_bindgen]
pub struct VizijPage {
    runtime: Rc<Runtime>,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn outputs_to_js(out: &Outputs) -> Result<JsValue, JsError> {
    swb::to_value(out).map_err(|e| JsError::new(&format!("outputs error: {e}")))
}

#[wasm_bindgen]
impl VizijPage {
    /// Create a page handle. Pass a config object (partial objects fill in
    /// defaults) or undefined/null for defaults.
    /// Example:
    ///   new VizijPage({ scroll: { header_px: 80 } })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<VizijPage, JsError> {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();
        logging::install_default();

        let cfg: Config = if jsvalue_is_undefined_or_null(&config) {
            Config::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };
        cfg.validate()
            .map_err(|e| JsError::new(&format!("config error: {e}")))?;

        let window = web_sys::window().ok_or_else(|| JsError::new("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsError::new("window has no document"))?;

        Ok(VizijPage {
            runtime: Runtime::new(window, document, cfg),
        })
    }

    /// Wire listeners and run load-time effects. Waits for `DOMContentLoaded`
    /// while the document is still loading.
    pub fn mount(&self) {
        self.runtime.mount();
    }

    #[wasm_bindgen(js_name = is_mounted)]
    pub fn is_mounted(&self) -> bool {
        self.runtime.is_initialized()
    }

    /// Apply a scroll offset as if the window had scrolled to `scroll_y`.
    /// Returns the applied outputs.
    #[wasm_bindgen(js_name = handle_scroll)]
    pub fn handle_scroll(&self, scroll_y: f64) -> Result<JsValue, JsError> {
        let out = self.runtime.dispatch(PageEvent::Scroll { scroll_y });
        outputs_to_js(&out)
    }

    /// Deliver a click to the first element matching `selector`.
    #[wasm_bindgen(js_name = handle_click_selector)]
    pub fn handle_click_selector(&self, selector: &str) -> Result<JsValue, JsError> {
        let element = self
            .runtime
            .dom()
            .query_selector(selector)
            .ok_or_else(|| JsError::new(&format!("no element matches '{selector}'")))?;
        let out = self.runtime.dispatch(PageEvent::Click { element });
        outputs_to_js(&out)
    }
}

/// Mount a page for the lifetime of the document.
#[wasm_bindgen]
pub fn mount_page(config: JsValue) -> Result<(), JsError> {
    let page = VizijPage::new(config)?;
    page.mount();
    std::mem::forget(page);
    Ok(())
}

/// Route `log` records at or above `level` ("off", "error", "warn", "info",
/// "debug", "trace") to the browser console.
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsError> {
    let filter: log::LevelFilter = level
        .parse()
        .map_err(|_| JsError::new(&format!("unknown log level '{level}'")))?;
    logging::set_level(filter);
    Ok(())
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
