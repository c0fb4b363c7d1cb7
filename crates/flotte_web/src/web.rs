use std::cell::RefCell;

use flotte_ui::{format_currency, BehaviorConfig, Installation, PageBehaviors};
use tracing::{info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::bridge::{format_date_for_script, page_date_from_parts, WebConfig, CONFIG_ELEMENT_ID};

mod console;
mod dom;

pub use dom::{WebElement, WebPage};

thread_local! {
    static INSTALLED: RefCell<Option<(WebPage, Installation<i32>)>> = const { RefCell::new(None) };
}

/// Run the page behaviors once the document is parsed.
#[wasm_bindgen]
pub fn start() {
    let page = match WebPage::from_window() {
        Ok(page) => page,
        Err(e) => {
            web_sys::console::warn_1(&format!("flotte_ui: {e}").into());
            return;
        }
    };

    if page.document().ready_state() == "loading" {
        let document = page.document().clone();
        let cb = Closure::once_into_js(move || run(page));
        if document
            .add_event_listener_with_callback("DOMContentLoaded", cb.unchecked_ref())
            .is_err()
        {
            web_sys::console::warn_1(&"flotte_ui: failed to wait for DOMContentLoaded".into());
        }
    } else {
        // The module loaded after parsing finished; DOMContentLoaded already fired.
        run(page);
    }
}

fn run(page: WebPage) {
    let text = page.element_text(CONFIG_ELEMENT_ID);
    let (cfg, cfg_err) = match WebConfig::from_page_text(text.as_deref()) {
        Ok(cfg) => (cfg, None),
        Err(e) => (WebConfig::default(), Some(e)),
    };
    console::init_logging(cfg.max_level());
    if let Some(e) = cfg_err {
        warn!(error = %e, "ignoring page config, using defaults");
    }

    install(page, cfg.behaviors);
}

fn install(page: WebPage, cfg: BehaviorConfig) {
    let installed = PageBehaviors::new(cfg).install(&page);
    INSTALLED.with(|slot| *slot.borrow_mut() = Some((page, installed)));
}

/// Cancel the flash and card transitions that have not fired yet.
#[wasm_bindgen(js_name = cancelPendingBehaviors)]
pub fn cancel_pending_behaviors() {
    INSTALLED.with(|slot| {
        if let Some((page, installed)) = slot.borrow_mut().as_mut() {
            let n = installed.timers().len();
            installed.cancel_pending(&*page);
            info!(timers = n, "pending page transitions cancelled");
        }
    });
}

/// `formatDate(date, format)` for page scripts.
///
/// Unknown format keys return the date's own `toString()`, zone included.
#[wasm_bindgen(js_name = formatDate)]
pub fn format_date_js(date: &js_sys::Date, format: &str) -> String {
    let parts = if date.get_time().is_nan() {
        None
    } else {
        page_date_from_parts(
            date.get_full_year(),
            date.get_month(),
            date.get_date(),
            date.get_hours(),
            date.get_minutes(),
            date.get_seconds(),
        )
    };
    format_date_for_script(parts, format).unwrap_or_else(|| String::from(date.to_string()))
}

/// `formatCurrency(value)` for page scripts.
#[wasm_bindgen(js_name = formatCurrency)]
pub fn format_currency_js(value: f64) -> String {
    format_currency(value)
}
