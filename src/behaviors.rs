//! The five page behaviors. Each one touches its own region of the page and
//! reports how many elements it wired up.

pub mod cards;
pub mod flash;
pub mod forms;
pub mod hover;
pub mod tabs;

use std::time::Duration;

use tracing::warn;

use crate::error::PageError;
use crate::page::{Page, Selector, Task};

pub(crate) fn query_or_warn<P: Page>(
    page: &P,
    selector: &Selector,
    behavior: &'static str,
) -> Vec<P::Element> {
    match page.query_all(selector) {
        Ok(found) => found,
        Err(e) => {
            warn!(behavior, selector = %selector.to_css(), error = %e, "element lookup failed");
            Vec::new()
        }
    }
}

pub(crate) fn schedule<P: Page>(
    page: &P,
    delay: Duration,
    task: Task,
    timers: &mut Vec<P::Timer>,
    behavior: &'static str,
) {
    match page.set_timeout(delay, task) {
        Ok(timer) => timers.push(timer),
        Err(e) => warn!(behavior, error = %e, "failed to schedule timer"),
    }
}

pub(crate) fn warn_on_err(result: Result<(), PageError>, behavior: &'static str, action: &'static str) {
    if let Err(e) = result {
        warn!(behavior, action, error = %e, "page update failed");
    }
}
