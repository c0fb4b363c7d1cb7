use std::time::Duration;

use tracing::debug;

use super::{query_or_warn, schedule, warn_on_err};
use crate::config::FlashConfig;
use crate::page::{Element, Page, Selector};

const BEHAVIOR: &str = "flash";

/// Show every flash message shortly after load and hide it again later.
///
/// Both delays are measured from this call, not staggered per message.
/// Messages stay in the document once hidden.
pub fn schedule_flash_messages<P: Page>(
    page: &P,
    cfg: &FlashConfig,
    timers: &mut Vec<P::Timer>,
) -> usize {
    let messages = query_or_warn(page, &Selector::class(&cfg.message_class), BEHAVIOR);
    let show_after = Duration::from_millis(u64::from(cfg.show_after_ms));
    let hide_after = Duration::from_millis(u64::from(cfg.hide_after_ms));

    for message in &messages {
        let el = message.clone();
        let class = cfg.shown_class.clone();
        schedule(
            page,
            show_after,
            Box::new(move || warn_on_err(el.add_class(&class), BEHAVIOR, "show")),
            timers,
            BEHAVIOR,
        );

        let el = message.clone();
        let class = cfg.shown_class.clone();
        schedule(
            page,
            hide_after,
            Box::new(move || warn_on_err(el.remove_class(&class), BEHAVIOR, "hide")),
            timers,
            BEHAVIOR,
        );
    }

    debug!(count = messages.len(), "flash messages scheduled");
    messages.len()
}
