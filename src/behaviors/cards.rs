use std::time::Duration;

use tracing::debug;

use super::{query_or_warn, schedule, warn_on_err};
use crate::config::CardConfig;
use crate::page::{Element, Page, Selector, StyleProperty};

const BEHAVIOR: &str = "cards";

/// Fade cards in one after another, in document order.
///
/// Card `i` becomes opaque `i * stagger_ms` after this call. Every card gets
/// its own timer.
pub fn schedule_card_fade_in<P: Page>(
    page: &P,
    cfg: &CardConfig,
    timers: &mut Vec<P::Timer>,
) -> usize {
    let cards = query_or_warn(page, &Selector::class(&cfg.card_class), BEHAVIOR);
    let stagger = u64::from(cfg.stagger_ms);

    for (index, card) in cards.iter().enumerate() {
        let delay = Duration::from_millis(stagger.saturating_mul(index as u64));
        let el = card.clone();
        let opacity = cfg.visible_opacity.clone();
        schedule(
            page,
            delay,
            Box::new(move || {
                warn_on_err(
                    el.set_style(StyleProperty::Opacity, &opacity),
                    BEHAVIOR,
                    "fade in",
                )
            }),
            timers,
            BEHAVIOR,
        );
    }

    debug!(count = cards.len(), "card fade-in scheduled");
    cards.len()
}
