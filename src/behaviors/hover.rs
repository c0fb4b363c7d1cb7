use tracing::debug;

use super::{query_or_warn, warn_on_err};
use crate::config::HoverConfig;
use crate::page::{Element, EventKind, Page, Selector, StyleProperty};

const BEHAVIOR: &str = "hover";

/// Lift hoverable elements while the pointer is over them.
///
/// An element matching several hoverable classes is wired once.
pub fn install_hover_elevation<P: Page>(page: &P, cfg: &HoverConfig) -> usize {
    let selector = Selector::any_of_classes(cfg.classes.iter().cloned());
    let elements = query_or_warn(page, &selector, BEHAVIOR);

    for element in &elements {
        let el = element.clone();
        let shadow = cfg.shadow.clone();
        let transform = cfg.transform.clone();
        warn_on_err(
            element.listen(
                EventKind::PointerEnter,
                Box::new(move || elevate(&el, &shadow, &transform)),
            ),
            BEHAVIOR,
            "attach enter",
        );

        let el = element.clone();
        warn_on_err(
            element.listen(EventKind::PointerLeave, Box::new(move || settle(&el))),
            BEHAVIOR,
            "attach leave",
        );
    }

    debug!(count = elements.len(), "hover elevation attached");
    elements.len()
}

pub fn elevate<E: Element>(el: &E, shadow: &str, transform: &str) {
    warn_on_err(el.set_style(StyleProperty::BoxShadow, shadow), BEHAVIOR, "shadow");
    warn_on_err(
        el.set_style(StyleProperty::Transform, transform),
        BEHAVIOR,
        "transform",
    );
}

/// Drop the inline values so the stylesheet presentation applies again.
pub fn settle<E: Element>(el: &E) {
    warn_on_err(el.clear_style(StyleProperty::BoxShadow), BEHAVIOR, "shadow");
    warn_on_err(el.clear_style(StyleProperty::Transform), BEHAVIOR, "transform");
}
