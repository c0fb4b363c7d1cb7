use std::rc::Rc;

use tracing::{debug, warn};

use super::{query_or_warn, warn_on_err};
use crate::config::TabConfig;
use crate::page::{Element, EventKind, Page, Selector};

const BEHAVIOR: &str = "tabs";

/// Wire every tab group so clicking button `i` activates button `i` and pane `i`.
///
/// Groups are independent. The initially active pair is whatever the markup
/// says; nothing is activated at install time.
pub fn install_tab_switchers<P: Page>(page: &P, cfg: &TabConfig) -> usize {
    let groups = query_or_warn(page, &Selector::class(&cfg.group_class), BEHAVIOR);

    for group in &groups {
        let buttons: Rc<[P::Element]> = match group.query_all(&Selector::class(&cfg.button_class)) {
            Ok(found) => found.into(),
            Err(e) => {
                warn!(error = %e, "tab button lookup failed");
                continue;
            }
        };
        let panes: Rc<[P::Element]> = match group.query_all(&Selector::class(&cfg.pane_class)) {
            Ok(found) => found.into(),
            Err(e) => {
                warn!(error = %e, "tab pane lookup failed");
                continue;
            }
        };
        if buttons.len() != panes.len() {
            warn!(
                buttons = buttons.len(),
                panes = panes.len(),
                "tab group has mismatched buttons and panes"
            );
        }

        for (index, button) in buttons.iter().enumerate() {
            let buttons = buttons.clone();
            let panes = panes.clone();
            let active = cfg.active_class.clone();
            warn_on_err(
                button.listen(
                    EventKind::Click,
                    Box::new(move || activate_tab(&buttons, &panes, index, &active)),
                ),
                BEHAVIOR,
                "attach click",
            );
        }
    }

    debug!(count = groups.len(), "tab groups wired");
    groups.len()
}

/// Make the pair at `index` the only active one in its group.
///
/// When there is no pane at `index` the group ends up with only the button
/// active.
pub fn activate_tab<E: Element>(buttons: &[E], panes: &[E], index: usize, active_class: &str) {
    for el in buttons.iter().chain(panes.iter()) {
        warn_on_err(el.remove_class(active_class), BEHAVIOR, "deactivate");
    }

    if let Some(button) = buttons.get(index) {
        warn_on_err(button.add_class(active_class), BEHAVIOR, "activate button");
    }
    match panes.get(index) {
        Some(pane) => warn_on_err(pane.add_class(active_class), BEHAVIOR, "activate pane"),
        None => warn!(index, panes = panes.len(), "no tab pane for clicked button"),
    }
}
