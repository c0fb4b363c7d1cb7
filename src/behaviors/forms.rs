use tracing::{debug, warn};

use super::{query_or_warn, warn_on_err};
use crate::config::FormConfig;
use crate::page::{Element, EventKind, Page, Selector};

const BEHAVIOR: &str = "forms";

/// Disable each form's submit control as soon as the form is submitted.
///
/// The listener runs before the browser's native submission and never
/// re-enables the control; the next page load does.
pub fn guard_form_submissions<P: Page>(page: &P, cfg: &FormConfig) -> usize {
    let forms = query_or_warn(page, &Selector::tag("form"), BEHAVIOR);
    let mut attached = 0;

    for form in &forms {
        let target = form.clone();
        let label = cfg.busy_label_html.clone();
        match form.listen(
            EventKind::Submit,
            Box::new(move || {
                guard_submission(&target, &label);
            }),
        ) {
            Ok(()) => attached += 1,
            Err(e) => warn!(error = %e, "failed to attach submit guard"),
        }
    }

    debug!(count = attached, "form submit guards attached");
    attached
}

/// Disable the form's submit control and swap in the busy label.
///
/// The control is looked up at submission time. Returns `false` when the form
/// has none, in which case nothing changes.
pub fn guard_submission<E: Element>(form: &E, busy_label_html: &str) -> bool {
    let button = match form.query_first(&Selector::SubmitButton) {
        Ok(Some(button)) => button,
        Ok(None) => {
            debug!("submitted form has no submit control");
            return false;
        }
        Err(e) => {
            warn!(error = %e, "submit control lookup failed");
            return false;
        }
    };

    warn_on_err(button.set_disabled(true), BEHAVIOR, "disable");
    warn_on_err(button.set_inner_html(busy_label_html), BEHAVIOR, "busy label");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryElement, MemoryPage};

    fn form_with_button() -> (MemoryElement, MemoryElement) {
        let button = MemoryElement::new("button")
            .with_attr("type", "submit")
            .with_inner_html("Enregistrer");
        let form = MemoryElement::new("form")
            .with_child(MemoryElement::new("input").with_attr("name", "immatriculation"))
            .with_child(button.clone());
        (form, button)
    }

    #[test]
    fn submit_disables_button_and_sets_busy_label() {
        let page = MemoryPage::new();
        let (form, button) = form_with_button();
        page.body().append_child(form.clone());

        let cfg = FormConfig::default();
        assert_eq!(guard_form_submissions(&page, &cfg), 1);
        assert!(!button.is_disabled());

        assert_eq!(form.dispatch(EventKind::Submit), 1);
        assert!(button.is_disabled());
        assert_eq!(button.inner_html(), cfg.busy_label_html);
    }

    #[test]
    fn second_submit_leaves_button_disabled() {
        let page = MemoryPage::new();
        let (form, button) = form_with_button();
        page.body().append_child(form.clone());
        let cfg = FormConfig::default();
        guard_form_submissions(&page, &cfg);

        form.dispatch(EventKind::Submit);
        form.dispatch(EventKind::Submit);
        assert!(button.is_disabled());
        assert_eq!(button.inner_html(), cfg.busy_label_html);
    }

    #[test]
    fn other_buttons_are_untouched() {
        let page = MemoryPage::new();
        let (form, button) = form_with_button();
        let cancel = MemoryElement::new("button")
            .with_attr("type", "button")
            .with_inner_html("Annuler");
        form.append_child(cancel.clone());
        page.body().append_child(form.clone());
        guard_form_submissions(&page, &FormConfig::default());

        form.dispatch(EventKind::Submit);
        assert!(button.is_disabled());
        assert!(!cancel.is_disabled());
        assert_eq!(cancel.inner_html(), "Annuler");
    }

    #[test]
    fn form_without_submit_control_is_a_no_op() {
        let page = MemoryPage::new();
        let form = MemoryElement::new("form")
            .with_child(MemoryElement::new("button").with_attr("type", "button"));
        page.body().append_child(form.clone());
        guard_form_submissions(&page, &FormConfig::default());

        assert_eq!(form.dispatch(EventKind::Submit), 1);
        assert!(!guard_submission(&form, "busy"));
    }

    #[test]
    fn submit_control_added_after_install_is_found() {
        let page = MemoryPage::new();
        let form = MemoryElement::new("form");
        page.body().append_child(form.clone());
        guard_form_submissions(&page, &FormConfig::default());

        let late = MemoryElement::new("button").with_attr("type", "submit");
        form.append_child(late.clone());
        form.dispatch(EventKind::Submit);
        assert!(late.is_disabled());
    }

    #[test]
    fn each_form_guards_its_own_button() {
        let page = MemoryPage::new();
        let (form_a, button_a) = form_with_button();
        let (form_b, button_b) = form_with_button();
        page.body().append_child(form_a.clone());
        page.body().append_child(form_b);
        assert_eq!(guard_form_submissions(&page, &FormConfig::default()), 2);

        form_a.dispatch(EventKind::Submit);
        assert!(button_a.is_disabled());
        assert!(!button_b.is_disabled());
    }
}
