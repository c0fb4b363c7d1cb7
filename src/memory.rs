//! In-memory page backend.
//!
//! A small element tree plus a virtual clock. Timers only fire when the clock
//! is advanced, so time-based behaviors can be checked deterministically on
//! the host.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use hashbrown::HashMap;

use crate::error::PageError;
use crate::page::{Element, EventKind, Handler, Page, Selector, StyleProperty, Task};

struct Node {
    tag: String,
    attrs: HashMap<String, String>,
    classes: Vec<String>,
    styles: HashMap<StyleProperty, String>,
    disabled: bool,
    inner_html: String,
    children: Vec<MemoryElement>,
    listeners: Vec<(EventKind, Handler)>,
}

#[derive(Clone)]
pub struct MemoryElement(Rc<RefCell<Node>>);

impl fmt::Debug for MemoryElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.0.borrow();
        f.debug_struct("MemoryElement")
            .field("tag", &node.tag)
            .field("classes", &node.classes)
            .field("children", &node.children.len())
            .finish()
    }
}

impl MemoryElement {
    pub fn new(tag: &str) -> Self {
        Self(Rc::new(RefCell::new(Node {
            tag: tag.to_ascii_lowercase(),
            attrs: HashMap::new(),
            classes: Vec::new(),
            styles: HashMap::new(),
            disabled: false,
            inner_html: String::new(),
            children: Vec::new(),
            listeners: Vec::new(),
        })))
    }

    pub fn with_class(self, class: &str) -> Self {
        self.push_class(class);
        self
    }

    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.0
            .borrow_mut()
            .attrs
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_inner_html(self, html: &str) -> Self {
        self.0.borrow_mut().inner_html = html.to_string();
        self
    }

    pub fn with_child(self, child: MemoryElement) -> Self {
        self.append_child(child);
        self
    }

    pub fn append_child(&self, child: MemoryElement) {
        self.0.borrow_mut().children.push(child);
    }

    pub fn remove_child(&self, child: &MemoryElement) {
        self.0
            .borrow_mut()
            .children
            .retain(|c| !Rc::ptr_eq(&c.0, &child.0));
    }

    pub fn tag(&self) -> String {
        self.0.borrow().tag.clone()
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        self.0.borrow().attrs.get(name).cloned()
    }

    pub fn classes(&self) -> Vec<String> {
        self.0.borrow().classes.clone()
    }

    pub fn inner_html(&self) -> String {
        self.0.borrow().inner_html.clone()
    }

    pub fn listener_count(&self, event: EventKind) -> usize {
        self.0
            .borrow()
            .listeners
            .iter()
            .filter(|(kind, _)| *kind == event)
            .count()
    }

    pub fn same_node(&self, other: &MemoryElement) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Run every listener for `event`, in attachment order. Returns how many ran.
    pub fn dispatch(&self, event: EventKind) -> usize {
        // Listeners are taken out while they run so they can freely borrow this node.
        let mut listeners = std::mem::take(&mut self.0.borrow_mut().listeners);
        let mut ran = 0;
        for (kind, handler) in listeners.iter_mut() {
            if *kind == event {
                handler();
                ran += 1;
            }
        }

        let mut node = self.0.borrow_mut();
        let attached_meanwhile = std::mem::replace(&mut node.listeners, listeners);
        node.listeners.extend(attached_meanwhile);
        ran
    }

    fn push_class(&self, class: &str) {
        let mut node = self.0.borrow_mut();
        if !node.classes.iter().any(|c| c == class) {
            node.classes.push(class.to_string());
        }
    }

    fn matches(&self, selector: &Selector) -> bool {
        let node = self.0.borrow();
        match selector {
            Selector::Class(name) => node.classes.iter().any(|c| c == name),
            Selector::Tag(name) => node.tag.eq_ignore_ascii_case(name),
            Selector::SubmitButton => {
                node.tag == "button" && node.attrs.get("type").map(String::as_str) == Some("submit")
            }
            Selector::AnyOf(parts) => {
                drop(node);
                parts.iter().any(|p| self.matches(p))
            }
        }
    }

    fn collect(&self, selector: &Selector, out: &mut Vec<MemoryElement>) {
        let children = self.0.borrow().children.clone();
        for child in children {
            if child.matches(selector) {
                out.push(child.clone());
            }
            child.collect(selector, out);
        }
    }
}

impl Element for MemoryElement {
    fn add_class(&self, class: &str) -> Result<(), PageError> {
        self.push_class(class);
        Ok(())
    }

    fn remove_class(&self, class: &str) -> Result<(), PageError> {
        self.0.borrow_mut().classes.retain(|c| c != class);
        Ok(())
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|c| c == class)
    }

    fn set_style(&self, property: StyleProperty, value: &str) -> Result<(), PageError> {
        self.0
            .borrow_mut()
            .styles
            .insert(property, value.to_string());
        Ok(())
    }

    fn clear_style(&self, property: StyleProperty) -> Result<(), PageError> {
        self.0.borrow_mut().styles.remove(&property);
        Ok(())
    }

    fn style(&self, property: StyleProperty) -> String {
        self.0
            .borrow()
            .styles
            .get(&property)
            .cloned()
            .unwrap_or_default()
    }

    fn query_all(&self, selector: &Selector) -> Result<Vec<Self>, PageError> {
        let mut out = Vec::new();
        self.collect(selector, &mut out);
        Ok(out)
    }

    fn set_disabled(&self, disabled: bool) -> Result<(), PageError> {
        self.0.borrow_mut().disabled = disabled;
        Ok(())
    }

    fn is_disabled(&self) -> bool {
        self.0.borrow().disabled
    }

    fn set_inner_html(&self, html: &str) -> Result<(), PageError> {
        self.0.borrow_mut().inner_html = html.to_string();
        Ok(())
    }

    fn listen(&self, event: EventKind, handler: Handler) -> Result<(), PageError> {
        self.0.borrow_mut().listeners.push((event, handler));
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryTimer(u64);

#[derive(Default)]
struct Clock {
    now: Duration,
    next_id: u64,
    // Keyed by (deadline, id) so equal deadlines fire in scheduling order.
    pending: BTreeMap<(Duration, u64), Task>,
}

/// A document with a virtual clock.
pub struct MemoryPage {
    body: MemoryElement,
    clock: Rc<RefCell<Clock>>,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    pub fn new() -> Self {
        Self {
            body: MemoryElement::new("body"),
            clock: Rc::new(RefCell::new(Clock::default())),
        }
    }

    pub fn body(&self) -> &MemoryElement {
        &self.body
    }

    pub fn now(&self) -> Duration {
        self.clock.borrow().now
    }

    pub fn pending_timers(&self) -> usize {
        self.clock.borrow().pending.len()
    }

    /// Move the clock forward, firing every timer due on the way.
    pub fn advance(&self, by: Duration) {
        let target = self.now() + by;
        loop {
            let task = {
                let mut clock = self.clock.borrow_mut();
                match clock.pending.first_key_value() {
                    Some((&(at, _), _)) if at <= target => {}
                    _ => break,
                }
                let Some(((at, _), task)) = clock.pending.pop_first() else {
                    break;
                };
                clock.now = at;
                task
            };
            task();
        }
        self.clock.borrow_mut().now = target;
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Page for MemoryPage {
    type Element = MemoryElement;
    type Timer = MemoryTimer;

    fn query_all(&self, selector: &Selector) -> Result<Vec<MemoryElement>, PageError> {
        self.body.query_all(selector)
    }

    fn set_timeout(&self, delay: Duration, task: Task) -> Result<MemoryTimer, PageError> {
        let mut clock = self.clock.borrow_mut();
        let id = clock.next_id;
        clock.next_id += 1;
        let at = clock.now + delay;
        clock.pending.insert((at, id), task);
        Ok(MemoryTimer(id))
    }

    fn clear_timeout(&self, timer: MemoryTimer) {
        self.clock
            .borrow_mut()
            .pending
            .retain(|&(_, id), _| id != timer.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_returns_descendants_in_document_order() {
        let page = MemoryPage::new();
        let a = MemoryElement::new("div").with_class("card");
        let b = MemoryElement::new("div").with_class("card");
        let c = MemoryElement::new("div").with_class("card");
        page.body()
            .append_child(MemoryElement::new("section").with_child(a.clone()).with_child(
                MemoryElement::new("div").with_class("card").with_child(b.clone()),
            ));
        page.body().append_child(c.clone());

        let found = page.query_all(&Selector::class("card")).unwrap();
        assert_eq!(found.len(), 4);
        assert!(found[0].same_node(&a));
        assert!(found[2].same_node(&b));
        assert!(found[3].same_node(&c));
    }

    #[test]
    fn any_of_matches_each_element_once() {
        let page = MemoryPage::new();
        page.body()
            .append_child(MemoryElement::new("div").with_class("card").with_class("widget"));
        page.body()
            .append_child(MemoryElement::new("li").with_class("trip-item"));

        let sel = Selector::any_of_classes(["card", "widget", "trip-item"]);
        assert_eq!(page.query_all(&sel).unwrap().len(), 2);
    }

    #[test]
    fn submit_button_selector_checks_type() {
        let form = MemoryElement::new("form")
            .with_child(MemoryElement::new("button").with_attr("type", "button"))
            .with_child(MemoryElement::new("button").with_attr("type", "submit"));
        let found = form.query_all(&Selector::SubmitButton).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].attr("type").as_deref(), Some("submit"));
    }

    #[test]
    fn timers_fire_in_deadline_then_schedule_order() {
        let page = MemoryPage::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for (name, ms) in [("b", 20u64), ("a", 10), ("c", 20)] {
            let log = log.clone();
            page.set_timeout(
                Duration::from_millis(ms),
                Box::new(move || log.borrow_mut().push(name)),
            )
            .unwrap();
        }

        page.advance_ms(9);
        assert!(log.borrow().is_empty());
        page.advance_ms(1);
        assert_eq!(*log.borrow(), vec!["a"]);
        page.advance_ms(100);
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
        assert_eq!(page.now(), Duration::from_millis(110));
        assert_eq!(page.pending_timers(), 0);
    }

    #[test]
    fn timers_scheduled_by_timers_fire_in_the_same_advance() {
        let page = Rc::new(MemoryPage::new());
        let fired = Rc::new(RefCell::new(false));
        {
            let page2 = page.clone();
            let fired = fired.clone();
            page.set_timeout(
                Duration::from_millis(10),
                Box::new(move || {
                    let fired = fired.clone();
                    let _ = page2.set_timeout(
                        Duration::from_millis(10),
                        Box::new(move || *fired.borrow_mut() = true),
                    );
                }),
            )
            .unwrap();
        }

        page.advance_ms(20);
        assert!(*fired.borrow());
    }

    #[test]
    fn cleared_timer_never_fires() {
        let page = MemoryPage::new();
        let fired = Rc::new(RefCell::new(false));
        let f = fired.clone();
        let t = page
            .set_timeout(Duration::from_millis(5), Box::new(move || *f.borrow_mut() = true))
            .unwrap();
        page.clear_timeout(t);
        page.advance_ms(10);
        assert!(!*fired.borrow());

        // Clearing again is harmless.
        page.clear_timeout(t);
    }

    #[test]
    fn dispatch_runs_only_matching_listeners() {
        let el = MemoryElement::new("button");
        let clicks = Rc::new(RefCell::new(0));
        let c = clicks.clone();
        el.listen(EventKind::Click, Box::new(move || *c.borrow_mut() += 1))
            .unwrap();
        el.listen(EventKind::Submit, Box::new(|| panic!("wrong event")))
            .unwrap();

        assert_eq!(el.dispatch(EventKind::Click), 1);
        assert_eq!(el.dispatch(EventKind::Click), 1);
        assert_eq!(*clicks.borrow(), 2);
        assert_eq!(el.listener_count(EventKind::Submit), 1);
    }

    #[test]
    fn styles_read_back_empty_when_unset() {
        let el = MemoryElement::new("div");
        assert_eq!(el.style(StyleProperty::Opacity), "");
        el.set_style(StyleProperty::Opacity, "1").unwrap();
        assert_eq!(el.style(StyleProperty::Opacity), "1");
        el.clear_style(StyleProperty::Opacity).unwrap();
        assert_eq!(el.style(StyleProperty::Opacity), "");
    }
}
