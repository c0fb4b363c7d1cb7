//! Page accessor: the narrow view of the rendering environment the behaviors need.
//!
//! The browser implementation is `flotte_web::WebPage`; [`crate::memory`] provides
//! a host-side tree with a virtual clock for tests.

use std::time::Duration;

use crate::error::PageError;

/// Events the behaviors listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Submit,
    Click,
    PointerEnter,
    PointerLeave,
}

impl EventKind {
    /// DOM event type name.
    pub fn dom_name(self) -> &'static str {
        match self {
            EventKind::Submit => "submit",
            EventKind::Click => "click",
            EventKind::PointerEnter => "mouseenter",
            EventKind::PointerLeave => "mouseleave",
        }
    }
}

/// Inline style properties the behaviors write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    Opacity,
    BoxShadow,
    Transform,
}

impl StyleProperty {
    pub fn css_name(self) -> &'static str {
        match self {
            StyleProperty::Opacity => "opacity",
            StyleProperty::BoxShadow => "box-shadow",
            StyleProperty::Transform => "transform",
        }
    }
}

/// The subset of CSS selectors the behaviors use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// `.name`
    Class(String),
    /// `name`
    Tag(String),
    /// `button[type="submit"]`
    SubmitButton,
    /// `a, b, c`
    AnyOf(Vec<Selector>),
}

impl Selector {
    pub fn class(name: impl Into<String>) -> Self {
        Selector::Class(name.into())
    }

    pub fn tag(name: impl Into<String>) -> Self {
        Selector::Tag(name.into())
    }

    pub fn any_of_classes<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Selector::AnyOf(names.into_iter().map(Selector::class).collect())
    }

    pub fn to_css(&self) -> String {
        match self {
            Selector::Class(name) => format!(".{name}"),
            Selector::Tag(name) => name.clone(),
            Selector::SubmitButton => r#"button[type="submit"]"#.to_string(),
            Selector::AnyOf(parts) => parts
                .iter()
                .map(Selector::to_css)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

pub type Handler = Box<dyn FnMut()>;
pub type Task = Box<dyn FnOnce()>;

/// A handle to one element of the page.
///
/// Handles are cheap to clone and refer to the same underlying node.
pub trait Element: Clone + 'static {
    fn add_class(&self, class: &str) -> Result<(), PageError>;
    fn remove_class(&self, class: &str) -> Result<(), PageError>;
    fn has_class(&self, class: &str) -> bool;

    fn set_style(&self, property: StyleProperty, value: &str) -> Result<(), PageError>;
    /// Remove the inline value so the stylesheet applies again.
    fn clear_style(&self, property: StyleProperty) -> Result<(), PageError>;
    /// Inline value, empty when unset.
    fn style(&self, property: StyleProperty) -> String;

    /// Descendants matching `selector`, in document order.
    fn query_all(&self, selector: &Selector) -> Result<Vec<Self>, PageError>;

    fn query_first(&self, selector: &Selector) -> Result<Option<Self>, PageError> {
        Ok(self.query_all(selector)?.into_iter().next())
    }

    fn set_disabled(&self, disabled: bool) -> Result<(), PageError>;
    fn is_disabled(&self) -> bool;

    fn set_inner_html(&self, html: &str) -> Result<(), PageError>;

    /// Attach a listener for the lifetime of the page.
    fn listen(&self, event: EventKind, handler: Handler) -> Result<(), PageError>;
}

/// Document-level access: element lookup and one-shot timers.
pub trait Page {
    type Element: Element;
    type Timer: Copy + std::fmt::Debug;

    /// Elements matching `selector`, in document order.
    fn query_all(&self, selector: &Selector) -> Result<Vec<Self::Element>, PageError>;

    /// Run `task` once after `delay`.
    fn set_timeout(&self, delay: Duration, task: Task) -> Result<Self::Timer, PageError>;

    /// Cancel a timer. Cancelling a timer that already fired is a no-op.
    fn clear_timeout(&self, timer: Self::Timer);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_render_as_css() {
        assert_eq!(Selector::class("card").to_css(), ".card");
        assert_eq!(Selector::tag("form").to_css(), "form");
        assert_eq!(
            Selector::SubmitButton.to_css(),
            "button[type=\"submit\"]"
        );
        assert_eq!(
            Selector::any_of_classes(["card", "widget", "trip-item"]).to_css(),
            ".card, .widget, .trip-item"
        );
    }

    #[test]
    fn event_names_match_dom() {
        assert_eq!(EventKind::Submit.dom_name(), "submit");
        assert_eq!(EventKind::PointerEnter.dom_name(), "mouseenter");
        assert_eq!(EventKind::PointerLeave.dom_name(), "mouseleave");
        assert_eq!(StyleProperty::BoxShadow.css_name(), "box-shadow");
    }
}
