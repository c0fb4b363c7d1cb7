use std::time::Duration;

use flotte_ui::page::{Element, EventKind, Handler, Page, Selector, StyleProperty, Task};
use flotte_ui::PageError;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

fn js_err(operation: &'static str) -> impl Fn(JsValue) -> PageError {
    move |v| PageError::operation(operation, v.as_string().unwrap_or_else(|| format!("{v:?}")))
}

fn collect_elements(list: web_sys::NodeList) -> Vec<WebElement> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .map(WebElement)
        .collect()
}

#[derive(Clone, Debug)]
pub struct WebElement(web_sys::Element);

impl WebElement {
    fn style_decl(&self) -> Option<web_sys::CssStyleDeclaration> {
        self.0
            .dyn_ref::<web_sys::HtmlElement>()
            .map(web_sys::HtmlElement::style)
    }
}

impl Element for WebElement {
    fn add_class(&self, class: &str) -> Result<(), PageError> {
        self.0
            .class_list()
            .add_1(class)
            .map_err(js_err("classList.add"))
    }

    fn remove_class(&self, class: &str) -> Result<(), PageError> {
        self.0
            .class_list()
            .remove_1(class)
            .map_err(js_err("classList.remove"))
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn set_style(&self, property: StyleProperty, value: &str) -> Result<(), PageError> {
        let style = self.style_decl().ok_or(PageError::NotStyleable)?;
        style
            .set_property(property.css_name(), value)
            .map_err(js_err("style.setProperty"))
    }

    fn clear_style(&self, property: StyleProperty) -> Result<(), PageError> {
        let style = self.style_decl().ok_or(PageError::NotStyleable)?;
        style
            .remove_property(property.css_name())
            .map(|_| ())
            .map_err(js_err("style.removeProperty"))
    }

    fn style(&self, property: StyleProperty) -> String {
        self.style_decl()
            .and_then(|s| s.get_property_value(property.css_name()).ok())
            .unwrap_or_default()
    }

    fn query_all(&self, selector: &Selector) -> Result<Vec<Self>, PageError> {
        self.0
            .query_selector_all(&selector.to_css())
            .map(collect_elements)
            .map_err(js_err("querySelectorAll"))
    }

    fn set_disabled(&self, disabled: bool) -> Result<(), PageError> {
        if disabled {
            self.0
                .set_attribute("disabled", "")
                .map_err(js_err("setAttribute"))
        } else {
            self.0
                .remove_attribute("disabled")
                .map_err(js_err("removeAttribute"))
        }
    }

    fn is_disabled(&self) -> bool {
        self.0.has_attribute("disabled")
    }

    fn set_inner_html(&self, html: &str) -> Result<(), PageError> {
        self.0.set_inner_html(html);
        Ok(())
    }

    fn listen(&self, event: EventKind, handler: Handler) -> Result<(), PageError> {
        let cb = Closure::wrap(handler);
        self.0
            .add_event_listener_with_callback(event.dom_name(), cb.as_ref().unchecked_ref())
            .map_err(js_err("addEventListener"))?;
        // Listeners live as long as the page.
        cb.forget();
        Ok(())
    }
}

/// The live document.
#[derive(Clone, Debug)]
pub struct WebPage {
    window: web_sys::Window,
    document: web_sys::Document,
}

impl WebPage {
    pub fn from_window() -> Result<Self, PageError> {
        let window = web_sys::window().ok_or(PageError::NoDocument)?;
        let document = window.document().ok_or(PageError::NoDocument)?;
        Ok(Self { window, document })
    }

    pub fn document(&self) -> &web_sys::Document {
        &self.document
    }

    /// Text of the element with `id`, if present.
    pub fn element_text(&self, id: &str) -> Option<String> {
        self.document
            .get_element_by_id(id)
            .and_then(|el| el.text_content())
    }
}

impl Page for WebPage {
    type Element = WebElement;
    type Timer = i32;

    fn query_all(&self, selector: &Selector) -> Result<Vec<WebElement>, PageError> {
        self.document
            .query_selector_all(&selector.to_css())
            .map(collect_elements)
            .map_err(js_err("querySelectorAll"))
    }

    fn set_timeout(&self, delay: Duration, task: Task) -> Result<i32, PageError> {
        let ms = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        // Frees itself after running; a cleared timer leaks its closure.
        let cb = Closure::once_into_js(move || task());
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms)
            .map_err(js_err("setTimeout"))
    }

    fn clear_timeout(&self, timer: i32) {
        self.window.clear_timeout_with_handle(timer);
    }
}
