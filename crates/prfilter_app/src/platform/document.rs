use std::cell::Cell;
use std::rc::Weak;

use ext_logging::ext_debug;
use prfilter_core::{ControlView, FilterState, Msg};
use prfilter_engine::selectors::{
    BUTTON_SELECTOR, CHECK_ICON_SELECTOR, CONTROL_ATTR, CONTROL_ATTR_VALUE, CONTROL_SELECTOR,
    FILTER_ATTR, MENU_ITEM_SELECTOR, MENU_SELECTOR, STYLESHEET_ID,
};
use prfilter_engine::{DomError, HostDocument};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, Window};

use super::dispatcher::{self, Dispatcher};
use super::js_message;
use crate::markup;

/// The live page behind [`HostDocument`].
pub(crate) struct BrowserDocument {
    window: Window,
    document: Document,
    dispatcher: Weak<Dispatcher>,
    click_handler_installed: Cell<bool>,
}

impl BrowserDocument {
    pub(crate) fn new(window: Window, document: Document, dispatcher: Weak<Dispatcher>) -> Self {
        Self {
            window,
            document,
            dispatcher,
            click_handler_installed: Cell::new(false),
        }
    }

    /// One capture-phase listener on the document handles clicks for every
    /// control instance, so rebuilt controls need no listeners of their own.
    fn install_click_handler(&self) -> Result<(), DomError> {
        if self.click_handler_installed.get() {
            return Ok(());
        }
        let handle = self.dispatcher.clone();
        let callback = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |event: Event| {
            if let Some(msg) = click_message(&event) {
                dispatcher::send(&handle, msg);
            }
        }));
        self.document
            .add_event_listener_with_callback_and_bool(
                "click",
                callback.as_ref().unchecked_ref(),
                true,
            )
            .map_err(|err| DomError::Create {
                what: "click handler",
                message: js_message(&err),
            })?;
        // Lives as long as the page.
        callback.forget();
        self.click_handler_installed.set(true);
        ext_debug!("Click handler installed");
        Ok(())
    }
}

/// Maps a click anywhere on the page to the message it means for the control.
fn click_message(event: &Event) -> Option<Msg> {
    let target = event.target()?.dyn_into::<Element>().ok()?;

    if let Ok(Some(item)) = target.closest(MENU_ITEM_SELECTOR) {
        event.stop_propagation();
        let filter = item.get_attribute(FILTER_ATTR)?.parse::<FilterState>().ok()?;
        return Some(Msg::FilterSelected { filter });
    }
    if let Ok(Some(_)) = target.closest(BUTTON_SELECTOR) {
        event.stop_propagation();
        return Some(Msg::MenuToggled);
    }
    match target.closest(CONTROL_SELECTOR) {
        Ok(Some(_)) => None,
        _ => Some(Msg::OutsideClicked),
    }
}

fn html_child(control: &Element, selector: &str) -> Result<HtmlElement, DomError> {
    control
        .query_selector(selector)
        .map_err(|err| DomError::selector(selector, js_message(&err)))?
        .ok_or_else(|| DomError::Style(format!("control has no {selector}")))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| DomError::Style(format!("{selector} is not an HTML element")))
}

fn set_style(element: &HtmlElement, property: &str, value: &str) -> Result<(), DomError> {
    element
        .style()
        .set_property(property, value)
        .map_err(|err| DomError::Style(format!("{property}: {}", js_message(&err))))
}

fn clear_style(element: &HtmlElement, property: &str) -> Result<(), DomError> {
    element
        .style()
        .remove_property(property)
        .map(|_| ())
        .map_err(|err| DomError::Style(format!("{property}: {}", js_message(&err))))
}

impl HostDocument for BrowserDocument {
    type Node = Element;

    fn current_url(&self) -> String {
        self.window.location().href().unwrap_or_default()
    }

    fn path(&self) -> String {
        self.window.location().pathname().unwrap_or_default()
    }

    fn query(&self, selector: &str) -> Result<Option<Element>, DomError> {
        self.document
            .query_selector(selector)
            .map_err(|err| DomError::selector(selector, js_message(&err)))
    }

    fn query_all(&self, selector: &str) -> Result<Vec<Element>, DomError> {
        let list = self
            .document
            .query_selector_all(selector)
            .map_err(|err| DomError::selector(selector, js_message(&err)))?;
        Ok((0..list.length())
            .filter_map(|index| list.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }

    fn query_in(&self, parent: &Element, selector: &str) -> Result<Option<Element>, DomError> {
        parent
            .query_selector(selector)
            .map_err(|err| DomError::selector(selector, js_message(&err)))
    }

    fn remove(&self, node: &Element) -> Result<(), DomError> {
        node.remove();
        Ok(())
    }

    fn prepend(&self, parent: &Element, child: &Element) -> Result<(), DomError> {
        parent
            .prepend_with_node_1(child)
            .map_err(|err| DomError::Insert(js_message(&err)))
    }

    fn create_control(&self) -> Result<Element, DomError> {
        self.install_click_handler()?;
        let create_err = |err: JsValue| DomError::Create {
            what: "control",
            message: js_message(&err),
        };
        let container = self.document.create_element("div").map_err(create_err)?;
        container.set_class_name(markup::CONTAINER_CLASS);
        container
            .set_attribute(CONTROL_ATTR, CONTROL_ATTR_VALUE)
            .map_err(create_err)?;
        container.set_inner_html(&markup::control_html());
        Ok(container)
    }

    fn ensure_stylesheet(&self) -> Result<(), DomError> {
        if self.document.get_element_by_id(STYLESHEET_ID).is_some() {
            return Ok(());
        }
        let create_err = |err: JsValue| DomError::Create {
            what: "stylesheet",
            message: js_message(&err),
        };
        let style = self.document.create_element("style").map_err(create_err)?;
        style.set_id(STYLESHEET_ID);
        style.set_text_content(Some(markup::STYLESHEET));
        let head = self.document.head().ok_or(DomError::Create {
            what: "stylesheet",
            message: "document has no head".into(),
        })?;
        head.append_child(&style).map_err(create_err)?;
        Ok(())
    }

    fn apply_view(&self, control: &Element, view: &ControlView) -> Result<(), DomError> {
        let button = html_child(control, BUTTON_SELECTOR)?;
        match view.emphasis.button_colors() {
            Some((background, color)) => {
                set_style(&button, "background-color", background)?;
                set_style(&button, "color", color)?;
            }
            None => {
                clear_style(&button, "background-color")?;
                clear_style(&button, "color")?;
            }
        }
        button.set_title(view.title);

        let items = control
            .query_selector_all(MENU_ITEM_SELECTOR)
            .map_err(|err| DomError::selector(MENU_ITEM_SELECTOR, js_message(&err)))?;
        for index in 0..items.length() {
            let Some(item) = items.item(index).and_then(|node| node.dyn_into::<Element>().ok())
            else {
                continue;
            };
            let checked = item
                .get_attribute(FILTER_ATTR)
                .and_then(|key| key.parse::<FilterState>().ok())
                .is_some_and(|filter| view.is_checked(filter));
            let icon = html_child(&item, CHECK_ICON_SELECTOR)?;
            set_style(&icon, "visibility", if checked { "visible" } else { "hidden" })?;
            item.set_attribute("aria-checked", if checked { "true" } else { "false" })
                .map_err(|err| DomError::Style(js_message(&err)))?;
        }
        Ok(())
    }

    fn menu_open(&self, control: &Element) -> bool {
        html_child(control, MENU_SELECTOR)
            .ok()
            .and_then(|menu| menu.style().get_property_value("display").ok())
            .is_some_and(|display| display == "block")
    }

    fn set_menu_open(&self, control: &Element, open: bool) -> Result<(), DomError> {
        let menu = html_child(control, MENU_SELECTOR)?;
        set_style(&menu, "display", if open { "block" } else { "none" })?;
        let button = html_child(control, BUTTON_SELECTOR)?;
        button
            .set_attribute("aria-expanded", if open { "true" } else { "false" })
            .map_err(|err| DomError::Style(js_message(&err)))
    }

    fn navigate(&self, url: &str) -> Result<(), DomError> {
        self.window
            .location()
            .set_href(url)
            .map_err(|err| DomError::Navigate {
                url: url.to_string(),
                message: js_message(&err),
            })
    }
}
