//! Browser binding: web-sys implementations of the page capabilities and
//! the JavaScript entry points.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlLinkElement, HtmlMetaElement, Storage, Window,
};

use crate::config::{LogLevel, SwitcherConfig};
use crate::controller::SchemeController;
use crate::error::{Result, SchemeError};
use crate::page::{
    ButtonContainer, ClickHandler, MetaTag, Page, PreferenceStore, SchemeButton, StyleLink,
};

thread_local! {
    // Lives for the page session; click handlers only hold weak references.
    static CONTROLLER: RefCell<Option<SchemeController<WebPage, LocalStorage>>> =
        const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// Initialize the switcher against the standard page contract.
#[wasm_bindgen(js_name = initColorSchemeSwitcher)]
pub fn init_color_scheme_switcher() -> std::result::Result<(), JsValue> {
    init_with(SwitcherConfig::default())
}

/// Initialize the switcher with a JSON [`SwitcherConfig`].
#[wasm_bindgen(js_name = initColorSchemeSwitcherWithConfig)]
pub fn init_color_scheme_switcher_with_config(
    config_json: &str,
) -> std::result::Result<(), JsValue> {
    let config = SwitcherConfig::from_json(config_json).map_err(to_js)?;
    init_with(config)
}

fn init_with(config: SwitcherConfig) -> std::result::Result<(), JsValue> {
    init_logging(config.log_level);

    let window = web_sys::window()
        .ok_or_else(|| JsValue::from_str("No window object available"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("No document available"))?;
    let storage = LocalStorage { window };

    let page = WebPage {
        document,
        label_attribute: config.label_attribute.clone(),
        pressed_attribute: config.pressed_attribute.clone(),
    };

    if let Some(controller) = SchemeController::initialize(&page, storage, &config).map_err(to_js)? {
        CONTROLLER.with(|slot| *slot.borrow_mut() = Some(controller));
    }
    Ok(())
}

fn init_logging(level: LogLevel) {
    // A second init keeps the first logger and only adjusts the level.
    if console_log::init_with_level(level.to_level()).is_err() {
        log::set_max_level(level.to_level_filter());
    }
}

fn to_js(error: SchemeError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// The live document.
pub struct WebPage {
    document: Document,
    label_attribute: String,
    pressed_attribute: String,
}

impl Page for WebPage {
    type Link = HtmlLinkElement;
    type Meta = HtmlMetaElement;
    type Container = WebContainer;

    fn stylesheet(&self, id: &str) -> Option<HtmlLinkElement> {
        self.document
            .get_element_by_id(id)?
            .dyn_into::<HtmlLinkElement>()
            .ok()
    }

    fn meta(&self, selector: &str) -> Option<HtmlMetaElement> {
        self.document
            .query_selector(selector)
            .ok()??
            .dyn_into::<HtmlMetaElement>()
            .ok()
    }

    fn container(&self, id: &str) -> Option<WebContainer> {
        let element = self.document.get_element_by_id(id)?;
        Some(WebContainer {
            element,
            label_attribute: self.label_attribute.clone(),
            pressed_attribute: self.pressed_attribute.clone(),
        })
    }
}

/// The element holding the scheme buttons.
pub struct WebContainer {
    element: Element,
    label_attribute: String,
    pressed_attribute: String,
}

impl ButtonContainer for WebContainer {
    type Button = WebButton;

    fn buttons(&self, selector: &str) -> Vec<WebButton> {
        let nodes = match self.element.query_selector_all(selector) {
            Ok(nodes) => nodes,
            Err(e) => {
                log::warn!("Invalid button selector '{}': {:?}", selector, e);
                return Vec::new();
            }
        };

        (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|element| WebButton {
                element,
                label_attribute: self.label_attribute.clone(),
                pressed_attribute: self.pressed_attribute.clone(),
            })
            .collect()
    }
}

impl StyleLink for HtmlLinkElement {
    fn media(&self) -> String {
        HtmlLinkElement::media(self)
    }

    fn set_media(&self, media: &str) {
        HtmlLinkElement::set_media(self, media);
    }
}

impl MetaTag for HtmlMetaElement {
    fn set_content(&self, content: &str) {
        HtmlMetaElement::set_content(self, content);
    }
}

/// A scheme button element.
pub struct WebButton {
    element: Element,
    label_attribute: String,
    pressed_attribute: String,
}

impl SchemeButton for WebButton {
    fn scheme_label(&self) -> Option<String> {
        self.element.get_attribute(&self.label_attribute)
    }

    fn set_pressed(&self, pressed: bool) {
        let value = if pressed { "true" } else { "false" };
        if let Err(e) = self.element.set_attribute(&self.pressed_attribute, value) {
            log::warn!("Failed to set {}: {:?}", self.pressed_attribute, e);
        }
    }

    fn on_click(&self, handler: ClickHandler) {
        let onclick = Closure::wrap(Box::new(move |_event: Event| handler()) as Box<dyn Fn(Event)>);

        if let Err(e) = self
            .element
            .add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())
        {
            log::error!("Failed to subscribe scheme button: {:?}", e);
        }
        onclick.forget(); // Leak the closure to keep it alive
    }

    fn is_same(&self, other: &Self) -> bool {
        self.element == other.element
    }
}

/// The origin's `localStorage`, opened on each access so a page without
/// stylesheet links never touches it.
pub struct LocalStorage {
    window: Window,
}

impl LocalStorage {
    fn storage(&self) -> Result<Storage> {
        self.window
            .local_storage()
            .map_err(|e| SchemeError::Storage(format!("localStorage access error: {:?}", e)))?
            .ok_or_else(|| SchemeError::Storage("localStorage not available".to_string()))
    }
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|e| SchemeError::Storage(format!("Failed to read from localStorage: {:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| SchemeError::Storage(format!("Failed to save to localStorage: {:?}", e)))
    }
}
