//! In-memory page and storage.
//!
//! Elements share their state through `Rc`, so a handle returned by a
//! lookup observes every change the controller makes. Used by the tests
//! and by the native preview binary.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::constants;
use crate::error::{Result, SchemeError};
use crate::page::{
    ButtonContainer, ClickHandler, MetaTag, Page, PreferenceStore, SchemeButton, StyleLink,
};

/// Stylesheet link held in memory.
#[derive(Clone, Default)]
pub struct MemoryLink {
    media: Rc<RefCell<String>>,
}

impl MemoryLink {
    fn new(media: &str) -> Self {
        Self {
            media: Rc::new(RefCell::new(media.to_string())),
        }
    }
}

impl StyleLink for MemoryLink {
    fn media(&self) -> String {
        self.media.borrow().clone()
    }

    fn set_media(&self, media: &str) {
        *self.media.borrow_mut() = media.to_string();
    }
}

/// Meta tag held in memory.
#[derive(Clone, Default)]
pub struct MemoryMeta {
    content: Rc<RefCell<String>>,
}

impl MemoryMeta {
    /// Current content.
    pub fn content(&self) -> String {
        self.content.borrow().clone()
    }
}

impl MetaTag for MemoryMeta {
    fn set_content(&self, content: &str) {
        *self.content.borrow_mut() = content.to_string();
    }
}

/// Button held in memory. `click` runs the subscribed handlers.
#[derive(Clone, Default)]
pub struct MemoryButton {
    label: Rc<RefCell<Option<String>>>,
    pressed: Rc<Cell<Option<bool>>>,
    handlers: Rc<RefCell<Vec<ClickHandler>>>,
}

impl MemoryButton {
    /// Create a button with the given scheme label.
    pub fn new(label: &str) -> Self {
        Self {
            label: Rc::new(RefCell::new(Some(label.to_string()))),
            ..Self::default()
        }
    }

    /// Create a button without a label attribute.
    pub fn unlabeled() -> Self {
        Self::default()
    }

    /// Replace the label after construction.
    pub fn set_label(&self, label: Option<&str>) {
        *self.label.borrow_mut() = label.map(str::to_string);
    }

    /// Pressed state, `None` until the controller first sets it.
    pub fn pressed(&self) -> Option<bool> {
        self.pressed.get()
    }

    /// Number of subscribed click handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Dispatch a click to every subscribed handler.
    pub fn click(&self) {
        for handler in self.handlers.borrow().iter() {
            handler();
        }
    }
}

impl SchemeButton for MemoryButton {
    fn scheme_label(&self) -> Option<String> {
        self.label.borrow().clone()
    }

    fn set_pressed(&self, pressed: bool) {
        self.pressed.set(Some(pressed));
    }

    fn on_click(&self, handler: ClickHandler) {
        self.handlers.borrow_mut().push(handler);
    }

    fn is_same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.pressed, &other.pressed)
    }
}

/// Button container held in memory. Buttons can be added after the
/// controller has been initialized.
#[derive(Clone, Default)]
pub struct MemoryContainer {
    buttons: Rc<RefCell<Vec<MemoryButton>>>,
}

impl MemoryContainer {
    /// Append a button.
    pub fn push(&self, button: MemoryButton) {
        self.buttons.borrow_mut().push(button);
    }

    /// All buttons, labeled or not.
    pub fn all(&self) -> Vec<MemoryButton> {
        self.buttons.borrow().clone()
    }
}

impl ButtonContainer for MemoryContainer {
    type Button = MemoryButton;

    /// The default button selector matches buttons carrying a label
    /// attribute; any other selector matches every button.
    fn buttons(&self, selector: &str) -> Vec<MemoryButton> {
        self.buttons
            .borrow()
            .iter()
            .filter(|b| selector != constants::BUTTON_SELECTOR || b.scheme_label().is_some())
            .cloned()
            .collect()
    }
}

/// Page made of in-memory elements.
///
/// Selectors are matched literally against the ones the elements were
/// registered under.
#[derive(Clone, Default)]
pub struct MemoryPage {
    links: HashMap<String, MemoryLink>,
    metas: HashMap<String, MemoryMeta>,
    containers: HashMap<String, MemoryContainer>,
}

impl MemoryPage {
    /// Create an empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Page with both stylesheet links, the meta tag and one button per scheme,
    /// all under the default ids.
    pub fn standard() -> Self {
        let buttons = crate::Scheme::all()
            .iter()
            .map(|scheme| MemoryButton::new(scheme.as_str()))
            .collect();
        Self::new()
            .with_stylesheets()
            .with_meta()
            .with_switcher(buttons)
    }

    /// Add a stylesheet link under `id`.
    pub fn with_link(mut self, id: &str) -> Self {
        self.links.insert(id.to_string(), MemoryLink::new(""));
        self
    }

    /// Add both stylesheet links under the default ids.
    pub fn with_stylesheets(self) -> Self {
        self.with_link(constants::LIGHT_LINK_ID)
            .with_link(constants::DARK_LINK_ID)
    }

    /// Add the meta tag under the default selector.
    pub fn with_meta(mut self) -> Self {
        self.metas
            .insert(constants::META_SELECTOR.to_string(), MemoryMeta::default());
        self
    }

    /// Add a button container under the default id.
    pub fn with_switcher(self, buttons: Vec<MemoryButton>) -> Self {
        self.with_container(constants::SWITCHER_ID, buttons)
    }

    /// Add a button container under `id`.
    pub fn with_container(mut self, id: &str, buttons: Vec<MemoryButton>) -> Self {
        let container = MemoryContainer {
            buttons: Rc::new(RefCell::new(buttons)),
        };
        self.containers.insert(id.to_string(), container);
        self
    }

    /// Media condition of the link registered under `id`.
    pub fn link_media(&self, id: &str) -> Option<String> {
        self.links.get(id).map(StyleLink::media)
    }

    /// Content of the meta tag under the default selector.
    pub fn meta_content(&self) -> Option<String> {
        self.metas.get(constants::META_SELECTOR).map(MemoryMeta::content)
    }

    /// The container under the default id.
    pub fn switcher(&self) -> Option<MemoryContainer> {
        self.containers.get(constants::SWITCHER_ID).cloned()
    }

    /// All buttons in the default container, labeled or not.
    pub fn switcher_buttons(&self) -> Vec<MemoryButton> {
        self.switcher()
            .map(|container| container.all())
            .unwrap_or_default()
    }

    /// First button in the default container carrying `label`.
    pub fn button(&self, label: &str) -> Option<MemoryButton> {
        self.switcher_buttons()
            .into_iter()
            .find(|b| b.scheme_label().as_deref() == Some(label))
    }
}

impl Page for MemoryPage {
    type Link = MemoryLink;
    type Meta = MemoryMeta;
    type Container = MemoryContainer;

    fn stylesheet(&self, id: &str) -> Option<MemoryLink> {
        self.links.get(id).cloned()
    }

    fn meta(&self, selector: &str) -> Option<MemoryMeta> {
        self.metas.get(selector).cloned()
    }

    fn container(&self, id: &str) -> Option<MemoryContainer> {
        self.containers.get(id).cloned()
    }
}

/// Key-value storage held in memory.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    values: Rc<RefCell<HashMap<String, String>>>,
    reject_reads: bool,
    reject_writes: bool,
}

impl MemoryStorage {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage holding one value.
    pub fn with_value(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        storage
    }

    /// Storage that fails every write, like a full or denied `localStorage`.
    pub fn rejecting_writes(mut self) -> Self {
        self.reject_writes = true;
        self
    }

    /// Storage that fails every read, like a `localStorage` access denied
    /// by the browser.
    pub fn rejecting_reads(mut self) -> Self {
        self.reject_reads = true;
        self
    }

    /// Read a value without going through the trait.
    pub fn value(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

impl PreferenceStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if self.reject_reads {
            return Err(SchemeError::Storage(format!("read of '{}' rejected", key)));
        }
        Ok(self.value(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.reject_writes {
            return Err(SchemeError::Storage(format!(
                "write of '{}' rejected",
                key
            )));
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
