//! Capabilities the controller needs from the host page.
//!
//! The browser binding implements these over web-sys; [`crate::memory`]
//! implements them in memory for tests and the native preview.

use crate::error::Result;

/// Handler invoked when a scheme button is clicked.
pub type ClickHandler = Box<dyn Fn()>;

/// A stylesheet reference whose activation condition can be rewritten.
pub trait StyleLink {
    /// Current activation condition (`media` attribute).
    fn media(&self) -> String;
    /// Overwrite the activation condition.
    fn set_media(&self, media: &str);
}

/// The `color-scheme` metadata tag.
pub trait MetaTag {
    /// Overwrite the tag's content.
    fn set_content(&self, content: &str);
}

/// A toggle button carrying a scheme label.
pub trait SchemeButton {
    /// The button's label, read at click time. `None` when absent.
    fn scheme_label(&self) -> Option<String>;
    /// Set the ARIA pressed state.
    fn set_pressed(&self, pressed: bool);
    /// Subscribe a click handler.
    fn on_click(&self, handler: ClickHandler);
    /// Whether `other` refers to the same element.
    fn is_same(&self, other: &Self) -> bool;
}

/// The element holding the scheme buttons.
pub trait ButtonContainer {
    /// Button element type
    type Button: SchemeButton + 'static;

    /// Buttons currently inside the container matching `selector`.
    fn buttons(&self, selector: &str) -> Vec<Self::Button>;
}

/// Element lookups on the host page.
pub trait Page {
    /// Stylesheet link element type
    type Link: StyleLink + 'static;
    /// Metadata element type
    type Meta: MetaTag + 'static;
    /// Button container type
    type Container: ButtonContainer + 'static;

    /// Find a stylesheet link by element id.
    fn stylesheet(&self, id: &str) -> Option<Self::Link>;

    /// Find the metadata tag by selector.
    fn meta(&self, selector: &str) -> Option<Self::Meta>;

    /// Find the button container by element id.
    fn container(&self, id: &str) -> Option<Self::Container>;
}

/// Origin-scoped key-value store holding the preference.
pub trait PreferenceStore {
    /// Read a value. `Ok(None)` when the key is unset.
    fn get(&self, key: &str) -> Result<Option<String>>;
    /// Write a value.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
