//! Default identifiers and activation conditions for the scheme switcher.

/// Storage key holding the persisted scheme preference
pub const STORAGE_KEY: &str = "scheme";

/// Element id of the light stylesheet `<link>`
pub const LIGHT_LINK_ID: &str = "css-light";

/// Element id of the dark stylesheet `<link>`
pub const DARK_LINK_ID: &str = "css-dark";

/// Selector for the optional color-scheme meta tag
pub const META_SELECTOR: &str = r#"meta[name="color-scheme"]"#;

/// Element id of the optional button container
pub const SWITCHER_ID: &str = "scheme-switcher";

/// Selector for scheme buttons inside the container
pub const BUTTON_SELECTOR: &str = "button[data-scheme]";

/// Attribute carrying a button's scheme label
pub const LABEL_ATTRIBUTE: &str = "data-scheme";

/// ARIA attribute maintained on every scheme button
pub const PRESSED_ATTRIBUTE: &str = "aria-pressed";

/// Media query conditions written to the stylesheet links.
pub mod media {
    /// Stylesheet always in effect
    pub const ALL: &str = "all";
    /// Stylesheet never in effect
    pub const NONE: &str = "not all";
    /// In effect when the system prefers a light scheme
    pub const PREFERS_LIGHT: &str = "(prefers-color-scheme: light)";
    /// In effect when the system prefers a dark scheme
    pub const PREFERS_DARK: &str = "(prefers-color-scheme: dark)";
}
