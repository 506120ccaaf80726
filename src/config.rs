//! Configuration for the scheme switcher.
//!
//! Every field defaults to the standard page contract, so an empty JSON
//! object is a complete configuration. Pages with different element ids
//! or storage keys pass their own JSON to the wasm entry point.

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{Result, SchemeError};

/// Log level setting for the switcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    #[default]
    Warn,
    /// Show errors, warnings, and info messages
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }

    /// Convert to log crate's Level.
    pub fn to_level(&self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

/// Current configuration format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Element ids, selectors and storage key used by the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitcherConfig {
    /// Version of the configuration format
    pub version: u32,
    /// Storage key for the persisted preference
    pub storage_key: String,
    /// Element id of the light stylesheet link
    pub light_link_id: String,
    /// Element id of the dark stylesheet link
    pub dark_link_id: String,
    /// Selector for the color-scheme meta tag
    pub meta_selector: String,
    /// Element id of the button container
    pub switcher_id: String,
    /// Selector for scheme buttons inside the container
    pub button_selector: String,
    /// Attribute carrying a button's scheme label
    pub label_attribute: String,
    /// Attribute holding a button's pressed state
    pub pressed_attribute: String,
    /// Mark the button matching the loaded preference as pressed on init
    pub sync_buttons_on_init: bool,
    /// Log verbosity level
    pub log_level: LogLevel,
}

impl SwitcherConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            storage_key: constants::STORAGE_KEY.to_string(),
            light_link_id: constants::LIGHT_LINK_ID.to_string(),
            dark_link_id: constants::DARK_LINK_ID.to_string(),
            meta_selector: constants::META_SELECTOR.to_string(),
            switcher_id: constants::SWITCHER_ID.to_string(),
            button_selector: constants::BUTTON_SELECTOR.to_string(),
            label_attribute: constants::LABEL_ATTRIBUTE.to_string(),
            pressed_attribute: constants::PRESSED_ATTRIBUTE.to_string(),
            sync_buttons_on_init: false,
            log_level: LogLevel::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;

        if config.version > CONFIG_VERSION {
            return Err(SchemeError::ConfigVersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }
}

impl Default for SwitcherConfig {
    fn default() -> Self {
        Self::new()
    }
}
