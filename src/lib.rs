//! Scheme Switcher - light / dark / auto color scheme toggle for web pages
//!
//! Switches between a light and a dark stylesheet link, mirrors the choice
//! in `<meta name="color-scheme">` and persists it in origin storage. The
//! controller works against the [`Page`] and [`PreferenceStore`] traits;
//! the browser binding implements them with web-sys, [`memory`] implements
//! them in memory.

pub mod config;
pub mod constants;
mod controller;
mod error;
pub mod memory;
mod page;
mod scheme;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;

pub use config::{LogLevel, SwitcherConfig};
pub use controller::SchemeController;
pub use error::{Result, SchemeError};
pub use memory::{MemoryButton, MemoryContainer, MemoryPage, MemoryStorage};
pub use page::{
    ButtonContainer, ClickHandler, MetaTag, Page, PreferenceStore, SchemeButton, StyleLink,
};
pub use scheme::Scheme;

#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
