//! Color scheme model.
//!
//! A [`Scheme`] decides which stylesheet link is in effect and what the
//! `color-scheme` meta tag advertises to the user agent.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::media;
use crate::error::SchemeError;

/// Scheme choice - light, dark, or follow the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// Light stylesheet always on
    Light,
    /// Dark stylesheet always on
    Dark,
    /// Let `prefers-color-scheme` pick
    #[default]
    Auto,
}

impl Scheme {
    /// Get all schemes in button order.
    pub fn all() -> &'static [Scheme] {
        &[Scheme::Light, Scheme::Dark, Scheme::Auto]
    }

    /// Label used for storage and `data-scheme` attributes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Light => "light",
            Scheme::Dark => "dark",
            Scheme::Auto => "auto",
        }
    }

    /// Resolve a stored or clicked label. Anything other than `light` or
    /// `dark` behaves like `auto`.
    pub fn resolve(label: &str) -> Self {
        label.parse().unwrap_or(Scheme::Auto)
    }

    /// Activation condition for the light stylesheet link.
    pub fn light_media(&self) -> &'static str {
        match self {
            Scheme::Light => media::ALL,
            Scheme::Dark => media::NONE,
            Scheme::Auto => media::PREFERS_LIGHT,
        }
    }

    /// Activation condition for the dark stylesheet link.
    pub fn dark_media(&self) -> &'static str {
        match self {
            Scheme::Light => media::NONE,
            Scheme::Dark => media::ALL,
            Scheme::Auto => media::PREFERS_DARK,
        }
    }

    /// Content for `<meta name="color-scheme">`.
    pub fn meta_content(&self) -> &'static str {
        match self {
            Scheme::Light => "light",
            Scheme::Dark => "dark",
            Scheme::Auto => "light dark",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = SchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Scheme::Light),
            "dark" => Ok(Scheme::Dark),
            "auto" => Ok(Scheme::Auto),
            other => Err(SchemeError::UnknownScheme(other.to_string())),
        }
    }
}
