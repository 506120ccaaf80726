//! File-backed preference storage for native builds.
//!
//! Values live in a flat JSON object, standing in for the browser's
//! origin-scoped `localStorage`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{Result, SchemeError};
use crate::page::PreferenceStore;

/// JSON file holding string key-value pairs.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Use the file at `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the default filename for the store.
    pub fn default_filename() -> &'static str {
        "storage.json"
    }

    /// Get the default store path under the user's config directory.
    pub fn default_path() -> Option<PathBuf> {
        // Try to use XDG config directory, fall back to home directory
        if let Some(config_dir) = dirs::config_dir() {
            Some(
                config_dir
                    .join("scheme-switcher")
                    .join(Self::default_filename()),
            )
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("scheme-switcher")
                    .join(Self::default_filename())
            })
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            log::debug!("No storage file at {:?}", self.path);
            return Ok(BTreeMap::new());
        }
        let json = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&json)
            .map_err(|e| SchemeError::Storage(format!("{:?} is not valid: {}", self.path, e)))
    }

    fn write_error(&self, e: impl std::fmt::Display) -> SchemeError {
        SchemeError::Storage(format!("Failed to write {:?}: {}", self.path, e))
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.load()?;
        values.insert(key.to_string(), value.to_string());

        // Create parent directories if needed
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }
        let json = serde_json::to_string_pretty(&values).map_err(|e| self.write_error(e))?;
        std::fs::write(&self.path, json).map_err(|e| self.write_error(e))?;
        log::debug!("Stored '{}' = '{}' in {:?}", key, value, self.path);
        Ok(())
    }
}
