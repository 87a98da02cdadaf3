//! User preferences
//!
//! Unit system and the last city looked up.

use crate::data::normalize::normalize_city;
use crate::data::storage;
use crate::error::Result;
use crate::weather::Units;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings file format version for migrations
const SETTINGS_VERSION: u32 = 1;

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// File format version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Unit system used for API requests and display
    #[serde(default)]
    pub units: Units,

    /// Last successfully looked up city
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_city: Option<String>,
}

fn default_version() -> u32 {
    SETTINGS_VERSION
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            units: Units::default(),
            last_city: None,
        }
    }
}

impl Settings {
    /// Load settings from a specific path; a missing file gives defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        Ok(storage::load_from::<Settings>(path)?.unwrap_or_default())
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "using default settings");
            Self::default()
        })
    }

    /// Save settings to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        storage::save_to(path, self)
    }

    /// Flip between metric and imperial
    pub fn toggle_units(&mut self) {
        self.units = self.units.toggled();
    }

    /// Remember the last city, normalized; blank input clears it
    pub fn set_last_city(&mut self, city: &str) {
        self.last_city = normalize_city(city);
    }
}
