use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::RouletteError;
use crate::logging::log_warning;

// ============================================================================
// User Preferences
// ============================================================================

/// Everything the form remembers between sessions.
///
/// Serialized as a flat JSON object. A key missing from an existing file
/// reads as empty/false; a missing file gives [`Default`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserPreferences {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub steam_path: String,
    #[serde(default)]
    pub include_uninstalled: bool,
    #[serde(default)]
    pub include_installed_only: bool,
    #[serde(default)]
    pub enable_blessing: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            user_id: String::new(),
            steam_path: String::new(),
            include_uninstalled: false,
            include_installed_only: true,
            enable_blessing: true,
        }
    }
}

impl UserPreferences {
    pub fn get_path() -> PathBuf {
        roulette_path!("config.json")
    }

    pub fn load() -> Self {
        Self::load_from(&Self::get_path())
    }

    /// Load from `path`, falling back to defaults if it is absent or unreadable
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        let parsed = fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|content| serde_json::from_str(&content).map_err(|e| e.to_string()));

        match parsed {
            Ok(prefs) => prefs,
            Err(e) => {
                log_warning(&format!("Ignoring unreadable config {}: {}", path.display(), e));
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<(), RouletteError> {
        self.save_to(&Self::get_path())
    }

    /// Overwrite `path` with these preferences
    pub fn save_to(&self, path: &Path) -> Result<(), RouletteError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| RouletteError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| RouletteError::Config(e.to_string()))?;
        fs::write(path, json).map_err(|e| RouletteError::io(path, e))
    }

    /// Tick "include uninstalled", clearing the other mode
    pub fn set_include_uninstalled(&mut self, on: bool) {
        self.include_uninstalled = on;
        if on {
            self.include_installed_only = false;
        }
    }

    /// Tick "installed only", clearing the other mode
    pub fn set_include_installed_only(&mut self, on: bool) {
        self.include_installed_only = on;
        if on {
            self.include_uninstalled = false;
        }
    }
}
