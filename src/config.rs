//! User preferences persisted between runs
//!
//! Preferences live in a small JSON file in the platform config directory
//! (`~/.config/weather-console/weather_config.json` on Linux). A missing or
//! unreadable file yields the defaults.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::units::UnitSystem;

const CONFIG_FILE_NAME: &str = "weather_config.json";

/// Errors that can occur when saving preferences
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to encode config: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write config file: {0}")]
    Io(#[from] std::io::Error),
}

/// How weather data is laid out on screen
///
/// Anything other than `table` in the config file reads as `Text`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum DisplayMode {
    #[default]
    Text,
    Table,
}

impl From<String> for DisplayMode {
    fn from(s: String) -> Self {
        if s.trim().eq_ignore_ascii_case("table") {
            DisplayMode::Table
        } else {
            DisplayMode::Text
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayMode::Text => f.write_str("text"),
            DisplayMode::Table => f.write_str("table"),
        }
    }
}

/// Stored user preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default location (postal code or city name)
    #[serde(rename = "zip_code", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub display_mode: DisplayMode,
    pub units: UnitSystem,
    pub use_colors: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            location: None,
            display_mode: DisplayMode::Text,
            units: UnitSystem::Metric,
            use_colors: true,
        }
    }
}

impl Config {
    /// Stored location, ignoring blank values
    pub fn location(&self) -> Option<&str> {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|loc| !loc.is_empty())
    }
}

/// Loads and saves `Config` at a fixed path
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore {
    /// Creates a ConfigStore in the platform config directory
    ///
    /// Falls back to `./.weather_config/` when no home directory can be found.
    pub fn new() -> Self {
        let dir = ProjectDirs::from("", "", "weather-console")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".weather_config"));
        Self::with_path(dir.join(CONFIG_FILE_NAME))
    }

    /// Creates a ConfigStore backed by a specific file
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads preferences, falling back to defaults
    pub fn load(&self) -> Config {
        let content = match fs::read(&self.path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("No config at {}: {}", self.path.display(), e);
                return Config::default();
            }
        };

        serde_json::from_slice(&content).unwrap_or_else(|e| {
            tracing::warn!(
                "Ignoring unreadable config {}: {}",
                self.path.display(),
                e
            );
            Config::default()
        })
    }

    /// Writes preferences, creating the config directory if needed
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (ConfigStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = ConfigStore::with_path(temp_dir.path().join("nested").join(CONFIG_FILE_NAME));
        (store, temp_dir)
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.display_mode, DisplayMode::Text);
        assert_eq!(config.units, UnitSystem::Metric);
        assert!(config.use_colors);
        assert!(config.location().is_none());
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let (store, _temp_dir) = create_test_store();
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn test_load_garbled_file_returns_defaults() {
        let (store, _temp_dir) = create_test_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{ not json").unwrap();

        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let (store, _temp_dir) = create_test_store();
        let config = Config {
            location: Some("10001".to_string()),
            display_mode: DisplayMode::Table,
            units: UnitSystem::Imperial,
            use_colors: false,
        };

        store.save(&config).expect("Save should succeed");

        assert_eq!(store.load(), config);
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let (store, _temp_dir) = create_test_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), r#"{"zip_code": "Berlin", "units": "imperial"}"#).unwrap();

        let config = store.load();
        assert_eq!(config.location(), Some("Berlin"));
        assert_eq!(config.units, UnitSystem::Imperial);
        assert_eq!(config.display_mode, DisplayMode::Text);
        assert!(config.use_colors);
    }

    #[test]
    fn test_unknown_units_fall_back_to_metric() {
        let config: Config = serde_json::from_str(r#"{"units": ""}"#).unwrap();
        assert_eq!(config.units, UnitSystem::Metric);
    }

    #[test]
    fn test_unknown_display_mode_keeps_other_fields() {
        let (store, _temp_dir) = create_test_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        let body = r#"{
            "zip_code": "10001",
            "display_mode": "",
            "units": "imperial",
            "use_colors": false
        }"#;
        fs::write(store.path(), body).unwrap();

        let config = store.load();
        assert_eq!(config.display_mode, DisplayMode::Text);
        assert_eq!(config.location(), Some("10001"));
        assert_eq!(config.units, UnitSystem::Imperial);
        assert!(!config.use_colors);
    }

    #[test]
    fn test_display_mode_from_string() {
        assert_eq!(DisplayMode::from("table".to_string()), DisplayMode::Table);
        assert_eq!(DisplayMode::from("TABLE".to_string()), DisplayMode::Table);
        assert_eq!(DisplayMode::from("text".to_string()), DisplayMode::Text);
        assert_eq!(DisplayMode::from("grid".to_string()), DisplayMode::Text);
    }

    #[test]
    fn test_blank_location_is_ignored() {
        let config: Config = serde_json::from_str(r#"{"zip_code": "  "}"#).unwrap();
        assert!(config.location().is_none());
    }

    #[test]
    fn test_saved_file_uses_zip_code_field_name() {
        let (store, _temp_dir) = create_test_store();
        let config = Config {
            location: Some("Oslo".to_string()),
            ..Config::default()
        };
        store.save(&config).expect("Save should succeed");

        let content = fs::read_to_string(store.path()).unwrap();
        assert!(content.contains("\"zip_code\": \"Oslo\""));
        assert!(content.contains("\"display_mode\": \"text\""));
        assert!(content.contains("\"units\": \"metric\""));
        assert!(content.contains("\"use_colors\": true"));
    }
}
