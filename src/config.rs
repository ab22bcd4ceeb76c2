//! Configuration management for Site Locale
//!
//! Handles loading and managing the localization configuration.
//! Configuration is read from a JSON file in the user's config directory and
//! falls back to defaults matching the stock site layout.

use crate::error::{ConfigError, ConfigResult};
use crate::i18n::PrefixRule;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier used for config and data directories
pub const APP_ID: &str = "site-locale";

/// Relative location of the translation catalog
pub const DEFAULT_CATALOG_LOCATION: &str = "translations.json";

/// Storage key holding the user's explicit language choice
pub const DEFAULT_PREFERENCE_KEY: &str = "selectedLanguage";

/// Locale selected when no other source matches
pub const DEFAULT_LOCALE: &str = "zh-CN";

/// Name of the configuration file inside the config directory
const CONFIG_FILE_NAME: &str = "config.json";

/// Localization configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Location of the catalog, relative to the page or base URL
    pub catalog_location: String,

    /// Base URL for HTTP fetches (file fetch when unset)
    pub base_url: Option<String>,

    /// Storage key of the persisted preference
    pub preference_key: String,

    /// Final fallback locale
    pub default_locale: String,

    /// Browser-locale prefix rules consulted after the built-in `en` rule
    pub extra_rules: Vec<PrefixRule>,

    /// Directory holding durable storage (data dir when unset)
    pub storage_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_location: DEFAULT_CATALOG_LOCATION.to_string(),
            base_url: None,
            preference_key: DEFAULT_PREFERENCE_KEY.to_string(),
            default_locale: DEFAULT_LOCALE.to_string(),
            extra_rules: Vec::new(),
            storage_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from the config directory or return defaults
    pub fn load() -> ConfigResult<Self> {
        let path = Self::config_dir()?.join(CONFIG_FILE_NAME);
        if !path.exists() {
            log::debug!("No configuration at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Check values that would make the pipeline unusable
    pub fn validate(&self) -> ConfigResult<()> {
        if self.catalog_location.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "catalog_location".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.preference_key.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "preference_key".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if let Some(rule) = self.extra_rules.iter().find(|r| r.prefix.is_empty()) {
            return Err(ConfigError::InvalidValue {
                key: "extra_rules".to_string(),
                reason: format!("rule for {} has an empty prefix", rule.locale),
            });
        }
        Ok(())
    }

    /// Get the configuration directory path
    pub fn config_dir() -> ConfigResult<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_ID))
            .ok_or(ConfigError::DirectoryError)
    }

    /// Get the directory backing durable storage
    pub fn storage_dir(&self) -> ConfigResult<PathBuf> {
        if let Some(dir) = &self.storage_dir {
            return Ok(dir.clone());
        }
        dirs::data_dir()
            .map(|p| p.join(APP_ID))
            .ok_or(ConfigError::DirectoryError)
    }
}
