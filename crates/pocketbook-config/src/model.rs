use std::path::PathBuf;

use pocketbook_domain::{UnknownCategoryPolicy, DEFAULT_STORAGE_KEY};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// User preferences persisted as `config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default = "Config::default_storage_key")]
    pub storage_key: String,
    #[serde(default)]
    pub unknown_category: UnknownCategoryPolicy,
    #[serde(default = "Config::default_color_enabled")]
    pub color_enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Directory holding transaction files. Defaults to `<platform data dir>/pocketbook`.
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            storage_key: Self::default_storage_key(),
            unknown_category: UnknownCategoryPolicy::default(),
            color_enabled: Self::default_color_enabled(),
            data_dir: None,
        }
    }
}

impl Config {
    pub fn default_storage_key() -> String {
        DEFAULT_STORAGE_KEY.into()
    }

    pub fn default_color_enabled() -> bool {
        true
    }

    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(path) = &self.data_dir {
            return path.clone();
        }

        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("pocketbook")
    }

    /// Rejects settings the rest of the application cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.locale.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "locale",
                reason: "must not be empty".into(),
            });
        }
        let currency = self.currency.trim();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::Invalid {
                field: "currency",
                reason: format!("`{}` is not a three-letter ISO code", self.currency),
            });
        }
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "storage_key",
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }
}
