//! Configuration management for mpregistry.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pagination::{DEFAULT_PAGE_SIZE, DEFAULT_WINDOW_SIZE};
use crate::sample::DEFAULT_COUNT;
use crate::store::DEFAULT_COLLECTION_KEY;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "mpregistry";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "mps.db";

/// Placeholder replaced by a member's identity in photo URL templates.
pub const ID_PLACEHOLDER: &str = "{id}";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `MPREGISTRY_`, sections split
///    on `__`, e.g. `MPREGISTRY_LIST__PAGE_SIZE`)
/// 2. TOML config file at `~/.config/mpregistry/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// List view configuration.
    pub list: ListConfig,
    /// Sample data configuration.
    pub sample: SampleConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/mpregistry/mps.db`
    pub database_path: Option<PathBuf>,
    /// Key the collection is stored under.
    pub collection_key: String,
}

/// List view configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Records per page.
    pub page_size: usize,
    /// Page buttons shown at once.
    pub page_window: usize,
}

/// Sample data configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleConfig {
    /// Number of members to generate.
    pub count: usize,
    /// Photo URL for generated members; `{id}` is replaced by the identity.
    pub photo_url_template: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None, // Will be resolved to default at runtime
            collection_key: DEFAULT_COLLECTION_KEY.to_string(),
        }
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_window: DEFAULT_WINDOW_SIZE,
        }
    }
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            photo_url_template: "https://i.pravatar.cc/150?u={id}".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `MPREGISTRY_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("MPREGISTRY_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.storage.collection_key.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "collection_key must not be empty".to_string(),
            });
        }

        if self.list.page_size == 0 {
            return Err(Error::ConfigValidation {
                message: "page_size must be greater than 0".to_string(),
            });
        }

        if self.list.page_window == 0 {
            return Err(Error::ConfigValidation {
                message: "page_window must be greater than 0".to_string(),
            });
        }

        if !self.sample.photo_url_template.contains(ID_PLACEHOLDER) {
            return Err(Error::ConfigValidation {
                message: format!("photo_url_template must contain {ID_PLACEHOLDER}"),
            });
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }
}
