//! # Configuration
//!
//! SoleVault configuration is managed by [`clapfig`], which handles layered loading
//! from TOML files, environment variables, and programmatic overrides.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `SOLEVAULT__STORAGE_KEY`, `SOLEVAULT__DEFAULT_SORT`, etc.
//! 2. **Data-dir Config**: `<data_dir>/solevault.toml`.
//! 3. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `storage_key` | `solevault_inventory` | Key (file stem) the collection is stored under |
//! | `default_sort` | `newest` | Sort used by `list` when none is given |
//! | `default_size` | `10` | Size used when the size field does not parse |
//! | `ai_model` | `gemini-3-flash-preview` | Model used for identification |
//! | `ai_timeout_secs` | `30` | Timeout for the identification request |
//!
//! ## CLI Usage
//!
//! - `solevault config`: Show all configuration values.
//! - `solevault config get <key>`: Get a specific value.
//! - `solevault config set <key> <value>`: Set a value.
//! - `solevault config gen`: Generate a sample `solevault.toml`.

use confique::Config;
use serde::{Deserialize, Serialize};

use crate::model::DEFAULT_SIZE;
use crate::query::SortOption;

pub const DEFAULT_STORAGE_KEY: &str = "solevault_inventory";
pub const CONFIG_FILE_NAME: &str = "solevault.toml";
pub const APP_NAME: &str = "solevault";

/// Configuration for SoleVault, stored in `solevault.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VaultConfig {
    /// Key the collection document is stored under (file stem of the data file).
    #[config(default = "solevault_inventory")]
    pub storage_key: String,

    /// Sort used by `list` when none is given: newest, oldest, price_high, price_low.
    #[config(default = "newest")]
    pub default_sort: String,

    /// Size used when the entered size does not parse.
    #[config(default = 10.0)]
    pub default_size: f64,

    /// Model name passed to the identification service.
    #[config(default = "gemini-3-flash-preview")]
    pub ai_model: String,

    /// Timeout, in seconds, for the identification request.
    #[config(default = 30)]
    pub ai_timeout_secs: u64,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            default_sort: SortOption::Newest.to_string(),
            default_size: DEFAULT_SIZE,
            ai_model: "gemini-3-flash-preview".to_string(),
            ai_timeout_secs: 30,
        }
    }
}

impl VaultConfig {
    /// The configured default sort; an unrecognized value falls back to `newest`.
    pub fn default_sort(&self) -> SortOption {
        self.default_sort.parse().unwrap_or_default()
    }

    /// The configured fallback size; non-finite or non-positive values fall back to 10.
    pub fn default_size(&self) -> f64 {
        if self.default_size.is_finite() && self.default_size > 0.0 {
            self.default_size
        } else {
            DEFAULT_SIZE
        }
    }

    /// Storage key, falling back to the default when configured blank.
    pub fn storage_key(&self) -> &str {
        let key = self.storage_key.trim();
        if key.is_empty() {
            DEFAULT_STORAGE_KEY
        } else {
            key
        }
    }
}
