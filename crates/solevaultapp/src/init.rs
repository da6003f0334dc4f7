//! # Context Initialization
//!
//! Every front-end starts by building a [`VaultContext`]: the data directory,
//! the loaded configuration, and an API bound to the filesystem store.
//!
//! ## Data Directory Resolution
//!
//! [`resolve_data_dir`] picks the first of:
//! 1. An explicit override (the CLI's `--data` flag).
//! 2. The `SOLEVAULT_DATA` environment variable (used by tests to isolate state).
//! 3. The OS-appropriate data directory via the `directories` crate.
//!
//! The directory is not created here; the filesystem backend creates it on the
//! first write, so read-only commands against a fresh machine leave no trace.
//!
//! ## Configuration
//!
//! `solevault.toml` is looked up in the data directory and merged with
//! `SOLEVAULT__*` environment variables by clapfig. A missing or broken config
//! file falls back to compiled defaults.

use crate::api::VaultApi;
use crate::config::{VaultConfig, APP_NAME, CONFIG_FILE_NAME};
use crate::error::{Result, VaultError};
use crate::store::fs_backend::FsBackend;
use crate::store::InventoryStore;
use clapfig::{Clapfig, SearchMode, SearchPath};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DATA_DIR_ENV: &str = "SOLEVAULT_DATA";

pub struct VaultContext {
    pub api: VaultApi<FsBackend>,
    pub config: VaultConfig,
    pub data_dir: PathBuf,
}

pub fn resolve_data_dir(data_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = data_override {
        return Ok(path);
    }
    if let Some(path) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    ProjectDirs::from("com", "solevault", APP_NAME)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| VaultError::Config("Could not determine a data directory".to_string()))
}

pub fn load_config(data_dir: &Path) -> VaultConfig {
    Clapfig::builder()
        .app_name(APP_NAME)
        .file_name(CONFIG_FILE_NAME)
        .search_paths(vec![SearchPath::Path(data_dir.to_path_buf())])
        .search_mode(SearchMode::Merge)
        .load()
        .unwrap_or_default()
}

/// Resolves the data directory, loads config and opens the store.
pub fn initialize(data_override: Option<PathBuf>) -> Result<VaultContext> {
    let data_dir = resolve_data_dir(data_override)?;
    let config = load_config(&data_dir);
    debug!(data_dir = %data_dir.display(), key = config.storage_key(), "Opening vault");

    let store = InventoryStore::open(FsBackend::new(data_dir.clone()), config.storage_key());
    let api = VaultApi::new(store, config.clone());

    Ok(VaultContext {
        api,
        config,
        data_dir,
    })
}
