use super::backend::{corrupt_key, StorageBackend};
use crate::error::{Result, VaultError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use uuid::Uuid;

/// Filesystem backend: every key is a `<key>.json` file inside one data directory.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the document for `key` lives on disk.
    pub fn document_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.json", key)))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(VaultError::Io)?;
        }
        Ok(())
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
        return Err(VaultError::Store(format!("Invalid storage key: {:?}", key)));
    }
    Ok(())
}

impl StorageBackend for FsBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.document_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path).map_err(VaultError::Io)?;
        match String::from_utf8(bytes) {
            Ok(content) => Ok(Some(content)),
            Err(e) => {
                // Keep the original bytes aside; only the lossy text reaches the store.
                let copy = self.document_path(&corrupt_key(key))?;
                match fs::write(&copy, e.as_bytes()) {
                    Ok(()) => {
                        warn!(path = %copy.display(), "Document is not valid UTF-8, kept a raw copy")
                    }
                    Err(err) => {
                        warn!(path = %copy.display(), error = %err, "Could not keep a raw copy of document")
                    }
                }
                Ok(Some(String::from_utf8_lossy(e.as_bytes()).into_owned()))
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let target = self.document_path(key)?;
        self.ensure_dir()?;

        // Atomic Write
        let tmp_path = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp_path, value).map_err(VaultError::Io)?;
        fs::rename(&tmp_path, target).map_err(VaultError::Io)?;

        Ok(())
    }
}
