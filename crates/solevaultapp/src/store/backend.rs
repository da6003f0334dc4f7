use crate::error::Result;
use chrono::Utc;
use uuid::Uuid;

/// Abstract interface for raw key-value persistence.
///
/// This trait handles the "how" of storage (filesystem vs memory), while
/// [`InventoryStore`](super::inventory::InventoryStore) handles the "what"
/// (identity, ordering, whole-collection writes). Each key holds one complete
/// serialized document; there are no partial writes.
pub trait StorageBackend {
    /// Read the document stored under `key`.
    /// Returns Ok(None) if nothing was ever written there.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the document stored under `key`.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// A fresh key for setting aside a document that could not be used.
///
/// Each call yields a distinct `<key>.corrupt-<timestamp>-<suffix>` so earlier
/// copies are never overwritten.
pub fn corrupt_key(key: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "{}.corrupt-{}-{}",
        key,
        Utc::now().format("%Y%m%dT%H%M%S"),
        &suffix[..8]
    )
}
