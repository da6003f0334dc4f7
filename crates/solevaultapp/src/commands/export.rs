use crate::backup;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{InventoryStore, StorageBackend};
use std::fs;
use std::path::Path;

/// Serializes the collection into `result.document` without touching the filesystem.
pub fn run<B: StorageBackend>(store: &InventoryStore<B>) -> Result<CmdResult> {
    let mut result = CmdResult {
        document: Some(backup::export(store.snapshot())?),
        ..Default::default()
    };
    result.add_message(CmdMessage::info(format!(
        "Exported {} pair(s)",
        store.len()
    )));
    Ok(result)
}

/// Writes the backup document to `path`, overwriting any existing file.
pub fn run_to_file<B: StorageBackend>(store: &InventoryStore<B>, path: &Path) -> Result<CmdResult> {
    let document = backup::export(store.snapshot())?;
    fs::write(path, &document)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported {} pair(s) to {}",
        store.len(),
        path.display()
    )));
    result.paths.push(path.to_path_buf());
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use tempfile::tempdir;

    #[test]
    fn export_document_decodes_back() {
        let store = StoreFixture::new().with_sneakers(2).build();
        let result = run(&store).unwrap();
        let decoded = backup::decode(result.document.as_deref().unwrap()).unwrap();
        assert_eq!(decoded, store.snapshot());
    }

    #[test]
    fn empty_collection_exports_empty_array() {
        let store = StoreFixture::new().build();
        let doc = run(&store).unwrap().document.unwrap();
        assert_eq!(doc.trim(), "[]");
    }

    #[test]
    fn export_writes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("backup.json");
        let store = StoreFixture::new().with_sneakers(1).build();

        let result = run_to_file(&store, &path).unwrap();
        assert_eq!(result.paths, vec![path.clone()]);
        let on_disk = fs::read_to_string(&path).unwrap();
        assert_eq!(backup::decode(&on_disk).unwrap(), store.snapshot());
    }
}
