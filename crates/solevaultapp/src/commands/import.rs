use crate::backup::{self, ImportMode};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{InventoryStore, StorageBackend};
use std::fs;
use std::path::Path;
use tracing::info;

/// Validates `document` and loads it into the store.
///
/// Validation is all-or-nothing: a rejected document leaves the collection untouched.
pub fn run<B: StorageBackend>(
    store: &mut InventoryStore<B>,
    document: &str,
    mode: ImportMode,
) -> Result<CmdResult> {
    let records = backup::decode(document)?;
    let count = records.len();
    let mut result = CmdResult::default();

    match mode {
        ImportMode::Replace => {
            store.replace_all(records)?;
            info!(count, "Imported backup (replace)");
            result.add_message(CmdMessage::success(format!(
                "Imported {} pair(s), replacing the previous collection",
                count
            )));
        }
        ImportMode::Merge => {
            let report = store.merge(records)?;
            info!(added = report.added, updated = report.updated, "Imported backup (merge)");
            result.add_message(CmdMessage::success(format!(
                "Merged backup: {} added, {} updated",
                report.added, report.updated
            )));
        }
    }

    result.affected_sneakers = store.snapshot().to_vec();
    Ok(result)
}

pub fn run_from_file<B: StorageBackend>(
    store: &mut InventoryStore<B>,
    path: &Path,
    mode: ImportMode,
) -> Result<CmdResult> {
    let document = fs::read_to_string(path)?;
    let mut result = run(store, &document, mode)?;
    result.paths.push(path.to_path_buf());
    Ok(result)
}
