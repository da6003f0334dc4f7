use crate::aggregate;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::{InventoryStore, StorageBackend};

pub fn run<B: StorageBackend>(store: &InventoryStore<B>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_stats(aggregate::summarize(store.snapshot())))
}
