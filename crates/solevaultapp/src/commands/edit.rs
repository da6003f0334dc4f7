use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::SneakerDraft;
use crate::store::{InventoryStore, StorageBackend};

/// Replaces the editable fields of the record with `id`.
///
/// `id`, `added_date` and `condition` are carried over from the stored record,
/// and an unparsable size keeps the stored size. An id that is no longer in the
/// collection is reported, not treated as an error.
pub fn run<B: StorageBackend>(
    store: &mut InventoryStore<B>,
    id: &str,
    draft: SneakerDraft,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let Some(existing) = store.get(id).cloned() else {
        result.add_message(CmdMessage::warning(format!(
            "No sneaker with id {}, nothing changed",
            id
        )));
        return Ok(result);
    };

    let mut sneaker = draft.into_sneaker(existing.id.clone(), existing.added_date, existing.size)?;
    sneaker.condition = existing.condition;

    match store.update(id, sneaker)? {
        Some(updated) => {
            result.add_message(CmdMessage::success(format!(
                "Updated {}",
                updated.display_name()
            )));
            result.affected_sneakers.push(updated);
        }
        None => result.add_message(CmdMessage::warning(format!(
            "No sneaker with id {}, nothing changed",
            id
        ))),
    }
    Ok(result)
}

/// Builds an edit draft pre-filled from the stored record.
///
/// Front-ends that only change a few fields start from this instead of a blank draft.
pub fn draft_for<B: StorageBackend>(
    store: &InventoryStore<B>,
    id: &str,
) -> Option<SneakerDraft> {
    store.get(id).map(SneakerDraft::from_sneaker)
}
