use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{InventoryStore, StorageBackend};

/// Hard-deletes each id in turn. Ids that are already gone are reported and skipped.
pub fn run<B: StorageBackend, I: AsRef<str>>(
    store: &mut InventoryStore<B>,
    ids: &[I],
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for id in ids {
        let id = id.as_ref();
        match store.remove(id)? {
            Some(removed) => {
                result.add_message(CmdMessage::success(format!(
                    "Deleted {}",
                    removed.display_name()
                )));
                result.affected_sneakers.push(removed);
            }
            None => result.add_message(CmdMessage::info(format!(
                "No sneaker with id {}, skipped",
                id
            ))),
        }
    }

    Ok(result)
}
