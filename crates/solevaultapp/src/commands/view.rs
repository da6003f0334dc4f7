use crate::commands::CmdResult;
use crate::error::{Result, VaultError};
use crate::store::{InventoryStore, StorageBackend};

pub fn run<B: StorageBackend, I: AsRef<str>>(
    store: &InventoryStore<B>,
    ids: &[I],
) -> Result<CmdResult> {
    let listed = ids
        .iter()
        .map(|id| {
            store
                .get(id.as_ref())
                .cloned()
                .ok_or_else(|| VaultError::NotFound(id.as_ref().to_string()))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(CmdResult::default().with_listed_sneakers(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn views_requested_records_in_order() {
        let store = StoreFixture::new().with_sneakers(3).build();
        let ids: Vec<String> = store.snapshot().iter().rev().map(|s| s.id.clone()).collect();
        let result = run(&store, &ids).unwrap();
        assert_eq!(result.listed_sneakers[0].id, ids[0]);
        assert_eq!(result.listed_sneakers.len(), 3);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let store = StoreFixture::new().with_sneakers(1).build();
        assert!(matches!(run(&store, &["missing"]), Err(VaultError::NotFound(_))));
    }
}
