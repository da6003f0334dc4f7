use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::SneakerDraft;
use crate::store::{InventoryStore, StorageBackend};
use chrono::Utc;

/// Validates `draft` and adds it as a new record.
///
/// `default_size` is used when the draft's size does not parse.
pub fn run<B: StorageBackend>(
    store: &mut InventoryStore<B>,
    draft: SneakerDraft,
    default_size: f64,
) -> Result<CmdResult> {
    // id and added_date are minted by the store
    let sneaker = draft.into_sneaker(String::new(), Utc::now(), default_size)?;
    let added = store.add(sneaker)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Added {}",
        added.display_name()
    )));
    result.affected_sneakers.push(added);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VaultError;
    use crate::model::Condition;
    use crate::store::memory::InMemoryStore;

    fn draft(brand: &str, model: &str, size: &str, price: &str) -> SneakerDraft {
        SneakerDraft {
            brand: brand.into(),
            model: model.into(),
            colorway: "Panda".into(),
            size: size.into(),
            price: price.into(),
            image: None,
        }
    }

    #[test]
    fn adds_coerced_record() {
        let mut store = InMemoryStore::in_memory();
        let result = run(&mut store, draft(" Nike ", "Dunk Low", "9", "120"), 10.0).unwrap();

        assert_eq!(store.len(), 1);
        let added = &result.affected_sneakers[0];
        assert_eq!(added.brand, "Nike");
        assert_eq!(added.size, 9.0);
        assert_eq!(added.price, Some(120.0));
        assert_eq!(added.condition, Condition::Deadstock);
        assert!(!added.id.is_empty());
        assert_eq!(store.snapshot()[0].id, added.id);
    }

    #[test]
    fn blank_price_is_unknown_and_bad_size_falls_back() {
        let mut store = InMemoryStore::in_memory();
        let result = run(&mut store, draft("Adidas", "Samba", "big", ""), 11.0).unwrap();
        let added = &result.affected_sneakers[0];
        assert_eq!(added.price, None);
        assert_eq!(added.size, 11.0);
    }

    #[test]
    fn missing_model_is_rejected_without_mutation() {
        let mut store = InMemoryStore::in_memory();
        let err = run(&mut store, draft("Nike", "  ", "9", "120"), 10.0).unwrap_err();
        assert!(matches!(err, VaultError::Validation(_)));
        assert_eq!(err.to_string(), "Brand and Model are required.");
        assert!(store.is_empty());
    }

    #[test]
    fn newest_addition_comes_first() {
        let mut store = InMemoryStore::in_memory();
        run(&mut store, draft("Nike", "Dunk Low", "9", ""), 10.0).unwrap();
        run(&mut store, draft("Adidas", "Samba", "9", ""), 10.0).unwrap();
        assert_eq!(store.snapshot()[0].model, "Samba");
    }

    #[test]
    fn failed_write_leaves_store_unchanged() {
        let mut store = InMemoryStore::in_memory();
        store.backend.set_simulate_write_error(true);
        assert!(run(&mut store, draft("Nike", "Dunk Low", "9", ""), 10.0).is_err());
        assert!(store.is_empty());
    }
}
