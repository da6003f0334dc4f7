use crate::error::{Result, VaultError};
use crate::model::Sneaker;
use crate::store::{InventoryStore, StorageBackend};

/// Resolves a user-supplied id or id prefix to a full id.
///
/// An exact match always wins. Otherwise the prefix must match exactly one record.
pub fn resolve_id<B: StorageBackend>(store: &InventoryStore<B>, input: &str) -> Result<String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(VaultError::Api("Empty sneaker id".to_string()));
    }
    if let Some(exact) = store.get(input) {
        return Ok(exact.id.clone());
    }

    let matches: Vec<&Sneaker> = store
        .snapshot()
        .iter()
        .filter(|s| s.id.starts_with(input))
        .collect();

    match matches.as_slice() {
        [] => Err(VaultError::NotFound(input.to_string())),
        [only] => Ok(only.id.clone()),
        many => Err(VaultError::Api(format!(
            "Id prefix '{}' is ambiguous ({} matches), use more characters",
            input,
            many.len()
        ))),
    }
}

/// Resolves several ids, preserving order and dropping repeats.
pub fn resolve_ids<B: StorageBackend, I: AsRef<str>>(
    store: &InventoryStore<B>,
    inputs: &[I],
) -> Result<Vec<String>> {
    let mut ids: Vec<String> = Vec::with_capacity(inputs.len());
    for input in inputs {
        let id = resolve_id(store, input.as_ref())?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

/// The shortest prefix (at least 8 chars) that still identifies `id` uniquely.
pub fn short_id(collection: &[Sneaker], id: &str) -> String {
    let total = id.chars().count();
    let mut len = 8.min(total);
    while len < total {
        let prefix: String = id.chars().take(len).collect();
        let clashes = collection
            .iter()
            .filter(|s| s.id != id && s.id.starts_with(&prefix))
            .count();
        if clashes == 0 {
            break;
        }
        len += 1;
    }
    id.chars().take(len).collect()
}
