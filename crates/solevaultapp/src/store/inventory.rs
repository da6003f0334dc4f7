use super::backend::{corrupt_key, StorageBackend};
use crate::backup;
use crate::error::{Result, VaultError};
use crate::model::{new_id, Sneaker};
use chrono::Utc;
use tracing::{debug, warn};

pub type SubscriptionId = usize;

type Observer = Box<dyn FnMut(&[Sneaker])>;

/// Outcome of an additive import.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MergeReport {
    pub added: usize,
    pub updated: usize,
}

/// The single source of truth for the collection.
///
/// Holds the whole collection in memory and writes all of it back to the
/// backend after every mutation. A mutation is committed to memory only once
/// the write succeeded, so a failed write leaves the previous state in place.
pub struct InventoryStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    key: String,
    sneakers: Vec<Sneaker>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: SubscriptionId,
    /// Set when the last load could not read the backend at all. Writes are
    /// refused until a load succeeds, since the document may still exist.
    read_failed: bool,
}

impl<B: StorageBackend> InventoryStore<B> {
    /// Creates an empty store bound to `key`. Nothing is read until [`load`](Self::load).
    pub fn new(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            sneakers: Vec::new(),
            observers: Vec::new(),
            next_subscription: 0,
            read_failed: false,
        }
    }

    /// Creates a store and loads whatever the backend holds under `key`.
    pub fn open(backend: B, key: impl Into<String>) -> Self {
        let mut store = Self::new(backend, key);
        store.load();
        store
    }

    /// (Re)reads the persisted document. Never fails: a missing, empty or
    /// unreadable document leaves an empty collection behind.
    ///
    /// An unparsable document is copied aside first. When the backend itself
    /// cannot be read the store stays empty and refuses writes until a later
    /// load succeeds.
    ///
    /// Returns the number of records loaded.
    pub fn load(&mut self) -> usize {
        self.read_failed = false;
        self.sneakers = match self.backend.get(&self.key) {
            Ok(Some(raw)) if !raw.trim().is_empty() => match backup::decode(&raw) {
                Ok(records) => records,
                Err(e) => {
                    warn!(key = %self.key, error = %e, "Failed to parse saved sneakers");
                    self.preserve_unreadable(&raw);
                    Vec::new()
                }
            },
            Ok(_) => Vec::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Storage backend unavailable, starting empty");
                self.read_failed = true;
                Vec::new()
            }
        };
        debug!(count = self.sneakers.len(), "Loaded collection");
        self.notify();
        self.sneakers.len()
    }

    // Keep a copy of a document we could not parse, since the next write replaces it.
    fn preserve_unreadable(&self, raw: &str) {
        let aside = corrupt_key(&self.key);
        match self.backend.set(&aside, raw) {
            Ok(()) => warn!(key = %aside, "Kept a copy of the unreadable document"),
            Err(e) => warn!(key = %aside, error = %e, "Could not preserve unreadable document"),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The current collection, newest additions first unless an import said otherwise.
    pub fn snapshot(&self) -> &[Sneaker] {
        &self.sneakers
    }

    pub fn get(&self, id: &str) -> Option<&Sneaker> {
        self.sneakers.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.sneakers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sneakers.is_empty()
    }

    /// Adds a record, minting its `id` and `added_date` (caller values are ignored).
    /// The record is prepended so default iteration order is newest first.
    pub fn add(&mut self, mut sneaker: Sneaker) -> Result<Sneaker> {
        sneaker.id = self.mint_id();
        sneaker.added_date = Utc::now();

        let mut next = Vec::with_capacity(self.sneakers.len() + 1);
        next.push(sneaker.clone());
        next.extend(self.sneakers.iter().cloned());
        self.commit(next)?;

        debug!(id = %sneaker.id, "Added sneaker");
        Ok(sneaker)
    }

    fn mint_id(&self) -> String {
        loop {
            let id = new_id();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    /// Replaces every field of the member with `id` except `id` and `added_date`.
    /// Unknown ids are a no-op returning `Ok(None)`.
    pub fn update(&mut self, id: &str, mut sneaker: Sneaker) -> Result<Option<Sneaker>> {
        let Some(pos) = self.sneakers.iter().position(|s| s.id == id) else {
            debug!(id, "Update skipped, no such sneaker");
            return Ok(None);
        };

        let existing = &self.sneakers[pos];
        sneaker.id = existing.id.clone();
        sneaker.added_date = existing.added_date;

        let mut next = self.sneakers.clone();
        next[pos] = sneaker.clone();
        self.commit(next)?;

        debug!(id, "Updated sneaker");
        Ok(Some(sneaker))
    }

    /// Hard-deletes the member with `id`. Unknown ids are a no-op returning `Ok(None)`.
    pub fn remove(&mut self, id: &str) -> Result<Option<Sneaker>> {
        let Some(pos) = self.sneakers.iter().position(|s| s.id == id) else {
            debug!(id, "Remove skipped, no such sneaker");
            return Ok(None);
        };

        let mut next = self.sneakers.clone();
        let removed = next.remove(pos);
        self.commit(next)?;

        debug!(id, "Removed sneaker");
        Ok(Some(removed))
    }

    /// Discards the collection in favor of `records` (full-replace import).
    pub fn replace_all(&mut self, records: Vec<Sneaker>) -> Result<()> {
        backup::ensure_unique_ids(&records)?;
        let count = records.len();
        self.commit(records)?;
        debug!(count, "Replaced collection");
        Ok(())
    }

    /// Additive import: members with a matching id are overwritten in place,
    /// unknown ids are prepended in the order given.
    pub fn merge(&mut self, records: Vec<Sneaker>) -> Result<MergeReport> {
        let mut next = self.sneakers.clone();
        let mut fresh: Vec<Sneaker> = Vec::new();
        let mut report = MergeReport::default();

        for record in records {
            if let Some(pos) = next.iter().position(|s| s.id == record.id) {
                next[pos] = record;
                report.updated += 1;
            } else if let Some(pos) = fresh.iter().position(|s| s.id == record.id) {
                fresh[pos] = record;
            } else {
                fresh.push(record);
                report.added += 1;
            }
        }

        fresh.extend(next);
        self.commit(fresh)?;

        debug!(added = report.added, updated = report.updated, "Merged collection");
        Ok(report)
    }

    /// Registers a callback fired with the new snapshot after every committed
    /// mutation and after each load.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&[Sneaker]) + 'static,
    {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    fn commit(&mut self, next: Vec<Sneaker>) -> Result<()> {
        if self.read_failed {
            return Err(VaultError::Store(format!(
                "Refusing to overwrite {:?}: it could not be read at load",
                self.key
            )));
        }
        let document = serde_json::to_string(&next)?;
        self.backend.set(&self.key, &document)?;
        self.sneakers = next;
        debug!(count = self.sneakers.len(), key = %self.key, "Persisted collection");
        self.notify();
        Ok(())
    }

    fn notify(&mut self) {
        for (_, observer) in self.observers.iter_mut() {
            observer(&self.sneakers);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use chrono::Duration;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;

    const KEY: &str = "solevault_inventory";

    fn make_store() -> InventoryStore<MemBackend> {
        InventoryStore::open(MemBackend::new(), KEY)
    }

    // --- Load Tests ---

    #[test]
    fn load_missing_document_is_empty() {
        let store = make_store();
        assert!(store.is_empty());
    }

    #[test]
    fn load_blank_document_is_empty() {
        let store = InventoryStore::open(MemBackend::new().with_document(KEY, "  "), KEY);
        assert!(store.is_empty());
    }

    #[test]
    fn load_unparsable_document_is_swallowed() {
        let backend = MemBackend::new().with_document(KEY, "{not json");
        let store = InventoryStore::open(backend, KEY);
        assert!(store.is_empty());
        // The broken document is kept aside rather than silently lost
        let aside = store.backend.keys_with_prefix("solevault_inventory.corrupt-");
        assert_eq!(aside.len(), 1);
        assert_eq!(store.backend.raw(&aside[0]).as_deref(), Some("{not json"));
    }

    #[test]
    fn repeated_unparsable_loads_keep_every_copy() {
        let backend = MemBackend::new().with_document(KEY, "{first");
        let mut store = InventoryStore::open(backend, KEY);
        store.backend.set(KEY, "{second").unwrap();
        store.load();

        let aside = store.backend.keys_with_prefix("solevault_inventory.corrupt-");
        assert_eq!(aside.len(), 2);
        let mut kept: Vec<String> = aside
            .iter()
            .filter_map(|key| store.backend.raw(key))
            .collect();
        kept.sort();
        assert_eq!(kept, vec!["{first".to_string(), "{second".to_string()]);
    }

    #[test]
    fn load_non_array_document_is_swallowed() {
        let backend = MemBackend::new().with_document(KEY, r#"{"foo":1}"#);
        let store = InventoryStore::open(backend, KEY);
        assert!(store.is_empty());
    }

    #[test]
    fn load_tolerates_unavailable_backend() {
        let backend = MemBackend::new();
        backend.set_simulate_read_error(true);
        let store = InventoryStore::open(backend, KEY);
        assert!(store.is_empty());
    }

    #[test]
    fn unreadable_backend_blocks_writes_until_reload() {
        let existing = r#"[{"id":"a","brand":"Nike","model":"Dunk Low","colorway":"","size":9,"addedDate":"2024-01-01T00:00:00Z"}]"#;
        let backend = MemBackend::new().with_document(KEY, existing);
        backend.set_simulate_read_error(true);
        let mut store = InventoryStore::open(backend, KEY);

        let err = store.add(Sneaker::new("Adidas", "Samba")).unwrap_err();
        assert!(matches!(err, VaultError::Store(_)));
        assert_eq!(store.backend.raw(KEY).as_deref(), Some(existing));

        store.backend.set_simulate_read_error(false);
        assert_eq!(store.load(), 1);
        store.add(Sneaker::new("Adidas", "Samba")).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn load_reads_what_was_persisted() {
        let mut store = make_store();
        store.add(Sneaker::new("Nike", "Dunk Low")).unwrap();
        store.add(Sneaker::new("Adidas", "Samba")).unwrap();

        let raw = store.backend.raw(KEY).unwrap();
        let reopened = InventoryStore::open(MemBackend::new().with_document(KEY, &raw), KEY);
        assert_eq!(reopened.snapshot(), store.snapshot());
    }

    // --- Add Tests ---

    #[test]
    fn add_mints_id_and_date_and_prepends() {
        let mut store = make_store();
        let mut input = Sneaker::new("Nike", "Dunk Low");
        input.id = "caller-supplied".into();
        input.added_date = Utc::now() - Duration::days(365);

        let first = store.add(input).unwrap();
        let second = store.add(Sneaker::new("Adidas", "Samba")).unwrap();

        assert_ne!(first.id, "caller-supplied");
        assert!(Utc::now() - first.added_date < Duration::minutes(1));
        assert_eq!(store.snapshot()[0].id, second.id);
        assert_eq!(store.snapshot()[1].id, first.id);
    }

    #[test]
    fn add_ids_are_pairwise_distinct() {
        let mut store = make_store();
        for i in 0..50 {
            store.add(Sneaker::new("Brand", format!("Model {}", i))).unwrap();
        }
        let ids: HashSet<_> = store.snapshot().iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn add_persists_whole_collection() {
        let mut store = make_store();
        store.add(Sneaker::new("Nike", "Dunk Low")).unwrap();
        store.add(Sneaker::new("Adidas", "Samba")).unwrap();

        let persisted: Vec<Sneaker> =
            serde_json::from_str(&store.backend.raw(KEY).unwrap()).unwrap();
        assert_eq!(persisted, store.snapshot());
    }

    // --- Update Tests ---

    #[test]
    fn update_preserves_id_and_added_date() {
        let mut store = make_store();
        let original = store.add(Sneaker::new("Nike", "Dunk Low")).unwrap();

        let mut replacement = Sneaker::new("Nike", "Dunk High")
            .with_colorway("Panda")
            .with_price(Some(130.0));
        replacement.added_date = Utc::now() + Duration::days(3);

        let updated = store.update(&original.id, replacement.clone()).unwrap().unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.added_date, original.added_date);
        assert_eq!(updated.model, "Dunk High");
        assert_eq!(updated.colorway, "Panda");
        assert_eq!(updated.price, Some(130.0));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&original.id), Some(&updated));
    }

    #[test]
    fn update_unknown_id_is_noop() {
        let mut store = make_store();
        store.add(Sneaker::new("Nike", "Dunk Low")).unwrap();
        let before = store.snapshot().to_vec();

        let result = store.update("missing", Sneaker::new("Adidas", "Samba")).unwrap();

        assert!(result.is_none());
        assert_eq!(store.snapshot(), before.as_slice());
    }

    // --- Remove Tests ---

    #[test]
    fn remove_is_idempotent() {
        let mut store = make_store();
        let keep = store.add(Sneaker::new("Nike", "Dunk Low")).unwrap();
        let gone = store.add(Sneaker::new("Adidas", "Samba")).unwrap();

        assert!(store.remove(&gone.id).unwrap().is_some());
        let once = store.snapshot().to_vec();
        assert!(store.remove(&gone.id).unwrap().is_none());

        assert_eq!(store.snapshot(), once.as_slice());
        assert_eq!(store.snapshot()[0].id, keep.id);
    }

    // --- Bulk Tests ---

    #[test]
    fn replace_all_discards_previous_collection() {
        let mut store = make_store();
        store.add(Sneaker::new("Nike", "Dunk Low")).unwrap();

        let incoming = vec![Sneaker::new("New Balance", "550")];
        store.replace_all(incoming.clone()).unwrap();

        assert_eq!(store.snapshot(), incoming.as_slice());
    }

    #[test]
    fn replace_all_rejects_duplicate_ids() {
        let mut store = make_store();
        let existing = store.add(Sneaker::new("Nike", "Dunk Low")).unwrap();

        let a = Sneaker::new("A", "1");
        let mut b = Sneaker::new("B", "2");
        b.id = a.id.clone();

        let result = store.replace_all(vec![a, b]);
        assert!(matches!(result, Err(VaultError::InvalidImport(_))));
        assert_eq!(store.snapshot()[0].id, existing.id);
    }

    #[test]
    fn merge_overwrites_matching_and_prepends_new() {
        let mut store = make_store();
        let existing = store.add(Sneaker::new("Nike", "Dunk Low")).unwrap();

        let mut changed = existing.clone();
        changed.price = Some(99.0);
        let fresh = Sneaker::new("Asics", "Gel-Kayano 14");

        let report = store.merge(vec![changed, fresh.clone()]).unwrap();

        assert_eq!(report, MergeReport { added: 1, updated: 1 });
        assert_eq!(store.len(), 2);
        assert_eq!(store.snapshot()[0].id, fresh.id);
        assert_eq!(store.get(&existing.id).unwrap().price, Some(99.0));
    }

    // --- Failure Tests ---

    #[test]
    fn failed_write_preserves_previous_state() {
        let mut store = make_store();
        let existing = store.add(Sneaker::new("Nike", "Dunk Low")).unwrap();
        store.backend.set_simulate_write_error(true);

        assert!(store.add(Sneaker::new("Adidas", "Samba")).is_err());
        assert!(store.remove(&existing.id).is_err());
        assert!(store
            .update(&existing.id, Sneaker::new("Nike", "Dunk High"))
            .is_err());

        assert_eq!(store.len(), 1);
        assert_eq!(store.snapshot()[0], existing);
    }

    // --- Observer Tests ---

    #[test]
    fn observers_see_each_committed_snapshot() {
        let mut store = make_store();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let sub = store.subscribe(move |snapshot| sink.borrow_mut().push(snapshot.len()));

        let first = store.add(Sneaker::new("Nike", "Dunk Low")).unwrap();
        store.add(Sneaker::new("Adidas", "Samba")).unwrap();
        store.remove(&first.id).unwrap();
        // No-op: nothing committed, nothing notified
        store.remove(&first.id).unwrap();

        assert_eq!(*seen.borrow(), vec![1, 2, 1]);

        assert!(store.unsubscribe(sub));
        store.add(Sneaker::new("Puma", "Suede")).unwrap();
        assert_eq!(seen.borrow().len(), 3);
        assert!(!store.unsubscribe(sub));
    }

    #[test]
    fn observers_are_not_notified_on_failed_write() {
        let mut store = make_store();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        store.subscribe(move |_| *sink.borrow_mut() += 1);

        store.backend.set_simulate_write_error(true);
        let _ = store.add(Sneaker::new("Nike", "Dunk Low"));

        assert_eq!(*count.borrow(), 0);
    }
}
