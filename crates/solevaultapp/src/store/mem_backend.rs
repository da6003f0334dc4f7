use super::backend::StorageBackend;
use crate::error::{Result, VaultError};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the store is single-threaded.
/// This keeps `StorageBackend` on `&self` without reaching for a lock.
#[derive(Default)]
pub struct MemBackend {
    documents: RefCell<HashMap<String, String>>,
    simulate_write_error: RefCell<bool>,
    simulate_read_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw document, bypassing the store (e.g. to plant corrupt data).
    pub fn with_document(self, key: &str, value: &str) -> Self {
        self.documents
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Enable read error simulation, standing in for an unavailable backend.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        *self.simulate_read_error.borrow_mut() = simulate;
    }

    /// Test helper: the raw document currently stored under `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.documents.borrow().get(key).cloned()
    }

    /// Test helper: every stored key starting with `prefix`, sorted.
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        let mut keys: Vec<String> = self
            .documents
            .borrow()
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect();
        keys.sort();
        keys
    }
}

impl StorageBackend for MemBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if *self.simulate_read_error.borrow() {
            return Err(VaultError::Store("Simulated read error".to_string()));
        }
        Ok(self.documents.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(VaultError::Store("Simulated write error".to_string()));
        }
        self.documents
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
