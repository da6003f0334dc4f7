//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for all SoleVault operations, regardless of the UI being used.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (id prefixes → full ids, config defaults → arguments)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **Terminal I/O**: No stdout, stderr, or formatting
//! - **Presentation concerns**: Returns data structures, not strings
//!
//! ## Id Prefixes
//!
//! Record ids are UUIDs, which nobody wants to type. Every method taking ids
//! accepts a unique prefix (`solevault view 3f2a`) and resolves it through
//! [`commands::helpers::resolve_id`] before dispatching. Unknown prefixes are
//! [`VaultError::NotFound`](crate::error::VaultError::NotFound).
//!
//! ## Generic Over StorageBackend
//!
//! `VaultApi<B: StorageBackend>` is generic over the storage backend:
//! - Production: `VaultApi<FsBackend>`
//! - Testing: `VaultApi<MemBackend>`

use crate::backup::ImportMode;
use crate::commands::{self, CmdResult};
use crate::config::VaultConfig;
use crate::error::{Result, VaultError};
use crate::identify::{Identifier, IdentifyRequest};
use crate::model::{Sneaker, SneakerDraft};
use crate::query::SortOption;
use crate::store::{InventoryStore, StorageBackend, SubscriptionId};
use std::path::Path;

pub struct VaultApi<B: StorageBackend> {
    store: InventoryStore<B>,
    config: VaultConfig,
}

impl<B: StorageBackend> VaultApi<B> {
    pub fn new(store: InventoryStore<B>, config: VaultConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &InventoryStore<B> {
        &self.store
    }

    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&[Sneaker]) + 'static,
    {
        self.store.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    pub fn add_sneaker(&mut self, draft: SneakerDraft) -> Result<CmdResult> {
        let default_size = self.config.default_size();
        commands::add::run(&mut self.store, draft, default_size)
    }

    /// Pre-filled edit draft for `id` (or a prefix of it).
    pub fn edit_draft(&self, id: &str) -> Result<SneakerDraft> {
        let id = commands::helpers::resolve_id(&self.store, id)?;
        commands::edit::draft_for(&self.store, &id)
            .ok_or(VaultError::NotFound(id))
    }

    pub fn edit_sneaker(&mut self, id: &str, draft: SneakerDraft) -> Result<CmdResult> {
        let id = commands::helpers::resolve_id(&self.store, id)?;
        commands::edit::run(&mut self.store, &id, draft)
    }

    pub fn delete_sneakers<I: AsRef<str>>(&mut self, ids: &[I]) -> Result<CmdResult> {
        let ids = commands::helpers::resolve_ids(&self.store, ids)?;
        commands::delete::run(&mut self.store, &ids)
    }

    /// Lists the collection. `sort` falls back to the configured default.
    pub fn list_sneakers(&self, term: Option<&str>, sort: Option<SortOption>) -> Result<CmdResult> {
        let sort = sort.unwrap_or_else(|| self.config.default_sort());
        commands::list::run(&self.store, term, sort)
    }

    pub fn view_sneakers<I: AsRef<str>>(&self, ids: &[I]) -> Result<CmdResult> {
        let ids = commands::helpers::resolve_ids(&self.store, ids)?;
        commands::view::run(&self.store, &ids)
    }

    pub fn stats(&self) -> Result<CmdResult> {
        commands::stats::run(&self.store)
    }

    pub fn export_document(&self) -> Result<CmdResult> {
        commands::export::run(&self.store)
    }

    pub fn export_to_file(&self, path: &Path) -> Result<CmdResult> {
        commands::export::run_to_file(&self.store, path)
    }

    pub fn import_document(&mut self, document: &str, mode: ImportMode) -> Result<CmdResult> {
        commands::import::run(&mut self.store, document, mode)
    }

    pub fn import_from_file(&mut self, path: &Path, mode: ImportMode) -> Result<CmdResult> {
        commands::import::run_from_file(&mut self.store, path, mode)
    }

    pub fn identify(
        &self,
        identifier: &dyn Identifier,
        request: &IdentifyRequest,
    ) -> Result<CmdResult> {
        commands::identify::run(identifier, request)
    }

    pub fn fill_draft(
        &self,
        identifier: &dyn Identifier,
        request: &IdentifyRequest,
        draft: &mut SneakerDraft,
    ) -> CmdResult {
        commands::identify::fill_draft(identifier, request, draft)
    }

    /// Short display form of `id`, unique within the current collection.
    pub fn short_id(&self, id: &str) -> String {
        commands::helpers::short_id(self.store.snapshot(), id)
    }
}
