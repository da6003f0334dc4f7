//! # Storage Layer
//!
//! SoleVault keeps the entire collection as **one JSON document** under a fixed
//! key. There are no per-record files, no indices and no deltas: every mutation
//! rewrites the whole document.
//!
//! ## Split of Responsibilities
//!
//! - [`backend::StorageBackend`]: raw key-value I/O (`get`/`set`). Knows nothing
//!   about sneakers.
//! - [`inventory::InventoryStore`]: the single source of truth. Owns the
//!   in-memory collection, mints ids and timestamps, serializes the collection
//!   back to the backend after each change and notifies subscribers.
//!
//! ## Failure Model
//!
//! - **Load** never fails. Missing, blank or unparsable documents (and an
//!   unreachable backend) yield an empty collection plus a logged warning. An
//!   unparsable document is copied to a fresh `<key>.corrupt-<stamp>-<suffix>`
//!   before anything can overwrite it. A document the backend cannot read at
//!   all blocks writes until a later load succeeds.
//! - **Mutations** commit to memory only after the write succeeded. A failed
//!   write surfaces as an error and the previous state stays in place.
//! - **Unknown ids** on update/remove are silent no-ops.
//!
//! ## Single Writer
//!
//! All mutators take `&mut self`; whoever owns the store is the only writer.
//! Callers that need to share it across threads must wrap it in a mutex
//! themselves.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: Production backend, `<data_dir>/<key>.json`.
//! - [`mem_backend::MemBackend`]: For testing logic without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <data_dir>/
//! ├── solevault_inventory.json   # The collection
//! └── solevault.toml             # Configuration (optional)
//! ```

pub mod backend;
pub mod fs_backend;
pub mod inventory;
pub mod mem_backend;
pub mod memory;

pub use backend::StorageBackend;
pub use inventory::{InventoryStore, MergeReport, SubscriptionId};
