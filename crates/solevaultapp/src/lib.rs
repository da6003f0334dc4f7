//! # SoleVault Architecture
//!
//! SoleVault is a **UI-agnostic sneaker inventory library**. It keeps a single
//! collection of sneaker records, persists the whole collection after every change,
//! and offers search, sorting, statistics, JSON backups and AI-assisted data entry.
//! The `solevault` binary is one client of it.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (solevault crate)                                │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Resolves id prefixes, applies config defaults            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Business logic over query, aggregate, backup, identify   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - InventoryStore over a StorageBackend key/value trait     │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No Terminal Assumptions in Core
//!
//! From `api.rs` inward, code takes regular Rust arguments, returns
//! `Result<CmdResult>`, and never writes to stdout/stderr or exits the process.
//! Diagnostics go through `tracing`; installing a subscriber is the client's job.
//!
//! ## Testing Strategy
//!
//! 1. **Commands** (`commands/*.rs`): thorough unit tests over `InMemoryStore`.
//! 2. **API** (`api.rs`): dispatch and input normalization.
//! 3. **Store** (`store/`): persistence round trips, failed writes, corrupt documents.
//! 4. **Integration** (`tests/`): the store over a real temp directory.

pub mod aggregate;
pub mod api;
pub mod backup;
pub mod commands;
pub mod config;
pub mod error;
pub mod identify;
pub mod init;
pub mod model;
pub mod query;
pub mod store;
