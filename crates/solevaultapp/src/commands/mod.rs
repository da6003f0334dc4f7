//! # Command Layer
//!
//! This module contains the **core business logic** of SoleVault. Each command lives in its
//! own submodule and implements plain Rust functions over the inventory store.
//!
//! ## Role and Responsibilities
//!
//! Commands are where the real work happens:
//! - Turn drafts into records and hand them to the store
//! - Run the query and aggregation engines over the current snapshot
//! - Return structured [`CmdResult`] values with affected records and messages
//! - Stay UI-agnostic
//!
//! ## What Commands Do NOT Do
//!
//! - **Terminal output**: No stdout, stderr, or formatting
//! - **Argument parsing**: That's the CLI layer's job
//! - **Exit codes**: Return `Result`, let the caller decide
//! - **Prompts**: Return data, the UI decides
//!
//! ## Errors vs. Messages
//!
//! Hard failures (validation, invalid import, failed writes) are `Err`.
//! Soft outcomes, like an edit of an id that no longer exists or a failed AI
//! lookup that leaves the draft untouched, are `Ok` with a warning or error
//! message, since the previous state is intact.
//!
//! ## Testing Strategy
//!
//! **This is where the lion's share of testing lives.** Command tests use
//! [`InMemoryStore`](crate::store::memory::InMemoryStore) and fake identifiers.
//!
//! ## Command Modules
//!
//! - [`add`]: Add a sneaker from a draft
//! - [`edit`]: Replace a sneaker's fields, keeping identity
//! - [`delete`]: Hard-delete sneakers
//! - [`list`]: Search and sort the collection
//! - [`view`]: Fetch single records
//! - [`stats`]: Totals and brand distribution
//! - [`export`]: Write a backup document
//! - [`import`]: Validate and load a backup document
//! - [`identify`]: Ask the AI service to fill in a draft
//! - [`helpers`]: Shared utilities (id prefix resolution)

use crate::aggregate::VaultStats;
use crate::identify::Identification;
use crate::model::Sneaker;
use serde::Serialize;
use std::path::PathBuf;

pub mod add;
pub mod delete;
pub mod edit;
pub mod export;
pub mod helpers;
pub mod identify;
pub mod import;
pub mod list;
pub mod stats;
pub mod view;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Records created, changed or removed by the command.
    pub affected_sneakers: Vec<Sneaker>,
    /// Records to display (list/view).
    pub listed_sneakers: Vec<Sneaker>,
    pub stats: Option<VaultStats>,
    pub identification: Option<Identification>,
    /// Serialized backup document, when exporting to a stream.
    pub document: Option<String>,
    pub paths: Vec<PathBuf>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_sneakers(mut self, sneakers: Vec<Sneaker>) -> Self {
        self.affected_sneakers = sneakers;
        self
    }

    pub fn with_listed_sneakers(mut self, sneakers: Vec<Sneaker>) -> Self {
        self.listed_sneakers = sneakers;
        self
    }

    pub fn with_stats(mut self, stats: VaultStats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|m| m.level == MessageLevel::Error)
    }
}
