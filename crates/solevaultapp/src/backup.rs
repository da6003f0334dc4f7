//! # Backup Codec
//!
//! Backups and the local store share one document shape: a JSON array of
//! sneaker records.
//!
//! ## Export
//!
//! [`export`] pretty-prints the collection. The output depends only on the
//! collection, so exporting the same snapshot twice yields identical bytes.
//!
//! ## Import Validation
//!
//! [`decode`] is all-or-nothing:
//! 1. The document must parse as JSON and its top level must be an array.
//! 2. Every element must deserialize into a [`Sneaker`] (`id` and `addedDate`
//!    are required, the rest have defaults).
//! 3. Ids must be non-empty and unique within the document.
//!
//! Any failure rejects the whole document with [`VaultError::InvalidImport`]
//! naming the offending element; nothing reaches the store.
//!
//! ## Import Modes
//!
//! [`ImportMode::Replace`] (the default) discards the current collection.
//! [`ImportMode::Merge`] overwrites members by id and adds new ones.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde_json::Value;

use crate::error::{Result, VaultError};
use crate::model::Sneaker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    #[default]
    Replace,
    Merge,
}

pub fn export(collection: &[Sneaker]) -> Result<String> {
    Ok(serde_json::to_string_pretty(collection)?)
}

pub fn decode(document: &str) -> Result<Vec<Sneaker>> {
    let value: Value = serde_json::from_str(document)
        .map_err(|e| VaultError::InvalidImport(format!("not valid JSON: {}", e)))?;

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(VaultError::InvalidImport(format!(
                "expected a JSON array of sneakers, found {}",
                describe(&other)
            )))
        }
    };

    let mut records = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        let sneaker: Sneaker = serde_json::from_value(item)
            .map_err(|e| VaultError::InvalidImport(format!("element {}: {}", i, e)))?;
        if sneaker.id.trim().is_empty() {
            return Err(VaultError::InvalidImport(format!(
                "element {}: empty id",
                i
            )));
        }
        records.push(sneaker);
    }

    ensure_unique_ids(&records)?;
    Ok(records)
}

pub fn ensure_unique_ids(records: &[Sneaker]) -> Result<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for (i, sneaker) in records.iter().enumerate() {
        if !seen.insert(sneaker.id.as_str()) {
            return Err(VaultError::InvalidImport(format!(
                "element {}: duplicate id {}",
                i, sneaker.id
            )));
        }
    }
    Ok(())
}

/// `solevault-backup-YYYY-MM-DD.json`
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("solevault-backup-{}.json", date.format("%Y-%m-%d"))
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
