//! # Query Engine
//!
//! A pure `(collection, search term, sort option) -> ordered list` transform.
//! Nothing is cached between calls; every query scans the snapshot it is given.
//!
//! ## Filtering
//!
//! The term is trimmed and lowercased, then matched as a substring of each
//! record's `"brand model colorway"` text, so `"nike panda"` finds nothing but
//! `"dunk low panda"` finds a Nike Dunk Low in Panda. A blank term matches
//! everything.
//!
//! ## Sorting
//!
//! | option | order |
//! |--------|-------|
//! | `newest` | `added_date` descending |
//! | `oldest` | `added_date` ascending |
//! | `price_high` | price descending, unknown price as 0 |
//! | `price_low` | price ascending, unknown price as 0 |
//!
//! Sorting is stable: equal keys keep their input order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VaultError;
use crate::model::Sneaker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    #[default]
    Newest,
    Oldest,
    PriceHigh,
    PriceLow,
}

impl SortOption {
    pub const ALL: [SortOption; 4] = [
        SortOption::Newest,
        SortOption::Oldest,
        SortOption::PriceHigh,
        SortOption::PriceLow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Newest => "newest",
            SortOption::Oldest => "oldest",
            SortOption::PriceHigh => "price_high",
            SortOption::PriceLow => "price_low",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        SortOption::ALL
            .into_iter()
            .find(|opt| opt.as_str() == normalized)
            .ok_or_else(|| {
                VaultError::Validation(format!(
                    "Unknown sort option '{}' (expected newest, oldest, price_high or price_low)",
                    s
                ))
            })
    }
}

/// Filters and orders `collection`, returning a new list. The input is untouched.
pub fn run(collection: &[Sneaker], term: &str, sort: SortOption) -> Vec<Sneaker> {
    let mut result = filter(collection, term);
    sort_in_place(&mut result, sort);
    result
}

pub fn filter(collection: &[Sneaker], term: &str) -> Vec<Sneaker> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return collection.to_vec();
    }
    collection
        .iter()
        .filter(|s| s.search_text().contains(&term))
        .cloned()
        .collect()
}

pub fn sort_in_place(sneakers: &mut [Sneaker], sort: SortOption) {
    // slice::sort_by is stable
    match sort {
        SortOption::Newest => sneakers.sort_by(|a, b| b.added_date.cmp(&a.added_date)),
        SortOption::Oldest => sneakers.sort_by(|a, b| a.added_date.cmp(&b.added_date)),
        SortOption::PriceHigh => {
            sneakers.sort_by(|a, b| b.price_or_zero().total_cmp(&a.price_or_zero()))
        }
        SortOption::PriceLow => {
            sneakers.sort_by(|a, b| a.price_or_zero().total_cmp(&b.price_or_zero()))
        }
    }
}
