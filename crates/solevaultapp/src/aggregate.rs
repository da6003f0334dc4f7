//! Collection statistics: pair count, total value and brand distribution.

use std::collections::HashMap;

use serde::Serialize;

use crate::model::Sneaker;

/// Bucket for records without a brand.
pub const OTHER_BRAND: &str = "Other";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VaultStats {
    pub total_pairs: usize,
    /// Sum of known prices; unknown prices contribute nothing.
    pub total_value: f64,
    /// How many pairs have a known price.
    pub priced_pairs: usize,
    /// Most common brand first, ties alphabetical.
    pub brand_distribution: Vec<BrandCount>,
}

/// Computes the collection statistics.
///
/// Brands are grouped by their trimmed text, so `"Nike "` and `"Nike"` share
/// one bucket. Grouping stays case-sensitive.
pub fn summarize(collection: &[Sneaker]) -> VaultStats {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for sneaker in collection {
        let brand = sneaker.brand.trim();
        let name = if brand.is_empty() { OTHER_BRAND } else { brand };
        *counts.entry(name).or_insert(0) += 1;
    }

    let mut brand_distribution: Vec<BrandCount> = counts
        .into_iter()
        .map(|(name, count)| BrandCount {
            name: name.to_string(),
            count,
        })
        .collect();
    brand_distribution.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

    VaultStats {
        total_pairs: collection.len(),
        total_value: collection.iter().map(Sneaker::price_or_zero).sum(),
        priced_pairs: collection.iter().filter(|s| s.price.is_some()).count(),
        brand_distribution,
    }
}
