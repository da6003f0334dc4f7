//! # Domain Model: Sneaker Records and Form Coercion
//!
//! This module defines the single persisted entity, [`Sneaker`], and the
//! [`SneakerDraft`] that front-ends fill in before a record exists.
//!
//! ## Records vs. Drafts
//!
//! A front-end collects strings: the user types `"9.5"` into a size box, leaves
//! the price blank, or pastes `"$120"` by mistake. Those strings live in a
//! [`SneakerDraft`] until submit. Submitting a draft coerces and validates it:
//!
//! 1. **Validation**: Brand and Model must be non-empty after trimming.
//!    Failure is a [`VaultError::Validation`], never a panic.
//! 2. **Price**: [`parse_price`]. Anything that is not a finite number is
//!    *absent*, which is not the same as zero.
//! 3. **Size**: [`parse_size`]. Anything that is not a finite number falls back
//!    to the last valid size (the record being edited, or [`DEFAULT_SIZE`]).
//!
//! ## Identity and Timestamps
//!
//! `id` and `added_date` are minted once, by the store, when a record is added.
//! They never change afterwards; an edit carries both over no matter what the
//! caller supplied.
//!
//! ## Wire Shape
//!
//! Records serialize with camelCase keys (`addedDate`), and `price`/`image` are
//! omitted when absent. The same shape is used by local persistence and by
//! backup files.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::{Result, VaultError};
use crate::identify::Identification;

/// Size used when nothing parseable was ever entered.
pub const DEFAULT_SIZE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Condition {
    #[default]
    Deadstock,
    Used,
    Beater,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Condition::Deadstock => "Deadstock",
            Condition::Used => "Used",
            Condition::Beater => "Beater",
        };
        f.write_str(s)
    }
}

fn default_size() -> f64 {
    DEFAULT_SIZE
}

// Older documents store an unknown size as `null`.
fn deserialize_size<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?
        .filter(|size| size.is_finite())
        .unwrap_or(DEFAULT_SIZE))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sneaker {
    pub id: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub colorway: String,
    #[serde(default = "default_size", deserialize_with = "deserialize_size")]
    pub size: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Opaque image blob, usually a `data:` URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub condition: Condition,
    pub added_date: DateTime<Utc>,
}

impl Sneaker {
    pub fn new(brand: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            brand: brand.into(),
            model: model.into(),
            colorway: String::new(),
            size: DEFAULT_SIZE,
            price: None,
            image: None,
            condition: Condition::Deadstock,
            added_date: Utc::now(),
        }
    }

    pub fn with_colorway(mut self, colorway: impl Into<String>) -> Self {
        self.colorway = colorway.into();
        self
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn with_price(mut self, price: Option<f64>) -> Self {
        self.price = price;
        self
    }

    /// Price used for ordering and totals: unknown counts as 0.
    pub fn price_or_zero(&self) -> f64 {
        self.price.unwrap_or(0.0)
    }

    /// Lowercased `"brand model colorway"`, the text searches run against.
    pub fn search_text(&self) -> String {
        format!("{} {} {}", self.brand, self.model, self.colorway).to_lowercase()
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }
}

/// Mints a fresh record id. Only uniqueness is guaranteed, not ordering.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Parses a free-text price. Blank, garbage and non-finite input mean "unknown".
pub fn parse_price(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Parses a free-text size, falling back to `fallback` when it does not parse.
pub fn parse_size(input: &str, fallback: f64) -> f64 {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(fallback)
}

/// Raw, string-typed form input.
#[derive(Debug, Clone, PartialEq)]
pub struct SneakerDraft {
    pub brand: String,
    pub model: String,
    pub colorway: String,
    pub size: String,
    pub price: String,
    pub image: Option<String>,
}

impl Default for SneakerDraft {
    fn default() -> Self {
        Self {
            brand: String::new(),
            model: String::new(),
            colorway: String::new(),
            size: DEFAULT_SIZE.to_string(),
            price: String::new(),
            image: None,
        }
    }
}

impl SneakerDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// A blank draft with the model pre-filled, used when a search came up empty
    /// and the user wants to add what they searched for.
    pub fn with_model(term: &str) -> Self {
        Self {
            model: term.trim().to_string(),
            ..Self::default()
        }
    }

    /// Pre-fills a draft from an existing record for editing.
    pub fn from_sneaker(sneaker: &Sneaker) -> Self {
        Self {
            brand: sneaker.brand.clone(),
            model: sneaker.model.clone(),
            colorway: sneaker.colorway.clone(),
            size: sneaker.size.to_string(),
            price: sneaker.price.map(|p| p.to_string()).unwrap_or_default(),
            image: sneaker.image.clone(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.brand.trim().is_empty() || self.model.trim().is_empty() {
            return Err(VaultError::Validation(
                "Brand and Model are required.".to_string(),
            ));
        }
        Ok(())
    }

    /// Validates and coerces the draft into a record.
    ///
    /// `fallback_size` is the last valid size for this record (or the configured
    /// default for new ones). Condition is always `Deadstock` here; edits carry
    /// the previous condition over themselves.
    pub fn into_sneaker(
        self,
        id: String,
        added_date: DateTime<Utc>,
        fallback_size: f64,
    ) -> Result<Sneaker> {
        self.validate()?;
        Ok(Sneaker {
            id,
            brand: self.brand.trim().to_string(),
            model: self.model.trim().to_string(),
            colorway: self.colorway.trim().to_string(),
            size: parse_size(&self.size, fallback_size),
            price: parse_price(&self.price),
            image: self.image.filter(|img| !img.is_empty()),
            condition: Condition::Deadstock,
            added_date,
        })
    }

    /// Overwrites the identified fields. Price is only touched when the service
    /// provided one.
    pub fn apply_identification(&mut self, found: &Identification) {
        self.brand = found.brand.clone();
        self.model = found.model.clone();
        self.colorway = found.colorway.clone();
        if let Some(price) = found.estimated_price {
            self.price = price.to_string();
        }
    }
}

pub fn image_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// Splits a `data:<mime>;base64,<payload>` blob back into its mime type and bytes.
pub fn decode_data_url(data_url: &str) -> Option<(String, Vec<u8>)> {
    let rest = data_url.strip_prefix("data:")?;
    let (meta, payload) = rest.split_once(',')?;
    let mime_type = meta.strip_suffix(";base64")?;
    let bytes = STANDARD.decode(payload.trim()).ok()?;
    Some((mime_type.to_string(), bytes))
}

pub fn mime_for_extension(ext: &str) -> &'static str {
    match ext.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "heic" => "image/heic",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(brand: &str, model: &str) -> SneakerDraft {
        SneakerDraft {
            brand: brand.into(),
            model: model.into(),
            ..SneakerDraft::default()
        }
    }

    #[test]
    fn parse_price_accepts_numbers() {
        assert_eq!(parse_price("120"), Some(120.0));
        assert_eq!(parse_price("  89.99 "), Some(89.99));
        assert_eq!(parse_price("0"), Some(0.0));
    }

    #[test]
    fn parse_price_treats_garbage_as_absent() {
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("   "), None);
        assert_eq!(parse_price("$120"), None);
        assert_eq!(parse_price("NaN"), None);
        assert_eq!(parse_price("inf"), None);
    }

    #[test]
    fn parse_size_falls_back_to_last_valid_value() {
        assert_eq!(parse_size("9.5", DEFAULT_SIZE), 9.5);
        assert_eq!(parse_size("big", 11.0), 11.0);
        assert_eq!(parse_size("", DEFAULT_SIZE), 10.0);
        assert_eq!(parse_size("infinity", 8.0), 8.0);
    }

    #[test]
    fn new_ids_are_distinct() {
        let a = new_id();
        let b = new_id();
        assert_ne!(a, b);
    }

    #[test]
    fn validate_requires_brand_and_model() {
        assert!(draft("Nike", "Dunk Low").validate().is_ok());
        assert!(matches!(
            draft("", "Dunk Low").validate(),
            Err(VaultError::Validation(_))
        ));
        assert!(matches!(
            draft("Nike", "   ").validate(),
            Err(VaultError::Validation(_))
        ));
    }

    #[test]
    fn price_is_not_required() {
        let sneaker = draft("Nike", "Dunk Low")
            .into_sneaker("id-1".into(), Utc::now(), DEFAULT_SIZE)
            .unwrap();
        assert_eq!(sneaker.price, None);
        assert_eq!(sneaker.size, 10.0);
        assert_eq!(sneaker.condition, Condition::Deadstock);
    }

    #[test]
    fn into_sneaker_trims_and_coerces() {
        let mut d = draft("  Nike ", " Dunk Low ");
        d.colorway = " Panda ".into();
        d.size = "9".into();
        d.price = "120".into();
        let now = Utc::now();
        let sneaker = d.into_sneaker("abc".into(), now, DEFAULT_SIZE).unwrap();

        assert_eq!(sneaker.id, "abc");
        assert_eq!(sneaker.brand, "Nike");
        assert_eq!(sneaker.model, "Dunk Low");
        assert_eq!(sneaker.colorway, "Panda");
        assert_eq!(sneaker.size, 9.0);
        assert_eq!(sneaker.price, Some(120.0));
        assert_eq!(sneaker.added_date, now);
    }

    #[test]
    fn from_sneaker_round_trips_through_draft() {
        let original = Sneaker::new("Adidas", "Samba")
            .with_colorway("Cloud White")
            .with_size(8.5)
            .with_price(Some(100.0));
        let rebuilt = SneakerDraft::from_sneaker(&original)
            .into_sneaker(original.id.clone(), original.added_date, 1.0)
            .unwrap();
        assert_eq!(rebuilt, original);
    }

    #[test]
    fn from_sneaker_leaves_unknown_price_blank() {
        let original = Sneaker::new("Adidas", "Samba");
        assert_eq!(SneakerDraft::from_sneaker(&original).price, "");
    }

    #[test]
    fn with_model_prefills_search_term() {
        let d = SneakerDraft::with_model("  Jordan 4 ");
        assert_eq!(d.model, "Jordan 4");
        assert_eq!(d.brand, "");
        assert_eq!(d.size, "10");
    }

    #[test]
    fn apply_identification_keeps_price_when_not_estimated() {
        let mut d = draft("", "");
        d.price = "150".into();
        d.apply_identification(&Identification {
            brand: "Jordan".into(),
            model: "Air Jordan 1 High".into(),
            colorway: "Chicago".into(),
            estimated_price: None,
            description: None,
        });
        assert_eq!(d.brand, "Jordan");
        assert_eq!(d.model, "Air Jordan 1 High");
        assert_eq!(d.colorway, "Chicago");
        assert_eq!(d.price, "150");

        d.apply_identification(&Identification {
            brand: "Jordan".into(),
            model: "Air Jordan 1 High".into(),
            colorway: "Chicago".into(),
            estimated_price: Some(420.0),
            description: None,
        });
        assert_eq!(d.price, "420");
    }

    #[test]
    fn serializes_with_camel_case_and_omits_absent_fields() {
        let sneaker = Sneaker::new("Nike", "Dunk Low");
        let value = serde_json::to_value(&sneaker).unwrap();
        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("addedDate"));
        assert!(!obj.contains_key("price"));
        assert!(!obj.contains_key("image"));
        assert_eq!(obj["condition"], "Deadstock");
    }

    #[test]
    fn deserializes_browser_style_timestamps() {
        let json = r#"{"id":"1700000000000","brand":"Nike","model":"Dunk","colorway":"","size":10,"condition":"Used","addedDate":"2024-03-01T12:30:00.000Z"}"#;
        let sneaker: Sneaker = serde_json::from_str(json).unwrap();
        assert_eq!(sneaker.id, "1700000000000");
        assert_eq!(sneaker.condition, Condition::Used);
        assert_eq!(sneaker.price, None);
    }

    #[test]
    fn data_url_round_trip() {
        let url = image_data_url("image/png", &[1, 2, 3]);
        assert!(url.starts_with("data:image/png;base64,"));
        let (mime, bytes) = decode_data_url(&url).unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(bytes, vec![1, 2, 3]);
        assert!(decode_data_url("not a data url").is_none());
    }
}
