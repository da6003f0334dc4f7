//! # AI Identification
//!
//! Identification is delegated entirely to a hosted model. This module only
//! formats the request (optional image bytes plus an optional text hint) and
//! parses the structured answer into an [`Identification`].
//!
//! The [`Identifier`] trait is the seam: commands take `&dyn Identifier`, the
//! CLI wires in [`GeminiIdentifier`], and tests use canned fakes.
//!
//! One request, one response: no retries, no streaming, no cancellation. Any
//! failure (missing key, transport error, non-2xx status, unusable body) is a
//! [`VaultError::Identify`].

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{Result, VaultError};
use crate::model::decode_data_url;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

const SYSTEM_INSTRUCTION: &str = "You are a sneaker expert. Be precise with model names and colorways. Estimate price based on average resale value.";

#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageData {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Recovers image bytes from a stored `data:` URL blob.
    pub fn from_data_url(data_url: &str) -> Option<Self> {
        decode_data_url(data_url).map(|(mime_type, bytes)| Self { mime_type, bytes })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdentifyRequest {
    pub image: Option<ImageData>,
    pub hint: Option<String>,
}

impl IdentifyRequest {
    pub fn is_empty(&self) -> bool {
        self.image.is_none() && self.hint.as_deref().map_or(true, |h| h.trim().is_empty())
    }

    pub fn prompt(&self) -> String {
        match self.hint.as_deref().map(str::trim).filter(|h| !h.is_empty()) {
            Some(hint) => format!(
                "Identify this sneaker based on the image and/or this text: \"{}\". Provide the brand, model, colorway, and an estimated market price.",
                hint
            ),
            None => "Identify this sneaker from the image. Provide the brand, model, colorway, and an estimated market price.".to_string(),
        }
    }
}

/// What the service thinks the sneaker is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identification {
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub colorway: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

pub trait Identifier {
    fn identify(&self, request: &IdentifyRequest) -> Result<Identification>;
}

/// Google Gemini `generateContent` client with structured JSON output.
pub struct GeminiIdentifier {
    api_key: String,
    model: String,
    endpoint: String,
    timeout: Duration,
}

impl GeminiIdentifier {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Reads the key from `GEMINI_API_KEY`, falling back to `API_KEY`.
    pub fn from_env(model: impl Into<String>) -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                VaultError::Identify("API key not found (set GEMINI_API_KEY)".to_string())
            })?;
        Ok(Self::new(api_key, model))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

impl Identifier for GeminiIdentifier {
    fn identify(&self, request: &IdentifyRequest) -> Result<Identification> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| VaultError::Identify(e.to_string()))?;

        debug!(model = %self.model, has_image = request.image.is_some(), "Requesting identification");
        let response = client
            .post(self.url())
            .header("x-goog-api-key", self.api_key.as_str())
            .json(&build_request_body(request))
            .send()
            .map_err(|e| VaultError::Identify(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(VaultError::Identify(format!(
                "service returned {}: {}",
                status,
                body.trim()
            )));
        }

        let payload: Value = response
            .json()
            .map_err(|e| VaultError::Identify(e.to_string()))?;
        parse_response(&payload)
    }
}

/// Builds the `generateContent` request body: image part (if any), prompt
/// text, and a response schema requiring brand, model and colorway.
pub fn build_request_body(request: &IdentifyRequest) -> Value {
    let mut parts = Vec::new();
    if let Some(image) = &request.image {
        parts.push(json!({
            "inlineData": {
                "mimeType": image.mime_type,
                "data": STANDARD.encode(&image.bytes),
            }
        }));
    }
    parts.push(json!({ "text": request.prompt() }));

    json!({
        "systemInstruction": { "parts": [{ "text": SYSTEM_INSTRUCTION }] },
        "contents": [{ "parts": parts }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "brand": { "type": "STRING", "description": "The brand of the sneaker (e.g., Nike, Adidas, Jordan)." },
                    "model": { "type": "STRING", "description": "The specific model name (e.g., Air Jordan 1 High, Yeezy Boost 350)." },
                    "colorway": { "type": "STRING", "description": "The common colorway name (e.g., Chicago, Bred, Panda)." },
                    "estimatedPrice": { "type": "NUMBER", "description": "Estimated market value in USD as a number." },
                    "description": { "type": "STRING", "description": "A short, punchy description of the shoe." }
                },
                "required": ["brand", "model", "colorway"]
            }
        }
    })
}

/// Pulls the JSON answer out of a `generateContent` response.
pub fn parse_response(payload: &Value) -> Result<Identification> {
    let text: String = payload
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p.get("text").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(VaultError::Identify("service returned no data".to_string()));
    }

    let found: Identification = serde_json::from_str(text.trim())
        .map_err(|e| VaultError::Identify(format!("unreadable answer: {}", e)))?;

    if found.brand.trim().is_empty() && found.model.trim().is_empty() {
        return Err(VaultError::Identify(
            "service could not identify the sneaker".to_string(),
        ));
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_includes_hint_when_present() {
        let req = IdentifyRequest {
            image: None,
            hint: Some(" travis scott mocha ".into()),
        };
        assert!(req.prompt().contains("\"travis scott mocha\""));

        let bare = IdentifyRequest::default();
        assert!(bare.prompt().starts_with("Identify this sneaker from the image"));
        assert!(bare.is_empty());
    }

    #[test]
    fn request_body_carries_image_and_schema() {
        let req = IdentifyRequest {
            image: Some(ImageData::new("image/png", vec![0xde, 0xad])),
            hint: None,
        };
        let body = build_request_body(&req);
        let parts = body["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[0]["inlineData"]["data"], "3q0=");
        assert_eq!(
            body["generationConfig"]["responseSchema"]["required"],
            json!(["brand", "model", "colorway"])
        );
    }

    #[test]
    fn parses_structured_answer() {
        let payload = json!({
            "candidates": [{
                "content": { "parts": [{
                    "text": "{\"brand\":\"Nike\",\"model\":\"Dunk Low\",\"colorway\":\"Panda\",\"estimatedPrice\":115}"
                }]}
            }]
        });
        let found = parse_response(&payload).unwrap();
        assert_eq!(found.brand, "Nike");
        assert_eq!(found.model, "Dunk Low");
        assert_eq!(found.colorway, "Panda");
        assert_eq!(found.estimated_price, Some(115.0));
        assert_eq!(found.description, None);
    }

    #[test]
    fn empty_or_garbage_answers_are_errors() {
        assert!(parse_response(&json!({})).is_err());
        assert!(parse_response(&json!({"candidates": []})).is_err());

        let garbage = json!({"candidates": [{"content": {"parts": [{"text": "I think it's a shoe"}]}}]});
        assert!(matches!(
            parse_response(&garbage),
            Err(VaultError::Identify(_))
        ));

        let blank = json!({"candidates": [{"content": {"parts": [{"text": "{\"brand\":\"\",\"model\":\"\",\"colorway\":\"\"}"}]}}]});
        assert!(parse_response(&blank).is_err());
    }

    #[test]
    fn image_from_data_url() {
        let image = ImageData::from_data_url("data:image/jpeg;base64,AAEC").unwrap();
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.bytes, vec![0, 1, 2]);
    }

    #[test]
    fn url_joins_endpoint_and_model() {
        let gemini = GeminiIdentifier::new("key", "gemini-3-flash-preview")
            .with_endpoint("http://localhost:9999/v1beta/");
        assert_eq!(
            gemini.url(),
            "http://localhost:9999/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }
}
