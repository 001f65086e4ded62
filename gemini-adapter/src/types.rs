//! Configuration and wire types for the generateContent API.
//!
//! Request and response bodies follow the canonical camelCase JSON of the
//! Generative Language API. Only the fields this adapter uses are
//! modeled; unknown response fields are ignored.

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default model for extraction work.
pub const GEMINI_FLASH: &str = "gemini-2.5-flash";

/// Larger model for harder documents.
pub const GEMINI_PRO: &str = "gemini-2.5-pro";

/// Public Generative Language API models endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Configuration for a [`crate::GeminiClient`].
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key sent with every request.
    pub api_key: String,
    /// Model name, e.g. [`GEMINI_FLASH`].
    pub model: String,
    /// Base URL of the models endpoint.
    pub base_url: String,
    /// Default sampling temperature; `None` leaves the provider default.
    pub temperature: Option<f32>,
    /// Output token cap; `None` leaves the provider default.
    pub max_output_tokens: Option<u32>,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Creates a config bound to [`GEMINI_FLASH`] with a 120s timeout.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: GEMINI_FLASH.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: None,
            max_output_tokens: None,
            timeout: Duration::from_secs(120),
        }
    }

    /// Sets the model name.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL (for proxies and test servers).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the default sampling temperature.
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the output token cap.
    #[must_use]
    pub const fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    /// Sets the per-request HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Request payload for `generateContent`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Role-tagged messages, oldest first.
    pub contents: Vec<Content>,
    /// Generation knobs; omitted entirely when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
    /// Tools the model may invoke.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolSpec>>,
}

/// One role-tagged message.
#[derive(Debug, Clone, Serialize)]
pub struct Content {
    /// "user" or "model".
    pub role: String,
    /// Message parts in order.
    pub parts: Vec<Part>,
}

/// One part of a message: text or inline binary data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    /// Text part.
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    /// Binary part; bytes are base64-encoded for the wire.
    #[must_use]
    pub fn from_bytes(data: &[u8], mime_type: impl Into<String>) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.into(),
                data: STANDARD.encode(data),
            }),
        }
    }
}

/// Base64 payload with its MIME type.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// MIME type of the decoded bytes.
    pub mime_type: String,
    /// Standard-alphabet base64 of the raw bytes.
    pub data: String,
}

/// Generation knobs; only set fields go on the wire.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Output token cap.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    /// Forced output MIME type, e.g. `application/json`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    /// Schema for constrained decoding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
}

/// Tool made available to the model for one request.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    google_search: Option<GoogleSearch>,
}

/// Marker enabling Google Search grounding.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GoogleSearch {}

impl ToolSpec {
    /// Tool spec enabling Google Search grounding.
    #[must_use]
    pub fn google_search() -> Self {
        Self {
            google_search: Some(GoogleSearch {}),
        }
    }
}

/// Response payload from `generateContent`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    /// Generated candidates; empty when the prompt was blocked.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Token accounting, when the API reports it.
    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,
}

/// One generated candidate.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Absent when generation stopped before producing content
    /// (safety blocks report a finish reason only).
    #[serde(default)]
    pub content: Option<CandidateContent>,
    /// Why generation stopped, e.g. "STOP" or "SAFETY".
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Content of one candidate.
#[derive(Debug, Clone, Deserialize)]
pub struct CandidateContent {
    /// Parts in generation order.
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

/// One response part; non-text parts deserialize with `text: None`.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponsePart {
    /// Generated text, when this part carries any.
    #[serde(default)]
    pub text: Option<String>,
}

/// Token accounting reported by the API.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    /// Tokens consumed by the prompt.
    #[serde(default)]
    pub prompt_token_count: Option<u32>,
    /// Tokens across all candidates.
    #[serde(default)]
    pub candidates_token_count: Option<u32>,
    /// Prompt plus candidates.
    #[serde(default)]
    pub total_token_count: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = GeminiConfig::new("key");
        assert_eq!(config.model, GEMINI_FLASH);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert_eq!(config.temperature, None);
    }

    #[test]
    fn test_config_builders() {
        let config = GeminiConfig::new("key")
            .with_model(GEMINI_PRO)
            .with_temperature(0.1)
            .with_max_output_tokens(2048)
            .with_timeout(Duration::from_secs(30));
        assert_eq!(config.model, GEMINI_PRO);
        assert_eq!(config.temperature, Some(0.1));
        assert_eq!(config.max_output_tokens, Some(2048));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_text_part_serialization() {
        let json = serde_json::to_value(Part::from_text("hello")).unwrap();
        assert_eq!(json, serde_json::json!({ "text": "hello" }));
    }

    #[test]
    fn test_binary_part_encodes_base64() {
        let json = serde_json::to_value(Part::from_bytes(b"abc", "image/png")).unwrap();
        assert_eq!(json["inlineData"]["mimeType"], "image/png");
        assert_eq!(json["inlineData"]["data"], "YWJj");
        assert!(json.get("text").is_none());
    }

    #[test]
    fn test_search_tool_serialization() {
        let json = serde_json::to_value(ToolSpec::google_search()).unwrap();
        assert_eq!(json, serde_json::json!({ "googleSearch": {} }));
    }

    #[test]
    fn test_response_parses_camel_case() {
        let raw = r#"{
            "candidates": [{
                "content": { "parts": [{ "text": "{}" }], "role": "model" },
                "finishReason": "STOP"
            }],
            "usageMetadata": {
                "promptTokenCount": 263,
                "candidatesTokenCount": 91,
                "totalTokenCount": 354
            }
        }"#;
        let response: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.candidates.len(), 1);
        assert_eq!(
            response.candidates[0].finish_reason.as_deref(),
            Some("STOP")
        );
        let usage = response.usage_metadata.unwrap();
        assert_eq!(usage.prompt_token_count, Some(263));
        assert_eq!(usage.total_token_count, Some(354));
    }

    #[test]
    fn test_blocked_candidate_parses_without_content() {
        let raw = r#"{ "candidates": [{ "finishReason": "SAFETY" }] }"#;
        let response: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert!(response.candidates[0].content.is_none());
    }
}
