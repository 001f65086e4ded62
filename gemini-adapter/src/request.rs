//! Request-body and URL assembly for generateContent calls.

use serde_json::Value;

use crate::types::{Content, GeminiConfig, GenerateRequest, GenerationConfig, Part, ToolSpec};

/// Inputs for one generation request.
///
/// Per-request settings override the [`GeminiConfig`] defaults.
#[derive(Debug, Clone, Default)]
pub struct RequestSpec<'a> {
    /// Prompt text sent as the first part.
    pub prompt: &'a str,
    /// Optional binary attachment as `(bytes, mime_type)`.
    pub attachment: Option<(&'a [u8], &'a str)>,
    /// Schema for constrained JSON decoding; also forces a JSON
    /// response MIME type.
    pub response_schema: Option<Value>,
    /// Enables Google Search grounding.
    pub search_grounding: bool,
    /// Sampling temperature override.
    pub temperature: Option<f32>,
}

/// Builds the wire request for `spec` under `config` defaults.
#[must_use]
pub fn build_request(config: &GeminiConfig, spec: RequestSpec<'_>) -> GenerateRequest {
    let mut parts = vec![Part::from_text(spec.prompt)];
    if let Some((bytes, mime_type)) = spec.attachment {
        parts.push(Part::from_bytes(bytes, mime_type));
    }

    let temperature = spec.temperature.or(config.temperature);
    let wants_json = spec.response_schema.is_some();
    let generation_config = (temperature.is_some()
        || config.max_output_tokens.is_some()
        || wants_json)
        .then(|| GenerationConfig {
            temperature,
            max_output_tokens: config.max_output_tokens,
            response_mime_type: wants_json.then(|| "application/json".to_string()),
            response_schema: spec.response_schema,
        });

    let tools = spec
        .search_grounding
        .then(|| vec![ToolSpec::google_search()]);

    GenerateRequest {
        contents: vec![Content {
            role: "user".to_string(),
            parts,
        }],
        generation_config,
        tools,
    }
}

/// generateContent URL for `config`. Embeds the API key; never log the
/// result without [`redact_key`].
#[must_use]
pub fn request_url(config: &GeminiConfig) -> String {
    format!(
        "{}/{}:generateContent?key={}",
        config.base_url, config.model, config.api_key
    )
}

/// Model metadata URL used by the init probe.
#[must_use]
pub fn model_info_url(config: &GeminiConfig) -> String {
    format!("{}/{}?key={}", config.base_url, config.model, config.api_key)
}

/// Masks the API key inside `url` for logging.
#[must_use]
pub fn redact_key(url: &str, api_key: &str) -> String {
    if api_key.is_empty() {
        url.to_string()
    } else {
        url.replace(api_key, "***")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GEMINI_FLASH;
    use serde_json::json;

    fn config() -> GeminiConfig {
        GeminiConfig::new("sk-test")
    }

    fn as_json(request: &GenerateRequest) -> Value {
        serde_json::to_value(request).unwrap()
    }

    #[test]
    fn test_minimal_request_has_single_text_part() {
        let request = build_request(
            &config(),
            RequestSpec {
                prompt: "hello",
                ..RequestSpec::default()
            },
        );
        let json = as_json(&request);
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert!(json.get("generationConfig").is_none());
        assert!(json.get("tools").is_none());
    }

    #[test]
    fn test_attachment_becomes_second_part() {
        let request = build_request(
            &config(),
            RequestSpec {
                prompt: "describe",
                attachment: Some((b"abc", "image/jpeg")),
                ..RequestSpec::default()
            },
        );
        let json = as_json(&request);
        let parts = json["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(parts[1]["inlineData"]["data"], "YWJj");
    }

    #[test]
    fn test_response_schema_forces_json_mime() {
        let schema = json!({ "type": "object" });
        let request = build_request(
            &config(),
            RequestSpec {
                prompt: "extract",
                response_schema: Some(schema.clone()),
                ..RequestSpec::default()
            },
        );
        let json = as_json(&request);
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(json["generationConfig"]["responseSchema"], schema);
    }

    #[test]
    fn test_search_grounding_adds_tool() {
        let request = build_request(
            &config(),
            RequestSpec {
                prompt: "verify",
                search_grounding: true,
                temperature: Some(0.1),
                ..RequestSpec::default()
            },
        );
        let json = as_json(&request);
        assert_eq!(json["tools"][0]["googleSearch"], json!({}));
        let temperature = json["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temperature - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_spec_temperature_overrides_config_default() {
        let config = config().with_temperature(0.7);
        let request = build_request(
            &config,
            RequestSpec {
                prompt: "x",
                temperature: Some(0.2),
                ..RequestSpec::default()
            },
        );
        let json = as_json(&request);
        let temperature = json["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temperature - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_urls_embed_model_and_key() {
        let url = request_url(&config());
        assert_eq!(
            url,
            format!(
                "https://generativelanguage.googleapis.com/v1beta/models/{GEMINI_FLASH}:generateContent?key=sk-test"
            )
        );
        let info = model_info_url(&config());
        assert!(info.ends_with(&format!("{GEMINI_FLASH}?key=sk-test")));
    }

    #[test]
    fn test_redact_key_masks_secret() {
        let url = request_url(&config());
        let redacted = redact_key(&url, "sk-test");
        assert!(!redacted.contains("sk-test"));
        assert!(redacted.contains("key=***"));
    }
}
