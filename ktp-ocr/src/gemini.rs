//! Gemini-backed implementations of the pipeline capabilities.
//!
//! Two bridges over one shared [`GeminiClient`]:
//!
//! - [`GeminiExtractor`] runs the multimodal extraction request with
//!   schema-constrained JSON output.
//! - [`GeminiRegionVerifier`] answers region checks with a
//!   search-grounded prompt at low temperature.

use async_trait::async_trait;
use chrono::Local;
use serde::Deserialize;
use tracing::debug;

use gemini_adapter::{GeminiClient, GeminiError, RequestSpec};
use ktp_ocr_core::{
    prompt, sanitize, schema, Confidence, DocumentExtractor, ProviderError, RawDocumentInput,
    RegionRegistry, RegionVerification, RequestSession,
};

/// Sampling temperature for region verdicts.
const REGION_VERIFY_TEMPERATURE: f32 = 0.1;

/// Extraction capability backed by Gemini multimodal generation.
#[derive(Debug, Clone)]
pub struct GeminiExtractor {
    client: GeminiClient,
}

impl GeminiExtractor {
    /// Wraps an adapter client.
    #[must_use]
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DocumentExtractor for GeminiExtractor {
    async fn extract_document(
        &self,
        instruction: &str,
        input: &RawDocumentInput,
        session: &RequestSession,
    ) -> Result<String, ProviderError> {
        debug!(
            session = %session.id(),
            mime = %input.mime_type,
            bytes = input.bytes.len(),
            "sending extraction request"
        );
        self.client
            .generate(RequestSpec {
                prompt: instruction,
                attachment: Some((&input.bytes, &input.mime_type)),
                response_schema: Some(schema::response_schema()),
                search_grounding: false,
                temperature: None,
            })
            .await
            .map_err(provider_error)
    }
}

/// Region-verification capability backed by search-grounded generation.
#[derive(Debug, Clone)]
pub struct GeminiRegionVerifier {
    client: GeminiClient,
}

impl GeminiRegionVerifier {
    /// Wraps an adapter client.
    #[must_use]
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RegionRegistry for GeminiRegionVerifier {
    async fn verify(&self, region_code: &str) -> Result<RegionVerification, ProviderError> {
        let prompt = prompt::region_verification_prompt(region_code, Local::now().date_naive());
        let text = self
            .client
            .generate(RequestSpec {
                prompt: &prompt,
                attachment: None,
                response_schema: None,
                search_grounding: true,
                temperature: Some(REGION_VERIFY_TEMPERATURE),
            })
            .await
            .map_err(provider_error)?;
        Ok(parse_verdict(&text))
    }
}

/// Wire shape of the verifier's JSON verdict.
#[derive(Debug, Deserialize)]
struct VerdictPayload {
    #[serde(default)]
    valid: Option<bool>,
    #[serde(default)]
    confidence: Option<Confidence>,
}

/// Maps adapter failures onto the capability error contract.
fn provider_error(error: GeminiError) -> ProviderError {
    if error.is_transient() {
        ProviderError::Transient(error.to_string())
    } else {
        ProviderError::Fatal(error.to_string())
    }
}

/// Parses a model verdict; anything unreadable counts as undecided.
fn parse_verdict(text: &str) -> RegionVerification {
    match serde_json::from_str::<VerdictPayload>(sanitize::sanitize(text)) {
        Ok(payload) => RegionVerification {
            valid: payload.valid,
            confidence: payload.confidence.unwrap_or(Confidence::Low),
        },
        Err(error) => {
            debug!(%error, "unreadable region verdict");
            RegionVerification::unknown()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_verdict_plain_json() {
        let verdict = parse_verdict(r#"{"valid": true, "confidence": "high"}"#);
        assert_eq!(verdict.valid, Some(true));
        assert_eq!(verdict.confidence, Confidence::High);
    }

    #[test]
    fn test_parse_verdict_through_code_fence() {
        let verdict = parse_verdict("```json\n{\"valid\": false, \"confidence\": \"medium\"}\n```");
        assert_eq!(verdict.valid, Some(false));
        assert_eq!(verdict.confidence, Confidence::Medium);
    }

    #[test]
    fn test_parse_verdict_defaults_missing_confidence_to_low() {
        let verdict = parse_verdict(r#"{"valid": true}"#);
        assert_eq!(verdict.valid, Some(true));
        assert_eq!(verdict.confidence, Confidence::Low);
    }

    #[test]
    fn test_parse_verdict_garbage_is_undecided() {
        assert_eq!(
            parse_verdict("the region looks fine to me"),
            RegionVerification::unknown()
        );
        assert_eq!(parse_verdict(""), RegionVerification::unknown());
    }

    #[test]
    fn test_provider_error_classification() {
        let rate_limited = GeminiError::Api {
            status: 429,
            message: "slow down".to_string(),
        };
        assert!(provider_error(rate_limited).is_transient());

        let unauthorized = GeminiError::Api {
            status: 401,
            message: "bad key".to_string(),
        };
        assert!(!provider_error(unauthorized).is_transient());
    }
}
