//! Adapter for the Google Gemini generateContent API.
//!
//! Covers the slice of the API this workspace needs: credential
//! discovery, multimodal request assembly (text plus inline binary
//! parts), schema-constrained JSON output, search-grounded prompts, and
//! a model metadata probe for startup diagnostics.
//!
//! The entry point is [`GeminiClient`]; the free functions in
//! [`request`] and [`process`] are exposed for callers that manage their
//! own HTTP client.

/// Resolution of Gemini API credentials.
pub mod discovery;
/// Error types for adapter operations.
pub mod error;
/// Client initialization and model probing.
pub mod init;
/// Request execution against the HTTP API.
pub mod process;
/// Request-body and URL assembly.
pub mod request;
/// Configuration and wire types.
pub mod types;

pub use discovery::{discover_api_key, GEMINI_API_KEY_ENV_VAR, GOOGLE_API_KEY_ENV_VAR};
pub use error::{GeminiError, RETRYABLE_STATUS};
pub use init::{init, probe, InitReport};
pub use process::{response_text, send_generate};
pub use request::{build_request, model_info_url, redact_key, request_url, RequestSpec};
pub use types::*;

/// Client for the Gemini generateContent API.
///
/// Holds a pooled HTTP connection; cloning shares the pool.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    http: reqwest::Client,
}

impl GeminiClient {
    /// Builds a client over a pooled HTTP connection with the configured
    /// per-request timeout.
    ///
    /// # Errors
    /// [`GeminiError::InvalidConfig`] for an empty API key, `Transport`
    /// when the HTTP client cannot be constructed.
    pub fn new(config: GeminiConfig) -> Result<Self, GeminiError> {
        if config.api_key.trim().is_empty() {
            return Err(GeminiError::InvalidConfig(
                "API key must not be empty".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()?;

        Ok(Self { config, http })
    }

    /// The configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// The underlying pooled HTTP client.
    #[must_use]
    pub const fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Builds and sends one request, returning the model's text.
    ///
    /// # Errors
    /// See [`send_generate`].
    pub async fn generate(&self, spec: RequestSpec<'_>) -> Result<String, GeminiError> {
        let request = build_request(&self.config, spec);
        send_generate(&self.http, &self.config, &request).await
    }
}
