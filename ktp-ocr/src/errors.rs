//! Public error types.

use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by the document-processing client.
#[derive(Debug, Error)]
pub enum Error {
    /// No API key could be resolved.
    #[error(
        "Gemini API key not found. Set GEMINI_API_KEY (or GOOGLE_API_KEY), \
         or pass one via ClientConfig::with_api_key"
    )]
    CredentialsNotFound,

    /// The Gemini adapter failed outside a pipeline run.
    #[error("Gemini adapter error: {0}")]
    Adapter(#[from] gemini_adapter::GeminiError),

    /// The pipeline failed terminally.
    #[error(transparent)]
    Pipeline(#[from] ktp_ocr_core::PipelineError),

    /// The pipeline exceeded the configured deadline.
    #[error("document processing timed out after {0:?}")]
    Timeout(Duration),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_message_names_both_variables() {
        let message = Error::CredentialsNotFound.to_string();
        assert!(message.contains("GEMINI_API_KEY"));
        assert!(message.contains("GOOGLE_API_KEY"));
    }

    #[test]
    fn test_pipeline_error_is_transparent() {
        let inner = ktp_ocr_core::PipelineError::Schema("boom".to_string());
        let message = inner.to_string();
        assert_eq!(Error::from(inner).to_string(), message);
    }
}
