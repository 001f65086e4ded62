//! High-level document-processing client.

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{error, info, warn};

use gemini_adapter::GeminiClient;
use ktp_ocr_core::{
    DocumentReport, ExtractionOrchestrator, IssueCode, PipelineConfig, RawDocumentInput,
    RequestSession,
};

use crate::config::ClientConfig;
use crate::errors::Error;
use crate::gemini::{GeminiExtractor, GeminiRegionVerifier};

/// Error payload returned when a document cannot be processed.
const EXTRACTION_FAILED: &str = "extraction failed";

/// Client wiring Gemini-backed capabilities into the extraction
/// pipeline.
///
/// Construction probes the model endpoint once and logs the outcome;
/// an unreachable endpoint is not fatal. Requests run inline in the
/// caller's task, bounded by [`ClientConfig::timeout`], and dropping the
/// returned future abandons the in-flight provider calls.
pub struct Client {
    orchestrator: ExtractionOrchestrator,
    config: ClientConfig,
}

impl Client {
    /// Creates a client with environment credential discovery and
    /// default configuration.
    ///
    /// # Errors
    /// [`Error::CredentialsNotFound`] when no API key is available.
    pub async fn new() -> Result<Self, Error> {
        Self::from_config(ClientConfig::default()).await
    }

    /// Creates a client from explicit configuration.
    ///
    /// # Errors
    /// [`Error::CredentialsNotFound`] when no API key is available,
    /// [`Error::Adapter`] when the HTTP client cannot be built.
    pub async fn from_config(config: ClientConfig) -> Result<Self, Error> {
        let (gemini, report) =
            gemini_adapter::init(config.api_key.clone(), Some(config.model.clone()))
                .await
                .map_err(|error| match error {
                    gemini_adapter::GeminiError::CredentialsNotFound(_) => {
                        Error::CredentialsNotFound
                    }
                    other => Error::Adapter(other),
                })?;

        if report.reachable {
            info!(model = %report.model, version = %report.version, "Gemini model reachable");
        } else {
            warn!(
                model = %report.model,
                detail = %report.detail,
                "Gemini model probe failed, continuing anyway"
            );
        }

        Ok(Self::from_adapter(gemini, config))
    }

    /// Builds a client from an existing adapter client, skipping the
    /// startup probe.
    #[must_use]
    pub fn from_adapter(gemini: GeminiClient, config: ClientConfig) -> Self {
        let extractor = Arc::new(GeminiExtractor::new(gemini.clone()));
        let registry = Arc::new(GeminiRegionVerifier::new(gemini));
        let pipeline = PipelineConfig::new().with_retry(config.retry.clone());
        let orchestrator = ExtractionOrchestrator::with_config(extractor, registry, pipeline);
        Self {
            orchestrator,
            config,
        }
    }

    /// Processes one document and returns a JSON object: the extracted
    /// record with a `validation` summary on success, or
    /// `{"error": "extraction failed"}` when the document cannot be
    /// processed. The result is always well-formed JSON.
    pub async fn process_document(&self, bytes: Vec<u8>, mime_type: &str, caller_id: &str) -> Value {
        match self.extract_document(bytes, mime_type, caller_id).await {
            Ok(report) if report.issues.contains(&IssueCode::ParseFailed) => {
                warn!(caller = caller_id, "model output unusable");
                json!({ "error": EXTRACTION_FAILED })
            }
            Ok(report) => report_to_json(&report),
            Err(err) => {
                error!(caller = caller_id, error = %err, "document processing failed");
                json!({ "error": EXTRACTION_FAILED })
            }
        }
    }

    /// Typed variant of [`Self::process_document`].
    ///
    /// # Errors
    /// [`Error::Timeout`] when the pipeline deadline lapses,
    /// [`Error::Pipeline`] when extraction fails terminally.
    pub async fn extract_document(
        &self,
        bytes: Vec<u8>,
        mime_type: &str,
        caller_id: &str,
    ) -> Result<DocumentReport, Error> {
        let session = RequestSession::begin(caller_id);
        let input = RawDocumentInput::new(bytes, mime_type);
        info!(session = %session.id(), mime = mime_type, "processing document");

        match tokio::time::timeout(
            self.config.timeout,
            self.orchestrator.extract(&input, &session),
        )
        .await
        {
            Ok(result) => result.map_err(Error::from),
            Err(_) => Err(Error::Timeout(self.config.timeout)),
        }
    }
}

/// Serializes a report as the record fields plus a validation summary.
fn report_to_json(report: &DocumentReport) -> Value {
    let mut value = serde_json::to_value(&report.record).unwrap_or_else(|_| json!({}));
    if let Some(map) = value.as_object_mut() {
        map.insert(
            "validation".to_string(),
            json!({
                "is_valid": report.is_valid,
                "issues": report.issues,
                "corrected_from_identifier": report.corrected_from_identifier,
            }),
        );
    }
    value
}
