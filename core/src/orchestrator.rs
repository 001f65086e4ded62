//! End-to-end coordination of one document request.
//!
//! The orchestrator owns the full sequence: build the extraction
//! instruction, run the extraction capability under the retry policy,
//! parse and schema-check the output, then hand the record to the
//! semantic validator. Extraction failures are terminal; validation
//! failures are not (the record survives, flagged as unchecked).

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use serde_json::Value;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, ProviderError};
use crate::metrics::{PipelineMetrics, estimate_tokens};
use crate::prompt;
use crate::record::{DocumentReport, ExtractionResult, IssueCode, RawDocumentInput};
use crate::registry::RegionRegistry;
use crate::sanitize;
use crate::schema;
use crate::session::RequestSession;
use crate::validator::SemanticValidator;

/// Capability that turns a document image into raw model text.
///
/// Implementations receive the assembled instruction and the document
/// bytes; schema constraining and transport are provider concerns.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    /// Runs one multimodal extraction request.
    ///
    /// # Errors
    /// [`ProviderError::Transient`] for failures worth retrying,
    /// [`ProviderError::Fatal`] otherwise.
    async fn extract_document(
        &self,
        instruction: &str,
        input: &RawDocumentInput,
        session: &RequestSession,
    ) -> Result<String, ProviderError>;
}

/// Drives extraction, parsing, and validation for single documents.
pub struct ExtractionOrchestrator {
    extractor: Arc<dyn DocumentExtractor>,
    validator: SemanticValidator,
    config: PipelineConfig,
    schema: Value,
}

impl ExtractionOrchestrator {
    /// Creates an orchestrator with default pipeline configuration.
    #[must_use]
    pub fn new(extractor: Arc<dyn DocumentExtractor>, registry: Arc<dyn RegionRegistry>) -> Self {
        Self::with_config(extractor, registry, PipelineConfig::default())
    }

    /// Creates an orchestrator with explicit configuration.
    ///
    /// The validator shares the configured retry policy, so extraction
    /// and region verification back off on the same schedule.
    #[must_use]
    pub fn with_config(
        extractor: Arc<dyn DocumentExtractor>,
        registry: Arc<dyn RegionRegistry>,
        config: PipelineConfig,
    ) -> Self {
        let validator = SemanticValidator::new(registry).with_retry(config.retry.clone());
        Self {
            extractor,
            validator,
            config,
            schema: schema::record_schema(),
        }
    }

    /// Processes one document end to end.
    ///
    /// # Errors
    /// [`PipelineError::Extraction`] when the extraction capability fails
    /// terminally. Unparseable output and validation unavailability are
    /// reported on the [`DocumentReport`] instead.
    pub async fn extract(
        &self,
        input: &RawDocumentInput,
        session: &RequestSession,
    ) -> Result<DocumentReport, PipelineError> {
        self.extract_at(input, session, Local::now().date_naive())
            .await
    }

    /// [`Self::extract`] with an explicit `today`, for deterministic age
    /// and century arithmetic.
    ///
    /// # Errors
    /// See [`Self::extract`].
    pub async fn extract_at(
        &self,
        input: &RawDocumentInput,
        session: &RequestSession,
        today: NaiveDate,
    ) -> Result<DocumentReport, PipelineError> {
        let start = Instant::now();

        if self.config.enforce_schema {
            jsonschema::Validator::new(&self.schema)
                .map_err(|error| PipelineError::Schema(error.to_string()))?;
        }

        let instruction = prompt::extraction_instruction();
        let estimated_input_tokens = estimate_tokens(&instruction);
        info!(
            session = %session.id(),
            mime = %input.mime_type,
            bytes = input.bytes.len(),
            "starting document pipeline"
        );

        let mut attempts: u32 = 0;
        let extraction = self
            .config
            .retry
            .run(|attempt| {
                attempts = attempt;
                self.extractor.extract_document(&instruction, input, session)
            })
            .await;

        let raw = match extraction {
            Ok(raw) => raw,
            Err(error) => {
                warn!(session = %session.id(), attempts, %error, "extraction failed terminally");
                return Err(PipelineError::Extraction(error));
            }
        };

        let metrics = |wall: &Instant| PipelineMetrics {
            extraction_attempts: attempts,
            wall_time: wall.elapsed(),
            estimated_input_tokens,
            estimated_output_tokens: estimate_tokens(&raw),
        };

        let Some(record) = self.parse_output(&raw) else {
            warn!(session = %session.id(), "extraction output unusable, reporting parse failure");
            return Ok(DocumentReport {
                record: ExtractionResult::default(),
                is_valid: false,
                issues: vec![IssueCode::ParseFailed],
                corrected_from_identifier: false,
                metrics: metrics(&start),
            });
        };

        let outcome = match self.validator.validate_at(&record, today).await {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!(
                    session = %session.id(),
                    %error,
                    "validation unavailable, returning unvalidated record"
                );
                return Ok(DocumentReport {
                    record,
                    is_valid: true,
                    issues: vec![IssueCode::ValidationUnavailable],
                    corrected_from_identifier: false,
                    metrics: metrics(&start),
                });
            }
        };

        let metrics = metrics(&start);
        info!(
            session = %session.id(),
            attempts,
            is_valid = outcome.is_valid,
            issues = outcome.issues.len(),
            corrected = outcome.corrected_from_identifier,
            wall_ms = u64::try_from(metrics.wall_time.as_millis()).unwrap_or(u64::MAX),
            "document pipeline complete"
        );
        Ok(DocumentReport {
            record: outcome.corrected.unwrap_or(record),
            is_valid: outcome.is_valid,
            issues: outcome.issues,
            corrected_from_identifier: outcome.corrected_from_identifier,
            metrics,
        })
    }

    /// Sanitizes, schema-checks, and deserializes raw model output.
    fn parse_output(&self, raw: &str) -> Option<ExtractionResult> {
        let payload = sanitize::sanitize(raw);

        let value: Value = match serde_json::from_str(payload) {
            Ok(value) => value,
            Err(error) => {
                debug!(%error, "extraction output is not JSON");
                return None;
            }
        };

        if self.config.enforce_schema {
            let violations = schema::collect_schema_violations(&self.schema, &value);
            if !violations.is_empty() {
                debug!(
                    count = violations.len(),
                    "extraction output failed schema check: {}",
                    violations.join("; ")
                );
                return None;
            }
        }

        match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(error) => {
                debug!(%error, "extraction output does not match the record shape");
                None
            }
        }
    }
}
