//! Semantic validation of extracted records against the identifier
//! encoding.
//!
//! The identifier is treated as the more reliable channel: when OCR text
//! and identifier-encoded fields disagree, a single correction pass
//! rewrites the record from the identifier and flags the provenance.
//! Validation never mutates its input; callers receive the corrected
//! record separately.

use std::sync::Arc;

use chrono::{Datelike, Local, NaiveDate};
use tracing::{debug, warn};

use crate::codec;
use crate::error::{ProviderError, ValidationError};
use crate::record::{ExtractionResult, IssueCode};
use crate::registry::{Confidence, RegionRegistry, RegionVerification};
use crate::retry::RetryPolicy;

/// Minimum bearer age for a card to be valid.
pub const MINIMUM_AGE_YEARS: i32 = 17;

/// Outcome of validating one extracted record.
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    /// `false` when any fatal issue was found.
    pub is_valid: bool,
    /// Record rewritten from the identifier, when a correction applied.
    pub corrected: Option<ExtractionResult>,
    /// All findings in detection order.
    pub issues: Vec<IssueCode>,
    /// `true` when `corrected` came from the identifier encoding.
    pub corrected_from_identifier: bool,
}

impl ValidationOutcome {
    fn rejected(issue: IssueCode) -> Self {
        Self {
            is_valid: false,
            corrected: None,
            issues: vec![issue],
            corrected_from_identifier: false,
        }
    }
}

/// Validates extracted records against identifier structure, the region
/// registry, and the age floor.
pub struct SemanticValidator {
    registry: Arc<dyn RegionRegistry>,
    retry: RetryPolicy,
}

impl SemanticValidator {
    /// Creates a validator over `registry` with the default retry policy.
    #[must_use]
    pub fn new(registry: Arc<dyn RegionRegistry>) -> Self {
        Self {
            registry,
            retry: RetryPolicy::default(),
        }
    }

    /// Sets the retry schedule for registry calls.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Validates `record` against today's date.
    ///
    /// # Errors
    /// [`ValidationError`] when the region registry fails in a way that is
    /// not a routine outage. Domain findings are never errors; they come
    /// back as issues on the outcome.
    pub async fn validate(
        &self,
        record: &ExtractionResult,
    ) -> Result<ValidationOutcome, ValidationError> {
        self.validate_at(record, Local::now().date_naive()).await
    }

    /// Validates `record` against an explicit `today`, for deterministic
    /// age and century arithmetic.
    ///
    /// # Errors
    /// See [`Self::validate`].
    pub async fn validate_at(
        &self,
        record: &ExtractionResult,
        today: NaiveDate,
    ) -> Result<ValidationOutcome, ValidationError> {
        let Some(nik) = record
            .nik
            .as_deref()
            .map(str::trim)
            .filter(|nik| !nik.is_empty())
        else {
            debug!("record carries no identifier");
            return Ok(ValidationOutcome::rejected(IssueCode::MissingId));
        };

        let decoded = match codec::decode(nik) {
            Ok(decoded) => decoded,
            Err(error) => {
                debug!(%error, "identifier failed structural checks");
                return Ok(ValidationOutcome::rejected(IssueCode::MalformedId));
            }
        };

        let mut issues = codec::cross_check(&decoded, record.birth_date, record.gender, today);

        let mut corrected = None;
        let mut corrected_from_identifier = false;
        let mismatch = issues
            .iter()
            .any(|issue| matches!(issue, IssueCode::DobMismatch | IssueCode::GenderMismatch));
        if mismatch {
            if let (Some(gender), Some(birth_date)) = (
                decoded.implied_gender(),
                codec::resolve_birth_date(&decoded, today),
            ) {
                let mut rewritten = record.clone();
                rewritten.gender = gender;
                rewritten.birth_date = Some(birth_date);
                corrected = Some(rewritten);
                corrected_from_identifier = true;
                debug!(%birth_date, ?gender, "record corrected from identifier");
            }
        }

        match self.verify_region(&decoded.region).await {
            Ok(verdict) => match (verdict.valid, verdict.confidence) {
                (Some(false), Confidence::High) => issues.push(IssueCode::RegionInvalid),
                (Some(true), Confidence::Medium | Confidence::High) => {}
                _ => issues.push(IssueCode::RegionUnverified),
            },
            Err(error @ ProviderError::Fatal(_)) => {
                return Err(ValidationError::RegistryUnavailable(error));
            }
            Err(error) => {
                warn!(region = %decoded.region, %error, "region verification unavailable");
                issues.push(IssueCode::RegionUnverified);
            }
        }

        let effective_birth_date = corrected
            .as_ref()
            .map_or(record.birth_date, |rewritten| rewritten.birth_date);
        if let Some(birth_date) = effective_birth_date {
            if age_in_years(birth_date, today) < MINIMUM_AGE_YEARS {
                issues.push(IssueCode::Underage);
            }
        }

        let is_valid = !issues.iter().any(|issue| issue.is_fatal());
        Ok(ValidationOutcome {
            is_valid,
            corrected,
            issues,
            corrected_from_identifier,
        })
    }

    async fn verify_region(&self, region_code: &str) -> Result<RegionVerification, ProviderError> {
        self.retry
            .run(|attempt| {
                debug!(attempt, region = region_code, "verifying region code");
                self.registry.verify(region_code)
            })
            .await
    }
}

/// Completed years between `birth` and `today`.
fn age_in_years(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}
