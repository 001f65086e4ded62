//! Error types for the extraction and validation pipeline.

use thiserror::Error;

/// Structural defects that stop an identifier from being decoded.
///
/// These are domain findings, not failures: the validator reports them as
/// issues on the record rather than propagating them.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MalformedIdentifierError {
    /// The identifier is not exactly 16 characters long.
    #[error("identifier must be 16 digits, got {0} characters")]
    WrongLength(usize),

    /// The identifier contains a character that is not an ASCII digit.
    #[error("identifier has a non-digit character at position {0}")]
    NonDigit(usize),
}

/// Failure reported by an external capability provider.
///
/// The distinction drives retry behavior: [`ProviderError::Transient`]
/// failures may be retried under a [`crate::retry::RetryPolicy`], while
/// [`ProviderError::Fatal`] failures propagate immediately.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Rate limiting, server errors, or connectivity problems.
    #[error("transient provider failure: {0}")]
    Transient(String),

    /// Authentication, malformed requests, or anything a retry cannot fix.
    #[error("provider failure: {0}")]
    Fatal(String),
}

impl ProviderError {
    /// `true` when retrying the operation may succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}

/// Validation could not run to completion for a non-domain reason.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The region-verification capability failed after retries were
    /// exhausted, in a way that is not a routine outage.
    #[error("region verification unavailable: {0}")]
    RegistryUnavailable(#[source] ProviderError),
}

/// Terminal failure of one pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The extraction capability failed and retries did not help.
    #[error("extraction capability failed: {0}")]
    Extraction(#[source] ProviderError),

    /// The record schema could not be compiled for output checking.
    #[error("schema error: {0}")]
    Schema(String),
}
