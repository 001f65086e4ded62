//! Error types for Gemini adapter operations.

use std::time::Duration;

use thiserror::Error;

/// HTTP status codes treated as transient.
pub const RETRYABLE_STATUS: [u16; 4] = [429, 500, 503, 504];

/// Errors returned by adapter operations.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// No API key could be resolved.
    #[error("Gemini API key not found: {0}")]
    CredentialsNotFound(String),

    /// The HTTP layer failed (connect, TLS, timeout, body read).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Gemini API returned status {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, verbatim.
        message: String,
    },

    /// An adapter-level deadline lapsed.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The response body was not valid for the expected shape.
    #[error("failed to decode Gemini response: {0}")]
    Decode(String),

    /// The response parsed but carried no usable text.
    #[error("Gemini response contained no usable candidates: {0}")]
    EmptyResponse(String),

    /// The client configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GeminiError {
    /// `true` when retrying the request may succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Api { status, .. } => RETRYABLE_STATUS.contains(status),
            Self::Transport(error) => error.is_timeout() || error.is_connect(),
            Self::Timeout(_) => true,
            Self::CredentialsNotFound(_)
            | Self::Decode(_)
            | Self::EmptyResponse(_)
            | Self::InvalidConfig(_) => false,
        }
    }
}
