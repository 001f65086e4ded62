//! Client configuration.

use std::time::Duration;

use gemini_adapter::GEMINI_FLASH;
use ktp_ocr_core::RetryPolicy;

/// Configuration for [`crate::client::Client`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Explicit API key; `None` discovers one from the environment.
    pub api_key: Option<String>,
    /// Gemini model backing both the extraction and the region
    /// verification capability.
    pub model: String,
    /// Wall-clock deadline for one whole document pipeline.
    ///
    /// Default: 300 seconds.
    pub timeout: Duration,
    /// Retry schedule for external capability calls.
    pub retry: RetryPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: GEMINI_FLASH.to_string(),
            timeout: Duration::from_secs(300),
            retry: RetryPolicy::default(),
        }
    }
}

impl ClientConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an explicit API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the Gemini model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the pipeline deadline.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the retry schedule.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}
