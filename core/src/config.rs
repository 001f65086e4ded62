//! Pipeline behavior configuration.

use crate::retry::RetryPolicy;

/// Configuration for one [`crate::orchestrator::ExtractionOrchestrator`].
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Retry schedule applied to each external capability call.
    pub retry: RetryPolicy,
    /// Whether parsed model output is checked against the record schema
    /// before deserialization.
    pub enforce_schema: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            enforce_schema: true,
        }
    }
}

impl PipelineConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the retry schedule.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Enables or disables the schema gate on model output.
    #[must_use]
    pub const fn with_schema_enforcement(mut self, enforce_schema: bool) -> Self {
        self.enforce_schema = enforce_schema;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert!(config.enforce_schema);
        assert_eq!(config.retry.max_attempts, 5);
    }

    #[test]
    fn test_builder_chain() {
        let config = PipelineConfig::new()
            .with_retry(RetryPolicy::new().with_initial_delay(Duration::from_millis(5)))
            .with_schema_enforcement(false);
        assert!(!config.enforce_schema);
        assert_eq!(config.retry.initial_delay, Duration::from_millis(5));
    }
}
