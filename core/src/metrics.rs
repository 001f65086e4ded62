//! Timing and token accounting for pipeline runs.

use std::time::Duration;

/// Metrics collected across one document pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineMetrics {
    /// Attempts made against the extraction capability.
    pub extraction_attempts: u32,
    /// Wall-clock time for the whole run.
    pub wall_time: Duration,
    /// Estimated tokens in the extraction instruction.
    pub estimated_input_tokens: usize,
    /// Estimated tokens in the raw model output.
    pub estimated_output_tokens: usize,
}

/// Estimates token count using the chars/4 heuristic.
///
/// Counts characters rather than bytes so multi-byte text is not
/// over-charged, and rounds up so short non-empty strings cost at least
/// one token.
#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_tokens_empty() {
        assert_eq!(estimate_tokens(""), 0);
    }

    #[test]
    fn test_estimate_tokens_rounds_up() {
        assert_eq!(estimate_tokens("NIK"), 1);
        assert_eq!(estimate_tokens("3174"), 1);
        assert_eq!(estimate_tokens("31740"), 2);
        assert_eq!(estimate_tokens("3174041708900001"), 4);
    }

    #[test]
    fn test_estimate_tokens_counts_chars_not_bytes() {
        // Four characters, more than four bytes.
        assert_eq!(estimate_tokens("désa"), 1);
        assert_eq!(estimate_tokens("🙂🙂🙂🙂"), 1);
    }

    #[test]
    fn test_default_metrics_are_zeroed() {
        let metrics = PipelineMetrics::default();
        assert_eq!(metrics.extraction_attempts, 0);
        assert_eq!(metrics.wall_time, Duration::ZERO);
    }
}
