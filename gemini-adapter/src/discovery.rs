//! Resolution of Gemini API credentials.

use tracing::debug;

use crate::error::GeminiError;

/// Primary environment variable holding the API key.
pub const GEMINI_API_KEY_ENV_VAR: &str = "GEMINI_API_KEY";

/// Fallback variable shared with other Google tooling.
pub const GOOGLE_API_KEY_ENV_VAR: &str = "GOOGLE_API_KEY";

/// Resolves the API key to use.
///
/// Resolution order:
/// 1. `explicit_key`, when provided.
/// 2. The `GEMINI_API_KEY` environment variable.
/// 3. The `GOOGLE_API_KEY` environment variable.
///
/// An explicit key that is empty or blank is an error, not a fallthrough
/// to the environment.
///
/// # Errors
/// [`GeminiError::CredentialsNotFound`] when no key is available.
pub fn discover_api_key(explicit_key: Option<String>) -> Result<String, GeminiError> {
    if let Some(key) = explicit_key {
        if key.trim().is_empty() {
            return Err(GeminiError::CredentialsNotFound(
                "explicit API key is empty".to_string(),
            ));
        }
        debug!("using explicitly provided API key");
        return Ok(key);
    }

    for var in [GEMINI_API_KEY_ENV_VAR, GOOGLE_API_KEY_ENV_VAR] {
        if let Ok(key) = std::env::var(var) {
            if !key.trim().is_empty() {
                debug!(source = var, "resolved API key from environment");
                return Ok(key);
            }
        }
    }

    Err(GeminiError::CredentialsNotFound(format!(
        "set {GEMINI_API_KEY_ENV_VAR} or {GOOGLE_API_KEY_ENV_VAR}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_key_wins() {
        let key = discover_api_key(Some("sk-test".to_string())).unwrap();
        assert_eq!(key, "sk-test");
    }

    #[test]
    fn test_empty_explicit_key_is_rejected() {
        let result = discover_api_key(Some("   ".to_string()));
        assert!(matches!(result, Err(GeminiError::CredentialsNotFound(_))));
    }
}
