//! Cleanup and parsing of raw model output.
//!
//! Models wrap JSON payloads in Markdown code fences despite instructions
//! not to. [`sanitize`] peels one fenced block (with an optional language
//! tag) out of the surrounding prose; [`parse_record`] layers tolerant
//! deserialization on top.

use crate::record::ExtractionResult;

const FENCE: &str = "```";

/// Strips a Markdown code fence from model output.
///
/// Returns the content of the first fenced block when one is present,
/// otherwise the trimmed input. Total: any input yields a usable slice,
/// and unfenced text passes through unchanged.
#[must_use]
pub fn sanitize(raw: &str) -> &str {
    let text = raw.trim();
    let Some(open) = text.find(FENCE) else {
        return text;
    };

    let body = strip_language_tag(&text[open + FENCE.len()..]);
    let body = body.find(FENCE).map_or(body, |close| &body[..close]);
    body.trim()
}

/// Drops a `json`-style language tag line following an opening fence.
fn strip_language_tag(body: &str) -> &str {
    let Some(newline) = body.find('\n') else {
        return body;
    };
    let tag = body[..newline].trim();
    if !tag.is_empty() && tag.len() <= 10 && tag.chars().all(char::is_alphanumeric) {
        &body[newline + 1..]
    } else {
        body
    }
}

/// Parses sanitized model output into a record.
///
/// # Errors
/// The underlying JSON error when the payload is not a JSON object of the
/// expected shape.
pub fn parse_record(raw: &str) -> Result<ExtractionResult, serde_json::Error> {
    serde_json::from_str(sanitize(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Gender;

    #[test]
    fn test_passthrough_without_fence() {
        assert_eq!(sanitize(r#"{"nik": "1"}"#), r#"{"nik": "1"}"#);
        assert_eq!(sanitize("  {\"nik\": \"1\"}  "), r#"{"nik": "1"}"#);
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("plain prose, no JSON at all"), "plain prose, no JSON at all");
    }

    #[test]
    fn test_strips_tagged_fence() {
        let raw = "```json\n{\"nik\": \"1\"}\n```";
        assert_eq!(sanitize(raw), r#"{"nik": "1"}"#);
    }

    #[test]
    fn test_strips_untagged_fence() {
        let raw = "```\n{\"nik\": \"1\"}\n```";
        assert_eq!(sanitize(raw), r#"{"nik": "1"}"#);
    }

    #[test]
    fn test_strips_fence_inside_prose() {
        let raw = "Here is the extracted record:\n```json\n{\"nik\": \"1\"}\n```\nLet me know if you need anything else.";
        assert_eq!(sanitize(raw), r#"{"nik": "1"}"#);
    }

    #[test]
    fn test_tolerates_missing_closing_fence() {
        let raw = "```json\n{\"nik\": \"1\"}";
        assert_eq!(sanitize(raw), r#"{"nik": "1"}"#);
    }

    #[test]
    fn test_single_line_fence() {
        assert_eq!(sanitize("```{\"nik\": \"1\"}```"), r#"{"nik": "1"}"#);
    }

    #[test]
    fn test_keeps_multiline_payload_intact() {
        let raw = "```json\n{\n  \"nik\": \"1\",\n  \"full_name\": \"A\"\n}\n```";
        assert_eq!(sanitize(raw), "{\n  \"nik\": \"1\",\n  \"full_name\": \"A\"\n}");
    }

    #[test]
    fn test_parse_record_through_fence() {
        let raw = "```json\n{\"nik\": \"3174041708900001\", \"gender\": \"PEREMPUAN\"}\n```";
        let record = parse_record(raw).unwrap();
        assert_eq!(record.nik.as_deref(), Some("3174041708900001"));
        assert_eq!(record.gender, Gender::Female);
    }

    #[test]
    fn test_parse_record_rejects_non_json() {
        assert!(parse_record("I could not read the document.").is_err());
        assert!(parse_record("```json\nnot json\n```").is_err());
    }
}
