//! Request execution against the HTTP API.

use reqwest::Client;
use tracing::{debug, error};

use crate::error::GeminiError;
use crate::request::{redact_key, request_url};
use crate::types::{GeminiConfig, GenerateRequest, GenerateResponse};

/// Sends `request` and returns the first candidate's text.
///
/// # Errors
/// [`GeminiError::Api`] for non-success statuses, `Transport` for
/// connection and timeout failures, `Decode` and `EmptyResponse` for
/// unusable payloads.
pub async fn send_generate(
    client: &Client,
    config: &GeminiConfig,
    request: &GenerateRequest,
) -> Result<String, GeminiError> {
    let url = request_url(config);
    debug!(
        url = %redact_key(&url, &config.api_key),
        model = %config.model,
        "sending generateContent request"
    );

    let response = client.post(&url).json(request).send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        error!(status = status.as_u16(), "Gemini API error: {body}");
        return Err(GeminiError::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    let decoded: GenerateResponse =
        serde_json::from_str(&body).map_err(|e| GeminiError::Decode(e.to_string()))?;
    response_text(&decoded)
}

/// Joins the text parts of the first candidate.
///
/// # Errors
/// [`GeminiError::EmptyResponse`] when no candidate carries text.
pub fn response_text(response: &GenerateResponse) -> Result<String, GeminiError> {
    if let Some(usage) = response.usage_metadata {
        debug!(
            prompt_tokens = ?usage.prompt_token_count,
            output_tokens = ?usage.candidates_token_count,
            "usage reported"
        );
    }

    let candidate = response
        .candidates
        .first()
        .ok_or_else(|| GeminiError::EmptyResponse("no candidates returned".to_string()))?;

    let Some(content) = &candidate.content else {
        return Err(GeminiError::EmptyResponse(format!(
            "candidate finished with {:?} and no content",
            candidate.finish_reason
        )));
    };

    let text: String = content
        .parts
        .iter()
        .filter_map(|part| part.text.as_deref())
        .collect();
    if text.is_empty() {
        return Err(GeminiError::EmptyResponse(
            "candidate contained no text parts".to_string(),
        ));
    }
    Ok(text)
}
