//! Client initialization and model probing.

use std::time::Duration;

use serde::Deserialize;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::GeminiClient;
use crate::discovery::discover_api_key;
use crate::error::GeminiError;
use crate::request::{model_info_url, redact_key};
use crate::types::GeminiConfig;

/// Budget for the model-metadata probe.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Report produced by the initialization sequence.
///
/// An unreachable model is reported, not fatal: the endpoint may be down
/// while generation still works later, and callers decide how strict to
/// be.
#[derive(Debug, Clone)]
pub struct InitReport {
    /// Model the client is bound to.
    pub model: String,
    /// Version string from the models endpoint, empty when unreachable.
    pub version: String,
    /// Whether the metadata probe succeeded.
    pub reachable: bool,
    /// Probe diagnostics; empty on success.
    pub detail: String,
    /// Whether the model advertises generateContent support.
    pub supports_generation: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelInfo {
    #[serde(default)]
    version: String,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}

/// Resolves credentials, builds a client, and probes the model endpoint.
///
/// # Errors
/// [`GeminiError::CredentialsNotFound`] when no API key is available, or
/// an [`GeminiError::InvalidConfig`]/`Transport` error when the client
/// cannot be constructed. A failed probe is not an error.
pub async fn init(
    explicit_key: Option<String>,
    model: Option<String>,
) -> Result<(GeminiClient, InitReport), GeminiError> {
    let api_key = discover_api_key(explicit_key)?;
    let mut config = GeminiConfig::new(api_key);
    if let Some(model) = model {
        config.model = model;
    }

    let client = GeminiClient::new(config)?;
    let report = probe(&client).await;
    Ok((client, report))
}

/// Fetches model metadata for a diagnostic report.
pub async fn probe(client: &GeminiClient) -> InitReport {
    let config = client.config();
    let url = model_info_url(config);
    debug!(url = %redact_key(&url, &config.api_key), "probing model metadata");

    match timeout(PROBE_TIMEOUT, fetch_info(client, &url)).await {
        Ok(Ok(info)) => {
            let supports_generation = info
                .supported_generation_methods
                .iter()
                .any(|method| method == "generateContent");
            if !supports_generation {
                warn!(model = %config.model, "model does not advertise generateContent");
            }
            InitReport {
                model: config.model.clone(),
                version: info.version,
                reachable: true,
                detail: String::new(),
                supports_generation,
            }
        }
        Ok(Err(error)) => {
            warn!(%error, "model probe failed");
            InitReport {
                model: config.model.clone(),
                version: String::new(),
                reachable: false,
                detail: error.to_string(),
                supports_generation: false,
            }
        }
        Err(_) => {
            let error = GeminiError::Timeout(PROBE_TIMEOUT);
            warn!(%error, "model probe timed out");
            InitReport {
                model: config.model.clone(),
                version: String::new(),
                reachable: false,
                detail: error.to_string(),
                supports_generation: false,
            }
        }
    }
}

async fn fetch_info(client: &GeminiClient, url: &str) -> Result<ModelInfo, GeminiError> {
    let response = client.http().get(url).send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(GeminiError::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    serde_json::from_str(&body).map_err(|e| GeminiError::Decode(e.to_string()))
}
