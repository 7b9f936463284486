//! HTTP client for the prediction service

use crate::types::{is_truthy, PredictionRequest, PredictionResult};
use tracing::debug;

/// Why a prediction attempt failed.
///
/// The chat log shows the same fixed message for every variant; the split
/// only matters for the diagnostics log.
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    /// The service answered but flagged the request with an `error` field.
    #[error("service error: {0}")]
    Service(serde_json::Value),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct PredictionClient {
    http: reqwest::Client,
    base_url: String,
}

impl PredictionClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a service-relative URL (e.g. a `pdf_url` from a response).
    pub fn resolve(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        }
    }

    /// Send one input to `POST /predict` and decode the outcome.
    ///
    /// The error-body check runs before deserialization: the service returns
    /// `{"error": ...}` with non-2xx status codes, and the flag wins over the
    /// transport-level status either way.
    pub async fn predict(&self, user_input: &str) -> Result<PredictionResult, PredictError> {
        let url = format!("{}/predict", self.base_url);
        debug!(url = %url, "Sending prediction request");

        let response = self
            .http
            .post(&url)
            .json(&PredictionRequest {
                user_input: user_input.to_string(),
            })
            .send()
            .await?;

        let status = response.status();
        let body: serde_json::Value = response.json().await?;
        debug!(status = %status, "Prediction response received");

        if let Some(err) = body.get("error") {
            if is_truthy(err) {
                return Err(PredictError::Service(err.clone()));
            }
        }

        Ok(serde_json::from_value(body)?)
    }
}
