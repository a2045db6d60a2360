//! REST API client for the turbine failure-risk service.
//!
//! Wraps the `/api` endpoints (health, model info, single and batch
//! prediction) using [`reqwest`].

use std::collections::BTreeMap;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use turbine_core::model::ModelMetadata;
use turbine_core::reading::SensorReading;
use turbine_core::risk::RiskLevel;

/// Default base URL, matching the server's default bind address.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// HTTP client for one turbine API server.
pub struct TurbineApi {
    client: reqwest::Client,
    api_url: String,
    token: String,
}

/// Errors from the REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server rejected the bearer token.
    #[error("Authentication failed, check the API token")]
    Unauthorized,

    /// The server returned any other non-2xx status code.
    #[error("API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub model_loaded: bool,
    pub model_metadata: Option<ModelMetadata>,
    pub api_version: String,
    pub endpoints_available: Vec<EndpointInfo>,
}

/// Body of `GET /api/model-info`.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelInfo {
    pub model_name: String,
    pub version: String,
    pub description: String,
    pub training_date: String,
    pub performance_metrics: BTreeMap<String, f64>,
    pub input_features: Vec<String>,
    pub limitations: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictionView {
    pub will_fail: bool,
    pub probability_of_failure: f64,
    pub risk_level: RiskLevel,
    pub confidence: f64,
}

/// Body of `POST /api/predict`.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionReport {
    pub prediction: PredictionView,
    pub recommendations: Vec<String>,
    pub prediction_id: String,
    pub timestamp: String,
}

/// One entry of [`BatchReport::predictions`].
#[derive(Debug, Clone, Deserialize)]
pub struct BatchItem {
    pub turbine_id: String,
    pub will_fail: bool,
    pub probability_of_failure: f64,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BatchCounts {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}

/// Body of `POST /api/batch-predict`.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchReport {
    pub predictions: Vec<BatchItem>,
    pub errors: Option<Vec<String>>,
    pub summary: BatchCounts,
}

/// A reading tagged with the turbine it belongs to, as sent in a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurbineReading {
    pub turbine_id: String,
    #[serde(flatten)]
    pub reading: SensorReading,
}

#[derive(Serialize)]
struct BatchRequest<'a> {
    turbines: &'a [TurbineReading],
}

impl TurbineApi {
    /// Create a new API client.
    ///
    /// * `api_url` - Base URL including the `/api` prefix, e.g. `http://host:5000/api`.
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url, token)
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        api_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// `GET /health`. Does not send the token.
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let response = self
            .client
            .get(format!("{}/health", self.api_url))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// `GET /model-info`.
    pub async fn model_info(&self) -> Result<ModelInfo, ClientError> {
        let response = self
            .client
            .get(format!("{}/model-info", self.api_url))
            .bearer_auth(&self.token)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// `POST /predict` for a single reading.
    pub async fn predict(&self, reading: &SensorReading) -> Result<PredictionReport, ClientError> {
        let response = self
            .client
            .post(format!("{}/predict", self.api_url))
            .bearer_auth(&self.token)
            .json(reading)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// `POST /batch-predict` for several tagged readings.
    pub async fn batch_predict(
        &self,
        turbines: &[TurbineReading],
    ) -> Result<BatchReport, ClientError> {
        tracing::debug!(count = turbines.len(), "Submitting batch prediction");

        let response = self
            .client
            .post(format!("{}/batch-predict", self.api_url))
            .bearer_auth(&self.token)
            .json(&BatchRequest { turbines })
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
