use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use turbine_core::model::ModelMetadata;
use turbine_core::types::Timestamp;

use crate::state::AppState;

/// One entry of the endpoint directory returned by `/api/health`.
#[derive(Debug, Serialize)]
pub struct EndpointInfo {
    pub path: &'static str,
    pub method: &'static str,
    pub description: &'static str,
}

static ENDPOINTS: [EndpointInfo; 5] = [
    EndpointInfo {
        path: "/api/health",
        method: "GET",
        description: "API status",
    },
    EndpointInfo {
        path: "/api/predict",
        method: "POST",
        description: "Failure prediction for one turbine",
    },
    EndpointInfo {
        path: "/api/batch-predict",
        method: "POST",
        description: "Failure prediction for several turbines",
    },
    EndpointInfo {
        path: "/api/stats",
        method: "GET",
        description: "Usage statistics",
    },
    EndpointInfo {
        path: "/api/model-info",
        method: "GET",
        description: "Model information",
    },
];

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `healthy` with a loaded model, `degraded` otherwise.
    pub status: &'static str,
    pub timestamp: Timestamp,
    pub model_loaded: bool,
    pub model_metadata: Option<ModelMetadata>,
    /// Crate version from Cargo.toml.
    pub api_version: &'static str,
    pub endpoints_available: &'static [EndpointInfo],
}

/// GET /api/health -- returns service and model health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let model_loaded = state.model.is_some();

    Json(HealthResponse {
        status: if model_loaded { "healthy" } else { "degraded" },
        timestamp: chrono::Utc::now(),
        model_loaded,
        model_metadata: state.model.as_ref().map(|m| m.metadata.clone()),
        api_version: env!("CARGO_PKG_VERSION"),
        endpoints_available: &ENDPOINTS,
    })
}

/// Mount health check routes (nested under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
