pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::error::AppError;
use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                  service and model status (public)
/// /model-info              model metadata (auth required)
/// /predict                 single prediction (POST, auth required)
/// /batch-predict           batch prediction (POST, auth required)
/// /stats                   usage statistics (auth required)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .route("/model-info", get(handlers::model_info::model_info))
        .route("/predict", post(handlers::predict::predict))
        .route("/batch-predict", post(handlers::predict::batch_predict))
        .route("/stats", get(handlers::stats::get_stats))
        // Must follow the routes it applies to.
        .method_not_allowed_fallback(|| async { AppError::MethodNotAllowed })
}
