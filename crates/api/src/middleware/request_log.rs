//! Per-request access log and usage accounting.

use std::time::Instant;

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::Response;

use crate::state::AppState;

/// Paths whose outcome counts as a prediction in [`crate::stats::UsageStats`].
const PREDICTION_PATHS: [&str; 2] = ["/api/predict", "/api/batch-predict"];

/// Statuses that mean no prediction was attempted: the caller was not
/// authenticated, or no model is loaded.
fn attempted_prediction(status: StatusCode) -> bool {
    !matches!(
        status,
        StatusCode::UNAUTHORIZED | StatusCode::SERVICE_UNAVAILABLE
    )
}

/// Log method, path, query, token presence, status and latency of each request.
///
/// Mounted with `axum::middleware::from_fn_with_state` on the outer router,
/// outside the timeout and panic layers, so it sees the full request path and
/// every final status.
pub async fn request_log(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let query = request.uri().query().unwrap_or_default().to_string();
    let token_provided = request.headers().contains_key(AUTHORIZATION);

    tracing::debug!(%method, %path, %query, token_provided, "Request received");

    let response = next.run(request).await;

    let status = response.status();
    let latency = started.elapsed();
    let latency_ms = latency.as_secs_f64() * 1000.0;

    state.stats.record_request();
    if method == Method::POST
        && PREDICTION_PATHS.contains(&path.as_str())
        && attempted_prediction(status)
    {
        state
            .stats
            .record_prediction(status.is_success(), latency);
    }

    if status.is_server_error() {
        tracing::error!(%method, %path, status = status.as_u16(), latency_ms, "Request failed");
    } else if status.is_client_error() {
        tracing::warn!(%method, %path, status = status.as_u16(), latency_ms, "Request rejected");
    } else {
        tracing::info!(%method, %path, status = status.as_u16(), latency_ms, "Request completed");
    }

    response
}
