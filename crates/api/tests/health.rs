//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};

// ---------------------------------------------------------------------------
// Test: GET /api/health reports a loaded model
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_returns_healthy_with_model() {
    let response = get(common::build_test_app(), "/api/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["model_loaded"], true);
    assert_eq!(json["model_metadata"]["version"], "test-1");
    assert!(json["api_version"].is_string());
    assert!(json["timestamp"].is_string());
    assert_eq!(json["endpoints_available"].as_array().unwrap().len(), 5);
}

// ---------------------------------------------------------------------------
// Test: without a model the service is degraded but healthy enough to answer
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_reports_degraded_without_model() {
    let response = get(common::build_degraded_app(), "/api/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["model_loaded"], false);
    assert!(json["model_metadata"].is_null());
}

// ---------------------------------------------------------------------------
// Test: health does not require a token
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_is_public() {
    let response = get(common::build_test_app(), "/api/health").await;
    assert_ne!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Test: unknown route returns 404 JSON
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404() {
    let response = get(common::build_test_app(), "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn unknown_api_route_returns_404() {
    let response = get(common::build_test_app(), "/api/nothing-here").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: wrong method returns 405
// ---------------------------------------------------------------------------

#[tokio::test]
async fn wrong_method_returns_405() {
    let response = get(common::build_test_app(), "/api/predict").await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// ---------------------------------------------------------------------------
// Test: x-request-id header is present in response
// ---------------------------------------------------------------------------

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let response = get(common::build_test_app(), "/api/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let request_id = response.headers().get("x-request-id");
    assert!(
        request_id.is_some(),
        "Response must contain an x-request-id header"
    );
}
