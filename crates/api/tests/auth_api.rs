//! HTTP-level tests for bearer-token authentication.

mod common;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, WWW_AUTHENTICATE};
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get, get_auth, send, MANAGER_TOKEN, TECH_TOKEN};

const PROTECTED: [&str; 2] = ["/api/model-info", "/api/stats"];

#[tokio::test]
async fn protected_routes_reject_missing_token() {
    for uri in PROTECTED {
        let response = get(common::build_test_app(), uri).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        assert!(response.headers().contains_key(WWW_AUTHENTICATE));

        let json = body_json(response).await;
        assert_eq!(json["code"], "UNAUTHORIZED");
        assert!(json["timestamp"].is_string());
    }
}

#[tokio::test]
async fn protected_routes_reject_unknown_token() {
    for uri in PROTECTED {
        let response = get_auth(common::build_test_app(), uri, "not-a-token").await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[tokio::test]
async fn non_bearer_scheme_is_rejected() {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/stats")
        .header(AUTHORIZATION, format!("Basic {TECH_TOKEN}"))
        .body(Body::empty())
        .unwrap();
    let response = send(common::build_test_app(), request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn every_configured_role_is_accepted() {
    for token in [TECH_TOKEN, MANAGER_TOKEN] {
        let response = get_auth(common::build_test_app(), "/api/stats", token).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn predict_requires_a_token() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/predict")
        .header("content-type", "application/json")
        .body(Body::from(common::valid_reading().to_string()))
        .unwrap();
    let response = send(common::build_test_app(), request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
