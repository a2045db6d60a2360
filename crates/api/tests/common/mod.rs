#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use turbine_api::auth::tokens::TokenRegistry;
use turbine_api::config::{CorsOrigins, ServerConfig};
use turbine_api::router::build_app_router;
use turbine_api::state::AppState;
use turbine_core::classifier::{
    ClassProbabilities, Classifier, InferenceError, ModelDetails, CLASS_FAILURE, CLASS_NO_FAILURE,
};
use turbine_core::features::FeatureVector;
use turbine_core::fields::SensorField;
use turbine_core::model::{ModelHandle, ModelMetadata};

/// Token accepted by [`test_config`] for the `technician` role.
pub const TECH_TOKEN: &str = "tech-test-token";
/// Token accepted by [`test_config`] for the `manager` role.
pub const MANAGER_TOKEN: &str = "manager-test-token";

/// Build a test `ServerConfig` with safe defaults and two known tokens.
pub fn test_config() -> ServerConfig {
    let tokens = TokenRegistry::parse(&format!(
        "technician:{TECH_TOKEN},manager:{MANAGER_TOKEN}"
    ))
    .expect("test tokens should parse");

    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: CorsOrigins::Any,
        request_timeout_secs: 30,
        model_path: PathBuf::from("unused.json"),
        tokens,
    }
}

/// Deterministic classifier: failure probability grows with wind speed and
/// vibration. `wind_speed = 49.5` triggers an inference error.
pub struct StubClassifier;

impl Classifier for StubClassifier {
    fn predict_proba(&self, features: &FeatureVector) -> Result<ClassProbabilities, InferenceError> {
        let wind = features.get(SensorField::WindSpeed);
        if wind == 49.5 {
            return Err(InferenceError("stub failure".into()));
        }
        let p = if wind >= 14.0 {
            0.9
        } else if features.get(SensorField::VibrationLevel) >= 5.0 {
            0.5
        } else {
            0.2
        };
        Ok(ClassProbabilities::from_failure(p))
    }

    fn details(&self) -> ModelDetails {
        ModelDetails {
            kind: "StubClassifier".into(),
            features: SensorField::names().iter().map(|s| s.to_string()).collect(),
            n_features: 5,
            n_estimators: None,
            classes: vec![CLASS_NO_FAILURE, CLASS_FAILURE],
        }
    }
}

/// Model handle wrapping [`StubClassifier`].
pub fn stub_model() -> ModelHandle {
    ModelHandle::new(
        Arc::new(StubClassifier),
        ModelMetadata {
            version: "test-1".into(),
            ..ModelMetadata::default()
        },
    )
}

/// Build the full application router with a loaded stub model.
pub fn build_test_app() -> Router {
    build_app_router(AppState::new(test_config(), Some(stub_model())))
}

/// Build the application router without a model (degraded mode).
pub fn build_degraded_app() -> Router {
    build_app_router(AppState::new(test_config(), None))
}

/// A valid reading as a JSON object.
pub fn valid_reading() -> Value {
    serde_json::json!({
        "wind_speed": 15,
        "vibration_level": 2,
        "temperature": 20,
        "power_output": 900,
        "maintenance_done": 1
    })
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Request::builder().method(Method::GET).uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response {
    post_raw_auth(app, uri, token, body.to_string()).await
}

/// POST a raw body with a JSON content type.
pub async fn post_raw_auth(app: Router, uri: &str, token: &str, body: impl Into<String>) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.into()))
        .unwrap();
    send(app, request).await
}

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
