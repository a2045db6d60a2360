//! HTTP-level tests for `POST /api/predict` and `GET /api/model-info`.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json_auth, post_raw_auth, valid_reading, TECH_TOKEN};
use serde_json::json;

// ---------------------------------------------------------------------------
// Successful predictions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn high_wind_reading_is_high_risk() {
    let response =
        post_json_auth(common::build_test_app(), "/api/predict", TECH_TOKEN, valid_reading()).await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["prediction"]["will_fail"], true);
    assert_eq!(json["prediction"]["risk_level"], "High");
    assert_eq!(json["prediction"]["probability_of_failure"], 0.9);
    assert_eq!(json["prediction"]["confidence"], 0.9);
    assert_eq!(json["technical_details"]["model_version"], "test-1");
    assert_eq!(json["recommendations"].as_array().unwrap().len(), 3);
    assert_eq!(json["input_data"], valid_reading());
    assert!(json["prediction_id"].as_str().unwrap().starts_with("pred_"));
}

#[tokio::test]
async fn vibration_only_reading_is_medium_risk() {
    let body = json!({
        "wind_speed": 8,
        "vibration_level": 6.5,
        "temperature": 25,
        "power_output": 700,
        "maintenance_done": 0
    });
    let response = post_json_auth(common::build_test_app(), "/api/predict", TECH_TOKEN, body).await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["prediction"]["risk_level"], "Medium");
    assert_eq!(json["prediction"]["will_fail"], false);
    assert_eq!(json["prediction"]["confidence"], 0.5);
}

#[tokio::test]
async fn extra_fields_are_echoed_back() {
    let mut body = valid_reading();
    body["site"] = json!("north ridge");
    let response =
        post_json_auth(common::build_test_app(), "/api/predict", TECH_TOKEN, body.clone()).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["input_data"], body);
}

// ---------------------------------------------------------------------------
// Rejections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_feature_is_named() {
    let mut body = valid_reading();
    body.as_object_mut().unwrap().remove("temperature");
    let response = post_json_auth(common::build_test_app(), "/api/predict", TECH_TOKEN, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Invalid data: Missing feature: temperature");
}

#[tokio::test]
async fn out_of_range_value_names_field_and_range() {
    let mut body = valid_reading();
    body["wind_speed"] = json!(75);
    let response = post_json_auth(common::build_test_app(), "/api/predict", TECH_TOKEN, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let message = body_json(response).await["error"].as_str().unwrap().to_string();
    assert!(message.contains("wind_speed"), "{message}");
    assert!(message.contains("between 0 and 50"), "{message}");
}

#[tokio::test]
async fn null_body_is_rejected() {
    let response = post_raw_auth(common::build_test_app(), "/api/predict", TECH_TOKEN, "null").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "JSON body required");
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let response = post_raw_auth(common::build_test_app(), "/api/predict", TECH_TOKEN, "{not json").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn array_body_is_rejected() {
    let response =
        post_json_auth(common::build_test_app(), "/api/predict", TECH_TOKEN, json!([1, 2])).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn degraded_service_returns_503_before_validation() {
    let response =
        post_raw_auth(common::build_degraded_app(), "/api/predict", TECH_TOKEN, "null").await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let json = body_json(response).await;
    assert_eq!(json["code"], "MODEL_UNAVAILABLE");
    assert_eq!(json["error"], "Model not available");
}

#[tokio::test]
async fn classifier_failure_returns_500() {
    let mut body = valid_reading();
    body["wind_speed"] = json!(49.5);
    let response = post_json_auth(common::build_test_app(), "/api/predict", TECH_TOKEN, body).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["code"], "INFERENCE_ERROR");
    assert_eq!(json["error"], "Inference failed: stub failure");
}

// ---------------------------------------------------------------------------
// Model info
// ---------------------------------------------------------------------------

#[tokio::test]
async fn model_info_describes_the_classifier() {
    let response = get_auth(common::build_test_app(), "/api/model-info", TECH_TOKEN).await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["version"], "test-1");
    assert_eq!(json["model_details"]["type"], "StubClassifier");
    assert_eq!(json["model_details"]["n_features"], 5);
    assert_eq!(
        json["input_features"],
        json!(["wind_speed", "vibration_level", "temperature", "power_output", "maintenance_done"])
    );
    assert_eq!(json["output"]["classes"], json!([0, 1]));
    assert!(json["input_constraints"]["maintenance_done"].is_string());
}

#[tokio::test]
async fn model_info_without_model_returns_503() {
    let response = get_auth(common::build_degraded_app(), "/api/model-info", TECH_TOKEN).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
