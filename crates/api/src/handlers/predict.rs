//! Handlers for single and batch prediction.
//!
//! The model-availability check runs before the body is inspected, so a
//! degraded service answers 503 regardless of the payload.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::{Map, Value};
use turbine_core::batch::{run_batch, BatchOutcome};
use turbine_core::prediction::{build_response, predict as run_prediction, PredictionResponse};
use turbine_core::types::Timestamp;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Response body of `POST /api/batch-predict`.
#[derive(Debug, Serialize)]
pub struct BatchResponse {
    #[serde(flatten)]
    pub outcome: BatchOutcome,
    pub timestamp: Timestamp,
}

/// Unwrap a JSON body into a non-empty object.
fn json_object(body: Result<Json<Value>, JsonRejection>) -> AppResult<Map<String, Value>> {
    let Json(value) = body.map_err(|rejection| {
        AppError::BadRequest(format!("JSON body required: {}", rejection.body_text()))
    })?;

    match value {
        Value::Object(map) if !map.is_empty() => Ok(map),
        Value::Object(_) | Value::Null => Err(AppError::BadRequest("JSON body required".into())),
        _ => Err(AppError::BadRequest("JSON body must be an object".into())),
    }
}

/// POST /api/predict
///
/// Validate one reading, classify it and return the full prediction record.
pub async fn predict(
    State(state): State<AppState>,
    user: AuthUser,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<PredictionResponse>> {
    let model = state.require_model()?;
    let data = json_object(body)?;

    let result = run_prediction(model.classifier.as_ref(), &data).inspect_err(|e| {
        tracing::warn!(role = %user.role, error = %e, "Prediction rejected");
    })?;

    let response = build_response(result, data, &model.metadata.version, chrono::Utc::now());

    tracing::info!(
        role = %user.role,
        prediction_id = %response.prediction_id,
        risk_level = %response.prediction.risk_level,
        probability = response.technical_details.class_probabilities.failure,
        "Prediction completed"
    );

    Ok(Json(response))
}

/// POST /api/batch-predict
///
/// Body: `{ "turbines": [ {...}, ... ] }`. Items are validated and classified
/// independently; failures are reported per item in `errors`.
pub async fn batch_predict(
    State(state): State<AppState>,
    user: AuthUser,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<BatchResponse>> {
    let model = state.require_model()?;
    let mut data = json_object(body).map_err(|_| turbine_list_required())?;

    let turbines = match data.remove("turbines") {
        Some(Value::Array(items)) => items,
        _ => return Err(turbine_list_required()),
    };

    let outcome = run_batch(model.classifier.as_ref(), &turbines);

    tracing::info!(
        role = %user.role,
        total = outcome.summary.total,
        successful = outcome.summary.successful,
        failed = outcome.summary.failed,
        "Batch prediction completed"
    );

    Ok(Json(BatchResponse {
        outcome,
        timestamp: chrono::Utc::now(),
    }))
}

fn turbine_list_required() -> AppError {
    AppError::BadRequest("Turbine list required".into())
}
