use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use turbine_core::classifier::{ModelDetails, CLASS_FAILURE, CLASS_NO_FAILURE};
use turbine_core::fields::SensorField;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ModelOutput {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub classes: [u8; 2],
    pub description: &'static str,
}

/// Response body of `GET /api/model-info`.
#[derive(Debug, Serialize)]
pub struct ModelInfoResponse {
    pub model_name: String,
    pub version: String,
    pub description: String,
    pub training_date: String,
    pub performance_metrics: BTreeMap<String, f64>,
    pub input_features: Vec<&'static str>,
    /// Accepted range of each input feature, keyed by name.
    pub input_constraints: BTreeMap<&'static str, String>,
    pub model_details: ModelDetails,
    pub output: ModelOutput,
    pub limitations: Vec<String>,
}

/// GET /api/model-info
pub async fn model_info(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ModelInfoResponse>> {
    let model = state.require_model()?;
    let metadata = &model.metadata;

    let input_constraints = SensorField::ALL
        .iter()
        .map(|field| (field.name(), field.rule().describe()))
        .collect();

    Ok(Json(ModelInfoResponse {
        model_name: metadata.name.clone(),
        version: metadata.version.clone(),
        description: metadata.description.clone(),
        training_date: metadata.training_date.clone(),
        performance_metrics: metadata.performance.clone(),
        input_features: SensorField::names(),
        input_constraints,
        model_details: model.classifier.details(),
        output: ModelOutput {
            kind: "classification",
            classes: [CLASS_NO_FAILURE, CLASS_FAILURE],
            description: "0 = no failure within 7 days, 1 = failure likely within 7 days",
        },
        limitations: metadata.limitations.clone(),
    }))
}
