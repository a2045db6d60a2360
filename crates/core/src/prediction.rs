//! Single-reading prediction and response assembly.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::classifier::{ClassProbabilities, Classifier, InferenceError, CLASS_FAILURE};
use crate::error::PredictionError;
use crate::features::assemble;
use crate::hashing::sha256_mod;
use crate::reading::SensorReading;
use crate::risk::{assess, RiskLevel};
use crate::types::Timestamp;
use crate::validation::validate_reading;

/// Outcome of classifying one reading.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub will_fail: bool,
    /// Unrounded positive-class probability; banding uses this value.
    pub probability_of_failure: f64,
    pub risk_level: RiskLevel,
    pub confidence: f64,
    pub recommendations: Vec<String>,
    pub probabilities: ClassProbabilities,
}

/// Assemble features, call the classifier and band the result.
pub fn classify(
    classifier: &dyn Classifier,
    reading: &SensorReading,
) -> Result<PredictionResult, InferenceError> {
    let features = assemble(reading);
    let probabilities = classifier.predict_proba(&features)?.check()?;
    let class = classifier.predict(&features)?;
    let assessment = assess(probabilities.failure);

    Ok(PredictionResult {
        will_fail: class == CLASS_FAILURE,
        probability_of_failure: probabilities.failure,
        risk_level: assessment.level,
        confidence: probabilities.confidence(),
        recommendations: assessment.recommendations,
        probabilities,
    })
}

/// Validate a raw request object and classify it.
pub fn predict(
    classifier: &dyn Classifier,
    data: &Map<String, Value>,
) -> Result<PredictionResult, PredictionError> {
    let reading = validate_reading(data)?;
    Ok(classify(classifier, &reading)?)
}

/// Round to three decimals for presentation.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Identifier of the form `pred_YYYYmmdd_HHMMSS_NNNN`.
///
/// `NNNN` is derived from a digest of the request object, so the same body at
/// the same second always yields the same id.
pub fn prediction_id(now: Timestamp, input: &Map<String, Value>) -> String {
    let canonical = Value::Object(input.clone()).to_string();
    format!(
        "pred_{}_{:04}",
        now.format("%Y%m%d_%H%M%S"),
        sha256_mod(canonical.as_bytes(), 10_000)
    )
}

/// `prediction` block of the response.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionSummary {
    pub will_fail: bool,
    pub probability_of_failure: f64,
    pub risk_level: RiskLevel,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TechnicalDetails {
    pub class_probabilities: ClassProbabilities,
    pub model_version: String,
}

/// Full response body for a single prediction.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResponse {
    pub prediction: PredictionSummary,
    pub technical_details: TechnicalDetails,
    pub recommendations: Vec<String>,
    pub input_data: Map<String, Value>,
    pub timestamp: Timestamp,
    pub prediction_id: String,
}

/// Build the response for `result`, echoing the original request object.
pub fn build_response(
    result: PredictionResult,
    input: Map<String, Value>,
    model_version: &str,
    now: Timestamp,
) -> PredictionResponse {
    let prediction_id = prediction_id(now, &input);
    PredictionResponse {
        prediction: PredictionSummary {
            will_fail: result.will_fail,
            probability_of_failure: round3(result.probability_of_failure),
            risk_level: result.risk_level,
            confidence: round3(result.confidence),
        },
        technical_details: TechnicalDetails {
            class_probabilities: result.probabilities,
            model_version: model_version.to_string(),
        },
        recommendations: result.recommendations,
        input_data: input,
        timestamp: now,
        prediction_id,
    }
}
