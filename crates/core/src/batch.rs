//! Batch orchestrator: independent prediction of many readings.
//!
//! Items are processed sequentially in input order. A failing item adds one
//! entry to the error list and the loop moves on.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::classifier::Classifier;
use crate::prediction::{predict, round3};
use crate::risk::RiskLevel;
use crate::validation::sensor_fields_only;

/// One successful item of a batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchPrediction {
    pub turbine_id: String,
    pub will_fail: bool,
    pub probability_of_failure: f64,
    pub risk_level: RiskLevel,
    /// The five sensor fields of the item, without the identifier or extras.
    pub input_data: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}

/// Result of a whole batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    pub predictions: Vec<BatchPrediction>,
    /// `None` (serialized as `null`) when every item succeeded.
    pub errors: Option<Vec<String>>,
    pub summary: BatchSummary,
}

/// Identifier for item `index`: its `turbine_id` if present, else `unknown_<index>`.
fn turbine_id(item: &Map<String, Value>, index: usize) -> String {
    match item.get("turbine_id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => format!("unknown_{index}"),
        Some(other) => other.to_string(),
    }
}

/// Validate and classify each item independently.
pub fn run_batch(classifier: &dyn Classifier, items: &[Value]) -> BatchOutcome {
    let mut predictions = Vec::with_capacity(items.len());
    let mut errors = Vec::new();

    for (index, item) in items.iter().enumerate() {
        let Some(data) = item.as_object() else {
            errors.push(format!("Turbine {index}: expected a JSON object"));
            continue;
        };

        match predict(classifier, data) {
            Ok(result) => predictions.push(BatchPrediction {
                turbine_id: turbine_id(data, index),
                will_fail: result.will_fail,
                probability_of_failure: round3(result.probability_of_failure),
                risk_level: result.risk_level,
                input_data: sensor_fields_only(data),
            }),
            Err(e) => {
                tracing::warn!(index, error = %e, "Batch item rejected");
                errors.push(format!("Turbine {index}: {e}"));
            }
        }
    }

    let summary = BatchSummary {
        total: items.len(),
        successful: predictions.len(),
        failed: errors.len(),
    };

    BatchOutcome {
        predictions,
        errors: (!errors.is_empty()).then_some(errors),
        summary,
    }
}
