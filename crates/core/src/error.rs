use crate::classifier::InferenceError;
use crate::fields::SensorField;

/// Reasons a raw reading is rejected by the validator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing feature: {field}")]
    MissingField { field: SensorField },

    /// Present but out of range or not a number. `value` is the raw JSON text.
    #[error("Invalid value for {field}: {value}. {constraint}")]
    InvalidRange {
        field: SensorField,
        value: String,
        constraint: String,
    },
}

impl ValidationError {
    /// The field the error refers to.
    pub fn field(&self) -> SensorField {
        match self {
            ValidationError::MissingField { field } | ValidationError::InvalidRange { field, .. } => {
                *field
            }
        }
    }
}

/// Everything that can stop a single prediction from being produced.
#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error("Invalid data: {0}")]
    Validation(#[from] ValidationError),

    #[error("Model not available")]
    ModelUnavailable,

    #[error("Inference failed: {0}")]
    Inference(#[from] InferenceError),
}
