//! The seam between the domain logic and the trained model.
//!
//! Handlers and the batch orchestrator only ever see `&dyn Classifier`; the
//! concrete model is loaded once at startup and injected.

use serde::Serialize;

use crate::features::FeatureVector;

/// Class index of "no failure within 7 days".
pub const CLASS_NO_FAILURE: u8 = 0;
/// Class index of "failure within 7 days".
pub const CLASS_FAILURE: u8 = 1;

/// Error raised by a classifier while scoring a feature vector.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct InferenceError(pub String);

/// Per-class probabilities for one feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassProbabilities {
    pub no_failure: f64,
    pub failure: f64,
}

impl ClassProbabilities {
    /// Build from the positive-class probability alone.
    pub fn from_failure(failure: f64) -> Self {
        Self {
            no_failure: 1.0 - failure,
            failure,
        }
    }

    /// Probability of the most likely class.
    pub fn confidence(&self) -> f64 {
        self.no_failure.max(self.failure)
    }

    /// Most likely class. Ties go to [`CLASS_NO_FAILURE`].
    pub fn argmax(&self) -> u8 {
        if self.failure > self.no_failure {
            CLASS_FAILURE
        } else {
            CLASS_NO_FAILURE
        }
    }

    /// Reject probabilities outside `[0, 1]` or non-finite values.
    pub fn check(self) -> Result<Self, InferenceError> {
        for (name, p) in [("no_failure", self.no_failure), ("failure", self.failure)] {
            if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                return Err(InferenceError(format!(
                    "classifier returned {name} probability {p} outside [0, 1]"
                )));
            }
        }
        Ok(self)
    }
}

/// Structural description of a loaded model, reported by `/model-info`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelDetails {
    /// Model family, e.g. `"RandomForestClassifier"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Feature names in the order the model was trained on.
    pub features: Vec<String>,
    pub n_features: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_estimators: Option<usize>,
    pub classes: Vec<u8>,
}

/// A binary failure classifier.
pub trait Classifier: Send + Sync {
    /// Per-class probabilities for `features`.
    fn predict_proba(&self, features: &FeatureVector) -> Result<ClassProbabilities, InferenceError>;

    /// Predicted class index. Defaults to the most likely class.
    fn predict(&self, features: &FeatureVector) -> Result<u8, InferenceError> {
        Ok(self.predict_proba(features)?.argmax())
    }

    /// Structural description of the model.
    fn details(&self) -> ModelDetails;
}
