//! Loaded-model handle and its descriptive metadata.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::classifier::Classifier;
use crate::forest::{ForestModel, ModelLoadError};

/// Descriptive metadata shipped with the artifact.
///
/// Performance figures are documentation only; nothing in the service
/// branches on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelMetadata {
    pub name: String,
    pub version: String,
    pub description: String,
    pub training_date: String,
    pub performance: BTreeMap<String, f64>,
    pub limitations: Vec<String>,
}

impl Default for ModelMetadata {
    fn default() -> Self {
        Self {
            name: "Random Forest Classifier - turbine failure".to_string(),
            version: "1.0.0".to_string(),
            description: "Predicts turbine failure within the next 7 days".to_string(),
            training_date: "unknown".to_string(),
            performance: BTreeMap::new(),
            limitations: vec![
                "Predictions can be wrong; use them as decision support, not ground truth"
                    .to_string(),
                "Trained on simulated sensor data".to_string(),
            ],
        }
    }
}

/// Immutable handle to the loaded classifier, shared across requests.
#[derive(Clone)]
pub struct ModelHandle {
    pub classifier: Arc<dyn Classifier>,
    pub metadata: ModelMetadata,
}

impl ModelHandle {
    pub fn new(classifier: Arc<dyn Classifier>, metadata: ModelMetadata) -> Self {
        Self {
            classifier,
            metadata,
        }
    }
}

impl std::fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelHandle")
            .field("details", &self.classifier.details())
            .field("metadata", &self.metadata)
            .finish()
    }
}

/// Read a forest artifact from disk and wrap it in a [`ModelHandle`].
pub fn load_model(path: impl AsRef<Path>) -> Result<ModelHandle, ModelLoadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let (forest, metadata) = ForestModel::from_json(&text)?;
    tracing::info!(
        path = %path.display(),
        name = %metadata.name,
        version = %metadata.version,
        n_estimators = forest.n_estimators(),
        "Model artifact loaded"
    );
    Ok(ModelHandle::new(Arc::new(forest), metadata))
}
