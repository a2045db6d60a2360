//! Decision-tree forest loaded from a JSON-exported artifact.
//!
//! The artifact mirrors what a scikit-learn `RandomForestClassifier` exports:
//! per-tree node arrays where a split sends a sample left when
//! `x[feature] <= threshold`, and leaves carry per-class weights. Forest
//! probabilities are the mean of the normalized leaf distributions.
//!
//! Split indices in the artifact refer to its own `feature_names`; they are
//! remapped to canonical [`SensorField`] positions once at load time.

use std::collections::HashSet;

use serde::Deserialize;

use crate::classifier::{
    ClassProbabilities, Classifier, InferenceError, ModelDetails, CLASS_FAILURE, CLASS_NO_FAILURE,
};
use crate::features::FeatureVector;
use crate::fields::SensorField;
use crate::model::ModelMetadata;

/// Model family reported when the artifact does not name one.
pub const DEFAULT_MODEL_TYPE: &str = "RandomForestClassifier";

/// Errors raised while loading a model artifact.
#[derive(Debug, thiserror::Error)]
pub enum ModelLoadError {
    #[error("Failed to read model file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid model artifact: {0}")]
    InvalidArtifact(String),
}

/// On-disk artifact layout.
#[derive(Debug, Deserialize)]
pub struct ModelArtifact {
    #[serde(default)]
    pub metadata: ModelMetadata,
    #[serde(default)]
    pub model_type: Option<String>,
    pub feature_names: Vec<String>,
    pub classes: Vec<u8>,
    pub trees: Vec<TreeSpec>,
}

#[derive(Debug, Deserialize)]
pub struct TreeSpec {
    pub nodes: Vec<NodeSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum NodeSpec {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: [f64; 2],
    },
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Split {
        /// Canonical feature position.
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf(ClassProbabilities),
}

#[derive(Debug, Clone, PartialEq)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn leaf_for(&self, features: &FeatureVector) -> Result<ClassProbabilities, InferenceError> {
        let values = features.as_slice();
        let mut idx = 0;
        // Children always point forward, so this visits at most `nodes.len()` nodes.
        loop {
            match self.nodes.get(idx) {
                Some(Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    idx = if values[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                Some(Node::Leaf(dist)) => return Ok(*dist),
                None => {
                    return Err(InferenceError(format!("tree node {idx} does not exist")));
                }
            }
        }
    }
}

/// A loaded, validated decision-tree forest.
#[derive(Debug, Clone, PartialEq)]
pub struct ForestModel {
    model_type: String,
    feature_names: Vec<String>,
    trees: Vec<Tree>,
}

impl ForestModel {
    /// Validate an artifact and build the forest, returning its metadata alongside.
    pub fn from_artifact(artifact: ModelArtifact) -> Result<(Self, ModelMetadata), ModelLoadError> {
        if artifact.classes != [CLASS_NO_FAILURE, CLASS_FAILURE] {
            return Err(invalid(format!(
                "expected classes [0, 1], got {:?}",
                artifact.classes
            )));
        }

        let remap = feature_remap(&artifact.feature_names)?;

        if artifact.trees.is_empty() {
            return Err(invalid("forest contains no trees"));
        }

        let trees = artifact
            .trees
            .into_iter()
            .enumerate()
            .map(|(i, spec)| build_tree(spec, &remap).map_err(|e| invalid(format!("tree {i}: {e}"))))
            .collect::<Result<Vec<_>, _>>()?;

        let forest = Self {
            model_type: artifact
                .model_type
                .unwrap_or_else(|| DEFAULT_MODEL_TYPE.to_string()),
            feature_names: artifact.feature_names,
            trees,
        };
        Ok((forest, artifact.metadata))
    }

    /// Parse and validate an artifact from JSON text.
    pub fn from_json(json: &str) -> Result<(Self, ModelMetadata), ModelLoadError> {
        let artifact: ModelArtifact = serde_json::from_str(json)?;
        Self::from_artifact(artifact)
    }

    pub fn n_estimators(&self) -> usize {
        self.trees.len()
    }
}

impl Classifier for ForestModel {
    fn predict_proba(&self, features: &FeatureVector) -> Result<ClassProbabilities, InferenceError> {
        let mut no_failure = 0.0;
        let mut failure = 0.0;
        for tree in &self.trees {
            let leaf = tree.leaf_for(features)?;
            no_failure += leaf.no_failure;
            failure += leaf.failure;
        }
        let n = self.trees.len() as f64;
        ClassProbabilities {
            no_failure: no_failure / n,
            failure: failure / n,
        }
        .check()
    }

    fn details(&self) -> ModelDetails {
        ModelDetails {
            kind: self.model_type.clone(),
            features: self.feature_names.clone(),
            n_features: self.feature_names.len(),
            n_estimators: Some(self.trees.len()),
            classes: vec![CLASS_NO_FAILURE, CLASS_FAILURE],
        }
    }
}

fn invalid(msg: impl Into<String>) -> ModelLoadError {
    ModelLoadError::InvalidArtifact(msg.into())
}

/// Map artifact feature positions to canonical positions.
///
/// The artifact must name each of the five sensor fields exactly once.
fn feature_remap(names: &[String]) -> Result<Vec<usize>, ModelLoadError> {
    let mut seen = HashSet::new();
    let mut remap = Vec::with_capacity(names.len());
    for name in names {
        let field: SensorField = name
            .parse()
            .map_err(|e: crate::fields::UnknownField| invalid(e.to_string()))?;
        if !seen.insert(field) {
            return Err(invalid(format!("duplicate feature {name}")));
        }
        remap.push(field.index());
    }
    if remap.len() != SensorField::ALL.len() {
        return Err(invalid(format!(
            "expected {} features, got {}",
            SensorField::ALL.len(),
            remap.len()
        )));
    }
    Ok(remap)
}

fn build_tree(spec: TreeSpec, remap: &[usize]) -> Result<Tree, String> {
    let len = spec.nodes.len();
    if len == 0 {
        return Err("tree has no nodes".into());
    }

    let nodes = spec
        .nodes
        .into_iter()
        .enumerate()
        .map(|(idx, node)| match node {
            NodeSpec::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                let canonical = *remap
                    .get(feature)
                    .ok_or_else(|| format!("node {idx}: feature index {feature} out of range"))?;
                if !threshold.is_finite() {
                    return Err(format!("node {idx}: threshold is not finite"));
                }
                for child in [left, right] {
                    if child <= idx || child >= len {
                        return Err(format!("node {idx}: child index {child} is invalid"));
                    }
                }
                Ok(Node::Split {
                    feature: canonical,
                    threshold,
                    left,
                    right,
                })
            }
            NodeSpec::Leaf { value: [w0, w1] } => {
                let total = w0 + w1;
                if !(w0 >= 0.0 && w1 >= 0.0 && total > 0.0 && total.is_finite()) {
                    return Err(format!("node {idx}: leaf weights [{w0}, {w1}] are invalid"));
                }
                Ok(Node::Leaf(ClassProbabilities {
                    no_failure: w0 / total,
                    failure: w1 / total,
                }))
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Tree { nodes })
}
