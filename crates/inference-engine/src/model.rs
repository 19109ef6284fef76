//! Regressor Artifact

use crate::PipelineError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One node of a regression tree, stored in a flat arena with the root at
/// index 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum TreeNode {
    /// Internal split: go left when `features[feature] <= threshold`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Terminal value.
    Leaf { value: f64 },
}

/// A single regression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Walk the tree for one encoded feature vector.
    pub fn predict(&self, features: &[f64]) -> f64 {
        let mut index = 0;
        loop {
            match self.nodes.get(index) {
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = features.get(*feature).copied().unwrap_or(0.0);
                    index = if value <= *threshold { *left } else { *right };
                }
                Some(TreeNode::Leaf { value }) => return *value,
                // Out-of-range child index in a malformed artifact.
                None => return 0.0,
            }
        }
    }
}

/// Persisted regressor. The variant, and with it the importance signal the
/// model exposes, is resolved once when the artifact is deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegressorArtifact {
    /// Linear model: `dot(coefficients, features) + intercept`.
    Linear {
        coefficients: Vec<f64>,
        intercept: f64,
    },
    /// Averaged tree ensemble with impurity-based importances.
    Forest {
        trees: Vec<DecisionTree>,
        feature_importances: Vec<f64>,
    },
    /// Constant model predicting the training-target mean. Exposes no
    /// importance signal.
    Baseline { mean: f64 },
}

/// Per-feature importance signal of a fitted model, aligned with the
/// encoder's expanded column order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Signal<'a> {
    /// Signed linear coefficients.
    Linear(&'a [f64]),
    /// Non-negative impurity importances.
    Impurity(&'a [f64]),
    /// Model exposes neither; importance reports are empty.
    Unsupported,
}

impl RegressorArtifact {
    /// Number of input features the model was fitted on, if the artifact
    /// records one.
    pub fn input_dimension(&self) -> Option<usize> {
        match self {
            RegressorArtifact::Linear { coefficients, .. } => Some(coefficients.len()),
            RegressorArtifact::Forest {
                feature_importances,
                ..
            } => Some(feature_importances.len()),
            RegressorArtifact::Baseline { .. } => None,
        }
    }

    /// Score one encoded feature vector.
    pub fn predict(&self, features: &[f64]) -> f64 {
        match self {
            RegressorArtifact::Linear {
                coefficients,
                intercept,
            } => {
                coefficients
                    .iter()
                    .zip(features)
                    .map(|(c, f)| c * f)
                    .sum::<f64>()
                    + intercept
            }
            RegressorArtifact::Forest { trees, .. } => {
                if trees.is_empty() {
                    return 0.0;
                }
                trees.iter().map(|t| t.predict(features)).sum::<f64>() / trees.len() as f64
            }
            RegressorArtifact::Baseline { mean } => *mean,
        }
    }

    /// Importance signal for explainability.
    pub fn importance_signal(&self) -> Signal<'_> {
        match self {
            RegressorArtifact::Linear { coefficients, .. } => Signal::Linear(coefficients),
            RegressorArtifact::Forest {
                feature_importances,
                ..
            } => Signal::Impurity(feature_importances),
            RegressorArtifact::Baseline { .. } => Signal::Unsupported,
        }
    }

    /// Persist the model as a JSON artifact.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PipelineError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PipelineError::ArtifactLoad(e.to_string()))?;
        fs::write(path.as_ref(), json).map_err(|e| {
            PipelineError::ArtifactLoad(format!("{}: {}", path.as_ref().display(), e))
        })
    }

    /// Load a persisted model artifact.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let raw = fs::read_to_string(path.as_ref()).map_err(|e| {
            PipelineError::ArtifactLoad(format!("{}: {}", path.as_ref().display(), e))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            PipelineError::ArtifactLoad(format!("{}: {}", path.as_ref().display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_prediction() {
        let model = RegressorArtifact::Linear {
            coefficients: vec![2.0, -1.0, 0.5],
            intercept: 10.0,
        };
        assert_eq!(model.predict(&[1.0, 2.0, 4.0]), 12.0);
        assert_eq!(model.input_dimension(), Some(3));
    }

    #[test]
    fn test_forest_prediction_averages_trees() {
        let left_heavy = DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: 0,
                    threshold: 0.5,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { value: 40.0 },
                TreeNode::Leaf { value: 80.0 },
            ],
        };
        let constant = DecisionTree {
            nodes: vec![TreeNode::Leaf { value: 60.0 }],
        };
        let model = RegressorArtifact::Forest {
            trees: vec![left_heavy, constant],
            feature_importances: vec![1.0, 0.0],
        };

        assert_eq!(model.predict(&[0.0, 0.0]), 50.0);
        assert_eq!(model.predict(&[1.0, 0.0]), 70.0);
    }

    #[test]
    fn test_baseline_predicts_mean() {
        let model = RegressorArtifact::Baseline { mean: 67.3 };
        assert_eq!(model.predict(&[1.0, 2.0]), 67.3);
        assert_eq!(model.input_dimension(), None);
        assert_eq!(model.importance_signal(), Signal::Unsupported);
    }

    #[test]
    fn test_signal_variants() {
        let linear = RegressorArtifact::Linear {
            coefficients: vec![1.0],
            intercept: 0.0,
        };
        assert!(matches!(linear.importance_signal(), Signal::Linear(_)));

        let forest = RegressorArtifact::Forest {
            trees: vec![],
            feature_importances: vec![0.5],
        };
        assert!(matches!(forest.importance_signal(), Signal::Impurity(_)));
    }

    #[test]
    fn test_artifact_round_trip() {
        let model = RegressorArtifact::Linear {
            coefficients: vec![1.5, -2.5],
            intercept: 42.0,
        };
        let path = std::env::temp_dir().join(format!(
            "model-round-trip-{}.json",
            std::process::id()
        ));

        model.save(&path).unwrap();
        let reloaded = RegressorArtifact::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(model, reloaded);
    }

    #[test]
    fn test_load_missing_artifact_fails() {
        let result = RegressorArtifact::load("/nonexistent/model.json");
        assert!(matches!(result, Err(PipelineError::ArtifactLoad(_))));
    }
}
