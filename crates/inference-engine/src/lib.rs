//! Prediction Pipeline
//!
//! Loads the fitted encoder and regressor artifacts and serves single-record
//! exam score predictions.

mod model;
mod pipeline;
mod state;

pub use model::{DecisionTree, RegressorArtifact, Signal, TreeNode};
pub use pipeline::{PredictPipeline, ENCODER_ARTIFACT, MODEL_ARTIFACT};
pub use state::ServingState;

use thiserror::Error;

/// Errors from the prediction pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    /// An artifact is missing, unreadable, or corrupt. The hosting process
    /// stays alive; predictions report failure until artifacts are available.
    #[error("artifact load failed: {0}")]
    ArtifactLoad(String),

    /// Input record does not match the fitted schema.
    #[error(transparent)]
    Encode(#[from] preprocessor::EncodeError),

    /// Encoded vector length differs from what the model was fitted on.
    #[error("encoder produces {actual} features, model expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
}
