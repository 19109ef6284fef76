//! Serving State

use crate::pipeline::PredictPipeline;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Lifecycle of the served pipeline.
///
/// Replaces a nullable global pipeline with an explicit state the serving
/// layer checks per request. A failed artifact load leaves the host process
/// running; requests report unavailability until artifacts appear.
#[derive(Debug, Clone, Default)]
pub enum ServingState {
    /// Artifacts not loaded yet.
    #[default]
    Uninitialized,
    /// Pipeline loaded and serving.
    Ready(Arc<PredictPipeline>),
    /// Artifact load failed, with the reason.
    LoadFailed(String),
}

impl ServingState {
    /// Load artifacts from a model directory, capturing failure as a state
    /// instead of propagating it.
    pub fn initialize(model_dir: impl AsRef<Path>) -> Self {
        match PredictPipeline::load(&model_dir) {
            Ok(pipeline) => {
                info!("prediction pipeline ready");
                ServingState::Ready(Arc::new(pipeline))
            }
            Err(e) => {
                warn!(error = %e, "prediction pipeline unavailable");
                ServingState::LoadFailed(e.to_string())
            }
        }
    }

    /// The loaded pipeline, when ready.
    pub fn pipeline(&self) -> Option<&Arc<PredictPipeline>> {
        match self {
            ServingState::Ready(pipeline) => Some(pipeline),
            _ => None,
        }
    }

    /// Whether predictions can be served.
    pub fn is_ready(&self) -> bool {
        matches!(self, ServingState::Ready(_))
    }

    /// Short status label for health reporting.
    pub fn status(&self) -> &'static str {
        match self {
            ServingState::Uninitialized => "uninitialized",
            ServingState::Ready(_) => "ready",
            ServingState::LoadFailed(_) => "load_failed",
        }
    }
}
