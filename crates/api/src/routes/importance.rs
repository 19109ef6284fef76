//! Feature Importance Route

use axum::extract::State;
use axum::Json;
use explainability::ImportanceRecord;
use inference_engine::{ENCODER_ARTIFACT, MODEL_ARTIFACT};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::AppState;

/// Ranked top feature drivers of the predicted score.
///
/// Always 200; an empty list when artifacts are missing or the model
/// exposes no importance signal.
pub async fn feature_importance(
    State(state): State<Arc<RwLock<AppState>>>,
) -> Json<Vec<ImportanceRecord>> {
    let model_dir = state.read().await.settings.model_dir.clone();
    let dir = Path::new(&model_dir);

    let report =
        explainability::extract_from_artifacts(dir.join(MODEL_ARTIFACT), dir.join(ENCODER_ARTIFACT));
    Json(report)
}
