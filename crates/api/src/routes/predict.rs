//! Predict Route

use axum::extract::State;
use axum::Json;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::schema::{PredictionResponse, StudentProfile};
use crate::{ApiError, AppState};

/// Score one student profile.
///
/// 503 while the pipeline is unavailable, 422 for out-of-range fields, 500
/// when inference itself fails.
pub async fn predict(
    State(state): State<Arc<RwLock<AppState>>>,
    Json(profile): Json<StudentProfile>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let serving = state.read().await.serving.clone();
    let pipeline = serving.pipeline().ok_or(ApiError::Unavailable)?;

    profile.validate()?;

    let score = pipeline
        .predict(&profile.into_record())
        .map_err(|e| ApiError::Inference(e.to_string()))?;
    debug!(score, "served prediction");

    Ok(Json(PredictionResponse::from_score(score)))
}
