//! Exam Score Prediction API Server
//!
//! REST API over the prediction pipeline: score predictions, feature
//! importance reporting, and health.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{extract::State, Json, Router};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tower_governor::GovernorLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod rate_limit;
mod routes;
mod schema;
mod settings;

pub use rate_limit::{predict_governor, PredictGovernorConfig};
pub use schema::{PredictionResponse, RangeError, StudentProfile};
pub use settings::Settings;

use inference_engine::ServingState;

/// Application state shared across handlers. The serving state is read-only
/// after startup; concurrent requests only ever take the read half of the
/// lock.
pub struct AppState {
    /// Pipeline lifecycle: uninitialized, ready, or load-failed.
    pub serving: ServingState,
    /// Runtime settings.
    pub settings: Settings,
    /// Version string.
    pub version: String,
    /// Start time.
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create application state, loading artifacts from the configured
    /// model directory. A load failure is captured in the serving state and
    /// never aborts startup.
    pub fn new(settings: Settings) -> Self {
        Self {
            serving: ServingState::initialize(&settings.model_dir),
            settings,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Errors surfaced by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Pipeline artifacts are not loaded.
    #[error("model not loaded")]
    Unavailable,
    /// Request field outside its allowed range.
    #[error(transparent)]
    Validation(#[from] RangeError),
    /// Inference failed for a structurally valid request.
    #[error("inference failed: {0}")]
    Inference(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(serde_json::json!({ "detail": self.to_string() }));
        (status, body).into_response()
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub model: ModelHealth,
}

/// Model component health
#[derive(Debug, Serialize)]
pub struct ModelHealth {
    pub status: String,
    pub detail: Option<String>,
}

/// Create the application router.
pub fn create_router(
    state: Arc<RwLock<AppState>>,
    governor: Arc<PredictGovernorConfig>,
) -> Router {
    let predict = Router::new()
        .route("/predict", post(routes::predict::predict))
        .route_layer(GovernorLayer { config: governor });

    Router::new()
        .route("/", get(home_handler))
        .route("/health", get(health_handler))
        .route(
            "/feature_importance",
            get(routes::importance::feature_importance),
        )
        .merge(predict)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness handler.
async fn home_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Exam Score Prediction API is running. Use /predict to get scores."
    }))
}

/// Health check handler.
async fn health_handler(State(state): State<Arc<RwLock<AppState>>>) -> Json<HealthResponse> {
    let state = state.read().await;
    let detail = match &state.serving {
        ServingState::LoadFailed(reason) => Some(reason.clone()),
        _ => None,
    };

    Json(HealthResponse {
        status: if state.serving.is_ready() {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        model: ModelHealth {
            status: state.serving.status().to_string(),
            detail,
        },
    })
}

/// Initialize logging.
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Run the server until shutdown.
pub async fn run_server(settings: Settings) -> anyhow::Result<()> {
    let governor = predict_governor(&settings);
    let state = Arc::new(RwLock::new(AppState::new(settings.clone())));
    let app = create_router(state, governor);

    info!("starting exam score API on {}", settings.bind_addr);

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
