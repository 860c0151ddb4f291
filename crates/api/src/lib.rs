//! Security Detection API Server
//!
//! REST transport over the four detectors: one endpoint per detection
//! category plus a liveness endpoint. The transport decodes the uploaded
//! frame, drives a single detector, and serializes its result as-is.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use classifier::{ClassifierError, OnnxClassifier};
use detect::score::POSE_FEATURE_LEN;
use detect::{
    AccessConfig, AccessDetector, BehaviorConfig, BehaviorDetector, DrowsinessConfig,
    DrowsinessDetector, FightConfig, FightDetector, Scoring,
};
use perception::{BlockMatchFlow, StubFaceProvider, StubPoseProvider};

mod error;
mod routes;
mod server_config;

pub use error::ApiError;
pub use server_config::{ModelPaths, ServerConfig};

/// Classifier input lengths per detector
const ACCESS_FEATURES: usize = 3;
const BEHAVIOR_FEATURES: usize = 10 * POSE_FEATURE_LEN;
const DROWSINESS_FEATURES: usize = 4;
const FIGHT_FEATURES: usize = 25;

/// Application state shared across handlers.
///
/// Each detector sits behind its own async mutex: detectors mutate
/// sliding-window state per frame and serve one stream sequentially.
pub struct AppState {
    pub access: Mutex<AccessDetector>,
    pub behavior: Mutex<BehaviorDetector>,
    pub drowsiness: Mutex<DrowsinessDetector>,
    pub fight: Mutex<FightDetector>,
    /// Scoring mode per detector, for the health report
    pub modes: DetectorModes,
    pub version: String,
    pub start_time: std::time::Instant,
}

/// Scoring mode names, fixed at startup
#[derive(Debug, Clone, Serialize)]
pub struct DetectorModes {
    pub access: &'static str,
    pub behavior: &'static str,
    pub drowsiness: &'static str,
    pub fight: &'static str,
}

fn scoring_for(model_path: Option<&str>, feature_len: usize) -> Result<Scoring, ClassifierError> {
    match model_path {
        Some(path) => Ok(Scoring::Learned(Box::new(OnnxClassifier::load(
            path,
            feature_len,
        )?))),
        None => Ok(Scoring::Rules),
    }
}

impl AppState {
    /// Construct all detectors per the server configuration.
    ///
    /// A configured model path selects learned scoring for that detector;
    /// otherwise it runs rule-based, permanently.
    pub fn from_config(config: &ServerConfig) -> anyhow::Result<Self> {
        let access_scoring = scoring_for(config.models.access.as_deref(), ACCESS_FEATURES)?;
        let behavior_scoring = scoring_for(config.models.behavior.as_deref(), BEHAVIOR_FEATURES)?;
        let drowsiness_scoring =
            scoring_for(config.models.drowsiness.as_deref(), DROWSINESS_FEATURES)?;
        let fight_scoring = scoring_for(config.models.fight.as_deref(), FIGHT_FEATURES)?;

        let modes = DetectorModes {
            access: access_scoring.mode_name(),
            behavior: behavior_scoring.mode_name(),
            drowsiness: drowsiness_scoring.mode_name(),
            fight: fight_scoring.mode_name(),
        };

        Ok(Self {
            access: Mutex::new(AccessDetector::new(
                AccessConfig::default(),
                Box::new(StubPoseProvider::new()),
                access_scoring,
            )),
            behavior: Mutex::new(BehaviorDetector::new(
                BehaviorConfig::default(),
                Box::new(StubPoseProvider::new()),
                behavior_scoring,
            )),
            drowsiness: Mutex::new(DrowsinessDetector::new(
                DrowsinessConfig::default(),
                Box::new(StubFaceProvider::new()),
                drowsiness_scoring,
            )),
            fight: Mutex::new(FightDetector::new(
                FightConfig::default(),
                Box::new(StubPoseProvider::new()),
                Box::new(BlockMatchFlow::new()),
                fight_scoring,
            )),
            modes,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        })
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub detectors: DetectorModes,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/detect/access", post(routes::detect::access))
        .route("/api/detect/behavior", post(routes::detect::behavior))
        .route("/api/detect/drowsiness", post(routes::detect::drowsiness))
        .route("/api/detect/fight", post(routes::detect::fight))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        detectors: state.modes.clone(),
    })
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Run the server
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let state = Arc::new(AppState::from_config(&config)?);
    let app = create_router(state);

    info!("Starting detection API server on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_state() -> Arc<AppState> {
        Arc::new(AppState::from_config(&ServerConfig::default()).unwrap())
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_detect_without_frame_is_bad_request() {
        let app = create_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/detect/fight")
                    .header("content-type", "multipart/form-data; boundary=x")
                    .body(Body::from("--x--\r\n"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
