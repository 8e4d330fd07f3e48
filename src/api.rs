use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tracing::error;

use crate::analyzers::AnalyzerStatus;
use crate::engine::{RubricEngine, ScoreResult};
use crate::rubric::CriterionSpec;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RubricEngine>,
}

impl AppState {
    pub fn new(engine: RubricEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/score", post(score))
        .route("/api/rubric", get(rubric))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Debug, serde::Deserialize)]
pub struct ScoreRequest {
    pub transcript: String,
    /// Audio length in seconds; zero or negative is accepted and scored as an invalid rate.
    pub duration_sec: f64,
}

async fn score(
    State(state): State<AppState>,
    Json(req): Json<ScoreRequest>,
) -> Result<Json<ScoreResult>, (StatusCode, String)> {
    let engine = state.engine.clone();
    // Analyzers are synchronous (and may do blocking HTTP), so keep them off the async workers.
    tokio::task::spawn_blocking(move || engine.score(&req.transcript, req.duration_sec))
        .await
        .map(Json)
        .map_err(|e| {
            error!(target: "rubric", error = %e, "scoring task failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "scoring failed".to_string(),
            )
        })
}

#[derive(serde::Serialize)]
struct RubricOut {
    max_score: f64,
    criteria: Vec<CriterionSpec>,
    analyzers: Vec<AnalyzerStatus>,
}

async fn rubric(State(state): State<AppState>) -> Json<RubricOut> {
    Json(RubricOut {
        max_score: crate::rubric::BASE_MAX_SCORE,
        criteria: state.engine.criteria(),
        analyzers: state.engine.analyzer_statuses(),
    })
}
