// src/lib.rs
// Public library surface for the binaries and integration tests.

pub mod analyzers;
pub mod api;
pub mod config;
pub mod criteria;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod rubric;
pub mod text;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::criteria::CriterionResult;
pub use crate::engine::{RubricEngine, ScoreResult};
pub use crate::rubric::Rubric;

use anyhow::Context;
use axum::Router;

use crate::analyzers::Analyzers;
use crate::config::analyzers::AnalyzersConfig;

/// Build the scoring engine from the environment:
/// rubric from `RUBRIC_CONFIG_PATH` (or the embedded default),
/// analyzers from `ANALYZERS_CONFIG_PATH` (or `config/analyzers.json`, or defaults).
pub fn engine_from_env() -> anyhow::Result<RubricEngine> {
    let rubric = Rubric::load().context("loading rubric")?;
    let analyzers = Analyzers::from_config(&AnalyzersConfig::load());
    Ok(RubricEngine::new(rubric, analyzers))
}

/// Build the full HTTP app (scoring API + `/metrics`), the same Router the binary serves.
pub async fn app() -> anyhow::Result<Router> {
    let engine = engine_from_env()?;
    let metrics = crate::metrics::Metrics::init()?;
    Ok(router(AppState::new(engine)).merge(metrics.router()))
}
