//! Criterion scorers. Each one maps the prepared transcript to a bounded sub-score plus a
//! human-readable detail, and has an explicit branch for degenerate input (no words,
//! invalid duration, missing analyzer). None of them can fail.

pub mod filler;
pub mod flow;
pub mod grammar;
pub mod keywords;
pub mod salutation;
pub mod semantic;
pub mod sentiment;
pub mod speech_rate;
pub mod vocabulary;

use serde::{Deserialize, Serialize};

/// Sum of the max scores that are fixed in code rather than configured in the rubric.
pub const FIXED_MAX_TOTAL: f64 = speech_rate::MAX_SCORE
    + grammar::MAX_SCORE
    + vocabulary::MAX_SCORE
    + filler::MAX_SCORE
    + sentiment::MAX_SCORE;

/// One row of the score breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionResult {
    pub criterion: String,
    pub max_score: f64,
    pub score: f64,
    pub detail: String,
}

impl CriterionResult {
    pub fn new(
        criterion: impl Into<String>,
        max_score: f64,
        score: f64,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            criterion: criterion.into(),
            max_score,
            score,
            detail: detail.into(),
        }
    }
}
