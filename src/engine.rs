//! # Rubric Engine
//! Pure scoring pipeline: `(transcript, duration_sec)` → `ScoreResult`.
//! No I/O beyond the injected analyzers; suitable for unit tests and offline batch scoring.
//!
//! Policy: nine classical criteria sum to a 0–100 base score; the semantic criterion
//! (0–10) is rescaled ×10 and blended in at 10%:
//! `overall = 0.9 × base + 0.1 × (semantic × 10)`, rounded to one decimal.

use metrics::{counter, histogram};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analyzers::{AnalyzerStatus, Analyzers};
use crate::criteria::{
    filler, flow, grammar, keywords, salutation, semantic, sentiment, speech_rate, vocabulary,
    CriterionResult,
};
use crate::rubric::{CriterionSpec, Rubric, BASE_MAX_SCORE};
use crate::text::{anon_hash, round1, Transcript};

const BASE_WEIGHT: f64 = 0.9;
const SEMANTIC_WEIGHT: f64 = 0.1;

/// Full result of one scoring call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub overall_score: f64,
    pub base_rubric_score: f64,
    pub semantic_score_0_10: f64,
    pub max_score: f64,
    pub words: usize,
    pub duration_sec: f64,
    pub wpm: f64,
    pub criteria: Vec<CriterionResult>,
}

/// Blend the classical base (0–100) with the semantic score (0–10).
pub fn overall_score(base: f64, semantic_0_10: f64) -> f64 {
    round1(BASE_WEIGHT * base + SEMANTIC_WEIGHT * (semantic_0_10 * 10.0))
}

/// Shared, read-only scoring engine. Build once, wrap in `Arc`, call from any thread.
pub struct RubricEngine {
    rubric: Rubric,
    analyzers: Analyzers,
}

impl RubricEngine {
    pub fn new(rubric: Rubric, analyzers: Analyzers) -> Self {
        Self { rubric, analyzers }
    }

    pub fn rubric(&self) -> &Rubric {
        &self.rubric
    }

    pub fn criteria(&self) -> Vec<CriterionSpec> {
        self.rubric.criteria()
    }

    pub fn analyzer_statuses(&self) -> Vec<AnalyzerStatus> {
        self.analyzers.statuses()
    }

    /// Score a transcript. Never fails: every criterion has a degenerate-input branch.
    pub fn score(&self, transcript: &str, duration_sec: f64) -> ScoreResult {
        let t = Transcript::new(transcript);
        let words = t.word_count();
        let r = &self.rubric;
        let an = &self.analyzers;

        let rate = speech_rate::score(words, duration_sec);

        let classical = vec![
            salutation::score(r, &t.normalized),
            keywords::score(&r.must_have, &t.normalized),
            keywords::score(&r.good_to_have, &t.normalized),
            flow::score(&r.cfg.flow, &t.tokens),
            rate.result,
            grammar::score(&an.grammar, &t.raw, words),
            vocabulary::score(&t.tokens),
            filler::score(r.filler_words(), &t.normalized, words),
            sentiment::score(&an.sentiment, &t.raw),
        ];
        let sem = semantic::score(&an.semantic, &t.raw, r.reference_text());

        let base: f64 = classical.iter().map(|c| c.score).sum();
        debug_assert!((0.0..=BASE_MAX_SCORE).contains(&base));
        let semantic_0_10 = sem.score;
        let overall = overall_score(base, semantic_0_10);

        let mut criteria = classical;
        criteria.push(sem);

        let result = ScoreResult {
            overall_score: overall,
            base_rubric_score: round1(base),
            semantic_score_0_10: semantic_0_10,
            max_score: BASE_MAX_SCORE,
            words,
            duration_sec,
            wpm: round1(rate.wpm),
            criteria,
        };

        counter!("rubric_scores_total").increment(1);
        histogram!("rubric_overall_score").record(overall);
        debug!(
            target: "rubric",
            id = %anon_hash(&t.raw),
            words,
            wpm = result.wpm,
            base = result.base_rubric_score,
            semantic = semantic_0_10,
            overall,
            "transcript scored"
        );

        result
    }
}
