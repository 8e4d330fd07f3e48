use super::CriterionResult;
use crate::analyzers::{cosine_similarity, Analyzer, Embedder};

pub const CRITERION: &str = "Semantic Alignment";
pub const MAX_SCORE: f64 = 10.0;

/// Score used when no embedder is available.
pub const MID_DEFAULT: f64 = 5.0;

pub fn band(sim: f64) -> f64 {
    if sim >= 0.75 {
        10.0
    } else if (0.65..0.75).contains(&sim) {
        8.0
    } else if (0.55..0.65).contains(&sim) {
        6.0
    } else if (0.45..0.55).contains(&sim) {
        4.0
    } else {
        2.0
    }
}

/// Cosine similarity between the transcript and the ideal-introduction reference.
/// Empty transcript scores 0 before the embedder is consulted.
pub fn score(embedder: &Analyzer<dyn Embedder>, raw: &str, reference: &str) -> CriterionResult {
    let text = raw.trim();
    if text.is_empty() {
        return CriterionResult::new(CRITERION, MAX_SCORE, 0.0, "Empty transcript.");
    }

    let sim = embedder.run(|e| {
        let a = e.embed(text)?;
        let b = e.embed(reference)?;
        cosine_similarity(&a, &b)
    });

    match sim {
        Some(sim) => {
            let sim = f64::from(sim);
            CriterionResult::new(
                CRITERION,
                MAX_SCORE,
                band(sim),
                format!("Cosine similarity: {sim:.3}"),
            )
        }
        None => CriterionResult::new(
            CRITERION,
            MAX_SCORE,
            MID_DEFAULT,
            "Semantic model not available – default mid score.",
        ),
    }
}
