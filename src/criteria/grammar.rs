use super::CriterionResult;
use crate::analyzers::{Analyzer, GrammarChecker};

pub const CRITERION: &str = "Grammar";
pub const MAX_SCORE: f64 = 10.0;

const UNAVAILABLE_DETAIL: &str = "Grammar tool not available – default full score.";

/// Quality `g = 1 - min(errors_per_100 / 10, 1)`, always in [0, 1].
pub fn quality(errors: usize, word_count: usize) -> (f64, f64) {
    let per_100 = errors as f64 / word_count as f64 * 100.0;
    let g = 1.0 - (per_100 / 10.0).min(1.0);
    (per_100, g.clamp(0.0, 1.0))
}

/// Tier table. Intervals are closed as written, so values between tiers
/// (e.g. 0.895) fall through to the catch-all.
pub fn tier(g: f64) -> f64 {
    if g > 0.9 {
        10.0
    } else if (0.7..=0.89).contains(&g) {
        8.0
    } else if (0.5..=0.69).contains(&g) {
        6.0
    } else if (0.3..=0.49).contains(&g) {
        4.0
    } else {
        2.0
    }
}

/// Missing checker or no words: full marks by policy.
pub fn score(checker: &Analyzer<dyn GrammarChecker>, raw: &str, word_count: usize) -> CriterionResult {
    if word_count == 0 {
        return CriterionResult::new(CRITERION, MAX_SCORE, MAX_SCORE, UNAVAILABLE_DETAIL);
    }

    let Some(issues) = checker.run(|c| c.check(raw)) else {
        return CriterionResult::new(CRITERION, MAX_SCORE, MAX_SCORE, UNAVAILABLE_DETAIL);
    };

    let errors = issues.len();
    let (per_100, g) = quality(errors, word_count);

    CriterionResult::new(
        CRITERION,
        MAX_SCORE,
        tier(g),
        format!("{errors} errors (~{per_100:.1} per 100 words, raw={g:.2})"),
    )
}
