use std::collections::HashSet;

use super::CriterionResult;

pub const CRITERION: &str = "Vocabulary Richness (TTR)";
pub const MAX_SCORE: f64 = 10.0;

pub fn band(ttr: f64) -> f64 {
    if (0.9..=1.0).contains(&ttr) {
        10.0
    } else if (0.7..0.9).contains(&ttr) {
        8.0
    } else if (0.5..0.7).contains(&ttr) {
        6.0
    } else if (0.3..0.5).contains(&ttr) {
        4.0
    } else {
        2.0
    }
}

/// Type-token ratio over the lower-cased tokens.
pub fn score(tokens: &[String]) -> CriterionResult {
    let words = tokens.len();
    if words == 0 {
        return CriterionResult::new(CRITERION, MAX_SCORE, 0.0, "No words.");
    }

    let distinct = tokens.iter().collect::<HashSet<_>>().len();
    let ttr = distinct as f64 / words as f64;

    CriterionResult::new(
        CRITERION,
        MAX_SCORE,
        band(ttr),
        format!("TTR = {ttr:.2} ({distinct} distinct / {words} words)"),
    )
}
