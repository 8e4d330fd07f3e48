use super::CriterionResult;

pub const CRITERION: &str = "Clarity – Filler Word Rate";
pub const MAX_SCORE: f64 = 15.0;

/// Raw, non-overlapping substring occurrences of every filler phrase.
///
/// Not word-bounded on purpose: "so" also counts inside "also", and "okay"
/// counts for both "okay" and "ok".
pub fn count(fillers: &[String], normalized: &str) -> usize {
    fillers.iter().map(|f| normalized.matches(f.as_str()).count()).sum()
}

/// Closed integer-style bands; a rate between two bands (e.g. 3.5) lands in the final branch.
pub fn band(rate: f64) -> f64 {
    if (0.0..=3.0).contains(&rate) {
        15.0
    } else if (4.0..=6.0).contains(&rate) {
        12.0
    } else if (7.0..=9.0).contains(&rate) {
        9.0
    } else if (10.0..=12.0).contains(&rate) {
        6.0
    } else {
        3.0
    }
}

/// Zero words scores the maximum: there is nothing to penalize.
pub fn score(fillers: &[String], normalized: &str, word_count: usize) -> CriterionResult {
    if word_count == 0 {
        return CriterionResult::new(CRITERION, MAX_SCORE, MAX_SCORE, "No words.");
    }

    let n = count(fillers, normalized);
    let rate = n as f64 / word_count as f64 * 100.0;

    CriterionResult::new(
        CRITERION,
        MAX_SCORE,
        band(rate),
        format!("{n} filler words (~{rate:.2}% of words)"),
    )
}
