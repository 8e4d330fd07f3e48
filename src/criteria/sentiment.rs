use super::CriterionResult;
use crate::analyzers::{Analyzer, SentimentModel};

pub const CRITERION: &str = "Engagement – Sentiment Positivity";
pub const MAX_SCORE: f64 = 15.0;

/// Score used when no sentiment model is available.
pub const NEUTRAL_DEFAULT: f64 = 12.0;

/// Bands over the positive proportion. Values between the closed intervals
/// (e.g. 0.895) drop to the last branch.
pub fn band(pos: f64) -> (f64, &'static str) {
    if pos >= 0.9 {
        (15.0, "Very positive")
    } else if (0.7..=0.89).contains(&pos) {
        (12.0, "Positive")
    } else if (0.5..=0.69).contains(&pos) {
        (9.0, "Slightly positive / neutral")
    } else if (0.3..=0.49).contains(&pos) {
        (6.0, "Neutral to slightly negative")
    } else {
        (3.0, "Negative / low positivity")
    }
}

pub fn score(model: &Analyzer<dyn SentimentModel>, raw: &str) -> CriterionResult {
    let Some(p) = model.run(|m| m.polarity(raw)) else {
        return CriterionResult::new(
            CRITERION,
            MAX_SCORE,
            NEUTRAL_DEFAULT,
            "Sentiment tool not available – default neutral.",
        );
    };

    let (score, label) = band(p.pos);
    CriterionResult::new(
        CRITERION,
        MAX_SCORE,
        score,
        format!(
            "{label} (pos={:.2}, neg={:.2}, neu={:.2}, compound={:.2})",
            p.pos, p.neg, p.neu, p.compound
        ),
    )
}
