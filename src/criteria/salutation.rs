use super::CriterionResult;
use crate::rubric::Rubric;

pub const CRITERION: &str = "Salutation Level";

/// Tiered greeting match. Tiers are checked in order and a later match overrides an
/// earlier one, so the last matching tier wins.
pub fn score(rubric: &Rubric, normalized: &str) -> CriterionResult {
    let cfg = &rubric.cfg.salutation;
    let (score, label) = rubric
        .salutation_tiers
        .iter()
        .rev()
        .find(|t| t.is_match(normalized))
        .map(|t| (t.score, t.label.as_str()))
        .unwrap_or((0.0, cfg.none_label.as_str()));

    CriterionResult::new(CRITERION, cfg.max_score, score, label)
}
