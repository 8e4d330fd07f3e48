//! Slot-based keyword presence: a slot counts once if ANY of its patterns matches.

use super::CriterionResult;
use crate::rubric::SlotGroup;

/// Presence of each slot, in configured order.
pub fn presence(group: &SlotGroup, normalized: &str) -> Vec<(String, bool)> {
    group
        .slots
        .iter()
        .map(|s| (s.name.clone(), s.is_present(normalized)))
        .collect()
}

pub fn score(group: &SlotGroup, normalized: &str) -> CriterionResult {
    let found = presence(group, normalized);
    let hits = found.iter().filter(|(_, present)| *present).count();
    let score = hits as f64 * group.points;

    CriterionResult::new(
        group.criterion.as_str(),
        group.max_score,
        score,
        render_presence(&found),
    )
}

/// `{name: true, age: false, ...}`
fn render_presence(found: &[(String, bool)]) -> String {
    let body = found
        .iter()
        .map(|(name, present)| format!("{name}: {present}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{body}}}")
}
