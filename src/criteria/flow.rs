use super::CriterionResult;
use crate::rubric::FlowCfg;

pub const CRITERION: &str = "Flow / Order";

/// Token positions used by the flow heuristic. A missing marker sits at `tokens.len()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowMarkers {
    pub salutation_idx: usize,
    pub closing_idx: usize,
}

/// First salutation word and LAST closing bigram ("thank you" / "thank u").
pub fn markers(cfg: &FlowCfg, tokens: &[String]) -> FlowMarkers {
    let never = tokens.len();
    let salutation_idx = tokens
        .iter()
        .position(|w| cfg.salutation_words.iter().any(|s| s == w))
        .unwrap_or(never);

    let closing_idx = tokens
        .windows(2)
        .rposition(|pair| {
            cfg.closing_first.iter().any(|s| *s == pair[0])
                && cfg.closing_second.iter().any(|s| *s == pair[1])
        })
        .unwrap_or(never);

    FlowMarkers {
        salutation_idx,
        closing_idx,
    }
}

/// Full marks only when the greeting opens (first 20%) and the closing ends (after 60%).
pub fn score(cfg: &FlowCfg, tokens: &[String]) -> CriterionResult {
    let m = markers(cfg, tokens);
    // Empty transcripts still get a non-zero denominator.
    let n = tokens.len().max(1) as f64;

    let ordered = (m.salutation_idx as f64) < cfg.start_ratio * n
        && (m.closing_idx as f64) > cfg.end_ratio * n;

    if ordered {
        CriterionResult::new(
            CRITERION,
            cfg.max_score,
            cfg.max_score,
            "Order followed: salutation near start, closing near end.",
        )
    } else {
        CriterionResult::new(CRITERION, cfg.max_score, 0.0, "Order not clearly followed.")
    }
}
