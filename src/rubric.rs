//! Rubric configuration: config schema (TOML), regex compilation, and invariant checks.
//!
//! The rubric is data: salutation tiers, keyword slots, flow words, filler phrases and
//! the semantic reference text all come from `config/rubric.toml`. A copy of that file
//! is embedded into the binary and used when `RUBRIC_CONFIG_PATH` is not set.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::criteria;
use crate::error::RubricError;

pub const ENV_RUBRIC_CONFIG_PATH: &str = "RUBRIC_CONFIG_PATH";

const EMBEDDED_RUBRIC: &str = include_str!("../config/rubric.toml");

/// Classical (non-semantic) criteria must sum to this.
pub const BASE_MAX_SCORE: f64 = 100.0;

/* ----------------------------
Config schema (from TOML)
---------------------------- */

#[derive(Debug, Clone, Deserialize)]
pub struct RubricRoot {
    pub salutation: SalutationCfg,
    pub keywords: KeywordsCfg,
    pub flow: FlowCfg,
    pub filler: FillerCfg,
    pub semantic: SemanticCfg,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SalutationCfg {
    pub max_score: f64,
    pub none_label: String,
    pub tiers: Vec<TierCfg>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TierCfg {
    pub score: f64,
    pub label: String,
    pub pattern: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeywordsCfg {
    pub must_have: SlotGroupCfg,
    pub good_to_have: SlotGroupCfg,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlotGroupCfg {
    pub criterion: String,
    pub points: f64,
    pub max_score: f64,
    pub slots: Vec<SlotCfg>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlotCfg {
    pub name: String,
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlowCfg {
    pub max_score: f64,
    pub salutation_words: Vec<String>,
    pub closing_first: Vec<String>,
    pub closing_second: Vec<String>,
    pub start_ratio: f64,
    pub end_ratio: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FillerCfg {
    pub words: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SemanticCfg {
    pub reference: String,
}

/* ----------------------------
Compiled rubric
---------------------------- */

#[derive(Debug)]
pub struct SalutationTier {
    pub score: f64,
    pub label: String,
    re: Regex,
}

impl SalutationTier {
    pub fn is_match(&self, normalized: &str) -> bool {
        self.re.is_match(normalized)
    }
}

/// A named rubric requirement satisfied by any one of its alternative patterns.
#[derive(Debug)]
pub struct Slot {
    pub name: String,
    patterns: Vec<Regex>,
}

impl Slot {
    pub fn is_present(&self, normalized: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(normalized))
    }
}

#[derive(Debug)]
pub struct SlotGroup {
    pub criterion: String,
    pub points: f64,
    pub max_score: f64,
    pub slots: Vec<Slot>,
}

/// Row of the public criteria listing (`GET /api/rubric`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionSpec {
    pub criterion: String,
    pub max_score: f64,
}

#[derive(Debug)]
pub struct Rubric {
    pub cfg: RubricRoot,
    pub salutation_tiers: Vec<SalutationTier>,
    pub must_have: SlotGroup,
    pub good_to_have: SlotGroup,
}

impl Rubric {
    /// Load using `RUBRIC_CONFIG_PATH`, or the embedded default when unset.
    pub fn load() -> Result<Self, RubricError> {
        match std::env::var(ENV_RUBRIC_CONFIG_PATH) {
            Ok(p) if !p.trim().is_empty() => Self::from_path(PathBuf::from(p)),
            _ => {
                info!(target: "rubric", "using embedded rubric");
                Self::from_toml_str(EMBEDDED_RUBRIC)
            }
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RubricError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| RubricError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let rubric = Self::from_toml_str(&content)?;
        info!(target: "rubric", path = %path.display(), "rubric loaded");
        Ok(rubric)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, RubricError> {
        let cfg: RubricRoot = toml::from_str(toml_str)?;
        validate(&cfg)?;

        let salutation_tiers = cfg
            .salutation
            .tiers
            .iter()
            .map(|t| {
                let re = Regex::new(&t.pattern)
                    .map_err(|e| RubricError::regex("salutation tier", &t.label, e))?;
                Ok(SalutationTier {
                    score: t.score,
                    label: t.label.clone(),
                    re,
                })
            })
            .collect::<Result<Vec<_>, RubricError>>()?;

        let must_have = compile_group("must_have slot", &cfg.keywords.must_have)?;
        let good_to_have = compile_group("good_to_have slot", &cfg.keywords.good_to_have)?;

        Ok(Self {
            cfg,
            salutation_tiers,
            must_have,
            good_to_have,
        })
    }

    pub fn filler_words(&self) -> &[String] {
        &self.cfg.filler.words
    }

    pub fn reference_text(&self) -> &str {
        self.cfg.semantic.reference.trim()
    }

    /// Every criterion with its max score, in output order (semantic last).
    pub fn criteria(&self) -> Vec<CriterionSpec> {
        let row = |name: &str, max: f64| CriterionSpec {
            criterion: name.to_string(),
            max_score: max,
        };
        vec![
            row(criteria::salutation::CRITERION, self.cfg.salutation.max_score),
            row(&self.must_have.criterion, self.must_have.max_score),
            row(&self.good_to_have.criterion, self.good_to_have.max_score),
            row(criteria::flow::CRITERION, self.cfg.flow.max_score),
            row(criteria::speech_rate::CRITERION, criteria::speech_rate::MAX_SCORE),
            row(criteria::grammar::CRITERION, criteria::grammar::MAX_SCORE),
            row(criteria::vocabulary::CRITERION, criteria::vocabulary::MAX_SCORE),
            row(criteria::filler::CRITERION, criteria::filler::MAX_SCORE),
            row(criteria::sentiment::CRITERION, criteria::sentiment::MAX_SCORE),
            row(criteria::semantic::CRITERION, criteria::semantic::MAX_SCORE),
        ]
    }
}

impl Default for Rubric {
    /// The embedded rubric; its validity is pinned by unit tests.
    fn default() -> Self {
        Self::from_toml_str(EMBEDDED_RUBRIC).expect("embedded rubric is valid")
    }
}

fn compile_group(section: &'static str, g: &SlotGroupCfg) -> Result<SlotGroup, RubricError> {
    let slots = g
        .slots
        .iter()
        .map(|s| {
            let patterns = s
                .patterns
                .iter()
                .map(|p| Regex::new(p).map_err(|e| RubricError::regex(section, &s.name, e)))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Slot {
                name: s.name.clone(),
                patterns,
            })
        })
        .collect::<Result<Vec<_>, RubricError>>()?;
    Ok(SlotGroup {
        criterion: g.criterion.clone(),
        points: g.points,
        max_score: g.max_score,
        slots,
    })
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn validate(cfg: &RubricRoot) -> Result<(), RubricError> {
    let sal = &cfg.salutation;
    if sal.tiers.is_empty() {
        return Err(RubricError::invariant("salutation needs at least one tier"));
    }
    if let Some(t) = sal.tiers.iter().find(|t| t.score < 0.0 || t.score > sal.max_score) {
        return Err(RubricError::invariant(format!(
            "salutation tier `{}` score {} outside 0..={}",
            t.label, t.score, sal.max_score
        )));
    }

    for (key, g) in [
        ("must_have", &cfg.keywords.must_have),
        ("good_to_have", &cfg.keywords.good_to_have),
    ] {
        if g.slots.is_empty() {
            return Err(RubricError::invariant(format!("{key} has no slots")));
        }
        if let Some(s) = g.slots.iter().find(|s| s.patterns.is_empty()) {
            return Err(RubricError::invariant(format!(
                "{key} slot `{}` has no patterns",
                s.name
            )));
        }
        let derived = g.slots.len() as f64 * g.points;
        if !approx_eq(derived, g.max_score) {
            return Err(RubricError::invariant(format!(
                "{key}: {} slots x {} points = {derived}, expected max_score {}",
                g.slots.len(),
                g.points,
                g.max_score
            )));
        }
    }

    let flow = &cfg.flow;
    if flow.salutation_words.is_empty()
        || flow.closing_first.is_empty()
        || flow.closing_second.is_empty()
    {
        return Err(RubricError::invariant("flow word lists must be non-empty"));
    }
    if !(0.0..=1.0).contains(&flow.start_ratio)
        || !(0.0..=1.0).contains(&flow.end_ratio)
        || flow.start_ratio > flow.end_ratio
    {
        return Err(RubricError::invariant(
            "flow ratios must satisfy 0 <= start_ratio <= end_ratio <= 1",
        ));
    }

    // An empty filler would match between every character.
    if cfg.filler.words.iter().any(|w| w.is_empty()) {
        return Err(RubricError::invariant("filler words must be non-empty"));
    }
    if cfg.semantic.reference.trim().is_empty() {
        return Err(RubricError::invariant("semantic reference text is empty"));
    }

    let total = sal.max_score
        + cfg.keywords.must_have.max_score
        + cfg.keywords.good_to_have.max_score
        + flow.max_score
        + criteria::FIXED_MAX_TOTAL;
    if !approx_eq(total, BASE_MAX_SCORE) {
        return Err(RubricError::invariant(format!(
            "classical criteria max scores sum to {total}, expected {BASE_MAX_SCORE}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_rubric_is_valid() {
        let r = Rubric::default();
        assert_eq!(r.salutation_tiers.len(), 3);
        assert_eq!(r.must_have.slots.len(), 5);
        assert_eq!(r.good_to_have.slots.len(), 5);
        assert_eq!(r.filler_words().len(), 16);
        assert!(r.reference_text().starts_with("A complete self introduction"));
    }

    #[test]
    fn classical_max_scores_sum_to_100() {
        let r = Rubric::default();
        let specs = r.criteria();
        assert_eq!(specs.len(), 10);
        let classical: f64 = specs[..9].iter().map(|c| c.max_score).sum();
        assert_eq!(classical, 100.0);
        assert_eq!(specs[9].criterion, "Semantic Alignment");
        assert_eq!(specs[9].max_score, 10.0);
    }

    #[test]
    fn slot_order_follows_config() {
        let r = Rubric::default();
        let names: Vec<&str> = r.must_have.slots.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["name", "age", "school_class", "family", "hobby"]);
    }

    #[test]
    fn bad_regex_names_the_slot() {
        let broken = EMBEDDED_RUBRIC.replace(r"'\bfamily\b'", "'(family'");
        let err = Rubric::from_toml_str(&broken).unwrap_err();
        match err {
            RubricError::Regex { name, .. } => assert_eq!(name, "family"),
            other => panic!("expected regex error, got {other:?}"),
        }
    }

    #[test]
    fn points_times_slots_must_match_max() {
        let broken = EMBEDDED_RUBRIC.replacen("points = 4", "points = 3", 1);
        let err = Rubric::from_toml_str(&broken).unwrap_err();
        assert!(matches!(err, RubricError::Invariant(_)), "{err:?}");
    }

    #[test]
    fn total_must_be_100() {
        let broken = EMBEDDED_RUBRIC.replacen(
            "[salutation]\nmax_score = 5",
            "[salutation]\nmax_score = 6",
            1,
        );
        let err = Rubric::from_toml_str(&broken).unwrap_err();
        assert!(err.to_string().contains("expected 100"), "{err}");
    }

    #[test]
    fn empty_filler_rejected() {
        let broken = EMBEDDED_RUBRIC.replacen(r#""um", "uh","#, r#""", "uh","#, 1);
        assert!(Rubric::from_toml_str(&broken).is_err());
    }
}
