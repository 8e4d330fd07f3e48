// src/config/analyzers.rs
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path};
use tracing::warn;

use crate::analyzers::embedding::DEFAULT_DIMENSIONS;

pub const DEFAULT_ANALYZERS_CONFIG_PATH: &str = "config/analyzers.json";
pub const ENV_ANALYZERS_CONFIG_PATH: &str = "ANALYZERS_CONFIG_PATH";

fn default_grammar_provider() -> String {
    "rules".to_string()
}
fn default_languagetool_url() -> String {
    "http://localhost:8081".to_string()
}
fn default_language() -> String {
    "en-US".to_string()
}
fn default_timeout_ms() -> u64 {
    3000
}
fn default_sentiment_provider() -> String {
    "lexicon".to_string()
}
fn default_semantic_provider() -> String {
    "bag_of_words".to_string()
}
fn default_dimensions() -> usize {
    DEFAULT_DIMENSIONS
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzersConfig {
    #[serde(default)]
    pub grammar: GrammarConfig,
    #[serde(default)]
    pub sentiment: SentimentConfig,
    #[serde(default)]
    pub semantic: SemanticConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrammarConfig {
    /// "rules" | "languagetool" | "disabled" (case-insensitive)
    #[serde(default = "default_grammar_provider")]
    pub provider: String,
    #[serde(default = "default_languagetool_url")]
    pub languagetool_url: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            provider: default_grammar_provider(),
            languagetool_url: default_languagetool_url(),
            language: default_language(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentConfig {
    /// "lexicon" | "disabled"
    #[serde(default = "default_sentiment_provider")]
    pub provider: String,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            provider: default_sentiment_provider(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticConfig {
    /// "bag_of_words" | "disabled"
    #[serde(default = "default_semantic_provider")]
    pub provider: String,
    #[serde(default = "default_dimensions")]
    pub dimensions: usize,
}

impl Default for SemanticConfig {
    fn default() -> Self {
        Self {
            provider: default_semantic_provider(),
            dimensions: default_dimensions(),
        }
    }
}

impl AnalyzersConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let data = fs::read_to_string(path)?;
        let mut cfg: AnalyzersConfig = serde_json::from_str(&data)?;
        cfg.sanitize();
        Ok(cfg)
    }

    /// Load from `ANALYZERS_CONFIG_PATH` (or `config/analyzers.json`).
    /// If reading/parsing fails, returns `AnalyzersConfig::default()`.
    pub fn load() -> Self {
        let path = env::var(ENV_ANALYZERS_CONFIG_PATH)
            .unwrap_or_else(|_| DEFAULT_ANALYZERS_CONFIG_PATH.to_string());
        match Self::load_from_file(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(target: "rubric", %path, error = %e, "analyzer config not loaded; using defaults");
                Self::default()
            }
        }
    }

    fn sanitize(&mut self) {
        // Normalize providers
        for p in [
            &mut self.grammar.provider,
            &mut self.sentiment.provider,
            &mut self.semantic.provider,
        ] {
            *p = p.trim().to_lowercase();
        }
        if self.grammar.timeout_ms == 0 {
            self.grammar.timeout_ms = default_timeout_ms();
        }
        if self.semantic.dimensions == 0 {
            self.semantic.dimensions = default_dimensions();
        }
    }
}
