//! Optional analyzer adapters: grammar checking, sentiment polarity, text embedding.
//!
//! Each analyzer is resolved once at startup into a [`Capability`]: either a live
//! instance or `Unavailable` with a reason. Scorers never branch on availability;
//! they call [`Analyzer::run`] and apply their default score when it yields `None`.
//!
//! A call that fails latches the adapter into fallback for the rest of the process
//! (no per-request retries).

pub mod embedding;
pub mod grammar;
pub mod sentiment;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::analyzers::AnalyzersConfig;
use crate::error::AnalyzerError;

pub use embedding::{cosine_similarity, BagOfWordsEmbedder, Embedder};
pub use grammar::{GrammarChecker, GrammarIssue, LanguageToolChecker, RuleGrammarChecker};
pub use sentiment::{LexiconSentiment, Polarity, SentimentModel};

/// Either a live analyzer instance or the reason it could not be provided.
pub enum Capability<T: ?Sized> {
    Available(Arc<T>),
    Unavailable { reason: String },
}

/// A capability plus a process-lifetime failure latch.
pub struct Analyzer<T: ?Sized> {
    name: &'static str,
    provider: String,
    capability: Capability<T>,
    tripped: AtomicBool,
}

impl<T: ?Sized> Analyzer<T> {
    pub fn available(name: &'static str, provider: impl Into<String>, inner: Arc<T>) -> Self {
        let provider = provider.into();
        info!(target: "rubric", analyzer = name, %provider, "analyzer available");
        Self {
            name,
            provider,
            capability: Capability::Available(inner),
            tripped: AtomicBool::new(false),
        }
    }

    pub fn unavailable(name: &'static str, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        info!(target: "rubric", analyzer = name, %reason, "analyzer unavailable");
        Self {
            name,
            provider: "unavailable".to_string(),
            capability: Capability::Unavailable { reason },
            tripped: AtomicBool::new(false),
        }
    }

    /// True while a live instance exists and no call has failed yet.
    pub fn is_available(&self) -> bool {
        matches!(self.capability, Capability::Available(_)) && !self.tripped.load(Ordering::Acquire)
    }

    /// Run `f` against the live analyzer. `None` means: apply the default-score policy.
    pub fn run<R>(&self, f: impl FnOnce(&T) -> Result<R, AnalyzerError>) -> Option<R> {
        let inner = match &self.capability {
            Capability::Available(inner) if !self.tripped.load(Ordering::Acquire) => inner,
            _ => {
                counter!("rubric_analyzer_fallback_total", "analyzer" => self.name).increment(1);
                return None;
            }
        };

        match f(inner.as_ref()) {
            Ok(out) => Some(out),
            Err(err) => {
                if !self.tripped.swap(true, Ordering::AcqRel) {
                    warn!(
                        target: "rubric",
                        analyzer = self.name,
                        provider = %self.provider,
                        error = %err,
                        "analyzer failed; using default score from now on"
                    );
                }
                counter!("rubric_analyzer_fallback_total", "analyzer" => self.name).increment(1);
                None
            }
        }
    }

    pub fn status(&self) -> AnalyzerStatus {
        let reason = match &self.capability {
            Capability::Unavailable { reason } => Some(reason.clone()),
            Capability::Available(_) if self.tripped.load(Ordering::Acquire) => {
                Some("disabled after a failed call".to_string())
            }
            Capability::Available(_) => None,
        };
        AnalyzerStatus {
            analyzer: self.name,
            available: reason.is_none(),
            provider: self.provider.clone(),
            reason,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzerStatus {
    pub analyzer: &'static str,
    pub available: bool,
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// The three optional analyzers, constructed once and shared by every scoring call.
pub struct Analyzers {
    pub grammar: Analyzer<dyn GrammarChecker>,
    pub sentiment: Analyzer<dyn SentimentModel>,
    pub semantic: Analyzer<dyn Embedder>,
}

impl Analyzers {
    /// Resolve providers from config. Unknown or disabled providers become `Unavailable`.
    pub fn from_config(cfg: &AnalyzersConfig) -> Self {
        let grammar = match cfg.grammar.provider.as_str() {
            "rules" => Analyzer::available(
                "grammar",
                "rules",
                Arc::new(RuleGrammarChecker) as Arc<dyn GrammarChecker>,
            ),
            "languagetool" => Analyzer::available(
                "grammar",
                "languagetool",
                Arc::new(LanguageToolChecker::new(
                    &cfg.grammar.languagetool_url,
                    &cfg.grammar.language,
                    Duration::from_millis(cfg.grammar.timeout_ms),
                )) as Arc<dyn GrammarChecker>,
            ),
            "disabled" => Analyzer::unavailable("grammar", "disabled in config"),
            other => Analyzer::unavailable("grammar", format!("unknown provider `{other}`")),
        };

        let sentiment = match cfg.sentiment.provider.as_str() {
            "lexicon" => Analyzer::available(
                "sentiment",
                "lexicon",
                Arc::new(LexiconSentiment::new()) as Arc<dyn SentimentModel>,
            ),
            "disabled" => Analyzer::unavailable("sentiment", "disabled in config"),
            other => Analyzer::unavailable("sentiment", format!("unknown provider `{other}`")),
        };

        let semantic = match cfg.semantic.provider.as_str() {
            "bag_of_words" => Analyzer::available(
                "semantic",
                "bag_of_words",
                Arc::new(BagOfWordsEmbedder::new(cfg.semantic.dimensions)) as Arc<dyn Embedder>,
            ),
            "disabled" => Analyzer::unavailable("semantic", "disabled in config"),
            other => Analyzer::unavailable("semantic", format!("unknown provider `{other}`")),
        };

        Self {
            grammar,
            sentiment,
            semantic,
        }
    }

    /// Built-in local analyzers (same as the default config).
    pub fn builtin() -> Self {
        Self::from_config(&AnalyzersConfig::default())
    }

    /// Every analyzer unavailable: each criterion uses its default score.
    pub fn disabled() -> Self {
        Self {
            grammar: Analyzer::unavailable("grammar", "disabled"),
            sentiment: Analyzer::unavailable("sentiment", "disabled"),
            semantic: Analyzer::unavailable("semantic", "disabled"),
        }
    }

    pub fn statuses(&self) -> Vec<AnalyzerStatus> {
        vec![
            self.grammar.status(),
            self.sentiment.status(),
            self.semantic.status(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Flaky;

    impl GrammarChecker for Flaky {
        fn check(&self, _text: &str) -> Result<Vec<GrammarIssue>, AnalyzerError> {
            Err(AnalyzerError::invalid_input("boom"))
        }
    }

    #[test]
    fn failure_latches_into_fallback() {
        let a: Analyzer<dyn GrammarChecker> =
            Analyzer::available("grammar", "flaky", Arc::new(Flaky) as Arc<dyn GrammarChecker>);
        assert!(a.is_available());
        assert!(a.run(|g| g.check("hi")).is_none());
        assert!(!a.is_available());

        // Latched: the closure is not invoked again.
        let mut called = false;
        let out = a.run(|_| {
            called = true;
            Ok(1)
        });
        assert!(out.is_none());
        assert!(!called);

        let st = a.status();
        assert!(!st.available);
        assert_eq!(st.provider, "flaky");
        assert!(st.reason.is_some());
    }

    #[test]
    fn unavailable_never_runs() {
        let a: Analyzer<dyn Embedder> = Analyzer::unavailable("semantic", "missing model");
        let out = a.run(|e| e.embed("hello"));
        assert!(out.is_none());
        assert_eq!(a.status().reason.as_deref(), Some("missing model"));
    }

    #[test]
    fn unknown_provider_is_unavailable() {
        let mut cfg = AnalyzersConfig::default();
        cfg.sentiment.provider = "vader-remote".into();
        let an = Analyzers::from_config(&cfg);
        assert!(an.grammar.is_available());
        assert!(!an.sentiment.is_available());
        assert!(an.semantic.is_available());
        let reason = an.sentiment.status().reason.unwrap_or_default();
        assert!(reason.contains("vader-remote"));
    }
}
