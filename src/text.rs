//! Transcript normalization: trimming, lower-casing, `\w+` tokenization,
//! plus the anonymized id used in log lines instead of raw text.

use once_cell::sync::Lazy;
use regex::Regex;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("word regex"));

/// A transcript prepared once and shared by every criterion scorer.
#[derive(Debug, Clone)]
pub struct Transcript {
    /// Trimmed input, original casing (fed to grammar/sentiment/semantic analyzers).
    pub raw: String,
    /// Lower-cased copy used for pattern matching.
    pub normalized: String,
    /// Lower-cased word tokens in order.
    pub tokens: Vec<String>,
}

impl Transcript {
    pub fn new(input: &str) -> Self {
        let raw = input.trim().to_string();
        let normalized = raw.to_lowercase();
        let tokens = tokenize(&normalized);
        Self {
            raw,
            normalized,
            tokens,
        }
    }

    #[inline]
    pub fn word_count(&self) -> usize {
        self.tokens.len()
    }
}

/// Word tokens: maximal runs of alphanumerics and underscore.
pub fn tokenize(input: &str) -> Vec<String> {
    WORD_RE
        .find_iter(input)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Short anonymized id (first 6 bytes of SHA-256, hex) so logs never carry transcript text.
pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

/// Round to one decimal place (display precision of every reported rate/score).
#[inline]
pub(crate) fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
