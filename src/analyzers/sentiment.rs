use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

use crate::error::AnalyzerError;
use crate::text::tokenize;

static LEXICON: Lazy<HashMap<String, f64>> = Lazy::new(|| {
    let raw = include_str!("../../sentiment_lexicon.json");
    serde_json::from_str::<HashMap<String, f64>>(raw).expect("valid sentiment lexicon")
});

/// Normalization constant for the compound score (approaches ±1 as |sum| grows).
const COMPOUND_ALPHA: f64 = 15.0;

/// Proportions of positive / negative / neutral intensity plus a compound in [-1, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Polarity {
    pub pos: f64,
    pub neg: f64,
    pub neu: f64,
    pub compound: f64,
}

pub trait SentimentModel: Send + Sync {
    fn polarity(&self, text: &str) -> Result<Polarity, AnalyzerError>;
}

#[derive(Debug, Clone, Default)]
pub struct LexiconSentiment;

impl LexiconSentiment {
    pub fn new() -> Self {
        Self
    }

    /// Lexicon valence for a word (0 if not in the lexicon).
    #[inline]
    fn word_valence(&self, w: &str) -> f64 {
        *LEXICON.get(w).unwrap_or(&0.0)
    }
}

impl SentimentModel for LexiconSentiment {
    /// Negation: if a negator appears within the previous 1..=3 tokens,
    /// the sign of the word's valence is inverted.
    fn polarity(&self, text: &str) -> Result<Polarity, AnalyzerError> {
        let tokens = tokenize(&text.to_lowercase());

        let mut pos_sum = 0.0f64;
        let mut neg_sum = 0.0f64;
        let mut neu_count = 0.0f64;
        let mut raw_sum = 0.0f64;

        for i in 0..tokens.len() {
            let negated = (1..=3).any(|k| i >= k && is_negator(tokens[i - k].as_str()));
            let base = self.word_valence(tokens[i].as_str());
            let v = if negated { -base } else { base };
            raw_sum += v;

            // +1 / -1 keeps a single sentiment word from being drowned by neutral ones.
            if v > 0.0 {
                pos_sum += v + 1.0;
            } else if v < 0.0 {
                neg_sum += v - 1.0;
            } else {
                neu_count += 1.0;
            }
        }

        let total = pos_sum + neg_sum.abs() + neu_count;
        if total == 0.0 {
            return Ok(Polarity::default());
        }

        Ok(Polarity {
            pos: pos_sum / total,
            neg: neg_sum.abs() / total,
            neu: neu_count / total,
            compound: raw_sum / (raw_sum * raw_sum + COMPOUND_ALPHA).sqrt(),
        })
    }
}

/// Single-token negators; contractions arrive split by the tokenizer ("don't" -> "don", "t").
fn is_negator(tok: &str) -> bool {
    matches!(
        tok,
        "not"
            | "no"
            | "never"
            | "cannot"
            | "without"
            | "neither"
            | "nor"
            | "nothing"
            | "nobody"
            | "don"
            | "doesn"
            | "didn"
            | "isn"
            | "wasn"
            | "aren"
            | "weren"
            | "couldn"
            | "wouldn"
            | "shouldn"
    )
}
