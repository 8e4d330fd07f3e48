//! Text embeddings for semantic alignment.
//!
//! The built-in embedder is a hashed bag of words: content words are hashed (FNV-1a) into a
//! fixed number of buckets, weighted by sublinear term frequency and L2-normalized.

use std::collections::HashMap;

use crate::error::AnalyzerError;
use crate::text::tokenize;

pub const DEFAULT_DIMENSIONS: usize = 512;

pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>, AnalyzerError>;
}

#[derive(Debug, Clone)]
pub struct BagOfWordsEmbedder {
    dimensions: usize,
}

impl BagOfWordsEmbedder {
    /// `dimensions == 0` falls back to [`DEFAULT_DIMENSIONS`].
    pub fn new(dimensions: usize) -> Self {
        let dimensions = if dimensions == 0 {
            DEFAULT_DIMENSIONS
        } else {
            dimensions
        };
        Self { dimensions }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}

impl Default for BagOfWordsEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSIONS)
    }
}

impl Embedder for BagOfWordsEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, AnalyzerError> {
        let mut tf: HashMap<String, u32> = HashMap::new();
        for tok in tokenize(&text.to_lowercase()) {
            if is_stop_word(&tok) {
                continue;
            }
            *tf.entry(tok).or_insert(0) += 1;
        }

        let mut v = vec![0.0f32; self.dimensions];
        for (tok, n) in tf {
            let bucket = (fnv1a(tok.as_bytes()) % self.dimensions as u64) as usize;
            v[bucket] += 1.0 + (n as f32).ln();
        }

        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            v.iter_mut().for_each(|x| *x /= norm);
        }
        Ok(v)
    }
}

/// Cosine similarity in [-1, 1]; 0.0 when either vector is all zeros.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, AnalyzerError> {
    if a.len() != b.len() {
        return Err(AnalyzerError::invalid_input(format!(
            "embedding dimension mismatch: {} vs {}",
            a.len(),
            b.len()
        )));
    }
    if a.is_empty() {
        return Err(AnalyzerError::invalid_input("empty embedding"));
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let na = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let nb = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if na == 0.0 || nb == 0.0 {
        return Ok(0.0);
    }
    Ok((dot / (na * nb)).clamp(-1.0, 1.0))
}

fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    bytes
        .iter()
        .fold(OFFSET, |h, b| (h ^ u64::from(*b)).wrapping_mul(PRIME))
}

fn is_stop_word(tok: &str) -> bool {
    matches!(
        tok,
        "a" | "an"
            | "and"
            | "are"
            | "as"
            | "at"
            | "be"
            | "but"
            | "by"
            | "for"
            | "from"
            | "has"
            | "have"
            | "he"
            | "her"
            | "his"
            | "i"
            | "in"
            | "is"
            | "it"
            | "its"
            | "me"
            | "my"
            | "of"
            | "on"
            | "or"
            | "our"
            | "she"
            | "so"
            | "that"
            | "the"
            | "their"
            | "them"
            | "they"
            | "this"
            | "to"
            | "very"
            | "was"
            | "we"
            | "with"
            | "am"
    )
}
