//! N-gram decomposition and n-gram Jaccard similarity
//!
//! An n-gram is a contiguous window of length `n`. A sequence of length `len`
//! yields `max(0, len - n + 1)` windows, so `n > len` gives none.

use super::jaccard::jaccard_similarity;
use super::Similarity;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Configuration for n-gram Jaccard similarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JaccardConfig {
    /// Size of each n-gram (typically 2-3)
    pub ngram_size: usize,
}

impl Default for JaccardConfig {
    fn default() -> Self {
        Self { ngram_size: 2 }
    }
}

/// All contiguous length-`n` windows of `seq`, in order.
#[must_use]
pub fn ngrams<T>(seq: &[T], n: usize) -> Vec<&[T]> {
    if n > seq.len() {
        return vec![];
    }
    (0..=seq.len() - n).map(|i| &seq[i..i + n]).collect()
}

/// Character n-grams of a string.
#[must_use]
pub fn char_ngrams(s: &str, n: usize) -> Vec<String> {
    let chars: SmallVec<[char; 64]> = s.chars().collect();
    ngrams(&chars, n)
        .into_iter()
        .map(|w| w.iter().collect())
        .collect()
}

/// Jaccard similarity of the character n-gram sets of two strings.
#[must_use]
pub fn ngram_jaccard_similarity(a: &str, b: &str, n: usize) -> f64 {
    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();
    jaccard_similarity(ngrams(&a_chars, n), ngrams(&b_chars, n))
}

/// N-gram Jaccard similarity calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NgramJaccard {
    pub n: usize,
}

impl Default for NgramJaccard {
    fn default() -> Self {
        Self::from_config(JaccardConfig::default())
    }
}

impl NgramJaccard {
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self { n }
    }

    #[must_use]
    pub fn from_config(config: JaccardConfig) -> Self {
        Self {
            n: config.ngram_size,
        }
    }

    #[must_use]
    pub fn bigram() -> Self {
        Self::new(2)
    }

    #[must_use]
    pub fn trigram() -> Self {
        Self::new(3)
    }
}

impl Similarity for NgramJaccard {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        ngram_jaccard_similarity(a, b, self.n)
    }

    fn name(&self) -> &'static str {
        "jaccard"
    }
}
