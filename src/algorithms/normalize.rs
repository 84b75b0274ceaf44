//! Score normalization modes
//!
//! Raw similarity values (an accumulated substring length, a local alignment
//! score) are divided by a length-derived denominator to land in [0, 1].
//! The LCS engine and the Smith-Waterman aligner each have their own
//! vocabulary of divisors.
//!
//! Both enums parse leniently: an unrecognized name falls back to the
//! default mode and logs a warning instead of failing.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Normalization applied to an accumulated LCS length
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LcsNormalization {
    /// `L / min(|a|, |b|)`
    Overlap,
    /// `L / (|a| + |b| - L)`
    Jaccard,
    /// `2L / (|a| + |b|)`
    #[default]
    Dice,
}

impl LcsNormalization {
    /// Parse a normalization name, falling back to `Dice` for unknown names.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "overlap" => Self::Overlap,
            "jaccard" => Self::Jaccard,
            "dice" => Self::Dice,
            other => {
                warn!(
                    norm = other,
                    "unrecognized longest common substring normalization, defaulting to \"dice\""
                );
                Self::Dice
            }
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overlap => "overlap",
            Self::Jaccard => "jaccard",
            Self::Dice => "dice",
        }
    }

    /// Normalize an accumulated length `lcs_len` against the original lengths.
    ///
    /// Returns 0.0 when either original string is empty.
    #[must_use]
    pub fn apply(&self, lcs_len: usize, len_a: usize, len_b: usize) -> f64 {
        if len_a == 0 || len_b == 0 {
            return 0.0;
        }

        let lcs_len = lcs_len as f64;
        let (len_a, len_b) = (len_a as f64, len_b as f64);

        match self {
            Self::Overlap => lcs_len / len_a.min(len_b),
            Self::Jaccard => {
                // Accumulated length never exceeds the shorter string, so the
                // denominator is at least max(|a|, |b|). Guard anyway.
                let denominator = len_a + len_b - lcs_len.abs();
                if denominator <= 0.0 {
                    0.0
                } else {
                    lcs_len / denominator
                }
            }
            Self::Dice => 2.0 * lcs_len / (len_a + len_b),
        }
    }
}

impl From<&str> for LcsNormalization {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl From<String> for LcsNormalization {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<LcsNormalization> for String {
    fn from(norm: LcsNormalization) -> Self {
        norm.as_str().to_string()
    }
}

/// Normalization applied to a Smith-Waterman local alignment score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AlignmentNormalization {
    /// Divide by the shorter length times the match score
    Min,
    /// Divide by the longer length times the match score
    Max,
    /// Divide by the mean length times the match score
    #[default]
    Mean,
}

impl AlignmentNormalization {
    /// Parse a normalization name, falling back to `Mean` for unknown names.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "min" => Self::Min,
            "max" => Self::Max,
            "mean" => Self::Mean,
            other => {
                warn!(
                    norm = other,
                    "unrecognized Smith-Waterman normalization, defaulting to \"mean\""
                );
                Self::Mean
            }
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Min => "min",
            Self::Max => "max",
            Self::Mean => "mean",
        }
    }

    /// Normalize a raw alignment score.
    ///
    /// `match_score` must be positive and both lengths non-zero; callers
    /// short-circuit empty strings before alignment.
    #[must_use]
    pub fn apply(&self, score: f64, len_a: usize, len_b: usize, match_score: f64) -> f64 {
        let (len_a, len_b) = (len_a as f64, len_b as f64);
        match self {
            Self::Min => score / (len_a.min(len_b) * match_score),
            Self::Max => score / (len_a.max(len_b) * match_score),
            Self::Mean => 2.0 * score / ((len_a + len_b) * match_score),
        }
    }
}

impl From<&str> for AlignmentNormalization {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl From<String> for AlignmentNormalization {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<AlignmentNormalization> for String {
    fn from(norm: AlignmentNormalization) -> Self {
        norm.as_str().to_string()
    }
}
