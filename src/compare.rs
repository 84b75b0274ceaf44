//! Comparator selection
//!
//! A [`Comparator`] names one scoring algorithm together with its parameters.
//! It (de)serializes with an `algorithm` tag so a linkage pipeline can keep
//! its per-field comparison settings in a JSON or TOML file:
//!
//! ```rust
//! use linkscore::compare::Comparator;
//!
//! let comparator: Comparator = serde_json::from_str(
//!     r#"{"algorithm": "smith_waterman", "match": 5, "mismatch": -5, "norm": "min"}"#,
//! ).unwrap();
//! assert_eq!(comparator.name(), "smith_waterman");
//! ```

use crate::algorithms::lcs::{IterativeLcs, LcsConfig};
use crate::algorithms::ngram::{JaccardConfig, NgramJaccard};
use crate::algorithms::smith_waterman::{SmithWaterman, SmithWatermanConfig};
use crate::algorithms::Similarity;
use crate::batch::{score_pairs, ScoreSequence};
use crate::error::{Result, ScoreError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// String comparison algorithm selection
///
/// - **Lcs**: Iterative longest common substring. Tolerates reordered blocks.
/// - **SmithWaterman**: Local alignment. Ignores unrelated flanking text.
/// - **Jaccard**: Character n-gram set overlap. Cheap, order-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum Comparator {
    /// Iterative longest common substring similarity
    ///
    /// **Best for**: Names and street addresses with swapped or repeated parts
    /// **Performance**: O(k*m*n) for k extractions, run in both orderings
    Lcs(LcsConfig),

    /// Smith-Waterman local alignment similarity
    ///
    /// **Best for**: Free-text fields where the match is embedded in noise
    /// **Performance**: O(m*n)
    SmithWaterman(SmithWatermanConfig),

    /// Jaccard similarity over character n-grams
    ///
    /// **Best for**: Short codes, phone numbers, quick pre-filtering
    /// **Performance**: O(m + n)
    Jaccard(JaccardConfig),
}

impl Default for Comparator {
    fn default() -> Self {
        Comparator::Lcs(LcsConfig::default())
    }
}

impl Comparator {
    /// Get the algorithm name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Comparator::Lcs(_) => "lcs",
            Comparator::SmithWaterman(_) => "smith_waterman",
            Comparator::Jaccard(_) => "jaccard",
        }
    }

    /// Build the similarity metric, validating its parameters.
    pub fn metric(&self) -> Result<Box<dyn Similarity>> {
        Ok(match self {
            Comparator::Lcs(config) => Box::new(IterativeLcs::from_config(*config)),
            Comparator::SmithWaterman(config) => Box::new(SmithWaterman::new(*config)?),
            Comparator::Jaccard(config) => Box::new(NgramJaccard::from_config(*config)),
        })
    }

    /// Pair two sequences and score every pair with this comparator.
    pub fn score_pairs<L, R>(&self, left: &[Option<L>], right: &[Option<R>]) -> Result<ScoreSequence>
    where
        L: AsRef<str>,
        R: AsRef<str>,
    {
        let metric = self.metric()?;
        score_pairs(&metric, left, right)
    }
}

impl FromStr for Comparator {
    type Err = ScoreError;

    /// Parse an algorithm name into a comparator with default parameters
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "lcs" | "longest_common_substring" => Ok(Comparator::Lcs(LcsConfig::default())),
            "smith_waterman" | "sw" => Ok(Comparator::SmithWaterman(SmithWatermanConfig::default())),
            "jaccard" => Ok(Comparator::Jaccard(JaccardConfig::default())),
            other => Err(ScoreError::InvalidConfiguration(format!(
                "Unknown algorithm: '{}'. Valid: lcs, smith_waterman, jaccard",
                other
            ))),
        }
    }
}
