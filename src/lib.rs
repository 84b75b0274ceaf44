//! linkscore - Pairwise string similarity for record linkage
//!
//! Scores already-paired record fields from two datasets. Every scorer is a
//! pure function of one pair, so batches are scored independently per pair
//! and in parallel when large.
//!
//! # Features
//! - Iterative longest common substring similarity (both orderings averaged)
//! - Smith-Waterman local alignment with affine gaps
//! - Jaccard similarity over sets and n-grams
//! - Null-aware batch scoring: a missing field yields a missing score
//! - Optional Python bindings (`python` feature)
//!
//! # Example
//!
//! ```rust
//! use linkscore::{lcs_similarity, LcsNormalization};
//!
//! let left = vec![Some("INTERNET"), None];
//! let right = vec![Some("INTERNAL"), Some("INTERNAL")];
//! let scores = lcs_similarity(&left, &right, LcsNormalization::Dice, 2).unwrap();
//! assert_eq!(scores, vec![Some(0.75), None]);
//! ```

pub mod algorithms;
pub mod batch;
pub mod compare;
pub mod error;

// Python extension module (enabled with python feature)
#[cfg(feature = "python")]
pub mod python;

// Re-exports for Rust users (explicit to avoid clashes between the scalar
// and batch entry points)
pub use algorithms::{
    char_ngrams, jaccard_similarity, ngrams, AlignmentNormalization, IterativeLcs,
    JaccardConfig, LcsConfig, LcsNormalization, NgramJaccard, Similarity, SmithWaterman,
    SmithWatermanConfig,
};
pub use batch::{
    lcs_similarity, score_pairs, smith_waterman_similarity, ScoreSequence, StringPair,
    PARALLEL_THRESHOLD,
};
pub use compare::Comparator;
pub use error::{Result, ScoreError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_strings_score_one() {
        let words = ["ab", "maria", "av juarez 45", "ñandú"];
        let left: Vec<Option<&str>> = words.iter().copied().map(Some).collect();

        let lcs = lcs_similarity(&left, &left, LcsNormalization::Dice, 2).unwrap();
        let sw = smith_waterman_similarity(&left, &left, &SmithWatermanConfig::default()).unwrap();
        for i in 0..words.len() {
            assert!((lcs[i].unwrap() - 1.0).abs() < 1e-9, "{}", words[i]);
            assert!((sw[i].unwrap() - 1.0).abs() < 1e-9, "{}", words[i]);
        }
    }

    #[test]
    fn test_empty_string_scores_zero_everywhere() {
        let left = vec![Some("")];
        let right = vec![Some("anything")];

        assert_eq!(
            lcs_similarity(&left, &right, LcsNormalization::Dice, 2).unwrap(),
            vec![Some(0.0)]
        );
        assert_eq!(
            smith_waterman_similarity(&left, &right, &SmithWatermanConfig::default()).unwrap(),
            vec![Some(0.0)]
        );
        assert_eq!(jaccard_similarity("".chars(), "anything".chars()), 0.0);
    }

    #[test]
    fn test_ngrams_reexport() {
        assert_eq!(char_ngrams("ABCDE", 2), vec!["AB", "BC", "CD", "DE"]);
        assert!(ngrams(&['A', 'B'], 5).is_empty());
    }
}
