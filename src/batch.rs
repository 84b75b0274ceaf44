//! Null-aware batch scoring of paired sequences
//!
//! Two equal-length sequences of optional strings are paired index by index
//! and each pair is scored independently. A pair with a missing side scores
//! `None`; the output is always index-aligned with the input.

use crate::algorithms::lcs::IterativeLcs;
use crate::algorithms::normalize::LcsNormalization;
use crate::algorithms::smith_waterman::{SmithWaterman, SmithWatermanConfig};
use crate::algorithms::Similarity;
use crate::error::{Result, ScoreError};
use rayon::prelude::*;
use tracing::debug;

/// Minimum batch size for parallel processing.
///
/// Smaller batches are scored sequentially to avoid thread pool overhead.
pub const PARALLEL_THRESHOLD: usize = 100;

/// Scores aligned with the input pairs; `None` marks a missing input
pub type ScoreSequence = Vec<Option<f64>>;

/// An ordered pair of optional strings to compare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StringPair<'a> {
    a: Option<&'a str>,
    b: Option<&'a str>,
}

impl<'a> StringPair<'a> {
    #[must_use]
    pub fn new(a: Option<&'a str>, b: Option<&'a str>) -> Self {
        Self { a, b }
    }

    #[must_use]
    pub fn a(&self) -> Option<&'a str> {
        self.a
    }

    #[must_use]
    pub fn b(&self) -> Option<&'a str> {
        self.b
    }

    /// Both sides, if neither is missing
    #[must_use]
    pub fn both(&self) -> Option<(&'a str, &'a str)> {
        self.a.zip(self.b)
    }

    /// Score this pair, propagating a missing side as `None`
    pub fn score<M: Similarity + ?Sized>(&self, metric: &M) -> Option<f64> {
        self.both().map(|(a, b)| metric.similarity(a, b))
    }
}

/// Pair two sequences index by index.
///
/// Fails with `LengthMismatch` if the sequences differ in length.
pub fn pair_up<'a, L, R>(
    left: &'a [Option<L>],
    right: &'a [Option<R>],
) -> Result<Vec<StringPair<'a>>>
where
    L: AsRef<str>,
    R: AsRef<str>,
{
    if left.len() != right.len() {
        return Err(ScoreError::LengthMismatch {
            left: left.len(),
            right: right.len(),
        });
    }

    Ok(left
        .iter()
        .zip(right)
        .map(|(a, b)| {
            StringPair::new(
                a.as_ref().map(|s| s.as_ref()),
                b.as_ref().map(|s| s.as_ref()),
            )
        })
        .collect())
}

/// Score already-paired inputs with any similarity metric.
///
/// Uses parallel processing for large inputs (>= 100 pairs) and sequential
/// processing for smaller inputs.
pub fn score_string_pairs<M>(metric: &M, pairs: &[StringPair<'_>]) -> ScoreSequence
where
    M: Similarity + ?Sized,
{
    let parallel = pairs.len() >= PARALLEL_THRESHOLD;
    debug!(
        algorithm = metric.name(),
        pairs = pairs.len(),
        parallel,
        "scoring string pairs"
    );

    if parallel {
        pairs.par_iter().map(|pair| pair.score(metric)).collect()
    } else {
        pairs.iter().map(|pair| pair.score(metric)).collect()
    }
}

/// Pair two sequences and score every pair with `metric`.
pub fn score_pairs<M, L, R>(
    metric: &M,
    left: &[Option<L>],
    right: &[Option<R>],
) -> Result<ScoreSequence>
where
    M: Similarity + ?Sized,
    L: AsRef<str>,
    R: AsRef<str>,
{
    let pairs = pair_up(left, right)?;
    Ok(score_string_pairs(metric, &pairs))
}

/// Iterative LCS similarity for every pair.
pub fn lcs_similarity<L, R>(
    left: &[Option<L>],
    right: &[Option<R>],
    norm: LcsNormalization,
    min_len: usize,
) -> Result<ScoreSequence>
where
    L: AsRef<str>,
    R: AsRef<str>,
{
    let metric = IterativeLcs::new().with_norm(norm).with_min_len(min_len);
    score_pairs(&metric, left, right)
}

/// Smith-Waterman similarity for every pair.
///
/// The scoring scheme is validated before the inputs are paired, so an
/// incoherent scheme fails even when the sequences are empty. Besides
/// `match < max(mismatch, gap_start, gap_continue)`, a zero `match` or a
/// non-finite score is also `InvalidConfiguration`.
pub fn smith_waterman_similarity<L, R>(
    left: &[Option<L>],
    right: &[Option<R>],
    config: &SmithWatermanConfig,
) -> Result<ScoreSequence>
where
    L: AsRef<str>,
    R: AsRef<str>,
{
    let metric = SmithWaterman::new(*config)?;
    score_pairs(&metric, left, right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::ngram::NgramJaccard;
    use crate::algorithms::normalize::AlignmentNormalization;

    fn some(values: &[&str]) -> Vec<Option<String>> {
        values.iter().map(|s| Some(s.to_string())).collect()
    }

    #[test]
    fn test_pair_up() {
        let left = vec![Some("a"), None];
        let right = vec![Some("b"), Some("c")];
        let pairs = pair_up(&left, &right).unwrap();
        assert_eq!(pairs[0].both(), Some(("a", "b")));
        assert_eq!(pairs[1].both(), None);
    }

    #[test]
    fn test_string_pair_accessors() {
        let pair = StringPair::new(Some("MARTHA"), Some("MARHTA"));
        assert_eq!(pair.a(), Some("MARTHA"));
        assert_eq!(pair.b(), Some("MARHTA"));
        assert_eq!(pair.both(), Some(("MARTHA", "MARHTA")));

        let pair = StringPair::new(Some("MARTHA"), None);
        assert_eq!(pair.a(), Some("MARTHA"));
        assert_eq!(pair.b(), None);
        assert_eq!(pair.both(), None);
        assert_eq!(pair.score(&IterativeLcs::new()), None);

        assert_eq!(StringPair::default().both(), None);
    }

    #[test]
    fn test_length_mismatch() {
        let left = some(&["a", "b", "c"]);
        let right = some(&["a", "b", "c", "d"]);

        let err = lcs_similarity(&left, &right, LcsNormalization::Dice, 2).unwrap_err();
        assert_eq!(err, ScoreError::LengthMismatch { left: 3, right: 4 });

        let err = smith_waterman_similarity(&left, &right, &SmithWatermanConfig::default())
            .unwrap_err();
        assert_eq!(err, ScoreError::LengthMismatch { left: 3, right: 4 });
    }

    #[test]
    fn test_empty_input() {
        let empty: Vec<Option<String>> = vec![];
        assert!(lcs_similarity(&empty, &empty, LcsNormalization::Dice, 2)
            .unwrap()
            .is_empty());
        assert!(smith_waterman_similarity(&empty, &empty, &SmithWatermanConfig::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_invalid_configuration_checked_first() {
        let config = SmithWatermanConfig::default().with_scores(1.0, 5.0);
        let left = some(&["a", "b", "c"]);
        let right = some(&["a", "b", "c", "d"]);
        assert!(matches!(
            smith_waterman_similarity(&left, &right, &config),
            Err(ScoreError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_missing_values_propagate() {
        let left = vec![Some("INTERNET"), None, Some("abc"), Some("")];
        let right = vec![Some("INTERNAL"), Some("abc"), None, Some("abc")];

        let scores = lcs_similarity(&left, &right, LcsNormalization::Dice, 2).unwrap();
        assert_eq!(scores.len(), 4);
        assert!((scores[0].unwrap() - 0.75).abs() < 1e-9);
        assert_eq!(scores[1], None);
        assert_eq!(scores[2], None);
        assert_eq!(scores[3], Some(0.0));

        let scores = smith_waterman_similarity(&left, &right, &SmithWatermanConfig::default())
            .unwrap();
        assert!(scores[0].unwrap() > 0.0);
        assert_eq!(scores[1], None);
        assert_eq!(scores[2], None);
        assert_eq!(scores[3], Some(0.0));
    }

    #[test]
    fn test_smith_waterman_batch_norm() {
        let left = some(&["KITTEN"]);
        let right = some(&["SITTING"]);
        let config = SmithWatermanConfig::default().with_norm(AlignmentNormalization::Min);
        let scores = smith_waterman_similarity(&left, &right, &config).unwrap();
        assert!((scores[0].unwrap() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let words = ["JOHNSMITH", "SMITHJOHN", "MARTHA", "MARHTA", "INTERNET", "INTERNAL"];
        let left: Vec<Option<String>> = (0..PARALLEL_THRESHOLD * 3)
            .map(|i| (i % 7 != 0).then(|| words[i % words.len()].to_string()))
            .collect();
        let right: Vec<Option<String>> = (0..PARALLEL_THRESHOLD * 3)
            .map(|i| Some(words[(i + 1) % words.len()].to_string()))
            .collect();

        let metric = IterativeLcs::new();
        let batch = score_pairs(&metric, &left, &right).unwrap();
        assert_eq!(batch.len(), left.len());

        for (i, score) in batch.iter().enumerate() {
            let expected = match (&left[i], &right[i]) {
                (Some(a), Some(b)) => Some(metric.similarity(a, b)),
                _ => None,
            };
            assert_eq!(*score, expected, "index {i}");
        }
    }

    #[test]
    fn test_boxed_metric() {
        let metric: Box<dyn Similarity> = Box::new(NgramJaccard::bigram());
        let left = vec![Some("abc"), Some("night")];
        let right = vec![Some("abc"), None];
        let scores = score_pairs(&metric, &left, &right).unwrap();
        assert_eq!(scores, vec![Some(1.0), None]);
    }
}
