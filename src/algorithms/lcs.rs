//! Iterative Longest Common Substring (LCS) similarity
//!
//! Repeatedly finds the longest common *contiguous* substring of two strings,
//! removes it from both, and accumulates the removed length until no common
//! substring of at least `min_len` characters remains. The accumulated length
//! is then normalized (see [`LcsNormalization`]).
//!
//! The greedy extraction depends on which string is scanned as rows, so the
//! procedure runs for `(a, b)` and `(b, a)` and the two normalized scores are
//! averaged.
//!
//! # Complexity
//! - Time: O(k*m*n) where k is the number of extractions
//! - Space: O(n) per extraction (two rolling rows)

use super::normalize::LcsNormalization;
use super::Similarity;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Default minimum substring length that still counts as a match
pub const DEFAULT_MIN_LEN: usize = 2;

/// Configuration for iterative LCS similarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LcsConfig {
    /// Shortest common substring that is still extracted
    pub min_len: usize,
    /// Normalization applied to the accumulated length
    pub norm: LcsNormalization,
}

impl Default for LcsConfig {
    fn default() -> Self {
        Self {
            min_len: DEFAULT_MIN_LEN,
            norm: LcsNormalization::Dice,
        }
    }
}

/// Location of a common substring, as exclusive end offsets into both inputs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommonSubstring {
    pub length: usize,
    pub end_a: usize,
    pub end_b: usize,
}

impl CommonSubstring {
    #[must_use]
    pub fn start_a(&self) -> usize {
        self.end_a - self.length
    }

    #[must_use]
    pub fn start_b(&self) -> usize {
        self.end_b - self.length
    }
}

/// Find the longest common substring of `a` and `b`.
///
/// Scans in row-major order (rows over `a`); on ties the first maximal cell
/// wins. Returns a zero-length match when either input is empty or nothing
/// is shared.
#[must_use]
pub fn longest_common_substring_position<T: PartialEq>(a: &[T], b: &[T]) -> CommonSubstring {
    let m = a.len();
    let n = b.len();

    let mut best = CommonSubstring::default();
    if m == 0 || n == 0 {
        return best;
    }

    let mut prev: SmallVec<[usize; 64]> = smallvec::smallvec![0; n + 1];
    let mut curr: SmallVec<[usize; 64]> = smallvec::smallvec![0; n + 1];

    for i in 1..=m {
        curr[0] = 0;
        for j in 1..=n {
            if a[i - 1] == b[j - 1] {
                curr[j] = prev[j - 1] + 1;
                if curr[j] > best.length {
                    best = CommonSubstring {
                        length: curr[j],
                        end_a: i,
                        end_b: j,
                    };
                }
            } else {
                curr[j] = 0;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    best
}

/// Single extraction step.
///
/// Returns the pair with the longest common substring cut out of both sides,
/// and its length. If either input is shorter than `min_len` nothing is
/// searched and the length is 0.
#[must_use]
pub fn lcs_iteration<T: PartialEq + Clone>(
    a: &[T],
    b: &[T],
    min_len: usize,
) -> (Vec<T>, Vec<T>, usize) {
    if a.len().min(b.len()) < min_len {
        return (a.to_vec(), b.to_vec(), 0);
    }

    let found = longest_common_substring_position(a, b);
    let mut reduced_a = a.to_vec();
    let mut reduced_b = b.to_vec();
    reduced_a.drain(found.start_a()..found.end_a);
    reduced_b.drain(found.start_b()..found.end_b);

    (reduced_a, reduced_b, found.length)
}

/// Total length removed by repeated extraction, seeded with `(a, b)`.
///
/// Stops at the first extraction shorter than `min_len`; that extraction is
/// not counted. An empty extraction always stops, so `min_len == 0` behaves
/// like `min_len == 1`.
#[must_use]
pub fn lcs_accumulate<T: PartialEq + Clone>(a: &[T], b: &[T], min_len: usize) -> usize {
    let mut a = a.to_vec();
    let mut b = b.to_vec();
    let mut total = 0;

    loop {
        if a.len().min(b.len()) < min_len {
            break;
        }
        let found = longest_common_substring_position(&a, &b);
        if found.length == 0 || found.length < min_len {
            break;
        }
        total += found.length;
        a.drain(found.start_a()..found.end_a);
        b.drain(found.start_b()..found.end_b);
    }

    total
}

/// Iterative LCS similarity between two strings, averaged over both orderings.
///
/// Operates on Unicode scalar values.
#[must_use]
pub fn lcs_substring_similarity(a: &str, b: &str, min_len: usize, norm: LcsNormalization) -> f64 {
    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();
    lcs_sequence_similarity(&a_chars, &b_chars, min_len, norm)
}

/// Iterative LCS similarity over arbitrary element sequences (chars, tokens).
#[must_use]
pub fn lcs_sequence_similarity<T: PartialEq + Clone>(
    a: &[T],
    b: &[T],
    min_len: usize,
    norm: LcsNormalization,
) -> f64 {
    let (len_a, len_b) = (a.len(), b.len());
    if len_a == 0 || len_b == 0 {
        return 0.0;
    }

    let forward = lcs_accumulate(a, b, min_len);
    let backward = lcs_accumulate(b, a, min_len);

    (norm.apply(forward, len_a, len_b) + norm.apply(backward, len_a, len_b)) / 2.0
}

/// Iterative LCS similarity calculator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IterativeLcs {
    pub min_len: usize,
    pub norm: LcsNormalization,
}

impl IterativeLcs {
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(LcsConfig::default())
    }

    #[must_use]
    pub fn from_config(config: LcsConfig) -> Self {
        Self {
            min_len: config.min_len,
            norm: config.norm,
        }
    }

    #[must_use]
    pub fn config(&self) -> LcsConfig {
        LcsConfig {
            min_len: self.min_len,
            norm: self.norm,
        }
    }

    #[must_use]
    pub fn with_min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }

    #[must_use]
    pub fn with_norm(mut self, norm: LcsNormalization) -> Self {
        self.norm = norm;
        self
    }
}

impl Similarity for IterativeLcs {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        lcs_substring_similarity(a, b, self.min_len, self.norm)
    }

    fn name(&self) -> &'static str {
        "lcs"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn text(v: &[char]) -> String {
        v.iter().collect()
    }

    #[test]
    fn test_position() {
        let found = longest_common_substring_position(&chars("abcdef"), &chars("zbcdf"));
        assert_eq!(found.length, 3); // bcd
        assert_eq!((found.start_a(), found.end_a), (1, 4));
        assert_eq!((found.start_b(), found.end_b), (1, 4));
    }

    #[test]
    fn test_position_first_maximum_wins() {
        // "ABA" and "BAB" both have length 3; "ABA" ends on an earlier row
        let found = longest_common_substring_position(&chars("ABAB"), &chars("BABA"));
        assert_eq!(found.length, 3);
        assert_eq!(found.end_a, 3);
        assert_eq!(found.end_b, 4);
    }

    #[test]
    fn test_iteration_reduces_both_sides() {
        let (a, b, len) = lcs_iteration(&chars("INTERNET"), &chars("INTERNAL"), 2);
        assert_eq!(len, 6);
        assert_eq!(text(&a), "ET");
        assert_eq!(text(&b), "AL");

        let (a, b, len) = lcs_iteration(&chars("ABCXYZAB"), &chars("XYZAB"), 1);
        assert_eq!(len, 5);
        assert_eq!(text(&a), "ABC");
        assert_eq!(text(&b), "");
    }

    #[test]
    fn test_iteration_below_min_len() {
        let (a, b, len) = lcs_iteration(&chars("A"), &chars("ABC"), 2);
        assert_eq!(len, 0);
        assert_eq!(text(&a), "A");
        assert_eq!(text(&b), "ABC");
    }

    #[test]
    fn test_accumulate() {
        assert_eq!(lcs_accumulate(&chars("INTERNET"), &chars("INTERNAL"), 2), 6);
        assert_eq!(lcs_accumulate(&chars("JOHNSMITH"), &chars("SMITHJOHN"), 2), 9);
        assert_eq!(lcs_accumulate(&chars("MARTHA"), &chars("MARHTA"), 2), 3);
        // "DEF" is extracted; the remaining "AB" is below the threshold
        assert_eq!(lcs_accumulate(&chars("ABCDEF"), &chars("ABXDEF"), 3), 3);
    }

    #[test]
    fn test_orderings_differ() {
        // The first extraction depends on which string drives the scan
        assert_eq!(lcs_accumulate(&chars("AAAABC"), &chars("ABCAAB"), 2), 3);
        assert_eq!(lcs_accumulate(&chars("ABCAAB"), &chars("AAAABC"), 2), 5);
        assert_eq!(lcs_accumulate(&chars("AAAACB"), &chars("ABCBAC"), 2), 4);
        assert_eq!(lcs_accumulate(&chars("ABCBAC"), &chars("AAAACB"), 2), 2);

        let dice = LcsNormalization::Dice;
        let sim = lcs_substring_similarity("AAAABC", "ABCAAB", 2, dice);
        assert!((sim - (6.0 / 12.0 + 10.0 / 12.0) / 2.0).abs() < 1e-9);
        assert!((sim - lcs_substring_similarity("ABCAAB", "AAAABC", 2, dice)).abs() < 1e-9);
        assert!((sim - dice.apply(3, 6, 6)).abs() > 0.1);
        assert!((sim - dice.apply(5, 6, 6)).abs() > 0.1);

        let sim = lcs_substring_similarity("AAAACB", "ABCBAC", 2, dice);
        assert!((sim - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_accumulate_zero_min_len_terminates() {
        assert_eq!(lcs_accumulate(&chars("abc"), &chars("xyz"), 0), 0);
        assert_eq!(lcs_accumulate(&chars("abc"), &chars("cab"), 0), 3);
    }

    #[test]
    fn test_identical_strings() {
        for s in ["ab", "hello", "record linkage"] {
            let sim = lcs_substring_similarity(s, s, 2, LcsNormalization::Dice);
            assert!((sim - 1.0).abs() < 1e-9, "{s}");
        }
        assert_eq!(lcs_substring_similarity("", "", 2, LcsNormalization::Dice), 0.0);
    }

    #[test]
    fn test_short_identical_below_min_len() {
        // A single character can never reach min_len = 2
        assert_eq!(lcs_substring_similarity("a", "a", 2, LcsNormalization::Dice), 0.0);
    }

    #[test]
    fn test_disjoint() {
        assert_eq!(lcs_substring_similarity("abcd", "wxyz", 2, LcsNormalization::Dice), 0.0);
        // Shared single characters only
        assert_eq!(lcs_substring_similarity("abab", "bxbx", 2, LcsNormalization::Overlap), 0.0);
    }

    #[test]
    fn test_empty() {
        assert_eq!(lcs_substring_similarity("", "anything", 2, LcsNormalization::Dice), 0.0);
        assert_eq!(lcs_substring_similarity("anything", "", 2, LcsNormalization::Jaccard), 0.0);
    }

    #[test]
    fn test_internet_internal() {
        let dice = lcs_substring_similarity("INTERNET", "INTERNAL", 2, LcsNormalization::Dice);
        assert!((dice - 0.75).abs() < 1e-9);
        let jaccard = lcs_substring_similarity("INTERNET", "INTERNAL", 2, LcsNormalization::Jaccard);
        assert!((jaccard - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_swapped_tokens() {
        let sim = lcs_substring_similarity("JOHNSMITH", "SMITHJOHN", 2, LcsNormalization::Dice);
        assert!((sim - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_overlap_uses_shorter() {
        let sim = lcs_substring_similarity("ABCD", "XABYCD", 2, LcsNormalization::Overlap);
        assert!((sim - 1.0).abs() < 1e-9);
        let sim = lcs_substring_similarity("ABCD", "XABYCD", 2, LcsNormalization::Dice);
        assert!((sim - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_token_sequences() {
        let a = ["calle", "hidalgo", "centro"];
        let b = ["hidalgo", "centro", "norte"];
        // One extraction of length 2 in both orderings: 2*2 / (3+3)
        let sim = lcs_sequence_similarity(&a, &b, 2, LcsNormalization::Dice);
        assert!((sim - 4.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_similarity_trait() {
        let lcs = IterativeLcs::new().with_norm(LcsNormalization::Overlap);
        assert_eq!(lcs.name(), "lcs");
        assert!((lcs.similarity("ABCD", "XABYCD") - 1.0).abs() < 1e-9);
        assert!(lcs.distance("ABCD", "XABYCD").abs() < 1e-9);
        assert_eq!(lcs.config().min_len, DEFAULT_MIN_LEN);
    }
}
