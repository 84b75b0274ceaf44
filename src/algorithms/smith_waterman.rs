//! Smith-Waterman local alignment similarity
//!
//! Scores the best-matching local region of two strings with a
//! match/mismatch scheme and affine gaps: opening a gap costs `gap_start`,
//! extending one that is already open costs `gap_continue`.
//!
//! Gap extension is tracked through per-cell origin tags rather than
//! separate gap matrices. A cell remembers every move (diagonal, horizontal
//! gap, vertical gap) that produced its score; the neighbouring cell uses
//! those tags to decide between the start and continue penalty. Only the
//! highest cell value is needed, so no traceback path is built.
//!
//! # Complexity
//! - Time: O(m*n)
//! - Space: O(n) for scoring, O(m*n) when the full [`AlignmentMatrix`] is kept

use super::normalize::AlignmentNormalization;
use super::Similarity;
use crate::error::{Result, ScoreError};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Moves that achieved a cell's score, as a 3-bit set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct OriginTags(u8);

impl OriginTags {
    pub const NONE: Self = Self(0);
    pub const DIAGONAL: Self = Self(0b001);
    /// Gap consuming a character of the first string only
    pub const HORIZONTAL: Self = Self(0b010);
    /// Gap consuming a character of the second string only
    pub const VERTICAL: Self = Self(0b100);

    #[inline]
    #[must_use]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    #[inline]
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    #[inline]
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    #[must_use]
    pub fn bits(self) -> u8 {
        self.0
    }
}

impl std::ops::BitOr for OriginTags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Scoring scheme and normalization for Smith-Waterman similarity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmithWatermanConfig {
    /// Added when two characters match
    #[serde(rename = "match")]
    pub match_score: f64,
    /// Added when two characters differ
    pub mismatch: f64,
    /// Added when a gap is opened
    pub gap_start: f64,
    /// Added for each position of a gap that is already open
    pub gap_continue: f64,
    pub norm: AlignmentNormalization,
}

impl Default for SmithWatermanConfig {
    fn default() -> Self {
        Self {
            match_score: 5.0,
            mismatch: -5.0,
            gap_start: -5.0,
            gap_continue: -1.0,
            norm: AlignmentNormalization::Mean,
        }
    }
}

impl SmithWatermanConfig {
    /// Check that the scheme is coherent.
    ///
    /// Every score must be finite. `match` must be non-zero (normalization
    /// divides by it) and at least as large as every other score.
    pub fn validate(&self) -> Result<()> {
        let scores = [
            ("match", self.match_score),
            ("mismatch", self.mismatch),
            ("gap_start", self.gap_start),
            ("gap_continue", self.gap_continue),
        ];
        if let Some((name, value)) = scores.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ScoreError::InvalidConfiguration(format!(
                "{} must be a finite number, got {}",
                name, value
            )));
        }

        let others = self.mismatch.max(self.gap_start).max(self.gap_continue);
        if self.match_score < others {
            return Err(ScoreError::InvalidConfiguration(format!(
                "match must be greater than or equal to mismatch, gap_start, and gap_continue \
                 (match={}, mismatch={}, gap_start={}, gap_continue={})",
                self.match_score, self.mismatch, self.gap_start, self.gap_continue
            )));
        }

        if self.match_score == 0.0 {
            return Err(ScoreError::InvalidConfiguration(format!(
                "match must be non-zero to normalize alignment scores, got {}",
                self.match_score
            )));
        }

        Ok(())
    }

    #[must_use]
    pub fn with_scores(mut self, match_score: f64, mismatch: f64) -> Self {
        self.match_score = match_score;
        self.mismatch = mismatch;
        self
    }

    #[must_use]
    pub fn with_gaps(mut self, gap_start: f64, gap_continue: f64) -> Self {
        self.gap_start = gap_start;
        self.gap_continue = gap_continue;
        self
    }

    #[must_use]
    pub fn with_norm(mut self, norm: AlignmentNormalization) -> Self {
        self.norm = norm;
        self
    }
}

/// Neighbourhood of a cell being filled
struct Neighbors {
    diagonal: f64,
    above: f64,
    above_tags: OriginTags,
    left: f64,
    left_tags: OriginTags,
}

/// Local alignment recurrence for one cell.
///
/// Non-positive results are clamped to 0 with no tags; otherwise every move
/// whose candidate equals the chosen score is tagged.
#[inline]
fn score_cell(n: &Neighbors, same: bool, config: &SmithWatermanConfig) -> (f64, OriginTags) {
    let diagonal = n.diagonal + if same { config.match_score } else { config.mismatch };

    let gap_horizontal = n.above
        + if n.above_tags.contains(OriginTags::HORIZONTAL) {
            config.gap_continue
        } else {
            config.gap_start
        };

    let gap_vertical = n.left
        + if n.left_tags.contains(OriginTags::VERTICAL) {
            config.gap_continue
        } else {
            config.gap_start
        };

    let score = diagonal.max(gap_horizontal).max(gap_vertical);
    if score <= 0.0 {
        return (0.0, OriginTags::NONE);
    }

    let mut tags = OriginTags::NONE;
    if score == diagonal {
        tags.insert(OriginTags::DIAGONAL);
    }
    if score == gap_horizontal {
        tags.insert(OriginTags::HORIZONTAL);
    }
    if score == gap_vertical {
        tags.insert(OriginTags::VERTICAL);
    }
    (score, tags)
}

/// Full scoring grid of shape `(len(a) + 1) x (len(b) + 1)`.
///
/// Row 0 and column 0 stay at zero. Stored row-major in flat vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentMatrix {
    rows: usize,
    cols: usize,
    scores: Vec<f64>,
    tags: Vec<OriginTags>,
    highest: f64,
}

impl AlignmentMatrix {
    /// Fill the matrix for `a` (rows) against `b` (columns).
    ///
    /// The scheme is not validated here; see [`SmithWatermanConfig::validate`].
    #[must_use]
    pub fn compute<T: PartialEq>(a: &[T], b: &[T], config: &SmithWatermanConfig) -> Self {
        let rows = a.len() + 1;
        let cols = b.len() + 1;
        let mut scores = vec![0.0; rows * cols];
        let mut tags = vec![OriginTags::NONE; rows * cols];
        let mut highest = 0.0_f64;

        for i in 1..rows {
            for j in 1..cols {
                let neighbors = Neighbors {
                    diagonal: scores[(i - 1) * cols + j - 1],
                    above: scores[(i - 1) * cols + j],
                    above_tags: tags[(i - 1) * cols + j],
                    left: scores[i * cols + j - 1],
                    left_tags: tags[i * cols + j - 1],
                };
                let (score, origin) = score_cell(&neighbors, a[i - 1] == b[j - 1], config);
                scores[i * cols + j] = score;
                tags[i * cols + j] = origin;
                if score > highest {
                    highest = score;
                }
            }
        }

        Self {
            rows,
            cols,
            scores,
            tags,
            highest,
        }
    }

    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Score at `(i, j)`, or `None` outside the grid
    #[must_use]
    pub fn score(&self, i: usize, j: usize) -> Option<f64> {
        (i < self.rows && j < self.cols).then(|| self.scores[i * self.cols + j])
    }

    /// Origin tags at `(i, j)`, or `None` outside the grid
    #[must_use]
    pub fn tags(&self, i: usize, j: usize) -> Option<OriginTags> {
        (i < self.rows && j < self.cols).then(|| self.tags[i * self.cols + j])
    }

    /// Maximum cell value anywhere in the grid
    #[must_use]
    pub fn highest(&self) -> f64 {
        self.highest
    }
}

/// Raw local alignment score (the highest cell value), using two rolling rows.
///
/// Produces the same value as [`AlignmentMatrix::compute`] without keeping
/// the whole grid.
#[must_use]
pub fn smith_waterman_score<T: PartialEq>(a: &[T], b: &[T], config: &SmithWatermanConfig) -> f64 {
    let n = b.len();
    if a.is_empty() || n == 0 {
        return 0.0;
    }

    let mut prev: SmallVec<[(f64, OriginTags); 64]> =
        smallvec::smallvec![(0.0, OriginTags::NONE); n + 1];
    let mut curr: SmallVec<[(f64, OriginTags); 64]> =
        smallvec::smallvec![(0.0, OriginTags::NONE); n + 1];
    let mut highest = 0.0_f64;

    for a_item in a {
        curr[0] = (0.0, OriginTags::NONE);
        for j in 1..=n {
            let neighbors = Neighbors {
                diagonal: prev[j - 1].0,
                above: prev[j].0,
                above_tags: prev[j].1,
                left: curr[j - 1].0,
                left_tags: curr[j - 1].1,
            };
            let cell = score_cell(&neighbors, *a_item == b[j - 1], config);
            if cell.0 > highest {
                highest = cell.0;
            }
            curr[j] = cell;
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    highest
}

/// Normalized Smith-Waterman similarity between two strings.
///
/// Returns exactly 0.0 when either string is empty. Fails with
/// `InvalidConfiguration` before any alignment if the scheme is incoherent.
pub fn smith_waterman_similarity(a: &str, b: &str, config: &SmithWatermanConfig) -> Result<f64> {
    config.validate()?;
    Ok(normalized_score(a, b, config))
}

fn normalized_score(a: &str, b: &str, config: &SmithWatermanConfig) -> f64 {
    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();
    if a_chars.is_empty() || b_chars.is_empty() {
        return 0.0;
    }

    let highest = smith_waterman_score(&a_chars, &b_chars, config);
    if highest == 0.0 {
        return 0.0;
    }
    config
        .norm
        .apply(highest, a_chars.len(), b_chars.len(), config.match_score)
}

/// Smith-Waterman similarity calculator with a validated scoring scheme
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmithWaterman {
    config: SmithWatermanConfig,
}

impl SmithWaterman {
    /// Create a calculator, rejecting incoherent scoring schemes.
    pub fn new(config: SmithWatermanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &SmithWatermanConfig {
        &self.config
    }

    /// Raw (unnormalized) local alignment score
    #[must_use]
    pub fn raw_score(&self, a: &str, b: &str) -> f64 {
        let a_chars: SmallVec<[char; 64]> = a.chars().collect();
        let b_chars: SmallVec<[char; 64]> = b.chars().collect();
        smith_waterman_score(&a_chars, &b_chars, &self.config)
    }
}

impl Default for SmithWaterman {
    fn default() -> Self {
        Self {
            config: SmithWatermanConfig::default(),
        }
    }
}

impl Similarity for SmithWaterman {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        normalized_score(a, b, &self.config)
    }

    fn name(&self) -> &'static str {
        "smith_waterman"
    }
}
