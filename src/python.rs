//! Python bindings (enabled with the `python` feature)
//!
//! Mirrors the batch API for dataframe-based linkage pipelines: each function
//! takes two equal-length lists of optional strings and returns a list of
//! optional scores. `None` inputs produce `None` scores.
//!
//! # Example
//!
//! ```python
//! import linkscore
//!
//! linkscore.lcs_similarity(["INTERNET", None], ["INTERNAL", "x"])
//! # [0.75, None]
//! ```

use crate::algorithms::jaccard::jaccard_similarity;
use crate::algorithms::ngram;
use crate::algorithms::normalize::{AlignmentNormalization, LcsNormalization};
use crate::algorithms::smith_waterman::SmithWatermanConfig;
use crate::batch;
use crate::error::ScoreError;
use pyo3::create_exception;
use pyo3::prelude::*;

// ============================================================================
// Custom Python Exceptions
// ============================================================================
//
// LinkScoreError (base)
//   ├── LengthMismatchError - Input sequences differ in length
//   └── InvalidConfigurationError - Incoherent scoring parameters

create_exception!(linkscore, LinkScoreError, pyo3::exceptions::PyException);
create_exception!(linkscore, LengthMismatchError, LinkScoreError);
create_exception!(linkscore, InvalidConfigurationError, LinkScoreError);

impl From<ScoreError> for PyErr {
    fn from(err: ScoreError) -> Self {
        match err {
            ScoreError::LengthMismatch { .. } => LengthMismatchError::new_err(err.to_string()),
            ScoreError::InvalidConfiguration(_) => {
                InvalidConfigurationError::new_err(err.to_string())
            }
        }
    }
}

/// A string (compared character by character) or a list of tokens
#[derive(FromPyObject)]
enum Elements {
    Text(String),
    Items(Vec<String>),
}

/// Iterative longest common substring similarity for paired lists.
///
/// # Arguments
/// * `norm` - "overlap", "jaccard" or "dice". Unknown names fall back to "dice".
/// * `min_len` - Shortest common substring that still counts
#[pyfunction]
#[pyo3(signature = (s1, s2, norm="dice", min_len=2))]
fn lcs_similarity(
    py: Python<'_>,
    s1: Vec<Option<String>>,
    s2: Vec<Option<String>>,
    norm: &str,
    min_len: usize,
) -> PyResult<Vec<Option<f64>>> {
    let norm = LcsNormalization::from_name(norm);
    Ok(py.allow_threads(|| batch::lcs_similarity(&s1, &s2, norm, min_len))?)
}

/// Smith-Waterman local alignment similarity for paired lists.
///
/// # Arguments
/// * `match` - Must be non-zero and at least every other score
/// * `norm` - "min", "max" or "mean". Unknown names fall back to "mean".
#[pyfunction]
#[pyo3(signature = (s1, s2, r#match=5.0, mismatch=-5.0, gap_start=-5.0, gap_continue=-1.0, norm="mean"))]
#[allow(clippy::too_many_arguments)]
fn smith_waterman_similarity(
    py: Python<'_>,
    s1: Vec<Option<String>>,
    s2: Vec<Option<String>>,
    r#match: f64,
    mismatch: f64,
    gap_start: f64,
    gap_continue: f64,
    norm: &str,
) -> PyResult<Vec<Option<f64>>> {
    let config = SmithWatermanConfig {
        match_score: r#match,
        mismatch,
        gap_start,
        gap_continue,
        norm: AlignmentNormalization::from_name(norm),
    };
    Ok(py.allow_threads(|| batch::smith_waterman_similarity(&s1, &s2, &config))?)
}

/// Jaccard similarity of two collections treated as sets.
///
/// Strings are compared as sets of characters. Two empty sets score 0.0.
#[pyfunction]
fn jaccard(a: Elements, b: Elements) -> f64 {
    match (a, b) {
        (Elements::Text(a), Elements::Text(b)) => jaccard_similarity(a.chars(), b.chars()),
        (Elements::Items(a), Elements::Items(b)) => jaccard_similarity(a, b),
        (Elements::Text(a), Elements::Items(b)) | (Elements::Items(b), Elements::Text(a)) => {
            jaccard_similarity(a.chars().map(String::from), b)
        }
    }
}

/// Character n-grams of a string.
#[pyfunction]
fn ngrams(seq: &str, n: usize) -> Vec<String> {
    ngram::char_ngrams(seq, n)
}

/// N-grams of a token list.
#[pyfunction]
fn token_ngrams(tokens: Vec<String>, n: usize) -> Vec<Vec<String>> {
    ngram::ngrams(&tokens, n)
        .into_iter()
        .map(<[String]>::to_vec)
        .collect()
}

/// Jaccard similarity of character n-gram sets.
#[pyfunction]
#[pyo3(signature = (a, b, ngram_size=2))]
fn ngram_jaccard(a: &str, b: &str, ngram_size: usize) -> f64 {
    ngram::ngram_jaccard_similarity(a, b, ngram_size)
}

#[pymodule]
fn _core(py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Custom exceptions
    m.add("LinkScoreError", py.get_type::<LinkScoreError>())?;
    m.add("LengthMismatchError", py.get_type::<LengthMismatchError>())?;
    m.add("InvalidConfigurationError", py.get_type::<InvalidConfigurationError>())?;

    // Batch scoring
    m.add_function(wrap_pyfunction!(lcs_similarity, m)?)?;
    m.add_function(wrap_pyfunction!(smith_waterman_similarity, m)?)?;

    // Set similarity
    m.add_function(wrap_pyfunction!(jaccard, m)?)?;
    m.add_function(wrap_pyfunction!(ngram_jaccard, m)?)?;
    m.add_function(wrap_pyfunction!(ngrams, m)?)?;
    m.add_function(wrap_pyfunction!(token_ngrams, m)?)?;

    Ok(())
}
