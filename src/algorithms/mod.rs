//! Core string similarity algorithms
//!
//! Each algorithm is implemented as a standalone function for composability,
//! plus a trait-based interface so batch scoring can take any of them.

pub mod jaccard;
pub mod lcs;
pub mod ngram;
pub mod normalize;
pub mod smith_waterman;

pub use jaccard::*;
pub use lcs::*;
pub use ngram::*;
pub use normalize::{AlignmentNormalization, LcsNormalization};
pub use smith_waterman::*;

/// Trait for all similarity metrics.
/// Returns a value between 0.0 (completely different) and 1.0 (identical).
pub trait Similarity: Send + Sync {
    fn similarity(&self, a: &str, b: &str) -> f64;

    /// Convenience method for distance (1.0 - similarity)
    fn distance(&self, a: &str, b: &str) -> f64 {
        1.0 - self.similarity(a, b)
    }

    /// Name of the algorithm for debugging/logging
    fn name(&self) -> &'static str;
}

impl<S: Similarity + ?Sized> Similarity for &S {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        (**self).similarity(a, b)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<S: Similarity + ?Sized> Similarity for Box<S> {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        (**self).similarity(a, b)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
