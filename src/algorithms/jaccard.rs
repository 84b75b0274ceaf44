//! Jaccard set similarity
//!
//! `|A ∩ B| / |A ∪ B|` over any collection of hashable elements. How a
//! string is decomposed into elements (characters, tokens, n-grams) is left
//! to the caller.

use ahash::AHashSet;
use std::hash::Hash;

/// Jaccard similarity of two collections, treated as sets.
///
/// Duplicates are ignored. Two empty sets score 0.0, not 1.0.
#[must_use]
pub fn jaccard_similarity<T, A, B>(a: A, b: B) -> f64
where
    T: Hash + Eq,
    A: IntoIterator<Item = T>,
    B: IntoIterator<Item = T>,
{
    let a: AHashSet<T> = a.into_iter().collect();
    let b: AHashSet<T> = b.into_iter().collect();
    jaccard_sets(&a, &b)
}

/// Jaccard similarity of two prebuilt sets.
#[must_use]
pub fn jaccard_sets<T: Hash + Eq>(a: &AHashSet<T>, b: &AHashSet<T>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }

    // Iterate the smaller set
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let intersection = small.iter().filter(|x| large.contains(*x)).count();
    let union = a.len() + b.len() - intersection;

    intersection as f64 / union as f64
}
