//! Jaccard similarity over token sets.

use std::collections::HashSet;
use std::hash::Hash;

use crate::tokenize::token_set;

/// `|a ∩ b| / |a ∪ b|`, or `0.0` when either set is empty.
///
/// ```rust
/// use std::collections::HashSet;
/// use docsift_core::similarity::jaccard_similarity;
///
/// let a: HashSet<_> = ["x", "y"].into_iter().collect();
/// let b: HashSet<_> = ["y", "z"].into_iter().collect();
/// assert!((jaccard_similarity(&a, &b) - 1.0 / 3.0).abs() < 1e-12);
/// ```
pub fn jaccard_similarity<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let shared = a.intersection(b).count();
    let union = a.len() + b.len() - shared;
    shared as f64 / union as f64
}

/// Jaccard similarity of the token sets of two texts.
pub fn text_similarity(a: &str, b: &str) -> f64 {
    jaccard_similarity(&token_set(a), &token_set(b))
}
