//! Similarity scoring between two issues.
//!
//! score = 0.4 · category + 0.4 · jaccard(description) + 0.2 · jaccard(location)
//!
//! - `category` is 1 on exact (case-sensitive) equality, else 0.
//! - Jaccard runs over lower-cased, whitespace-split token sets; it is 0 when
//!   both sets are empty.
//!
//! Scores are kept as exact fractions ([`SimilarityScore`]) so that ordering and
//! the match threshold are decided without float rounding: `0.4 * 0.75` must
//! compare equal to `0.3`, which `f64` arithmetic gets wrong.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::issue::Issue;

/// Weights expressed in tenths: 0.4 / 0.4 / 0.2.
const CATEGORY_WEIGHT: u128 = 4;
const DESCRIPTION_WEIGHT: u128 = 4;
const LOCATION_WEIGHT: u128 = 2;
const WEIGHT_SCALE: u128 = 10;

/// Pairing floor (exclusive), in tenths.
const THRESHOLD_TENTHS: u128 = 3;

/// A pair must score strictly above this to be matched.
pub const MATCH_THRESHOLD: f64 = 0.3;

/// Token-set overlap of one free-text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlap {
    /// |A ∩ B|
    pub shared: usize,
    /// |A ∪ B|
    pub total: usize,
}

impl Overlap {
    pub fn between(a: &str, b: &str) -> Self {
        let ta = tokens(a);
        let tb = tokens(b);
        Self {
            shared: ta.intersection(&tb).count(),
            total: ta.union(&tb).count(),
        }
    }

    /// Jaccard index; 0 for two empty fields.
    pub fn jaccard(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.shared as f64 / self.total as f64
        }
    }

    fn ratio(&self) -> (u128, u128) {
        if self.total == 0 {
            (0, 1)
        } else {
            (self.shared as u128, self.total as u128)
        }
    }
}

/// Exact similarity of two issues.
///
/// Ordering compares the underlying fractions, so two scores with the same
/// value are `Equal` even if their components differ.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityScore {
    pub same_category: bool,
    pub description: Overlap,
    pub location: Overlap,
}

impl SimilarityScore {
    /// `(numerator, denominator)` of the weighted score.
    fn fraction(&self) -> (u128, u128) {
        let (dn, dd) = self.description.ratio();
        let (ln, ld) = self.location.ratio();
        let c = u128::from(self.same_category);
        let num = CATEGORY_WEIGHT * c * dd * ld + DESCRIPTION_WEIGHT * dn * ld + LOCATION_WEIGHT * ln * dd;
        (num, WEIGHT_SCALE * dd * ld)
    }

    /// Score in `[0, 1]`, correctly rounded from the exact fraction.
    pub fn value(&self) -> f64 {
        let (num, den) = self.fraction();
        num as f64 / den as f64
    }

    /// `true` when the score is strictly greater than [`MATCH_THRESHOLD`].
    pub fn is_match(&self) -> bool {
        let (num, den) = self.fraction();
        num * WEIGHT_SCALE > THRESHOLD_TENTHS * den
    }
}

impl PartialEq for SimilarityScore {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimilarityScore {}

impl PartialOrd for SimilarityScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimilarityScore {
    fn cmp(&self, other: &Self) -> Ordering {
        let (an, ad) = self.fraction();
        let (bn, bd) = other.fraction();
        (an * bd).cmp(&(bn * ad))
    }
}

/// Exact score of `a` against `b`.
pub fn score(a: &Issue, b: &Issue) -> SimilarityScore {
    SimilarityScore {
        same_category: a.category == b.category,
        description: Overlap::between(&a.description, &b.description),
        location: Overlap::between(&a.location, &b.location),
    }
}

/// Similarity of two issues in `[0, 1]`.
pub fn similarity(a: &Issue, b: &Issue) -> f64 {
    score(a, b).value()
}

fn tokens(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
