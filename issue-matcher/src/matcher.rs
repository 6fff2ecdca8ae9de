//! Greedy pairing of two reviewers' issue lists.
//!
//! For each issue of the first list (in order) the best still-unused issue of
//! the second list is picked; ties go to the lowest index. The pair is kept only
//! when its score is strictly above [`MATCH_THRESHOLD`](crate::MATCH_THRESHOLD).
//!
//! First-come, first-served, not a globally optimal assignment: an early issue
//! may take a partner that a later issue would have matched better.

use serde::Serialize;
use tracing::debug;

use crate::issue::Issue;
use crate::similarity::{SimilarityScore, score};

/// One issue from each side and the score that justified pairing them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedPair<'a> {
    pub issue1: &'a Issue,
    pub issue2: &'a Issue,
    /// Similarity in `(0.3, 1.0]`.
    pub similarity: f64,
}

/// Outcome of [`match_issues`].
///
/// `matched` follows the order of the first list; both unmatched lists keep
/// their input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchResult<'a> {
    pub matched: Vec<MatchedPair<'a>>,
    pub unmatched1: Vec<&'a Issue>,
    pub unmatched2: Vec<&'a Issue>,
}

/// Pairs issues of `first` with issues of `second`.
///
/// Total over any inputs; empty lists simply yield no pairs.
pub fn match_issues<'a, A, B>(first: A, second: B) -> MatchResult<'a>
where
    A: IntoIterator<Item = &'a Issue>,
    B: IntoIterator<Item = &'a Issue>,
{
    let second: Vec<&'a Issue> = second.into_iter().collect();
    let mut used = vec![false; second.len()];
    let mut out = MatchResult::default();

    for a in first {
        let mut best: Option<(usize, SimilarityScore)> = None;
        for (idx, b) in second.iter().enumerate() {
            if used[idx] {
                continue;
            }
            let s = score(a, b);
            // strict `>` keeps the first maximum
            if best.as_ref().is_none_or(|(_, top)| s > *top) {
                best = Some((idx, s));
            }
        }

        match best {
            Some((idx, s)) if s.is_match() => {
                used[idx] = true;
                out.matched.push(MatchedPair {
                    issue1: a,
                    issue2: second[idx],
                    similarity: s.value(),
                });
            }
            _ => out.unmatched1.push(a),
        }
    }

    out.unmatched2 = second
        .iter()
        .zip(&used)
        .filter(|(_, used)| !**used)
        .map(|(b, _)| *b)
        .collect();

    debug!(
        matched = out.matched.len(),
        unmatched1 = out.unmatched1.len(),
        unmatched2 = out.unmatched2.len(),
        "issue matching done"
    );

    out
}
