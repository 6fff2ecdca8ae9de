//! Issue pairing and ranking for dual-model manuscript reviews.
//!
//! Two reviewers (LLMs) return flat lists of [`Issue`] records for the same
//! manuscript. This crate turns them into something a client can render side
//! by side:
//!
//! 1) **Rank**: [`rank_by_severity`] stably orders each list by severity
//!    (critical → major → minor → anything else), then by category.
//! 2) **Score**: [`similarity`] compares two issues by category equality and
//!    token-set overlap of `description` / `location`.
//! 3) **Match**: [`match_issues`] greedily pairs every issue of the first list
//!    with its best unused counterpart of the second list, above a fixed floor.
//!
//! Everything here is synchronous, allocation-light and free of I/O. Inputs are
//! never mutated; results borrow the caller's records.

pub mod issue;
pub mod matcher;
pub mod ranker;
pub mod similarity;
pub mod stats;

pub use issue::{Issue, Severity};
pub use matcher::{MatchResult, MatchedPair, match_issues};
pub use ranker::{rank_by_severity, rank_refs};
pub use similarity::{MATCH_THRESHOLD, SimilarityScore, score, similarity};
pub use stats::SeverityCounts;
