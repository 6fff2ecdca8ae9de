//! Side-by-side comparison of two reviewers' issue lists.
//!
//! Rank each side by severity, then greedily pair them (see `issue-matcher`).
//! Ranking happens once: [`compare_issues`] ranks raw lists, while
//! [`compare_ranked`] trusts lists that come out of a ranked review.
//! The borrowed match result is turned into owned, serializable groups here,
//! at the edge of the pure core.

use issue_matcher::{Issue, SeverityCounts, match_issues, rank_refs};
use serde::Serialize;
use tracing::debug;

/// Two issues judged to describe the same problem.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedIssues {
    pub first: Issue,
    pub second: Issue,
    pub similarity: f64,
}

/// Owned comparison ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueComparison {
    /// Pairs, in ranked order of the first list.
    pub matched: Vec<MatchedIssues>,
    /// Issues only the first reviewer raised (ranked).
    pub only_first: Vec<Issue>,
    /// Issues only the second reviewer raised (ranked).
    pub only_second: Vec<Issue>,
    pub first_counts: SeverityCounts,
    pub second_counts: SeverityCounts,
}

/// Ranks both lists and pairs them.
pub fn compare_issues(first: &[Issue], second: &[Issue]) -> IssueComparison {
    build(first, second, rank_refs(first), rank_refs(second))
}

/// Pairs two lists that are already in severity order (e.g. from
/// [`ReviewReport::ranked`](crate::review::ReviewReport::ranked)).
pub fn compare_ranked(first: &[Issue], second: &[Issue]) -> IssueComparison {
    build(first, second, first.iter().collect(), second.iter().collect())
}

fn build<'a>(
    first: &'a [Issue],
    second: &'a [Issue],
    ranked_first: Vec<&'a Issue>,
    ranked_second: Vec<&'a Issue>,
) -> IssueComparison {
    let result = match_issues(ranked_first, ranked_second);

    let comparison = IssueComparison {
        matched: result
            .matched
            .into_iter()
            .map(|p| MatchedIssues {
                first: p.issue1.clone(),
                second: p.issue2.clone(),
                similarity: p.similarity,
            })
            .collect(),
        only_first: result.unmatched1.into_iter().cloned().collect(),
        only_second: result.unmatched2.into_iter().cloned().collect(),
        first_counts: SeverityCounts::from_issues(first),
        second_counts: SeverityCounts::from_issues(second),
    };

    debug!(
        matched = comparison.matched.len(),
        only_first = comparison.only_first.len(),
        only_second = comparison.only_second.len(),
        "issue comparison built"
    );
    comparison
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_lists_compare_to_empty_groups() {
        let c = compare_issues(&[], &[]);
        assert!(c.matched.is_empty());
        assert!(c.only_first.is_empty());
        assert!(c.only_second.is_empty());
        assert_eq!(c.first_counts.total(), 0);
    }

    #[test]
    fn groups_are_ranked_and_paired() {
        let first = vec![
            Issue::new("Language", "minor", "typos in abstract", "Abstract", ""),
            Issue::new("Ethics", "critical", "no ethics approval stated", "Methods", ""),
        ];
        let second = vec![
            Issue::new("Citations", "major", "outdated references", "References", ""),
            Issue::new("Ethics", "critical", "ethics approval missing", "Methods", "cite IRB"),
        ];

        let c = compare_issues(&first, &second);

        assert_eq!(c.matched.len(), 1);
        assert_eq!(c.matched[0].first.category, "Ethics");
        assert_eq!(c.matched[0].second.suggestion, "cite IRB");
        assert!(c.matched[0].similarity > 0.3);

        assert_eq!(c.only_first.len(), 1);
        assert_eq!(c.only_first[0].category, "Language");
        assert_eq!(c.only_second.len(), 1);
        assert_eq!(c.only_second[0].category, "Citations");

        assert_eq!(c.first_counts.critical, 1);
        assert_eq!(c.second_counts.major, 1);
    }

    #[test]
    fn ranked_input_compares_like_raw_input() {
        let first = vec![
            Issue::new("Language", "minor", "typos in abstract", "Abstract", ""),
            Issue::new("Ethics", "critical", "no ethics approval stated", "Methods", ""),
        ];
        let second = vec![Issue::new("Ethics", "major", "ethics approval missing", "Methods", "")];

        let raw = compare_issues(&first, &second);
        let ranked = compare_ranked(
            &issue_matcher::rank_by_severity(&first),
            &issue_matcher::rank_by_severity(&second),
        );
        assert_eq!(raw, ranked);
    }

    #[test]
    fn ranking_decides_who_gets_a_shared_partner() {
        // both first-side issues would pair with the single second-side issue;
        // the critical one is ranked first and wins it.
        let first = vec![
            Issue::new("Statistics", "minor", "p values", "Results", ""),
            Issue::new("Statistics", "critical", "p values", "Results", ""),
        ];
        let second = vec![Issue::new("Statistics", "major", "p values", "Results", "")];

        let c = compare_issues(&first, &second);
        assert_eq!(c.matched.len(), 1);
        assert_eq!(c.matched[0].first.severity.as_str(), "critical");
        assert_eq!(c.only_first[0].severity.as_str(), "minor");
    }
}
