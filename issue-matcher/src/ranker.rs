//! Severity ranking.

use std::cmp::Ordering;

use crate::issue::Issue;

fn by_severity_then_category(a: &Issue, b: &Issue) -> Ordering {
    b.severity
        .priority()
        .cmp(&a.severity.priority())
        .then_with(|| a.category.cmp(&b.category))
}

/// Returns a new list ordered critical → major → minor → unrecognized, then by
/// category ascending. Equal keys keep their input order.
pub fn rank_by_severity(issues: &[Issue]) -> Vec<Issue> {
    let mut out = issues.to_vec();
    out.sort_by(by_severity_then_category);
    out
}

/// Same ordering as [`rank_by_severity`], without cloning the records.
pub fn rank_refs(issues: &[Issue]) -> Vec<&Issue> {
    let mut out: Vec<&Issue> = issues.iter().collect();
    out.sort_by(|a, b| by_severity_then_category(a, b));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(severity: &str, category: &str) -> Issue {
        Issue::new(category, severity, "", "", "")
    }

    fn keys(issues: &[Issue]) -> Vec<(String, String)> {
        issues
            .iter()
            .map(|i| (i.severity.to_string(), i.category.clone()))
            .collect()
    }

    #[test]
    fn orders_by_severity_then_category() {
        let input = vec![
            issue("minor", "B"),
            issue("critical", "A"),
            issue("major", "A"),
            issue("critical", "Z"),
        ];
        let ranked = rank_by_severity(&input);
        assert_eq!(
            keys(&ranked),
            vec![
                ("critical".into(), "A".into()),
                ("critical".into(), "Z".into()),
                ("major".into(), "A".into()),
                ("minor".into(), "B".into()),
            ]
        );
        // input untouched
        assert_eq!(input[0], issue("minor", "B"));
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let mut first = issue("major", "Stats");
        first.description = "first".into();
        let mut second = issue("major", "Stats");
        second.description = "second".into();

        let ranked = rank_by_severity(&[issue("minor", "A"), first, second]);
        assert_eq!(ranked[0].description, "first");
        assert_eq!(ranked[1].description, "second");
    }

    #[test]
    fn unknown_severity_sorts_last() {
        let ranked = rank_by_severity(&[
            issue("unknown", "A"),
            issue("minor", "Z"),
            issue("critical", "M"),
            issue("major", "B"),
        ]);
        assert_eq!(ranked.last().unwrap().severity.as_str(), "unknown");
        assert_eq!(ranked[0].severity.as_str(), "critical");
    }

    #[test]
    fn empty_list() {
        assert!(rank_by_severity(&[]).is_empty());
        assert!(rank_refs(&[]).is_empty());
    }

    #[test]
    fn refs_match_owned_ranking() {
        let input = vec![issue("minor", "C"), issue("major", "B"), issue("major", "A")];
        let owned = rank_by_severity(&input);
        let refs: Vec<Issue> = rank_refs(&input).into_iter().cloned().collect();
        assert_eq!(owned, refs);
    }
}
