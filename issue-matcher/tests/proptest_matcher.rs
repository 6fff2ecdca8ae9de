//! Property-based tests for scoring, matching and ranking.

use proptest::prelude::*;

use issue_matcher::{Issue, match_issues, rank_by_severity, score, similarity};

const WORDS: &[&str] = &[
    "sample", "size", "Sample", "methods", "results", "p", "value", "consent", "ethics",
];

fn text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 0..6).prop_map(|w| w.join(" "))
}

fn non_blank_text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 1..6).prop_map(|w| w.join(" "))
}

fn issue() -> impl Strategy<Value = Issue> {
    (
        prop::sample::select(vec!["Methods", "Ethics", "Statistics"]),
        prop::sample::select(vec!["critical", "major", "minor", "unknown"]),
        text(),
        text(),
    )
        .prop_map(|(c, s, d, l)| Issue::new(c, s, d, l, ""))
}

fn issues() -> impl Strategy<Value = Vec<Issue>> {
    prop::collection::vec(issue(), 0..8)
}

/// `true` when `sub` appears in `full` in the same relative order.
fn is_subsequence(sub: &[&Issue], full: &[Issue]) -> bool {
    let mut it = full.iter();
    sub.iter().all(|s| it.any(|f| std::ptr::eq(f, *s)))
}

proptest! {
    #[test]
    fn similarity_is_bounded(a in issue(), b in issue()) {
        let s = similarity(&a, &b);
        prop_assert!((0.0..=1.0).contains(&s));
    }

    #[test]
    fn similarity_is_symmetric(a in issue(), b in issue()) {
        prop_assert_eq!(similarity(&a, &b), similarity(&b, &a));
        prop_assert_eq!(score(&a, &b).is_match(), score(&b, &a).is_match());
    }

    #[test]
    fn self_similarity_is_one(
        c in "[A-Za-z]{1,8}",
        d in non_blank_text(),
        l in non_blank_text(),
    ) {
        let a = Issue::new(c, "major", d, l, "");
        prop_assert_eq!(similarity(&a, &a), 1.0);
    }
}

proptest! {
    #[test]
    fn matching_conserves_issues(a in issues(), b in issues()) {
        let r = match_issues(&a, &b);
        prop_assert_eq!(r.matched.len() + r.unmatched1.len(), a.len());
        prop_assert_eq!(r.matched.len() + r.unmatched2.len(), b.len());
    }

    #[test]
    fn matching_keeps_input_order(a in issues(), b in issues()) {
        let r = match_issues(&a, &b);
        let firsts: Vec<&Issue> = r.matched.iter().map(|p| p.issue1).collect();
        prop_assert!(is_subsequence(&firsts, &a));
        prop_assert!(is_subsequence(&r.unmatched1, &a));
        prop_assert!(is_subsequence(&r.unmatched2, &b));
    }

    #[test]
    fn matched_pairs_clear_the_floor(a in issues(), b in issues()) {
        let r = match_issues(&a, &b);
        for pair in &r.matched {
            prop_assert!(pair.similarity > 0.3);
            prop_assert!(score(pair.issue1, pair.issue2).is_match());
        }
    }

    #[test]
    fn second_side_is_used_at_most_once(a in issues(), b in issues()) {
        let r = match_issues(&a, &b);
        for (i, p) in r.matched.iter().enumerate() {
            for q in &r.matched[i + 1..] {
                prop_assert!(!std::ptr::eq(p.issue2, q.issue2));
            }
            prop_assert!(!r.unmatched2.iter().any(|u| std::ptr::eq(*u, p.issue2)));
        }
    }
}

proptest! {
    #[test]
    fn ranking_is_sorted_and_stable(input in issues()) {
        let tagged: Vec<Issue> = input
            .into_iter()
            .enumerate()
            .map(|(i, mut issue)| {
                issue.suggestion = i.to_string();
                issue
            })
            .collect();
        let ranked = rank_by_severity(&tagged);
        prop_assert_eq!(ranked.len(), tagged.len());

        for w in ranked.windows(2) {
            let (x, y) = (&w[0], &w[1]);
            let px = x.severity.priority();
            let py = y.severity.priority();
            prop_assert!(px >= py);
            if px == py {
                prop_assert!(x.category <= y.category);
                if x.category == y.category {
                    let ix: usize = x.suggestion.parse().unwrap();
                    let iy: usize = y.suggestion.parse().unwrap();
                    prop_assert!(ix < iy);
                }
            }
        }
    }
}
