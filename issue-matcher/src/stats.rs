//! Per-severity totals for report headers.

use serde::Serialize;

use crate::issue::{Issue, Severity};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub critical: usize,
    pub major: usize,
    pub minor: usize,
    /// Issues whose severity was not one of the three known levels.
    pub unknown: usize,
}

impl SeverityCounts {
    pub fn from_issues<'a, I>(issues: I) -> Self
    where
        I: IntoIterator<Item = &'a Issue>,
    {
        let mut counts = Self::default();
        for issue in issues {
            match issue.severity {
                Severity::Critical => counts.critical += 1,
                Severity::Major => counts.major += 1,
                Severity::Minor => counts.minor += 1,
                Severity::Unknown(_) => counts.unknown += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.critical + self.major + self.minor + self.unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_each_level() {
        let issues = vec![
            Issue::new("A", "critical", "", "", ""),
            Issue::new("B", "minor", "", "", ""),
            Issue::new("C", "minor", "", "", ""),
            Issue::new("D", "trivial", "", "", ""),
        ];
        let c = SeverityCounts::from_issues(&issues);
        assert_eq!(
            c,
            SeverityCounts {
                critical: 1,
                major: 0,
                minor: 2,
                unknown: 1
            }
        );
        assert_eq!(c.total(), 4);
    }
}
