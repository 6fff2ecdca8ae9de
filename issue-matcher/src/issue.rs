//! Review issue record and its severity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity label attached to an issue by a reviewer.
///
/// The reviewers are asked for `critical`, `major` or `minor`, but model output
/// is untrusted: any other text is kept verbatim in [`Severity::Unknown`] and
/// ranks below the known levels. A missing or `null` severity becomes an
/// empty [`Severity::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Severity {
    Critical,
    Major,
    Minor,
    Unknown(String),
}

impl Severity {
    /// Ranking weight (higher sorts first).
    pub fn priority(&self) -> u8 {
        match self {
            Severity::Critical => 3,
            Severity::Major => 2,
            Severity::Minor => 1,
            Severity::Unknown(_) => 0,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Severity::Critical => "critical",
            Severity::Major => "major",
            Severity::Minor => "minor",
            Severity::Unknown(raw) => raw,
        }
    }
}

impl From<&str> for Severity {
    fn from(s: &str) -> Self {
        match s {
            "critical" => Severity::Critical,
            "major" => Severity::Major,
            "minor" => Severity::Minor,
            other => Severity::Unknown(other.to_string()),
        }
    }
}

impl From<String> for Severity {
    fn from(s: String) -> Self {
        match s.as_str() {
            "critical" => Severity::Critical,
            "major" => Severity::Major,
            "minor" => Severity::Minor,
            _ => Severity::Unknown(s),
        }
    }
}

impl From<Option<String>> for Severity {
    fn from(s: Option<String>) -> Self {
        s.map(Severity::from).unwrap_or_default()
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Unknown(String::new())
    }
}

impl From<Severity> for String {
    fn from(s: Severity) -> Self {
        match s {
            Severity::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finding reported by a reviewer.
///
/// Treated as an immutable value: ranking and matching hand out references or
/// clones, never modified records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Short label such as "Methodology". Compared case-sensitively.
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub severity: Severity,
    /// Free-text explanation (scored).
    #[serde(default)]
    pub description: String,
    /// Pointer into the manuscript, e.g. a section name (scored).
    #[serde(default)]
    pub location: String,
    /// Remediation advice. Carried through untouched.
    #[serde(default)]
    pub suggestion: String,
}

impl Issue {
    pub fn new(
        category: impl Into<String>,
        severity: impl Into<Severity>,
        description: impl Into<String>,
        location: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            severity: severity.into(),
            description: description.into(),
            location: location.into(),
            suggestion: suggestion.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_levels() {
        assert_eq!(Severity::from("critical"), Severity::Critical);
        assert_eq!(Severity::from("major"), Severity::Major);
        assert_eq!(Severity::from("minor"), Severity::Minor);
    }

    #[test]
    fn keeps_unrecognized_text() {
        let s = Severity::from("Critical");
        assert_eq!(s, Severity::Unknown("Critical".into()));
        assert_eq!(s.priority(), 0);
        assert_eq!(s.to_string(), "Critical");
    }

    #[test]
    fn serde_uses_plain_strings() {
        let json = r#"{"category":"Ethics","severity":"blocker","description":"d","location":"l","suggestion":"s"}"#;
        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.severity, Severity::Unknown("blocker".into()));

        let back = serde_json::to_value(&issue).unwrap();
        assert_eq!(back["severity"], "blocker");

        let major = serde_json::to_value(Severity::Major).unwrap();
        assert_eq!(major, "major");
    }

    #[test]
    fn missing_text_fields_default_to_empty() {
        let issue: Issue = serde_json::from_str(r#"{"severity":"minor"}"#).unwrap();
        assert_eq!(issue.severity, Severity::Minor);
        assert!(issue.category.is_empty());
        assert!(issue.suggestion.is_empty());
    }

    #[test]
    fn absent_or_null_severity_is_unknown() {
        let missing: Issue = serde_json::from_str(r#"{"category":"Ethics"}"#).unwrap();
        let null: Issue = serde_json::from_str(r#"{"category":"Ethics","severity":null}"#).unwrap();
        assert_eq!(missing.severity, Severity::Unknown(String::new()));
        assert_eq!(null.severity, Severity::default());
        assert_eq!(null.severity.priority(), 0);
    }
}
