//! Extraction of the structured review from free-form model output.
//!
//! Models are asked for bare JSON but often wrap it in prose or code fences.
//! The span from the first `{` to the last `}` is taken and deserialized.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::errors::ParseError;
use crate::review::ReviewReport;

lazy_static! {
    static ref JSON_OBJECT: Regex = Regex::new(r"(?s)\{.*\}").expect("static regex");
}

/// Parses a [`ReviewReport`] out of raw model text.
///
/// # Errors
/// - [`ParseError::NoJsonObject`] when the text holds no `{ ... }` span
/// - [`ParseError::Json`] when the span is not a valid review
/// - [`ParseError::ScoreOutOfRange`] when `overallScore` is outside `0..=100`
pub fn parse_review(raw: &str) -> Result<ReviewReport, ParseError> {
    let span = JSON_OBJECT
        .find(raw)
        .ok_or(ParseError::NoJsonObject)?
        .as_str();

    let report: ReviewReport = serde_json::from_str(span)?;
    if !(0.0..=100.0).contains(&report.overall_score) {
        return Err(ParseError::ScoreOutOfRange(report.overall_score));
    }

    debug!(
        issues = report.issues.len(),
        recommendations = report.recommendations.len(),
        score = report.overall_score,
        "review parsed"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use issue_matcher::Severity;

    #[test]
    fn parses_fenced_json_with_prose() {
        let raw = r#"Here is my review:
```json
{
  "overallScore": 72,
  "summary": "Solid but underpowered.",
  "issues": [
    {"category": "Methodology", "severity": "major", "description": "Sample size is small",
     "location": "Methods", "suggestion": "Add a power analysis"}
  ],
  "recommendations": ["Report effect sizes"]
}
```
Let me know if you need more."#;
        let r = parse_review(raw).unwrap();
        assert_eq!(r.overall_score, 72.0);
        assert_eq!(r.issues.len(), 1);
        assert_eq!(r.issues[0].severity, Severity::Major);
        assert_eq!(r.recommendations, vec!["Report effect sizes".to_string()]);
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let r = parse_review(r#"{"overallScore": 90, "summary": "Fine"}"#).unwrap();
        assert!(r.issues.is_empty());
        assert!(r.recommendations.is_empty());
    }

    #[test]
    fn missing_or_null_severity_keeps_the_review() {
        let raw = r#"{
  "overallScore": 64,
  "summary": "Mixed.",
  "issues": [
    {"category": "Ethics", "severity": "critical", "description": "No IRB", "location": "Methods"},
    {"category": "Language", "description": "Typos", "location": "Abstract"},
    {"category": "Citations", "severity": null, "description": "Old refs", "location": "References"}
  ]
}"#;
        let r = parse_review(raw).unwrap();
        assert_eq!(r.issues.len(), 3);
        assert_eq!(r.issues[0].severity, Severity::Critical);
        assert_eq!(r.issues[1].severity, Severity::Unknown(String::new()));
        assert_eq!(r.issues[2].severity, Severity::Unknown(String::new()));
        assert_eq!(r.ranked().issues[0].category, "Ethics");
    }

    #[test]
    fn rejects_text_without_object() {
        assert!(matches!(
            parse_review("I cannot review this document."),
            Err(ParseError::NoJsonObject)
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            parse_review("{ overallScore: 80 }"),
            Err(ParseError::Json(_))
        ));
    }

    #[test]
    fn rejects_out_of_range_score() {
        assert!(matches!(
            parse_review(r#"{"overallScore": 140, "summary": ""}"#),
            Err(ParseError::ScoreOutOfRange(_))
        ));
    }
}
