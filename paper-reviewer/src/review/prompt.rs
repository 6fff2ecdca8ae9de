//! Prompt builders for the review and per-issue suggestion calls.
//!
//! The review prompt is fixed: same dimensions, same JSON schema for every
//! reviewer, so both answers can be compared issue by issue.

use issue_matcher::Issue;

const REVIEW_DIMENSIONS: &[(&str, &str)] = &[
    (
        "Structure",
        "title, abstract, introduction, methods, results, discussion, conclusion and references are complete",
    ),
    (
        "Academic quality",
        "study design, data analysis, logical flow, novelty",
    ),
    (
        "Methodology",
        "methods are sound, sample size is sufficient, statistics are appropriate",
    ),
    (
        "Ethics",
        "ethics approval and informed consent are reported",
    ),
    ("Data integrity", "data sufficiently support the conclusions"),
    (
        "Language",
        "wording is clear, terminology is used correctly",
    ),
    (
        "Citations",
        "reference formatting and coverage are adequate",
    ),
];

const RESPONSE_SCHEMA: &str = r#"{
  "overallScore": 85,
  "summary": "Overall assessment",
  "issues": [
    {
      "category": "Methodology",
      "severity": "major",
      "description": "What is wrong",
      "location": "Methods section",
      "suggestion": "How to fix it"
    }
  ],
  "recommendations": ["Recommendation 1", "Recommendation 2"]
}"#;

/// Reviewer persona, sent as the system instruction of every call.
pub const REVIEWER_PERSONA: &str = "You are an experienced peer reviewer for a medical journal.";

/// Full review prompt for one manuscript (the persona goes separately).
pub fn build_review_prompt(content: &str) -> String {
    let mut s = String::new();
    s.push_str("Review the manuscript below carefully and give detailed feedback.\n");
    s.push_str("\n# Evaluate along these dimensions\n");
    for (i, (name, what)) in REVIEW_DIMENSIONS.iter().enumerate() {
        s.push_str(&format!("{}. **{name}**: {what}\n", i + 1));
    }
    s.push_str("\n# Manuscript\n");
    s.push_str(content.trim());
    s.push_str("\n\n# Output\nReturn the review as JSON in exactly this shape:\n");
    s.push_str(RESPONSE_SCHEMA);
    s.push_str(
        "\n\nSeverity levels: critical (fatal, must be fixed), major (important, strongly \
         recommended), minor (small, optional polish).\n",
    );
    s
}

/// Prompt asking for detailed remediation advice on a single issue.
pub fn build_suggestion_prompt(issue: &Issue, context: &str) -> String {
    let mut s = String::new();
    s.push_str("Give detailed revision advice for the issue below.\n");
    s.push_str(&format!("\nCategory: {}\n", issue.category));
    s.push_str(&format!("Severity: {}\n", issue.severity));
    s.push_str(&format!("Description: {}\n", issue.description));
    s.push_str(&format!("Location: {}\n", issue.location));
    if !context.trim().is_empty() {
        s.push_str("\n# Relevant context\n");
        s.push_str(context.trim());
        s.push('\n');
    }
    s.push_str(
        "\n# Provide\n1. Detailed revision advice\n2. A concrete rewrite example (if applicable)\n\
         3. Relevant reporting guidelines or standards\n",
    );
    s
}
