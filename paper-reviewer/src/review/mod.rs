//! Review data model and single-reviewer calls.
//!
//! Flow for one reviewer:
//!   1) build the fixed review prompt;
//!   2) generate via the shared LLM profiles;
//!   3) parse the JSON review out of the raw answer;
//!   4) rank issues by severity.
//!
//! Logs:
//! - `INFO`: per-reviewer summary (score, #issues, timing)
//! - `DEBUG`: prompt/response sizes.

pub mod compare;
pub mod parser;
pub mod prompt;

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use ai_llm_service::{config::llm_provider::LlmProvider, service_profiles::LlmServiceProfiles};
use issue_matcher::{Issue, SeverityCounts, rank_by_severity};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{Error, ReviewerResult};

/// Which reviewer(s) to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewModel {
    Gemini,
    Qwen,
    /// Both reviewers plus a side-by-side comparison.
    Both,
}

impl ReviewModel {
    /// The single provider behind this selection (`None` for `Both`).
    pub fn provider(self) -> Option<LlmProvider> {
        match self {
            ReviewModel::Gemini => Some(LlmProvider::Gemini),
            ReviewModel::Qwen => Some(LlmProvider::Qwen),
            ReviewModel::Both => None,
        }
    }
}

impl From<LlmProvider> for ReviewModel {
    fn from(p: LlmProvider) -> Self {
        match p {
            LlmProvider::Gemini => ReviewModel::Gemini,
            LlmProvider::Qwen => ReviewModel::Qwen,
        }
    }
}

impl fmt::Display for ReviewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewModel::Gemini => f.write_str("gemini"),
            ReviewModel::Qwen => f.write_str("qwen"),
            ReviewModel::Both => f.write_str("both"),
        }
    }
}

impl FromStr for ReviewModel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(ReviewModel::Gemini),
            "qwen" => Ok(ReviewModel::Qwen),
            "both" => Ok(ReviewModel::Both),
            other => Err(Error::Validation(format!("unknown review model: {other}"))),
        }
    }
}

/// Structured critique returned by one reviewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewReport {
    /// 0..=100
    pub overall_score: f64,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl ReviewReport {
    /// Same report with issues ordered by severity.
    pub fn ranked(mut self) -> Self {
        self.issues = rank_by_severity(&self.issues);
        self
    }

    pub fn severity_counts(&self) -> SeverityCounts {
        SeverityCounts::from_issues(&self.issues)
    }
}

/// Runs the review prompt against one provider and returns the ranked report.
///
/// # Errors
/// - [`Error::Llm`] if the provider call fails
/// - [`Error::Parse`] if the answer holds no valid review
pub async fn review_with(
    profiles: &LlmServiceProfiles,
    provider: LlmProvider,
    content: &str,
) -> ReviewerResult<ReviewReport> {
    let t0 = Instant::now();
    let prompt = prompt::build_review_prompt(content);
    debug!(%provider, prompt_len = prompt.len(), "review: prompt built");

    let raw = profiles
        .generate(provider, &prompt, Some(prompt::REVIEWER_PERSONA))
        .await?;
    debug!(%provider, response_len = raw.len(), "review: response received");

    let report = parser::parse_review(&raw)?.ranked();
    info!(
        %provider,
        score = report.overall_score,
        issues = report.issues.len(),
        "review: done in {} ms",
        t0.elapsed().as_millis()
    );
    Ok(report)
}

/// Asks one provider for detailed advice on a single issue.
pub async fn suggest_with(
    profiles: &LlmServiceProfiles,
    provider: LlmProvider,
    issue: &Issue,
    context: &str,
) -> ReviewerResult<String> {
    let prompt = prompt::build_suggestion_prompt(issue, context);
    let text = profiles
        .generate(provider, &prompt, Some(prompt::REVIEWER_PERSONA))
        .await?;
    debug!(%provider, response_len = text.len(), "suggestion received");
    Ok(text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_names_round_trip() {
        for m in [ReviewModel::Gemini, ReviewModel::Qwen, ReviewModel::Both] {
            assert_eq!(m.to_string().parse::<ReviewModel>().unwrap(), m);
            let json = serde_json::to_string(&m).unwrap();
            assert_eq!(json, format!("\"{m}\""));
        }
        assert!(matches!(
            "claude".parse::<ReviewModel>(),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn ranked_report_orders_issues() {
        let report = ReviewReport {
            overall_score: 70.0,
            summary: String::new(),
            issues: vec![
                Issue::new("B", "minor", "", "", ""),
                Issue::new("A", "critical", "", "", ""),
            ],
            recommendations: vec![],
        }
        .ranked();
        assert_eq!(report.issues[0].category, "A");
        assert_eq!(report.severity_counts().minor, 1);
    }
}
