use issue_matcher::{Issue, SeverityCounts};
use paper_reviewer::review::ReviewModel;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RankIssuesResponse {
    pub issues: Vec<Issue>,
    pub counts: SeverityCounts,
}

#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    pub model: ReviewModel,
    pub suggestion: String,
}
