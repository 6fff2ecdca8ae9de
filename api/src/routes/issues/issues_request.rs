use issue_matcher::Issue;
use paper_reviewer::review::ReviewModel;
use serde::Deserialize;

/// Body for `POST /issues/compare`.
#[derive(Debug, Deserialize)]
pub struct CompareIssuesRequest {
    pub first: Vec<Issue>,
    pub second: Vec<Issue>,
}

/// Body for `POST /issues/rank`.
#[derive(Debug, Deserialize)]
pub struct RankIssuesRequest {
    pub issues: Vec<Issue>,
}

/// Body for `POST /issues/suggestion`.
#[derive(Debug, Deserialize)]
pub struct SuggestionRequest {
    /// A single reviewer; `both` is rejected.
    pub model: ReviewModel,
    pub issue: Issue,
    /// Optional manuscript excerpt around the issue.
    #[serde(default)]
    pub context: String,
}
