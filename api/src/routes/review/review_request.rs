use paper_reviewer::review::ReviewModel;
use serde::Deserialize;

/// Request body for `POST /review`.
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    /// `gemini`, `qwen` or `both`.
    pub model: ReviewModel,
    /// Plain-text manuscript.
    pub content: String,
}
