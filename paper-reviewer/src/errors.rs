//! Crate-wide error hierarchy for paper-reviewer.
//!
//! - Single root `Error` for all public functions.
//! - LLM failures are kept intact so the HTTP layer can map them.
//! - Ergonomic `?` via `From` impls.

use ai_llm_service::error_handler::AiLlmError;
use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type ReviewerResult<T> = Result<T, Error>;

/// Root error type for the paper-reviewer crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Upstream model call failed (transport, status, missing key, ...).
    #[error(transparent)]
    Llm(#[from] AiLlmError),

    /// Model answered, but not with a usable review.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Input validation errors (blank manuscript, unsupported reviewer, ...).
    #[error("validation error: {0}")]
    Validation(String),
}

/// Review response parsing failures.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no JSON object found in model response")]
    NoJsonObject,

    #[error("invalid review JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("overall score out of range: {0}")]
    ScoreOutOfRange(f64),
}
