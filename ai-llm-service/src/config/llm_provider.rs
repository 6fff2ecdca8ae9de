use std::fmt;

use serde::{Deserialize, Serialize};

/// Represents the provider (backend) used to review a manuscript.
///
/// Each provider maps to one HTTP client in [`crate::services`]:
///
/// ```
/// use ai_llm_service::config::llm_provider::LlmProvider;
///
/// fn label(provider: LlmProvider) -> &'static str {
///     match provider {
///         LlmProvider::Gemini => "Gemini (Google Generative Language API)",
///         LlmProvider::Qwen => "Qwen (DashScope, OpenAI-compatible mode)",
///     }
/// }
/// assert!(label(LlmProvider::Qwen).starts_with("Qwen"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// Google Gemini via `generateContent`.
    Gemini,
    /// Alibaba Qwen via the OpenAI-compatible chat completions endpoint.
    Qwen,
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmProvider::Gemini => f.write_str("gemini"),
            LlmProvider::Qwen => f.write_str("qwen"),
        }
    }
}
