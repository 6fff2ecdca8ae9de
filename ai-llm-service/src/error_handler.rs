//! Unified error handling for `ai-llm-service`.
//!
//! This module exposes a single top-level error type [`AiLlmError`] for the whole
//! library, and groups domain-specific errors in nested types ([`ConfigError`],
//! [`ProviderError`]). Small helpers for reading/validating environment variables
//! are provided and return the unified [`Result<T>`] alias.
//!
//! All messages include the suffix `[AI LLM Service]` to simplify attribution in logs.

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::llm_provider::LlmProvider;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, AiLlmError>;

/// Upper bound for response snippets embedded into errors/logs.
const SNIPPET_LIMIT: usize = 300;

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

/// Top-level error for the `ai-llm-service` crate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AiLlmError {
    /// Configuration/validation errors (startup).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Provider call failed (status, decoding, missing key, ...).
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Underlying HTTP transport error (e.g., `reqwest::Error`).
    #[error("[AI LLM Service] transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Error enum for environment/config-driven setup.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A number failed to parse (limits, timeouts).
    #[error("[AI LLM Service] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `LLM_MAX_TOKENS`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u32`).
        reason: &'static str,
    },

    /// Value had the wrong format (e.g., invalid URL).
    #[error("[AI LLM Service] invalid format in {var}: {reason}")]
    InvalidFormat {
        /// Variable name (e.g., `QWEN_URL`).
        var: &'static str,
        /// Explanation (e.g., `must start with http:// or https://`).
        reason: &'static str,
    },
}

/* ------------------------------------------------------------------------- */
/* Provider errors                                                           */
/* ------------------------------------------------------------------------- */

/// Non-success HTTP answer from an upstream provider.
#[derive(Debug, Clone)]
pub struct HttpError {
    pub status: StatusCode,
    pub url: String,
    /// Short, trimmed snippet of the response body.
    pub snippet: String,
}

/// What went wrong while talking to a provider.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ProviderErrorKind {
    /// The config handed to a client belongs to another provider.
    #[error("invalid provider for this client")]
    InvalidProvider,

    /// No API key configured for this provider.
    #[error("missing API key")]
    MissingApiKey,

    /// The endpoint is empty or does not start with http/https.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Upstream returned a non-successful HTTP status.
    #[error("HTTP {} from {}: {}", .0.status, .0.url, .0.snippet)]
    HttpStatus(HttpError),

    /// Response payload could not be decoded as expected.
    #[error("decode error: {0}")]
    Decode(String),

    /// Response decoded but carried no generated text.
    #[error("empty response (no choices/candidates)")]
    EmptyChoices,
}

/// Provider-tagged error.
#[derive(Debug, Error)]
#[error("[AI LLM Service] {provider}: {kind}")]
pub struct ProviderError {
    pub provider: LlmProvider,
    pub kind: ProviderErrorKind,
}

impl ProviderError {
    pub fn new(provider: LlmProvider, kind: ProviderErrorKind) -> Self {
        Self { provider, kind }
    }
}

/// Trims a response body to a log-friendly single-line snippet.
pub fn make_snippet(body: &str) -> String {
    let flat = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= SNIPPET_LIMIT {
        flat
    } else {
        flat.chars().take(SNIPPET_LIMIT).collect::<String>() + "…"
    }
}

/* ------------------------------------------------------------------------- */
/* Env helpers (return unified `Result<T>`)                                  */
/* ------------------------------------------------------------------------- */

/// Reads an optional environment variable (`None` if unset or blank).
pub fn opt_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Reads an environment variable, falling back to `default` if unset or blank.
pub fn env_or(name: &str, default: &str) -> String {
    opt_env(name).unwrap_or_else(|| default.to_string())
}

/// Parses an optional `u32` from env (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if the variable is set but not a valid `u32`.
pub fn env_opt_u32(name: &'static str) -> Result<Option<u32>> {
    match opt_env(name) {
        Some(v) => v.trim().parse::<u32>().map(Some).map_err(|_| {
            AiLlmError::from(ConfigError::InvalidNumber {
                var: name,
                reason: "expected u32",
            })
        }),
        None => Ok(None),
    }
}

/// Parses an optional `u64` from env (`Ok(None)` if unset/empty).
pub fn env_opt_u64(name: &'static str) -> Result<Option<u64>> {
    match opt_env(name) {
        Some(v) => v.trim().parse::<u64>().map(Some).map_err(|_| {
            AiLlmError::from(ConfigError::InvalidNumber {
                var: name,
                reason: "expected u64",
            })
        }),
        None => Ok(None),
    }
}

/* ------------------------------------------------------------------------- */
/* Validation helpers                                                        */
/* ------------------------------------------------------------------------- */

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
///
/// # Errors
/// Returns [`ConfigError::InvalidFormat`] when the string does not start with
/// a valid HTTP scheme.
pub fn validate_http_endpoint(var: &'static str, value: &str) -> Result<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_is_flattened_and_capped() {
        assert_eq!(make_snippet("  a\n\n b  "), "a b");
        let long = "x ".repeat(400);
        let s = make_snippet(&long);
        assert!(s.ends_with('…'));
        assert_eq!(s.chars().count(), SNIPPET_LIMIT + 1);
    }

    #[test]
    fn endpoint_scheme_is_checked() {
        assert!(validate_http_endpoint("X", "https://example.org").is_ok());
        assert!(matches!(
            validate_http_endpoint("X", "example.org"),
            Err(AiLlmError::Config(ConfigError::InvalidFormat { var: "X", .. }))
        ));
    }

    #[test]
    fn provider_error_names_the_provider() {
        let e = ProviderError::new(LlmProvider::Gemini, ProviderErrorKind::MissingApiKey);
        assert_eq!(e.to_string(), "[AI LLM Service] gemini: missing API key");
    }
}
