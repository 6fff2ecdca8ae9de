//! Default reviewer configs loaded from environment variables.
//!
//! One constructor per provider. Only the endpoint is validated here; an
//! absent API key is tolerated so the server can boot with a single reviewer
//! configured. The missing key surfaces as
//! [`ProviderErrorKind::MissingApiKey`](crate::error_handler::ProviderErrorKind)
//! on first use.
//!
//! # Environment variables
//!
//! Common:
//! - `LLM_MAX_TOKENS`   = optional max tokens (u32)
//! - `LLM_TIMEOUT_SECS` = optional request timeout (u64, default 120)
//!
//! Gemini:
//! - `GEMINI_API_KEY`
//! - `GEMINI_MODEL` (default `gemini-2.0-flash-exp`)
//! - `GEMINI_URL`   (default `https://generativelanguage.googleapis.com`)
//!
//! Qwen:
//! - `QWEN_API_KEY`
//! - `QWEN_MODEL` (default `qwen-max`)
//! - `QWEN_URL`   (default `https://dashscope.aliyuncs.com/compatible-mode/v1`)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, env_opt_u32, env_opt_u64, env_or, opt_env, validate_http_endpoint},
};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash-exp";
pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_QWEN_MODEL: &str = "qwen-max";
pub const DEFAULT_QWEN_URL: &str = "https://dashscope.aliyuncs.com/compatible-mode/v1";

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Gemini reviewer config.
///
/// # Defaults
/// - `temperature = Some(0.7)`
/// - `timeout_secs = Some(120)`
pub fn config_gemini() -> Result<LlmModelConfig, AiLlmError> {
    let endpoint = env_or("GEMINI_URL", DEFAULT_GEMINI_URL);
    validate_http_endpoint("GEMINI_URL", &endpoint)?;

    Ok(LlmModelConfig {
        provider: LlmProvider::Gemini,
        model: env_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
        endpoint,
        api_key: opt_env("GEMINI_API_KEY"),
        max_tokens: env_opt_u32("LLM_MAX_TOKENS")?,
        temperature: Some(0.7),
        top_p: None,
        timeout_secs: Some(env_opt_u64("LLM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS)),
    })
}

/// Qwen reviewer config (DashScope compatible mode).
///
/// # Defaults
/// - `temperature = Some(0.7)`
/// - `timeout_secs = Some(120)`
pub fn config_qwen() -> Result<LlmModelConfig, AiLlmError> {
    let endpoint = env_or("QWEN_URL", DEFAULT_QWEN_URL);
    validate_http_endpoint("QWEN_URL", &endpoint)?;

    Ok(LlmModelConfig {
        provider: LlmProvider::Qwen,
        model: env_or("QWEN_MODEL", DEFAULT_QWEN_MODEL),
        endpoint,
        api_key: opt_env("QWEN_API_KEY"),
        max_tokens: env_opt_u32("LLM_MAX_TOKENS")?,
        temperature: Some(0.7),
        top_p: None,
        timeout_secs: Some(env_opt_u64("LLM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS)),
    })
}
