//! Shared LLM layer for the manuscript reviewers.
//!
//! - [`config`]: provider enum, model config, env-driven defaults
//! - [`services`]: one thin HTTP client per provider
//! - [`service_profiles`]: the shared, client-caching entry point
//! - [`error_handler`]: unified [`AiLlmError`](error_handler::AiLlmError)
//! - [`telemetry`]: log layer used by the binary

pub mod config {
    pub mod default_config;
    pub mod llm_model_config;
    pub mod llm_provider;
}

pub mod services {
    pub mod gemini_service;
    pub mod qwen_service;
}

pub mod error_handler;
pub mod service_profiles;
pub mod telemetry;
