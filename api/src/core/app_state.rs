use std::sync::Arc;

use ai_llm_service::{
    config::default_config::{config_gemini, config_qwen},
    config::llm_provider::LlmProvider,
    error_handler::AiLlmError,
    service_profiles::LlmServiceProfiles,
};
use thiserror::Error;
use tracing::{info, warn};

/// Failure while building [`AppState`] at boot.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid LLM configuration: {0}")]
    Llm(#[from] AiLlmError),
}

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Gemini and Qwen clients, built lazily on first use.
    pub llm_profiles: Arc<LlmServiceProfiles>,
}

impl AppState {
    pub fn new(llm_profiles: LlmServiceProfiles) -> Self {
        Self {
            llm_profiles: Arc::new(llm_profiles),
        }
    }

    /// Load shared state from environment variables.
    ///
    /// A reviewer without an API key is only reported here; requests that
    /// need it fail later with `MODEL_NOT_CONFIGURED`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let profiles = LlmServiceProfiles::new(config_gemini()?, config_qwen()?);

        for provider in [LlmProvider::Gemini, LlmProvider::Qwen] {
            let cfg = profiles.profile(provider);
            if profiles.is_configured(provider) {
                info!(%provider, model = %cfg.model, endpoint = %cfg.endpoint, "reviewer configured");
            } else {
                warn!(%provider, "no API key set; reviewer disabled");
            }
        }

        Ok(Self::new(profiles))
    }
}
