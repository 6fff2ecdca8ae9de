//! Shared LLM service with one profile per reviewer: `gemini` and `qwen`.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - Caches underlying HTTP clients per config (endpoint+model+key+timeout),
//!   built lazily on first use so a reviewer without an API key does not
//!   prevent startup.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ai_llm_service::config::default_config::{config_gemini, config_qwen};
//! use ai_llm_service::config::llm_provider::LlmProvider;
//! use ai_llm_service::service_profiles::LlmServiceProfiles;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let svc = Arc::new(LlmServiceProfiles::new(config_gemini()?, config_qwen()?));
//! let txt = svc.generate(LlmProvider::Qwen, "Hello", None).await?;
//! println!("QWEN: {txt}");
//! # Ok(()) }
//! ```

use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;
use tracing::debug;

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::AiLlmError,
    services::{gemini_service::GeminiService, qwen_service::QwenService},
};

/// Shared service that owns the reviewer profiles.
pub struct LlmServiceProfiles {
    gemini: LlmModelConfig,
    qwen: LlmModelConfig,

    gemini_clients: RwLock<HashMap<ClientKey, Arc<GeminiService>>>,
    qwen_clients: RwLock<HashMap<ClientKey, Arc<QwenService>>>,
}

impl LlmServiceProfiles {
    pub fn new(gemini: LlmModelConfig, qwen: LlmModelConfig) -> Self {
        Self {
            gemini,
            qwen,
            gemini_clients: RwLock::new(HashMap::new()),
            qwen_clients: RwLock::new(HashMap::new()),
        }
    }

    /// Generates text with the profile of `provider`.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if the client cannot be built or generation fails.
    pub async fn generate(
        &self,
        provider: LlmProvider,
        prompt: &str,
        system: Option<&str>,
    ) -> Result<String, AiLlmError> {
        let cfg = self.profile(provider);
        match cfg.provider {
            LlmProvider::Gemini => {
                let cli = self.get_or_init_gemini(cfg).await?;
                cli.generate(prompt, system).await
            }
            LlmProvider::Qwen => {
                let cli = self.get_or_init_qwen(cfg).await?;
                cli.generate(prompt, system).await
            }
        }
    }

    /// Config used for `provider`.
    pub fn profile(&self, provider: LlmProvider) -> &LlmModelConfig {
        match provider {
            LlmProvider::Gemini => &self.gemini,
            LlmProvider::Qwen => &self.qwen,
        }
    }

    /// `true` when `provider` has an API key configured.
    pub fn is_configured(&self, provider: LlmProvider) -> bool {
        self.profile(provider).api_key.is_some()
    }

    /* --------------------- Internals --------------------- */

    async fn get_or_init_gemini(
        &self,
        cfg: &LlmModelConfig,
    ) -> Result<Arc<GeminiService>, AiLlmError> {
        let key = ClientKey::from(cfg);
        if let Some(cli) = self.gemini_clients.read().await.get(&key).cloned() {
            return Ok(cli);
        }
        let mut w = self.gemini_clients.write().await;
        if let Some(cli) = w.get(&key).cloned() {
            return Ok(cli);
        }
        debug!(model = %cfg.model, "building gemini client");
        let cli = Arc::new(GeminiService::new(cfg.clone())?);
        w.insert(key, cli.clone());
        Ok(cli)
    }

    async fn get_or_init_qwen(&self, cfg: &LlmModelConfig) -> Result<Arc<QwenService>, AiLlmError> {
        let key = ClientKey::from(cfg);
        if let Some(cli) = self.qwen_clients.read().await.get(&key).cloned() {
            return Ok(cli);
        }
        let mut w = self.qwen_clients.write().await;
        if let Some(cli) = w.get(&key).cloned() {
            return Ok(cli);
        }
        debug!(model = %cfg.model, "building qwen client");
        let cli = Arc::new(QwenService::new(cfg.clone())?);
        w.insert(key, cli.clone());
        Ok(cli)
    }
}

/// Internal cache key to identify unique client configs.
#[derive(Clone, PartialEq, Eq, Hash)]
struct ClientKey {
    provider: LlmProvider,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    timeout: Option<u64>,
}

impl From<&LlmModelConfig> for ClientKey {
    fn from(cfg: &LlmModelConfig) -> Self {
        Self {
            provider: cfg.provider,
            endpoint: cfg.endpoint.clone(),
            model: cfg.model.clone(),
            api_key: cfg.api_key.clone(),
            timeout: cfg.timeout_secs,
        }
    }
}
