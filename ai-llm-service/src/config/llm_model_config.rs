use crate::config::llm_provider::LlmProvider;

/// Configuration for one reviewer model.
///
/// # Fields
///
/// - `provider`: Which backend to call (Gemini or Qwen).
/// - `model`: The model identifier (e.g., `"gemini-2.0-flash-exp"`, `"qwen-max"`).
/// - `endpoint`: Base URL of the provider API.
/// - `api_key`: API key; a missing key is reported when the model is used.
/// - `max_tokens`: Maximum number of tokens to generate (if supported).
/// - `temperature`: Controls randomness (0.0 = deterministic).
/// - `top_p`: Nucleus sampling cutoff.
/// - `timeout_secs`: Optional request timeout in seconds.
///
/// # Examples
///
/// ```
/// use ai_llm_service::config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
///
/// let cfg = LlmModelConfig {
///     provider: LlmProvider::Qwen,
///     model: "qwen-max".to_string(),
///     endpoint: "https://dashscope.aliyuncs.com/compatible-mode/v1".to_string(),
///     api_key: Some("sk-...".to_string()),
///     max_tokens: None,
///     temperature: Some(0.7),
///     top_p: None,
///     timeout_secs: Some(120),
/// };
/// assert_eq!(cfg.provider, LlmProvider::Qwen);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    pub provider: LlmProvider,
    pub model: String,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub timeout_secs: Option<u64>,
}
