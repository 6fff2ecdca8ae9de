//! Qwen service (DashScope, OpenAI-compatible mode) for text generation.
//!
//! Minimal, non-streaming client. The endpoint is derived from
//! `LlmModelConfig::endpoint`:
//! - POST {endpoint}/chat/completions: chat completion
//!
//! Constructor validation:
//! - `cfg.provider` must be `LlmProvider::Qwen`
//! - `cfg.api_key` must be present
//! - `cfg.endpoint` must start with http:// or https://
//!
//! Errors are normalized via unified error types in `error_handler`.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        AiLlmError, HttpError, ProviderError, ProviderErrorKind, make_snippet,
    },
};

/// Thin client for Qwen chat completions.
///
/// Keeps a preconfigured `reqwest::Client` (timeout + auth headers).
#[derive(Debug)]
pub struct QwenService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_chat: String,
}

impl QwenService {
    /// Creates a new [`QwenService`] from the given config.
    ///
    /// # Errors
    /// - `InvalidProvider` if `cfg.provider` is not Qwen
    /// - `MissingApiKey` if `cfg.api_key` is `None`
    /// - `InvalidEndpoint` if `cfg.endpoint` is invalid
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        if cfg.provider != LlmProvider::Qwen {
            return Err(
                ProviderError::new(LlmProvider::Qwen, ProviderErrorKind::InvalidProvider).into(),
            );
        }

        let api_key = cfg.api_key.clone().ok_or_else(|| {
            ProviderError::new(LlmProvider::Qwen, ProviderErrorKind::MissingApiKey)
        })?;

        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ProviderError::new(
                LlmProvider::Qwen,
                ProviderErrorKind::InvalidEndpoint(cfg.endpoint.clone()),
            )
            .into());
        }

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(60));

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
                ProviderError::new(
                    LlmProvider::Qwen,
                    ProviderErrorKind::Decode(format!("invalid API key header: {e}")),
                )
            })?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let url_chat = format!("{}/chat/completions", endpoint.trim_end_matches('/'));

        info!(
            provider = %cfg.provider,
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = timeout.as_secs(),
            "QwenService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_chat,
        })
    }

    /// Performs a **non-streaming** chat completion request.
    ///
    /// `messages` = optional system message + one user message with `prompt`.
    ///
    /// # Errors
    /// - `HttpStatus` for non-2xx responses
    /// - [`AiLlmError::HttpTransport`] for client/network failures
    /// - `Decode` if the JSON cannot be parsed
    /// - `EmptyChoices` if no choice carries content
    pub async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, AiLlmError> {
        let started = Instant::now();
        let body = ChatCompletionRequest::from_cfg(&self.cfg, prompt, system);

        debug!(
            model = %self.cfg.model,
            prompt_len = prompt.len(),
            has_system = system.is_some(),
            "POST {}", self.url_chat
        );

        let resp = self.client.post(&self.url_chat).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_chat.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "Qwen /chat/completions returned non-success status"
            );

            return Err(ProviderError::new(
                LlmProvider::Qwen,
                ProviderErrorKind::HttpStatus(HttpError {
                    status,
                    url,
                    snippet,
                }),
            )
            .into());
        }

        let out: ChatCompletionResponse = match resp.json().await {
            Ok(v) => v,
            Err(e) => {
                error!(
                    error = %e,
                    model = %self.cfg.model,
                    latency_ms = started.elapsed().as_millis(),
                    "failed to decode /chat/completions response"
                );
                return Err(ProviderError::new(
                    LlmProvider::Qwen,
                    ProviderErrorKind::Decode(format!(
                        "serde error: {e}; expected `choices[0].message.content`"
                    )),
                )
                .into());
            }
        };

        let content = out.first_content().ok_or_else(|| {
            ProviderError::new(LlmProvider::Qwen, ProviderErrorKind::EmptyChoices)
        })?;

        info!(
            model = %self.cfg.model,
            latency_ms = started.elapsed().as_millis(),
            response_len = content.len(),
            "chat completion completed"
        );

        Ok(content)
    }
}

/* ===========================================================================
HTTP payloads
======================================================================== */

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

impl<'a> ChatCompletionRequest<'a> {
    fn from_cfg(cfg: &'a LlmModelConfig, prompt: &'a str, system: Option<&'a str>) -> Self {
        let mut messages = Vec::with_capacity(2);
        if let Some(sys) = system {
            messages.push(ChatMessage {
                role: "system",
                content: sys,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: prompt,
        });

        Self {
            model: &cfg.model,
            messages,
            temperature: cfg.temperature,
            top_p: cfg.top_p,
            max_tokens: cfg.max_tokens,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

impl ChatCompletionResponse {
    fn first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .find_map(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageOut,
}

#[derive(Debug, Deserialize)]
struct ChatMessageOut {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::Qwen,
            model: "qwen-max".into(),
            endpoint: "https://dashscope.example/compatible-mode/v1/".into(),
            api_key: Some("sk-test".into()),
            max_tokens: None,
            temperature: Some(0.7),
            top_p: None,
            timeout_secs: Some(5),
        }
    }

    #[test]
    fn request_body_matches_chat_schema() {
        let c = cfg();
        let body = ChatCompletionRequest::from_cfg(&c, "review this", Some("be strict"));
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v["model"], "qwen-max");
        assert_eq!(v["messages"][0]["role"], "system");
        assert_eq!(v["messages"][1]["content"], "review this");
        assert!(v.get("max_tokens").is_none());
    }

    #[test]
    fn picks_first_non_empty_content() {
        let raw = r#"{"choices":[{"message":{"content":null}},{"message":{"content":"{\"overallScore\":80}"}}]}"#;
        let resp: ChatCompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.first_content().as_deref(), Some("{\"overallScore\":80}"));

        let empty: ChatCompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(empty.first_content().is_none());
    }

    #[test]
    fn rejects_missing_key_and_wrong_provider() {
        let mut c = cfg();
        c.api_key = None;
        let err = QwenService::new(c).unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Provider(ProviderError {
                kind: ProviderErrorKind::MissingApiKey,
                ..
            })
        ));

        let mut c = cfg();
        c.provider = LlmProvider::Gemini;
        assert!(QwenService::new(c).is_err());
    }

    #[test]
    fn chat_url_is_derived_from_endpoint() {
        let svc = QwenService::new(cfg()).unwrap();
        assert_eq!(
            svc.url_chat,
            "https://dashscope.example/compatible-mode/v1/chat/completions"
        );
    }
}
