//! Lightweight Gemini service for text generation.
//!
//! Thin client for the Google Generative Language REST API:
//! - `POST {endpoint}/v1beta/models/{model}:generateContent`: non-streaming generation
//!
//! The API key travels in the `x-goog-api-key` header, never in the URL, so
//! request URLs are safe to log.
//!
//! # Examples
//!
//! ```no_run
//! use ai_llm_service::config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
//! use ai_llm_service::services::gemini_service::GeminiService;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = LlmModelConfig {
//!     provider: LlmProvider::Gemini,
//!     model: "gemini-2.0-flash-exp".into(),
//!     endpoint: "https://generativelanguage.googleapis.com".into(),
//!     api_key: Some("AIza...".into()),
//!     max_tokens: None,
//!     temperature: Some(0.7),
//!     top_p: None,
//!     timeout_secs: Some(120),
//! };
//!
//! let svc = GeminiService::new(cfg)?;
//! let text = svc.generate("Summarize the abstract.", None).await?;
//! println!("{text}");
//! # Ok(()) }
//! ```

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, HttpError, ProviderError, ProviderErrorKind, make_snippet},
};

/// Thin client for Gemini.
///
/// Initialized with a full [`LlmModelConfig`]; reuses one HTTP client with a
/// configurable timeout.
#[derive(Debug)]
pub struct GeminiService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_generate: String,
}

impl GeminiService {
    /// Creates a new [`GeminiService`] from the given config.
    ///
    /// # Errors
    /// - `InvalidProvider` if `cfg.provider` is not `Gemini`
    /// - `MissingApiKey` if `cfg.api_key` is `None`
    /// - `InvalidEndpoint` if `cfg.endpoint` is invalid
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        if cfg.provider != LlmProvider::Gemini {
            return Err(
                ProviderError::new(LlmProvider::Gemini, ProviderErrorKind::InvalidProvider).into(),
            );
        }

        let api_key = cfg.api_key.clone().ok_or_else(|| {
            ProviderError::new(LlmProvider::Gemini, ProviderErrorKind::MissingApiKey)
        })?;

        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ProviderError::new(
                LlmProvider::Gemini,
                ProviderErrorKind::InvalidEndpoint(cfg.endpoint.clone()),
            )
            .into());
        }

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(60));

        let mut headers = header::HeaderMap::new();
        let mut key = header::HeaderValue::from_str(&api_key).map_err(|e| {
            ProviderError::new(
                LlmProvider::Gemini,
                ProviderErrorKind::Decode(format!("invalid API key header: {e}")),
            )
        })?;
        key.set_sensitive(true);
        headers.insert("x-goog-api-key", key);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let url_generate = format!(
            "{}/v1beta/models/{}:generateContent",
            endpoint.trim_end_matches('/'),
            cfg.model
        );

        info!(
            provider = %cfg.provider,
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = timeout.as_secs(),
            "GeminiService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_generate,
        })
    }

    /// Generates text for `prompt` (optionally with a system instruction).
    ///
    /// Returns the concatenated text parts of the first candidate.
    ///
    /// # Errors
    /// - `HttpStatus` for non-2xx responses
    /// - [`AiLlmError::HttpTransport`] for client/network failures
    /// - `Decode` if the JSON cannot be parsed
    /// - `EmptyChoices` if no candidate carries text
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, AiLlmError> {
        let started = Instant::now();
        let body = GenerateContentRequest::from_cfg(&self.cfg, prompt, system);

        debug!(prompt_len = prompt.len(), "POST {}", self.url_generate);

        let resp = self
            .client
            .post(&self.url_generate)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_generate.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                latency_ms = started.elapsed().as_millis(),
                "Gemini generateContent returned non-success status"
            );

            return Err(ProviderError::new(
                LlmProvider::Gemini,
                ProviderErrorKind::HttpStatus(HttpError {
                    status,
                    url,
                    snippet,
                }),
            )
            .into());
        }

        let out: GenerateContentResponse = resp.json().await.map_err(|e| {
            error!(error = %e, "failed to decode generateContent response");
            ProviderError::new(
                LlmProvider::Gemini,
                ProviderErrorKind::Decode(format!(
                    "serde error: {e}; expected `candidates[0].content.parts[].text`"
                )),
            )
        })?;

        let text = out.first_text().ok_or_else(|| {
            ProviderError::new(LlmProvider::Gemini, ProviderErrorKind::EmptyChoices)
        })?;

        info!(
            latency_ms = started.elapsed().as_millis(),
            response_len = text.len(),
            "generateContent completed"
        );

        Ok(text)
    }
}

/* ===========================================================================
HTTP payloads
======================================================================== */

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    generation_config: GenerationConfig,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_cfg(cfg: &LlmModelConfig, prompt: &'a str, system: Option<&'a str>) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: prompt }],
            }],
            system_instruction: system.map(|s| Content {
                role: None,
                parts: vec![Part { text: s }],
            }),
            generation_config: GenerationConfig {
                temperature: cfg.temperature,
                top_p: cfg.top_p,
                max_output_tokens: cfg.max_tokens,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    fn first_text(self) -> Option<String> {
        let candidate = self.candidates.into_iter().next()?;
        let text: String = candidate
            .content?
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::Gemini,
            model: "gemini-2.0-flash-exp".into(),
            endpoint: "https://generativelanguage.example/".into(),
            api_key: Some("AIza-test".into()),
            max_tokens: Some(2048),
            temperature: Some(0.7),
            top_p: None,
            timeout_secs: Some(5),
        }
    }

    #[test]
    fn request_uses_camel_case_schema() {
        let c = cfg();
        let body = GenerateContentRequest::from_cfg(&c, "review", None);
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v["contents"][0]["role"], "user");
        assert_eq!(v["contents"][0]["parts"][0]["text"], "review");
        assert_eq!(v["generationConfig"]["maxOutputTokens"], 2048);
        assert!(v.get("systemInstruction").is_none());
    }

    #[test]
    fn joins_text_parts_of_first_candidate() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"{\"a\":"},{"text":"1}"}]}},{"content":{"parts":[{"text":"ignored"}]}}]}"#;
        let resp: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.first_text().as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn blocked_candidate_yields_none() {
        let raw = r#"{"candidates":[{"finishReason":"SAFETY"}]}"#;
        let resp: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert!(resp.first_text().is_none());

        let resp: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.first_text().is_none());
    }

    #[test]
    fn url_embeds_model_name() {
        let svc = GeminiService::new(cfg()).unwrap();
        assert_eq!(
            svc.url_generate,
            "https://generativelanguage.example/v1beta/models/gemini-2.0-flash-exp:generateContent"
        );
    }
}
