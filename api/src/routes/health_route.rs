use std::sync::Arc;

use ai_llm_service::config::llm_provider::LlmProvider;
use axum::{extract::State, response::Response};
use serde::Serialize;

use crate::core::{app_state::AppState, http::response_envelope::ApiResponse};

#[derive(Debug, Serialize)]
pub struct ReviewerStatus {
    pub provider: LlmProvider,
    pub model: String,
    pub configured: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub reviewers: Vec<ReviewerStatus>,
}

/// Liveness plus which reviewers have credentials. Never calls a provider.
pub async fn health_route(State(state): State<Arc<AppState>>) -> Response {
    let reviewers = [LlmProvider::Gemini, LlmProvider::Qwen]
        .into_iter()
        .map(|provider| ReviewerStatus {
            provider,
            model: state.llm_profiles.profile(provider).model.clone(),
            configured: state.llm_profiles.is_configured(provider),
        })
        .collect();

    ApiResponse::success(HealthResponse {
        status: "ok",
        reviewers,
    })
    .into_response_with_status(axum::http::StatusCode::OK)
}
