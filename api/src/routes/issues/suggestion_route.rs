use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::Response,
};
use paper_reviewer::{review::ReviewModel, suggest_for_issue};
use tracing::{info, instrument};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::{AppError, AppResult},
    routes::issues::{issues_request::SuggestionRequest, issues_response::SuggestionResponse},
};

/// Asks one reviewer for detailed revision advice on a single issue.
#[instrument(name = "suggestion_route", skip_all, fields(model = %body.model))]
pub async fn suggestion_route(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SuggestionRequest>,
) -> AppResult<Response> {
    if body.model == ReviewModel::Both {
        return Err(AppError::bad_field(
            "model",
            "suggestions are generated by a single model",
            "Use \"gemini\" or \"qwen\".",
        ));
    }

    let suggestion =
        suggest_for_issue(&state.llm_profiles, body.model, &body.issue, &body.context).await?;
    info!(chars = suggestion.chars().count(), "suggestion generated");

    Ok(ApiResponse::success(SuggestionResponse {
        model: body.model,
        suggestion,
    })
    .into_response_with_status(StatusCode::OK))
}
