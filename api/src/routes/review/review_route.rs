use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::{HeaderMap, StatusCode},
    response::Response,
};
use paper_reviewer::run_review;
use tracing::{debug, info, instrument};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::{AppError, AppResult},
    routes::review::review_request::ReviewRequest,
};

/// Reviews one manuscript with the selected model(s).
///
/// With `model = both` the two reviews run concurrently and the answer also
/// carries the matched / reviewer-only issue groups.
#[instrument(name = "review_route", skip_all, fields(model = %body.model))]
pub async fn review_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<ReviewRequest>,
) -> AppResult<Response> {
    if let Some(id) = headers.get("X-Request-Id").and_then(|h| h.to_str().ok()) {
        debug!(%id, "request id attached");
    }

    if body.content.trim().is_empty() {
        return Err(AppError::bad_field(
            "content",
            "manuscript content is empty",
            "Send the manuscript text in `content`.",
        ));
    }

    info!(chars = body.content.chars().count(), "starting review");
    let outcome = run_review(&state.llm_profiles, body.model, &body.content).await?;

    Ok(ApiResponse::success(outcome).into_response_with_status(StatusCode::OK))
}
