use axum::{extract::Json, http::StatusCode, response::Response};
use paper_reviewer::compare_issues;
use tracing::{info, instrument};

use crate::{
    core::http::response_envelope::ApiResponse,
    routes::issues::issues_request::CompareIssuesRequest,
};

/// Pairs two issue lists without calling any model.
#[instrument(name = "compare_issues_route", skip_all)]
pub async fn compare_issues_route(Json(body): Json<CompareIssuesRequest>) -> Response {
    let comparison = compare_issues(&body.first, &body.second);
    info!(
        first = body.first.len(),
        second = body.second.len(),
        matched = comparison.matched.len(),
        "issues compared"
    );
    ApiResponse::success(comparison).into_response_with_status(StatusCode::OK)
}
