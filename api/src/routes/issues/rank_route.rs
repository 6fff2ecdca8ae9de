use axum::{extract::Json, http::StatusCode, response::Response};
use issue_matcher::{SeverityCounts, rank_by_severity};
use tracing::debug;

use crate::{
    core::http::response_envelope::ApiResponse,
    routes::issues::{issues_request::RankIssuesRequest, issues_response::RankIssuesResponse},
};

/// Orders issues critical → major → minor → anything else, stable within a level.
pub async fn rank_issues_route(Json(body): Json<RankIssuesRequest>) -> Response {
    debug!(issues = body.issues.len(), "ranking issues");
    let issues = rank_by_severity(&body.issues);
    let counts = SeverityCounts::from_issues(&issues);
    ApiResponse::success(RankIssuesResponse { issues, counts })
        .into_response_with_status(StatusCode::OK)
}
