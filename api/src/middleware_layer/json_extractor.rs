//! Rewrites axum's plain-text body rejections into the JSON envelope.
//!
//! Only `400`, `415` and `422` answers that are not already JSON are touched;
//! handler errors go through [`AppError`](crate::error_handler::AppError) and
//! carry their envelope already.

use axum::{
    body::{Body, Bytes},
    http::{HeaderValue, Request, StatusCode, header::CONTENT_TYPE, response::Parts},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::debug;

use crate::core::http::response_envelope::{ApiErrorDetail, ApiResponse};

/// Request bodies never exceed axum's default limit, so the rejection text is small.
const MAX_REJECTION_BYTES: usize = 64 * 1024;

const KNOWN_FIELDS: &[&str] = &[
    "content",
    "model",
    "context",
    "issues",
    "first",
    "second",
    "issue",
    "severity",
    "category",
];

async fn take_body(res: Response) -> (Parts, Bytes) {
    let (parts, body) = res.into_parts();
    let bytes = axum::body::to_bytes(body, MAX_REJECTION_BYTES)
        .await
        .unwrap_or_default();
    (parts, bytes)
}

/// First request field named in a serde message such as
/// ``missing field `content` at line 1 column 2``.
fn guess_path_from_serde_msg(msg: &str) -> Option<String> {
    KNOWN_FIELDS
        .iter()
        .find(|key| msg.contains(&format!("`{key}`")) || msg.contains(&format!("{key}:")))
        .map(|key| key.to_string())
}

fn hint_for(msg: &str) -> Option<String> {
    if msg.contains("expected a sequence") {
        Some("Expected an array of issues (e.g. [{ \"category\": \"Ethics\", ... }]).".into())
    } else if msg.contains("expected a map") || msg.contains("expected struct") {
        Some("Expected a JSON object here (e.g. { \"field\": \"value\" }).".into())
    } else if msg.contains("unknown variant") {
        Some("Model must be one of \"gemini\", \"qwen\" or \"both\".".into())
    } else if msg.contains("Content-Type") {
        Some("Send the body with `Content-Type: application/json`.".into())
    } else {
        None
    }
}

fn ensure_request_id(parts: &mut Parts) -> String {
    if let Some(v) = parts
        .headers
        .get("X-Request-Id")
        .and_then(|h| h.to_str().ok())
        .filter(|v| !v.trim().is_empty())
    {
        return v.to_string();
    }
    let nanos = Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| Utc::now().timestamp_micros() * 1000);
    let id = format!("req-{nanos}");
    if let Ok(value) = HeaderValue::from_str(&id) {
        parts.headers.insert("X-Request-Id", value);
    }
    id
}

fn is_json(parts: &Parts) -> bool {
    parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

pub async fn json_error_mapper(req: Request<Body>, next: Next) -> Response {
    let res = next.run(req).await;
    let status = res.status();

    let code = match status {
        StatusCode::BAD_REQUEST => "BAD_REQUEST",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "UNSUPPORTED_MEDIA_TYPE",
        StatusCode::UNPROCESSABLE_ENTITY => "UNPROCESSABLE_ENTITY",
        _ => return res,
    };

    let (mut parts, bytes) = take_body(res).await;
    if is_json(&parts) {
        return Response::from_parts(parts, bytes.into());
    }

    let original = String::from_utf8_lossy(&bytes);
    let req_id = ensure_request_id(&mut parts);
    debug!(%req_id, %status, "mapping body rejection to envelope");

    let path = guess_path_from_serde_msg(&original);
    let hint = hint_for(&original);
    let details = if path.is_some() || hint.is_some() {
        vec![ApiErrorDetail { path, hint }]
    } else {
        Vec::new()
    };

    let envelope = ApiResponse::<()>::error(code, original.trim(), details);
    let body = match serde_json::to_vec(&envelope) {
        Ok(v) => v,
        Err(_) => return Response::from_parts(parts, bytes.into()),
    };

    parts
        .headers
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    parts.headers.remove(axum::http::header::CONTENT_LENGTH);

    Response::from_parts(parts, body.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_field_in_serde_message() {
        let msg = "Failed to deserialize the JSON body into the target type: \
                   missing field `content` at line 1 column 18";
        assert_eq!(guess_path_from_serde_msg(msg).as_deref(), Some("content"));
        assert_eq!(guess_path_from_serde_msg("EOF while parsing"), None);
    }

    #[test]
    fn hints_for_wrong_shapes() {
        assert!(hint_for("invalid type: map, expected a sequence").is_some());
        assert!(hint_for("unknown variant `claude`").is_some());
        assert!(hint_for("trailing characters").is_none());
    }
}
