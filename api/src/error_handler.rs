use ai_llm_service::error_handler::{AiLlmError, ProviderError, ProviderErrorKind};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use paper_reviewer::errors::Error as ReviewerError;
use thiserror::Error;
use tracing::{error, warn};

use crate::core::{
    app_state::ConfigError,
    http::response_envelope::{ApiErrorDetail, ApiResponse},
};

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid API_ADDRESS `{0}`")]
    InvalidAddress(String),

    // --- IO / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request ---
    #[error("bad request: {message}")]
    BadRequest {
        message: String,
        details: Vec<ApiErrorDetail>,
    },

    /// Rich HTTP error mapped from lower layers with specific status & code.
    #[error("{message}")]
    Http {
        status: StatusCode,
        code: &'static str,
        message: String,
    },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest {
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn bad_field(path: &str, message: impl Into<String>, hint: impl Into<String>) -> Self {
        AppError::BadRequest {
            message: message.into(),
            details: vec![ApiErrorDetail::field(path, hint)],
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Http { status, .. } => *status,
            // startup-only
            AppError::Config(_)
            | AppError::InvalidAddress(_)
            | AppError::Bind(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::InvalidAddress(_) => "CONFIG_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::BadRequest { .. } => "BAD_REQUEST",
            AppError::Http { code, .. } => code,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();
        if status.is_server_error() {
            error!(%status, code, error = %self, "request failed");
        } else {
            warn!(%status, code, error = %self, "request rejected");
        }

        let (message, details) = match self {
            AppError::BadRequest { message, details } => (message, details),
            other => (other.to_string(), Vec::new()),
        };
        ApiResponse::<()>::error(code, message, details).into_response_with_status(status)
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Maps pipeline failures to HTTP statuses.
///
/// - blank/invalid input → `400 BAD_REQUEST`
/// - reviewer without API key → `503 MODEL_NOT_CONFIGURED`
/// - provider timeout → `504 LLM_TIMEOUT`
/// - any other provider failure → `502 LLM_UNAVAILABLE`
/// - unusable model answer → `502 INVALID_MODEL_RESPONSE`
impl From<ReviewerError> for AppError {
    fn from(err: ReviewerError) -> Self {
        match err {
            ReviewerError::Validation(msg) => AppError::bad_request(msg),
            ReviewerError::Parse(e) => AppError::Http {
                status: StatusCode::BAD_GATEWAY,
                code: "INVALID_MODEL_RESPONSE",
                message: format!("model answer could not be parsed: {e}"),
            },
            ReviewerError::Llm(AiLlmError::Provider(ProviderError {
                provider,
                kind: ProviderErrorKind::MissingApiKey,
            })) => AppError::Http {
                status: StatusCode::SERVICE_UNAVAILABLE,
                code: "MODEL_NOT_CONFIGURED",
                message: format!("{provider} reviewer has no API key configured"),
            },
            ReviewerError::Llm(AiLlmError::HttpTransport(e)) if e.is_timeout() => AppError::Http {
                status: StatusCode::GATEWAY_TIMEOUT,
                code: "LLM_TIMEOUT",
                message: "model provider did not answer in time".into(),
            },
            ReviewerError::Llm(e) => AppError::Http {
                status: StatusCode::BAD_GATEWAY,
                code: "LLM_UNAVAILABLE",
                message: e.to_string(),
            },
        }
    }
}
