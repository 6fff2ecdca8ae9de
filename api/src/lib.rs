//! HTTP surface for the paper review backend.
//!
//! Routes:
//! - `GET  /health`
//! - `POST /review`             review a manuscript with gemini, qwen or both
//! - `POST /issues/compare`     pair two issue lists (no model call)
//! - `POST /issues/rank`        order issues by severity (no model call)
//! - `POST /issues/suggestion`  per-issue revision advice from one model
//!
//! Every answer uses the [`ApiResponse`](core::http::response_envelope::ApiResponse)
//! envelope.

use std::{env, net::SocketAddr, sync::Arc};

pub mod core;
pub mod error_handler;
mod middleware_layer;
mod routes;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tokio::signal;
use tracing::{info, warn};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    middleware_layer::json_extractor::json_error_mapper,
    routes::{
        health_route::health_route,
        issues::{
            compare_route::compare_issues_route, rank_route::rank_issues_route,
            suggestion_route::suggestion_route,
        },
        review::review_route::review_route,
    },
};

pub const DEFAULT_API_ADDRESS: &str = "0.0.0.0:8080";

/// Builds the application router around shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_route))
        .route("/review", post(review_route))
        .route("/issues/compare", post(compare_issues_route))
        .route("/issues/rank", post(rank_issues_route))
        .route("/issues/suggestion", post(suggestion_route))
        .layer(middleware::from_fn(json_error_mapper))
        .with_state(state)
}

/// Loads state from the environment, binds `API_ADDRESS` and serves until Ctrl+C.
pub async fn start() -> AppResult<()> {
    let host_url = env::var("API_ADDRESS").unwrap_or_else(|_| DEFAULT_API_ADDRESS.to_string());
    let addr: SocketAddr = host_url
        .parse()
        .map_err(|_| AppError::InvalidAddress(host_url.clone()))?;

    let state = Arc::new(AppState::from_env()?);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(AppError::Bind)?;
    info!(%addr, "api listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("api stopped");
    Ok(())
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
