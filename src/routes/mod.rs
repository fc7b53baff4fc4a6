//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! JSON API consumed by the viewer: one endpoint starts a solve, the rest
//! drive the cursors of a solution view and fetch its drawing. Errors are
//! returned as `{ "error": { "code", "message", "retryable" } }`.

pub mod solve;
pub mod views;

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ErrorCode;
use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/solve", post(solve::solve))
        .route("/api/views/{id}", get(views::get_view).delete(views::delete_view))
        .route("/api/views/{id}/step", post(views::set_step))
        .route("/api/views/{id}/next", post(views::next_step))
        .route("/api/views/{id}/prev", post(views::prev_step))
        .route("/api/views/{id}/hover", post(views::hover_step))
        .route("/api/views/{id}/drawing.svg", get(views::download_drawing))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

// =============================================================================
// ERROR RESPONSES
// =============================================================================

/// Structured error body with an HTTP status.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub retryable: bool,
}

impl ApiError {
    pub fn from_error(status: StatusCode, err: &(impl ErrorCode + ?Sized)) -> Self {
        Self { status, code: err.error_code(), message: err.to_string(), retryable: err.retryable() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": { "code": self.code, "message": self.message, "retryable": self.retryable }
        });
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
