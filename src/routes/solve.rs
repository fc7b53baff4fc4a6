//! `POST /api/solve`: solve a problem into a view.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ApiError;
use crate::services::solve::{self, ProblemImage, SolveError};
use crate::services::view::ViewSnapshot;
use crate::solution::Solution;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SolveBody {
    /// Existing view to replace; a new view is created when absent.
    pub view_id: Option<Uuid>,
    pub text: Option<String>,
    pub image: Option<ImageBody>,
}

/// Uploaded image. `data` is base64, optionally as a `data:` URL.
#[derive(Deserialize)]
pub struct ImageBody {
    pub data: String,
    #[serde(default)]
    pub mime_type: String,
}

#[derive(Serialize)]
pub struct SolveResponse {
    pub view_id: Uuid,
    pub solution: Solution,
    pub embed_url: Option<String>,
    pub view: ViewSnapshot,
}

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("image data is not valid base64: {0}")]
    InvalidBase64(String),
    #[error("unsupported image type '{0}'")]
    UnsupportedType(String),
}

impl crate::error::ErrorCode for ImageError {
    fn error_code(&self) -> &'static str {
        "E_INVALID_IMAGE"
    }
}

/// Decode an uploaded image, accepting raw base64 or a `data:<mime>;base64,` URL.
///
/// # Errors
///
/// Returns [`ImageError`] for undecodable data or a non-image mime type.
pub fn decode_image(body: &ImageBody) -> Result<ProblemImage, ImageError> {
    let (mime_type, payload) = match body.data.strip_prefix("data:") {
        Some(rest) => {
            let (header, payload) = rest.split_once(',').unwrap_or((rest, ""));
            let header_mime = header.split(';').next().unwrap_or_default();
            let mime = if body.mime_type.is_empty() { header_mime } else { body.mime_type.as_str() };
            (mime, payload)
        }
        None => (body.mime_type.as_str(), body.data.as_str()),
    };

    if !mime_type.starts_with("image/") {
        return Err(ImageError::UnsupportedType(mime_type.to_owned()));
    }
    let bytes = BASE64
        .decode(payload.trim())
        .map_err(|e| ImageError::InvalidBase64(e.to_string()))?;

    Ok(ProblemImage { mime_type: mime_type.to_owned(), bytes })
}

pub(crate) fn solve_error_to_status(err: &SolveError) -> StatusCode {
    match err {
        SolveError::NoInputProvided => StatusCode::BAD_REQUEST,
        SolveError::MalformedResponse(_) | SolveError::Provider(_) => StatusCode::BAD_GATEWAY,
        SolveError::LlmNotConfigured => StatusCode::SERVICE_UNAVAILABLE,
        SolveError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
        SolveError::ViewClosed(_) | SolveError::Superseded(_) => StatusCode::CONFLICT,
    }
}

/// `POST /api/solve`: run the model and display the result in a view.
pub async fn solve(
    State(state): State<AppState>,
    Json(body): Json<SolveBody>,
) -> Result<Json<SolveResponse>, ApiError> {
    let image = body
        .image
        .as_ref()
        .map(decode_image)
        .transpose()
        .map_err(|e| ApiError::from_error(StatusCode::BAD_REQUEST, &e))?;

    let outcome = solve::solve_into_view(&state, body.view_id, body.text.as_deref(), image.as_ref())
        .await
        .map_err(|e| ApiError::from_error(solve_error_to_status(&e), &e))?;

    Ok(Json(SolveResponse {
        view_id: outcome.view_id,
        embed_url: outcome.solution.embed_url(),
        solution: outcome.solution,
        view: outcome.view,
    }))
}

#[cfg(test)]
#[path = "solve_test.rs"]
mod tests;
