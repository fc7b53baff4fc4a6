//! Solution view routes: navigation, hover and drawing download.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use uuid::Uuid;

use super::ApiError;
use crate::services::view::{self, ViewError, ViewSnapshot};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct StepBody {
    pub index: i64,
}

#[derive(Deserialize)]
pub struct HoverBody {
    /// `null` or absent clears hover.
    #[serde(default)]
    pub index: Option<i64>,
}

pub(crate) fn view_error_to_status(err: &ViewError) -> StatusCode {
    match err {
        ViewError::NotFound(_) | ViewError::NoDrawing => StatusCode::NOT_FOUND,
        ViewError::Empty(_) | ViewError::Superseded => StatusCode::CONFLICT,
    }
}

fn api_error(err: &ViewError) -> ApiError {
    ApiError::from_error(view_error_to_status(err), err)
}

/// `GET /api/views/:id`: current cursors and highlighted drawing.
pub async fn get_view(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<ViewSnapshot>, ApiError> {
    let snapshot = view::with_view_ref(&state, id, |v| v.snapshot())
        .await
        .map_err(|e| api_error(&e))?;
    Ok(Json(snapshot))
}

/// `DELETE /api/views/:id`: discard the view.
pub async fn delete_view(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode, ApiError> {
    view::remove_view(&state, id)
        .await
        .map_err(|e| api_error(&e))?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/views/:id/step`: jump to a step (clamped).
pub async fn set_step(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<StepBody>,
) -> Result<Json<ViewSnapshot>, ApiError> {
    let snapshot = view::with_view(&state, id, |v| {
        v.set_current_step(body.index)?;
        v.snapshot()
    })
    .await
    .map_err(|e| api_error(&e))?;
    Ok(Json(snapshot))
}

/// `POST /api/views/:id/next`: advance one step; no-op on the last step.
pub async fn next_step(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<ViewSnapshot>, ApiError> {
    let snapshot = view::with_view(&state, id, |v| {
        v.next()?;
        v.snapshot()
    })
    .await
    .map_err(|e| api_error(&e))?;
    Ok(Json(snapshot))
}

/// `POST /api/views/:id/prev`: go back one step; no-op on the first step.
pub async fn prev_step(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<ViewSnapshot>, ApiError> {
    let snapshot = view::with_view(&state, id, |v| {
        v.prev()?;
        v.snapshot()
    })
    .await
    .map_err(|e| api_error(&e))?;
    Ok(Json(snapshot))
}

/// `POST /api/views/:id/hover`: set or clear pointer focus.
pub async fn hover_step(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<HoverBody>,
) -> Result<Json<ViewSnapshot>, ApiError> {
    let snapshot = view::with_view(&state, id, |v| {
        v.set_hovered_step(body.index)?;
        v.snapshot()
    })
    .await
    .map_err(|e| api_error(&e))?;
    Ok(Json(snapshot))
}

/// `GET /api/views/:id/drawing.svg`: byte-exact drawing download.
pub async fn download_drawing(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Response, ApiError> {
    let file = view::with_view_ref(&state, id, |v| v.download())
        .await
        .map_err(|e| api_error(&e))?;

    let disposition = format!("attachment; filename=\"{}\"", file.name);
    Ok((
        [(CONTENT_TYPE, file.mime_type.to_owned()), (CONTENT_DISPOSITION, disposition)],
        file.bytes,
    )
        .into_response())
}

#[cfg(test)]
#[path = "views_test.rs"]
mod tests;
