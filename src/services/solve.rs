//! Solve service: problem input → model call → normalized solution.
//!
//! DESIGN
//! ======
//! Validates that the user supplied text or an image before anything touches
//! the network, wraps the input as model parts (image inline as base64),
//! and normalizes the reply. Every failure ends up as one `SolveError` whose
//! message is safe to show the user.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::ErrorCode;
use crate::llm::prompt::{SYSTEM_INSTRUCTION, problem_text, response_schema};
use crate::llm::{GenerateRequest, LlmError, Part, SolutionModel};
use crate::rate_limit::RateLimitError;
use crate::services::view::{self, ViewError, ViewSnapshot};
use crate::solution::{MalformedResponse, Solution, normalize};
use crate::state::AppState;

// =============================================================================
// TYPES
// =============================================================================

/// An uploaded problem image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum SolveError {
    #[error("No problem provided. Please enter text or upload an image.")]
    NoInputProvided,
    #[error(
        "The AI returned an invalid response structure. This can happen with complex problems. Please try again or rephrase your query."
    )]
    MalformedResponse(#[source] MalformedResponse),
    #[error("Failed to get solution from Gemini: {0}")]
    Provider(#[from] LlmError),
    #[error("LLM not configured")]
    LlmNotConfigured,
    #[error("rate limited: {0}")]
    RateLimited(String),
    #[error("view {0} was closed before the solution arrived")]
    ViewClosed(Uuid),
    #[error("a newer request for view {0} replaced this one")]
    Superseded(Uuid),
}

impl ErrorCode for SolveError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NoInputProvided => "E_NO_INPUT",
            Self::MalformedResponse(_) => "E_MALFORMED_RESPONSE",
            Self::Provider(_) => "E_LLM_ERROR",
            Self::LlmNotConfigured => "E_LLM_NOT_CONFIGURED",
            Self::RateLimited(_) => "E_RATE_LIMITED",
            Self::ViewClosed(_) => "E_VIEW_CLOSED",
            Self::Superseded(_) => "E_SOLVE_SUPERSEDED",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Provider(e) if e.retryable()) || matches!(self, Self::RateLimited(_))
    }
}

impl From<RateLimitError> for SolveError {
    fn from(e: RateLimitError) -> Self {
        Self::RateLimited(e.to_string())
    }
}

/// Result of solving into a view.
#[derive(Debug)]
pub struct SolveOutcome {
    pub view_id: Uuid,
    pub solution: Solution,
    pub view: ViewSnapshot,
}

// =============================================================================
// SOLVE
// =============================================================================

/// Turn user input into model parts.
///
/// # Errors
///
/// Returns [`SolveError::NoInputProvided`] when both inputs are blank.
pub fn build_parts(text: Option<&str>, image: Option<&ProblemImage>) -> Result<Vec<Part>, SolveError> {
    let mut parts = Vec::new();
    if let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) {
        parts.push(Part::Text(problem_text(text)));
    }
    if let Some(image) = image.filter(|img| !img.bytes.is_empty()) {
        parts.push(Part::InlineData { mime_type: image.mime_type.clone(), data: BASE64.encode(&image.bytes) });
    }
    if parts.is_empty() {
        return Err(SolveError::NoInputProvided);
    }
    Ok(parts)
}

/// Ask the model to solve a problem and normalize its answer.
///
/// # Errors
///
/// Returns [`SolveError`] for missing input, provider failures, or output
/// that is not a JSON object.
pub async fn solve(
    model: &dyn SolutionModel,
    text: Option<&str>,
    image: Option<&ProblemImage>,
) -> Result<Solution, SolveError> {
    let parts = build_parts(text, image)?;
    let request =
        GenerateRequest { system: SYSTEM_INSTRUCTION.to_owned(), parts, response_schema: response_schema() };

    info!(
        text_len = text.map_or(0, str::len),
        has_image = image.is_some(),
        "solve: request sent"
    );

    let raw = model.generate(&request).await.map_err(|e| {
        warn!(error = %e, "solve: model call failed");
        SolveError::Provider(e)
    })?;

    let solution = normalize(&raw).map_err(|e| {
        warn!(error = %e, response_len = raw.len(), "solve: malformed model response");
        SolveError::MalformedResponse(e)
    })?;

    info!(
        steps = solution.step_count(),
        has_drawing = solution.drawing_svg.is_some(),
        has_video = solution.video_url.is_some(),
        "solve: solution ready"
    );
    Ok(solution)
}

/// Solve and display the result in a view.
///
/// The target view is cleared as soon as the request starts and stays
/// cleared if solving fails. A later request for the same view supersedes
/// this one: its result is dropped instead of loaded.
///
/// # Errors
///
/// Returns [`SolveError`] if the model is not configured, the caller is
/// rate limited, or solving fails.
pub async fn solve_into_view(
    state: &AppState,
    view_id: Option<Uuid>,
    text: Option<&str>,
    image: Option<&ProblemImage>,
) -> Result<SolveOutcome, SolveError> {
    let Some(model) = state.llm.clone() else {
        return Err(SolveError::LlmNotConfigured);
    };

    // Input errors surface before quota is spent.
    build_parts(text, image)?;

    let view_id = view_id.unwrap_or_else(Uuid::new_v4);
    state.rate_limiter.check_and_record(view_id)?;
    let ticket = view::begin_request(state, Some(view_id)).await;

    let solution = solve(model.as_ref(), text, image).await?;

    let loaded = solution.clone();
    let snapshot = view::with_view(state, view_id, move |v| {
        v.load_for(ticket.request_id, loaded)?;
        v.snapshot()
    })
    .await;

    let view = snapshot.map_err(|e| match e {
        ViewError::Superseded => {
            info!(%view_id, "solve: result dropped, newer request owns the view");
            SolveError::Superseded(view_id)
        }
        other => {
            warn!(%view_id, error = %other, "solve: view closed before solution arrived");
            SolveError::ViewClosed(view_id)
        }
    })?;

    info!(%view_id, steps = solution.step_count(), "solve: view initialized");
    Ok(SolveOutcome { view_id, solution, view })
}

#[cfg(test)]
#[path = "solve_test.rs"]
mod tests;
