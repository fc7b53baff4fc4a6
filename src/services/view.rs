//! Solution views: host state for one displayed solution.
//!
//! DESIGN
//! ======
//! A view owns the current `Solution`, its drawing parsed once into an
//! `SvgDocument`, and the `Synchronizer`. Every cursor change goes through
//! the view so the highlight is reapplied in the same call; callers hold the
//! views write lock across "mutate cursor, apply highlight", which keeps a
//! stale request from touching a newer solution's cursors.
//!
//! A drawing that does not parse is still served and downloadable; it just
//! cannot be highlighted.
//!
//! Each solve request stamps its view with a fresh request id. Only the
//! newest request may load its result, so a slow older solve finishing
//! last cannot overwrite the solution of a newer one. Views nobody has
//! touched for `AppState::view_idle_ttl` are evicted when the next solve
//! request opens a view.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::drawing::{self, DrawingFile, SvgDocument};
use crate::solution::Solution;
use crate::state::AppState;
use crate::sync::{SyncError, Synchronizer, apply_highlight, clear_highlight};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("view not found: {0}")]
    NotFound(Uuid),
    #[error("view has no solution loaded")]
    Empty(#[from] SyncError),
    #[error("solution has no drawing")]
    NoDrawing,
    #[error("a newer solve request replaced this one")]
    Superseded,
}

impl crate::error::ErrorCode for ViewError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "E_VIEW_NOT_FOUND",
            Self::Empty(_) => "E_VIEW_EMPTY",
            Self::NoDrawing => "E_NO_DRAWING",
            Self::Superseded => "E_SOLVE_SUPERSEDED",
        }
    }
}

/// Serializable view of the cursors and the highlighted drawing.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ViewSnapshot {
    pub step_count: usize,
    pub current_step: usize,
    pub hovered_step: Option<usize>,
    pub active_step: usize,
    pub can_prev: bool,
    pub can_next: bool,
    /// Id of the element carrying the highlight, if the active step is drawn.
    pub highlight_id: Option<String>,
    /// Drawing markup with the highlight applied.
    pub drawing: Option<String>,
}

#[derive(Debug)]
pub struct SolutionView {
    solution: Option<Solution>,
    drawing: Option<SvgDocument>,
    sync: Synchronizer,
    /// Solve request allowed to load into this view.
    request: Option<Uuid>,
    /// Last access; behind a mutex so readers can refresh it too.
    touched: Mutex<Instant>,
}

impl Default for SolutionView {
    fn default() -> Self {
        Self {
            solution: None,
            drawing: None,
            sync: Synchronizer::default(),
            request: None,
            touched: Mutex::new(Instant::now()),
        }
    }
}

/// Handle for one solve request against a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    pub view_id: Uuid,
    pub request_id: Uuid,
}

// =============================================================================
// VIEW
// =============================================================================

impl SolutionView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }

    /// Display a new solution, resetting cursors to its first step.
    pub fn load(&mut self, solution: Solution) {
        self.drawing = solution
            .drawing_svg
            .as_deref()
            .and_then(|svg| match drawing::parse(svg) {
                Ok(doc) => Some(doc),
                Err(e) => {
                    warn!(error = %e, svg_len = svg.len(), "view: drawing not parseable, highlighting disabled");
                    None
                }
            });
        self.sync.on_solution_arrived(&solution);
        self.solution = Some(solution);
        self.refresh();
    }

    /// Load the result of solve `request`, unless a newer request has
    /// claimed the view since.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Superseded`] for a stale request.
    pub fn load_for(&mut self, request: Uuid, solution: Solution) -> Result<(), ViewError> {
        if self.request != Some(request) {
            return Err(ViewError::Superseded);
        }
        self.load(solution);
        Ok(())
    }

    fn touch(&self, now: Instant) {
        *self
            .touched
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = now;
    }

    fn idle_for(&self, now: Instant) -> Duration {
        let touched = *self
            .touched
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        now.saturating_duration_since(touched)
    }

    /// Drop the displayed solution and its cursors.
    pub fn clear(&mut self) {
        self.solution = None;
        self.drawing = None;
        self.sync.reset();
    }

    /// # Errors
    ///
    /// Returns [`ViewError::Empty`] when no solution is loaded.
    pub fn set_current_step(&mut self, index: i64) -> Result<(), ViewError> {
        self.sync.set_current_step(index)?;
        self.refresh();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`ViewError::Empty`] when no solution is loaded.
    pub fn next(&mut self) -> Result<bool, ViewError> {
        let moved = self.sync.next()?;
        self.refresh();
        Ok(moved)
    }

    /// # Errors
    ///
    /// Returns [`ViewError::Empty`] when no solution is loaded.
    pub fn prev(&mut self) -> Result<bool, ViewError> {
        let moved = self.sync.prev()?;
        self.refresh();
        Ok(moved)
    }

    /// # Errors
    ///
    /// Returns [`ViewError::Empty`] when no solution is loaded.
    pub fn set_hovered_step(&mut self, index: Option<i64>) -> Result<(), ViewError> {
        self.sync.set_hovered_step(index)?;
        self.refresh();
        Ok(())
    }

    fn refresh(&mut self) {
        let Some(doc) = self.drawing.as_mut() else {
            return;
        };
        match self.sync.active_highlight_index() {
            Some(index) => {
                apply_highlight(doc, index);
            }
            None => clear_highlight(doc),
        }
    }

    /// Drawing markup with the current highlight, or the raw markup when it
    /// could not be parsed.
    #[must_use]
    pub fn drawing_markup(&self) -> Option<String> {
        match &self.drawing {
            Some(doc) => Some(doc.to_markup()),
            None => self
                .solution
                .as_ref()
                .and_then(|s| s.drawing_svg.clone()),
        }
    }

    /// Byte-exact drawing download.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Empty`] or [`ViewError::NoDrawing`].
    pub fn download(&self) -> Result<DrawingFile, ViewError> {
        let solution = self
            .solution
            .as_ref()
            .ok_or(ViewError::Empty(SyncError::Uninitialized))?;
        drawing::download_drawing(solution).ok_or(ViewError::NoDrawing)
    }

    /// # Errors
    ///
    /// Returns [`ViewError::Empty`] when no solution is loaded.
    pub fn snapshot(&self) -> Result<ViewSnapshot, ViewError> {
        let cursors = self
            .sync
            .cursors()
            .ok_or(ViewError::Empty(SyncError::Uninitialized))?;
        let active_step = cursors.hovered_step().unwrap_or(cursors.current_step());
        let highlight_id = self.drawing.as_ref().and_then(|doc| {
            let id = drawing::step_element_id(active_step);
            doc.find_by_id(&id).map(|_| id)
        });

        Ok(ViewSnapshot {
            step_count: cursors.step_count(),
            current_step: cursors.current_step(),
            hovered_step: cursors.hovered_step(),
            active_step,
            can_prev: self.sync.can_prev(),
            can_next: self.sync.can_next(),
            highlight_id,
            drawing: self.drawing_markup(),
        })
    }
}

// =============================================================================
// VIEW REGISTRY
// =============================================================================

/// Clear the view for a new solve request, creating it when `view_id` is
/// absent or unknown. Any request still in flight for the view is
/// superseded.
pub async fn begin_request(state: &AppState, view_id: Option<Uuid>) -> RequestTicket {
    begin_request_at(state, view_id, Instant::now()).await
}

pub(crate) async fn begin_request_at(state: &AppState, view_id: Option<Uuid>, now: Instant) -> RequestTicket {
    let ticket = RequestTicket { view_id: view_id.unwrap_or_else(Uuid::new_v4), request_id: Uuid::new_v4() };
    let ttl = state.view_idle_ttl;
    let mut views = state.views.write().await;

    let before = views.len();
    views.retain(|id, v| *id == ticket.view_id || v.idle_for(now) <= ttl);
    let evicted = before - views.len();
    if evicted > 0 {
        info!(evicted, remaining = views.len(), "view: evicted idle views");
    }

    let view = views.entry(ticket.view_id).or_default();
    view.clear();
    view.request = Some(ticket.request_id);
    view.touch(now);
    ticket
}

/// Run `f` against a view while holding the registry write lock.
///
/// # Errors
///
/// Returns [`ViewError::NotFound`] for unknown ids, or whatever `f` returns.
pub async fn with_view<R>(
    state: &AppState,
    view_id: Uuid,
    f: impl FnOnce(&mut SolutionView) -> Result<R, ViewError>,
) -> Result<R, ViewError> {
    let mut views = state.views.write().await;
    let view = views
        .get_mut(&view_id)
        .ok_or(ViewError::NotFound(view_id))?;
    view.touch(Instant::now());
    f(view)
}

/// Read-only access to a view under the registry read lock.
///
/// # Errors
///
/// Returns [`ViewError::NotFound`] for unknown ids, or whatever `f` returns.
pub async fn with_view_ref<R>(
    state: &AppState,
    view_id: Uuid,
    f: impl FnOnce(&SolutionView) -> Result<R, ViewError>,
) -> Result<R, ViewError> {
    let views = state.views.read().await;
    let view = views
        .get(&view_id)
        .ok_or(ViewError::NotFound(view_id))?;
    view.touch(Instant::now());
    f(view)
}

/// Remove a view entirely.
///
/// # Errors
///
/// Returns [`ViewError::NotFound`] for unknown ids.
pub async fn remove_view(state: &AppState, view_id: Uuid) -> Result<(), ViewError> {
    let mut views = state.views.write().await;
    views
        .remove(&view_id)
        .map(|_| ())
        .ok_or(ViewError::NotFound(view_id))
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
