//! Step/drawing synchronizer.
//!
//! DESIGN
//! ======
//! Two cursors point into the explanation: `current_step` moves only on
//! explicit navigation, `hovered_step` follows transient pointer focus and
//! wins while present. Transitions are pure; the only side effect is
//! [`apply_highlight`], which rewrites the marker class on a [`ClassTree`].
//!
//! Highlighting is "clear all, then mark one" rather than a toggle, so it is
//! idempotent and leaves at most one marked element no matter what state
//! the tree was in.

use crate::drawing::{ClassTree, HIGHLIGHT_CLASS, step_element_id};
use crate::solution::Solution;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    #[error("no solution has been loaded")]
    Uninitialized,
}

impl crate::error::ErrorCode for SyncError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Uninitialized => "E_SYNC_UNINITIALIZED",
        }
    }
}

/// Cursor state for one solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursors {
    step_count: usize,
    current_step: usize,
    hovered_step: Option<usize>,
}

impl Cursors {
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    #[must_use]
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    #[must_use]
    pub fn hovered_step(&self) -> Option<usize> {
        self.hovered_step
    }

    fn clamp(&self, index: i64) -> usize {
        let last = self.step_count.saturating_sub(1);
        usize::try_from(index.max(0)).map_or(last, |i| i.min(last))
    }
}

/// Tracks the active step of the displayed solution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Synchronizer {
    #[default]
    Uninitialized,
    Initialized(Cursors),
}

impl Synchronizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a freshly received solution at its first step.
    pub fn on_solution_arrived(&mut self, solution: &Solution) {
        *self = Self::Initialized(Cursors {
            step_count: solution.step_count().max(1),
            current_step: 0,
            hovered_step: None,
        });
    }

    /// Forget the current solution.
    pub fn reset(&mut self) {
        *self = Self::Uninitialized;
    }

    #[must_use]
    pub fn cursors(&self) -> Option<&Cursors> {
        match self {
            Self::Uninitialized => None,
            Self::Initialized(c) => Some(c),
        }
    }

    fn cursors_mut(&mut self) -> Result<&mut Cursors, SyncError> {
        match self {
            Self::Uninitialized => Err(SyncError::Uninitialized),
            Self::Initialized(c) => Ok(c),
        }
    }

    /// Jump to `index`, clamped into the valid step range.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Uninitialized`] before any solution has arrived.
    pub fn set_current_step(&mut self, index: i64) -> Result<usize, SyncError> {
        let cursors = self.cursors_mut()?;
        let step = cursors.clamp(index);
        cursors.current_step = step;
        Ok(step)
    }

    /// Advance one step. Returns `false` (and changes nothing) on the last step.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Uninitialized`] before any solution has arrived.
    pub fn next(&mut self) -> Result<bool, SyncError> {
        let cursors = self.cursors_mut()?;
        if cursors.current_step + 1 >= cursors.step_count {
            return Ok(false);
        }
        cursors.current_step += 1;
        Ok(true)
    }

    /// Go back one step. Returns `false` (and changes nothing) on the first step.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Uninitialized`] before any solution has arrived.
    pub fn prev(&mut self) -> Result<bool, SyncError> {
        let cursors = self.cursors_mut()?;
        if cursors.current_step == 0 {
            return Ok(false);
        }
        cursors.current_step -= 1;
        Ok(true)
    }

    #[must_use]
    pub fn can_next(&self) -> bool {
        self.cursors()
            .is_some_and(|c| c.current_step + 1 < c.step_count)
    }

    #[must_use]
    pub fn can_prev(&self) -> bool {
        self.cursors().is_some_and(|c| c.current_step > 0)
    }

    /// Set or clear pointer focus. Out-of-range indices are clamped.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Uninitialized`] before any solution has arrived.
    pub fn set_hovered_step(&mut self, index: Option<i64>) -> Result<Option<usize>, SyncError> {
        let cursors = self.cursors_mut()?;
        let hovered = index.map(|i| cursors.clamp(i));
        cursors.hovered_step = hovered;
        Ok(hovered)
    }

    /// The step whose drawing element should carry the highlight.
    #[must_use]
    pub fn active_highlight_index(&self) -> Option<usize> {
        self.cursors()
            .map(|c| c.hovered_step.unwrap_or(c.current_step))
    }

    /// Element id of the active step, e.g. `step-3`.
    #[must_use]
    pub fn active_element_id(&self) -> Option<String> {
        self.active_highlight_index().map(step_element_id)
    }
}

/// Mark the element drawing step `index` and unmark everything else.
///
/// Returns whether an element was marked; a step with no drawn counterpart
/// leaves the tree with no marked element.
pub fn apply_highlight<T: ClassTree>(tree: &mut T, index: usize) -> bool {
    clear_highlight(tree);
    match tree.find_by_id(&step_element_id(index)) {
        Some(target) => {
            tree.add_class(target, HIGHLIGHT_CLASS);
            true
        }
        None => false,
    }
}

/// Remove the marker from every element carrying it.
pub fn clear_highlight<T: ClassTree>(tree: &mut T) {
    for handle in tree.with_class(HIGHLIGHT_CLASS) {
        tree.remove_class(handle, HIGHLIGHT_CLASS);
    }
}

#[cfg(test)]
#[path = "sync_test.rs"]
mod tests;
