//! Solution drawings: SVG tree, step addressing and export.
//!
//! DESIGN
//! ======
//! Model-generated SVG is parsed once into an [`SvgDocument`]. Highlighting
//! only ever needs three capabilities (find by id, list by class, toggle a
//! class), so callers go through the narrow [`ClassTree`] trait rather than
//! the concrete tree. Step `N` (1-based) is drawn by the element with
//! `id="step-N"`.

pub mod parse;
pub mod render;
pub mod tree;

pub use parse::{SvgParseError, parse};
pub use tree::{NodeId, SvgDocument};

use crate::solution::Solution;

/// Class toggled on the element of the active step.
pub const HIGHLIGHT_CLASS: &str = "highlight-step";

pub const DOWNLOAD_FILE_NAME: &str = "egenius-drawing.svg";
pub const DOWNLOAD_MIME_TYPE: &str = "image/svg+xml";

/// Element id that draws the step at zero-based `index`.
#[must_use]
pub fn step_element_id(index: usize) -> String {
    format!("step-{}", index + 1)
}

// =============================================================================
// CLASS TREE
// =============================================================================

/// Minimal tree capability needed to mark step elements.
pub trait ClassTree {
    type Handle: Copy;

    fn find_by_id(&self, id: &str) -> Option<Self::Handle>;

    fn with_class(&self, class: &str) -> Vec<Self::Handle>;

    fn add_class(&mut self, handle: Self::Handle, class: &str);

    fn remove_class(&mut self, handle: Self::Handle, class: &str);
}

impl ClassTree for SvgDocument {
    type Handle = NodeId;

    fn find_by_id(&self, id: &str) -> Option<NodeId> {
        SvgDocument::find_by_id(self, id)
    }

    fn with_class(&self, class: &str) -> Vec<NodeId> {
        self.elements_with_class(class)
    }

    fn add_class(&mut self, handle: NodeId, class: &str) {
        if let Some(el) = self.element_mut(handle) {
            el.add_class(class);
        }
    }

    fn remove_class(&mut self, handle: NodeId, class: &str) {
        if let Some(el) = self.element_mut(handle) {
            el.remove_class(class);
        }
    }
}

// =============================================================================
// EXPORT
// =============================================================================

/// A downloadable copy of a solution drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawingFile {
    pub name: &'static str,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Byte-exact export of the solution's drawing; `None` when there is none.
#[must_use]
pub fn download_drawing(solution: &Solution) -> Option<DrawingFile> {
    solution.drawing_svg.as_ref().map(|svg| DrawingFile {
        name: DOWNLOAD_FILE_NAME,
        mime_type: DOWNLOAD_MIME_TYPE,
        bytes: svg.as_bytes().to_vec(),
    })
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
