//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the solve orchestration and the per-view step state
//! so route handlers stay focused on protocol translation.

pub mod solve;
pub mod view;
