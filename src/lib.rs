//! E-Genius server library.
//!
//! Solves engineering graphics problems with a generative model and keeps
//! each displayed solution's explanation steps in sync with its drawing.

pub mod drawing;
pub mod error;
pub mod llm;
pub mod rate_limit;
pub mod routes;
pub mod services;
pub mod solution;
pub mod state;
pub mod sync;
pub mod video;
