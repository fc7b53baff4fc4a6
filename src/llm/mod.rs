//! LLM: Gemini adapter for solving problems.
//!
//! DESIGN
//! ======
//! The solve service depends on the [`SolutionModel`] trait, never on a
//! concrete client. [`GeminiClient`] is built explicitly from an
//! [`config::LlmConfig`] that carries the credential, so tests can swap in a
//! mock and nothing reads the API key from ambient state at call time.

pub mod config;
pub mod gemini;
pub mod prompt;
pub mod types;

pub use gemini::GeminiClient;
pub use types::{GenerateRequest, LlmError, Part, SolutionModel};
