//! Error codes shared by service errors and HTTP error bodies.

/// Grepable error code and retryable flag for structured error responses.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}
