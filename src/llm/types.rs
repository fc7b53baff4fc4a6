//! LLM types: request parts, the model trait, and errors.

use serde_json::Value;

// =============================================================================
// ERROR
// =============================================================================

/// Everything that can go wrong between building a client and getting text
/// back from the model.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("invalid model configuration: {0}")]
    InvalidConfig(String),

    /// No usable credential in the named environment variable.
    #[error("no API key found in {var}")]
    MissingApiKey { var: String },

    /// Could not reach the provider, or the connection dropped.
    #[error("could not reach the model: {0}")]
    Transport(String),

    /// Non-200 reply. `body` is kept for logs, not shown to users.
    #[error("model service answered HTTP {status}")]
    Status { status: u16, body: String },

    #[error("unreadable model reply: {0}")]
    Decode(String),

    /// A well-formed reply without any text (safety block, empty candidate).
    #[error("model returned no content ({0})")]
    NoContent(String),

    #[error("could not build HTTP client: {0}")]
    ClientBuild(String),
}

impl crate::error::ErrorCode for LlmError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "E_LLM_CONFIG",
            Self::MissingApiKey { .. } => "E_MISSING_API_KEY",
            Self::Transport(_) => "E_LLM_TRANSPORT",
            Self::Status { .. } => "E_LLM_STATUS",
            Self::Decode(_) => "E_LLM_DECODE",
            Self::NoContent(_) => "E_LLM_NO_CONTENT",
            Self::ClientBuild(_) => "E_LLM_CLIENT_BUILD",
        }
    }

    /// Throttling, overload and dropped connections may clear up on their own.
    fn retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status, .. } => *status == 429 || (500..600).contains(status),
            _ => false,
        }
    }
}

// =============================================================================
// REQUEST
// =============================================================================

/// One piece of user content sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Text(String),
    /// Binary payload, already base64-encoded.
    InlineData { mime_type: String, data: String },
}

/// A single structured-output generation request.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub system: String,
    pub parts: Vec<Part>,
    /// JSON schema the response must follow.
    pub response_schema: Value,
}

// =============================================================================
// MODEL TRAIT
// =============================================================================

/// Provider-neutral async trait for one-shot generation. Enables mocking in tests.
#[async_trait::async_trait]
pub trait SolutionModel: Send + Sync {
    /// Send a generation request and return the raw response text.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails or the response carries
    /// no text.
    async fn generate(&self, request: &GenerateRequest) -> Result<String, LlmError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
