//! Gemini client settings, read from the environment.
//!
//! The key itself never has a fixed variable name: `LLM_API_KEY_ENV` says
//! where to look, falling back to `GEMINI_API_KEY`.

use std::time::Duration;

use super::types::LlmError;

pub const DEFAULT_API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Large drawings take a while to generate.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LlmTimeouts {
    pub request: Duration,
    pub connect: Duration,
}

impl Default for LlmTimeouts {
    fn default() -> Self {
        Self { request: DEFAULT_REQUEST_TIMEOUT, connect: DEFAULT_CONNECT_TIMEOUT }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    pub api_key: String,
    pub model: String,
    /// Version root of the Generative Language API, without trailing slash.
    pub base_url: String,
    pub timeouts: LlmTimeouts,
}

impl LlmConfig {
    /// Config with defaults for everything but the credential.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_GEMINI_MODEL.to_owned(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_owned(),
            timeouts: LlmTimeouts::default(),
        }
    }

    /// Read `LLM_API_KEY_ENV` (or `GEMINI_API_KEY`), `LLM_MODEL`,
    /// `LLM_BASE_URL`, `LLM_REQUEST_TIMEOUT_SECS` and
    /// `LLM_CONNECT_TIMEOUT_SECS`. Unparseable timeouts keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::MissingApiKey`] when the key variable is unset or
    /// blank, and [`LlmError::InvalidConfig`] for a non-http base URL.
    pub fn from_env() -> Result<Self, LlmError> {
        let key_var = non_blank_var("LLM_API_KEY_ENV").unwrap_or_else(|| DEFAULT_API_KEY_VAR.to_owned());
        let Some(api_key) = non_blank_var(&key_var) else {
            return Err(LlmError::MissingApiKey { var: key_var });
        };

        let mut config = Self::new(api_key);
        if let Some(model) = non_blank_var("LLM_MODEL") {
            config.model = model;
        }
        if let Some(url) = non_blank_var("LLM_BASE_URL") {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(LlmError::InvalidConfig(format!("LLM_BASE_URL is not an http(s) URL: {url}")));
            }
            config.base_url = url.trim_end_matches('/').to_owned();
        }
        if let Some(request) = secs_var("LLM_REQUEST_TIMEOUT_SECS") {
            config.timeouts.request = request;
        }
        if let Some(connect) = secs_var("LLM_CONNECT_TIMEOUT_SECS") {
            config.timeouts.connect = connect;
        }
        Ok(config)
    }
}

fn non_blank_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn secs_var(key: &str) -> Option<Duration> {
    non_blank_var(key)?
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
