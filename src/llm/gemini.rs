//! Gemini `generateContent` client.
//!
//! Thin HTTP wrapper. Request building and response parsing are pure
//! functions for testability.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::config::LlmConfig;
use super::types::{GenerateRequest, LlmError, Part, SolutionModel};

// =============================================================================
// CLIENT
// =============================================================================

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Build a client from environment variables (see [`LlmConfig::from_env`]).
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::new(LlmConfig::from_env()?)
    }

    /// Build a client holding the configured credential.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeouts.request)
            .connect_timeout(config.timeouts.connect)
            .build()
            .map_err(|e| LlmError::ClientBuild(e.to_string()))?;
        Ok(Self { http, api_key: config.api_key, base_url: config.base_url, model: config.model })
    }

    /// Return the configured model name (e.g. `"gemini-2.5-flash"`).
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait::async_trait]
impl SolutionModel for GeminiClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<String, LlmError> {
        let body = build_request(request);

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        if status != 200 {
            return Err(LlmError::Status { status, body: text });
        }

        parse_response(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiRequest<'a> {
    system_instruction: ApiContent<'a>,
    contents: Vec<ApiContent<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
struct ApiContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<ApiPart<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum ApiPart<'a> {
    Text {
        text: &'a str,
    },
    #[serde(rename_all = "camelCase")]
    InlineData {
        inline_data: InlineData<'a>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
}

// =============================================================================
// BUILDING / PARSING
// =============================================================================

fn build_request(request: &GenerateRequest) -> ApiRequest<'_> {
    let parts = request
        .parts
        .iter()
        .map(|part| match part {
            Part::Text(text) => ApiPart::Text { text },
            Part::InlineData { mime_type, data } => ApiPart::InlineData { inline_data: InlineData { mime_type, data } },
        })
        .collect();

    ApiRequest {
        system_instruction: ApiContent { role: None, parts: vec![ApiPart::Text { text: &request.system }] },
        contents: vec![ApiContent { role: Some("user"), parts }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
            response_schema: &request.response_schema,
        },
    }
}

fn parse_response(json: &str) -> Result<String, LlmError> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| LlmError::Decode(e.to_string()))?;

    if let Some(usage) = &api.usage_metadata {
        debug!(
            input_tokens = usage.prompt_token_count,
            output_tokens = usage.candidates_token_count,
            "gemini: usage"
        );
    }

    if let Some(reason) = api
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.as_deref())
    {
        return Err(LlmError::NoContent(format!("prompt blocked: {reason}")));
    }

    let Some(candidate) = api.candidates.into_iter().next() else {
        return Err(LlmError::NoContent("no candidates".into()));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| p.text)
        .collect();

    if text.trim().is_empty() {
        let reason = candidate
            .finish_reason
            .unwrap_or_else(|| "UNKNOWN".into());
        return Err(LlmError::NoContent(format!("finish reason {reason}")));
    }

    Ok(text.trim().to_owned())
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;
