//! Solution model: normalizes raw model output into a canonical `Solution`.
//!
//! DESIGN
//! ======
//! The model is asked for a JSON object with `explanation`, `drawingSvg` and
//! `youtubeUrl`, but nothing guarantees it complies. Normalization is strict
//! about the outer shape (must be a JSON object) and lenient about fields:
//! missing or mistyped fields become explicit absence or the fallback step,
//! never an error.

use serde::Serialize;
use serde_json::Value;

/// Step text used when the model produced no usable explanation.
pub const FALLBACK_STEP: &str = "No explanation provided.";

// =============================================================================
// TYPES
// =============================================================================

/// Normalized result of solving one problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Solution {
    /// Ordered instructional steps. Never empty.
    pub explanation: Vec<String>,
    /// Raw SVG markup, byte-exact as returned by the model.
    pub drawing_svg: Option<String>,
    /// Tutorial video URL as returned by the model.
    pub video_url: Option<String>,
}

impl Solution {
    /// Number of explanation steps (always at least one).
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.explanation.len()
    }

    /// Embeddable player URL for the tutorial, when the URL is recognizable.
    #[must_use]
    pub fn embed_url(&self) -> Option<String> {
        self.video_url.as_deref().and_then(crate::video::embed_url)
    }
}

/// The model output could not be parsed as a JSON object.
#[derive(Debug, thiserror::Error)]
#[error("malformed model response: {0}")]
pub struct MalformedResponse(pub String);

impl crate::error::ErrorCode for MalformedResponse {
    fn error_code(&self) -> &'static str {
        "E_MALFORMED_RESPONSE"
    }
}

// =============================================================================
// NORMALIZATION
// =============================================================================

/// Parse and normalize raw model output.
///
/// # Errors
///
/// Returns [`MalformedResponse`] if `raw` is not a JSON object, optionally
/// wrapped in a Markdown code fence.
pub fn normalize(raw: &str) -> Result<Solution, MalformedResponse> {
    let body = strip_code_fence(raw);
    let value: Value = serde_json::from_str(body).map_err(|e| MalformedResponse(e.to_string()))?;
    normalize_value(&value)
}

/// Normalize an already-parsed JSON value.
///
/// # Errors
///
/// Returns [`MalformedResponse`] if `value` is not a JSON object.
pub fn normalize_value(value: &Value) -> Result<Solution, MalformedResponse> {
    let Some(obj) = value.as_object() else {
        return Err(MalformedResponse(format!("expected object, got {}", type_name(value))));
    };

    // Entry N is drawn by element `step-N+1`, so entries are never dropped.
    let mut explanation = match obj.get("explanation") {
        Some(Value::Array(items)) => items.iter().map(step_text).collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.clone()],
        _ => Vec::new(),
    };
    if explanation.is_empty() {
        explanation.push(FALLBACK_STEP.to_owned());
    }

    let drawing_svg = obj
        .get("drawingSvg")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_owned);

    let video_url = obj
        .get("youtubeUrl")
        .or_else(|| obj.get("videoUrl"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned);

    Ok(Solution { explanation, drawing_svg, video_url })
}

/// Text of one explanation entry: strings verbatim, `null` as empty, any
/// other value as its JSON text.
fn step_text(item: &Value) -> String {
    match item {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Strip a surrounding Markdown code fence (```` ```json ... ``` ````), if any.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string (`json`) on the opening fence line.
    match body.split_once('\n') {
        Some((_, inner)) => inner.trim(),
        None => body.trim(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "solution_test.rs"]
mod tests;
