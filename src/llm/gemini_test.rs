use super::*;
use serde_json::json;

fn make_response(parts: Value) -> String {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": parts },
            "finishReason": "STOP"
        }],
        "usageMetadata": { "promptTokenCount": 100, "candidatesTokenCount": 50 }
    })
    .to_string()
}

fn request(parts: Vec<Part>) -> GenerateRequest {
    GenerateRequest { system: "be precise".into(), parts, response_schema: json!({ "type": "OBJECT" }) }
}

// =============================================================================
// build_request
// =============================================================================

#[test]
fn build_request_text_and_image() {
    let req = request(vec![
        Part::Text("draw a line".into()),
        Part::InlineData { mime_type: "image/png".into(), data: "aGVsbG8=".into() },
    ]);
    let body = serde_json::to_value(build_request(&req)).unwrap();

    assert_eq!(body["systemInstruction"], json!({ "parts": [{ "text": "be precise" }] }));
    assert_eq!(body["contents"][0]["role"], "user");
    assert_eq!(body["contents"][0]["parts"][0], json!({ "text": "draw a line" }));
    assert_eq!(
        body["contents"][0]["parts"][1],
        json!({ "inlineData": { "mimeType": "image/png", "data": "aGVsbG8=" } })
    );
    assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
    assert_eq!(body["generationConfig"]["responseSchema"], json!({ "type": "OBJECT" }));
}

#[test]
fn endpoint_includes_model() {
    let mut config = LlmConfig::new("k");
    config.base_url = "https://example.test/v1beta".into();
    let client = GeminiClient::new(config).unwrap();
    assert_eq!(client.model(), "gemini-2.5-flash");
    assert_eq!(client.endpoint(), "https://example.test/v1beta/models/gemini-2.5-flash:generateContent");
}

// =============================================================================
// parse_response
// =============================================================================

#[test]
fn parse_text_response() {
    let json = make_response(json!([{ "text": "{\"explanation\": [\"1. a\"]}" }]));
    assert_eq!(parse_response(&json).unwrap(), "{\"explanation\": [\"1. a\"]}");
}

#[test]
fn parse_concatenates_text_parts() {
    let json = make_response(json!([{ "text": "{\"explanation\":" }, { "text": " []}" }]));
    assert_eq!(parse_response(&json).unwrap(), "{\"explanation\": []}");
}

#[test]
fn parse_prompt_block() {
    let json = json!({ "promptFeedback": { "blockReason": "SAFETY" } }).to_string();
    let err = parse_response(&json).unwrap_err();
    assert!(matches!(&err, LlmError::NoContent(msg) if msg.contains("SAFETY")));
}

#[test]
fn parse_no_candidates() {
    let err = parse_response("{}").unwrap_err();
    assert!(matches!(err, LlmError::NoContent(_)));
}

#[test]
fn parse_candidate_without_text() {
    let json = json!({ "candidates": [{ "finishReason": "MAX_TOKENS" }] }).to_string();
    let err = parse_response(&json).unwrap_err();
    assert!(matches!(&err, LlmError::NoContent(msg) if msg.contains("MAX_TOKENS")));
}

#[test]
fn parse_invalid_json() {
    let err = parse_response("not json").unwrap_err();
    assert!(matches!(err, LlmError::Decode(_)));
}
