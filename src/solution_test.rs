use super::*;
use serde_json::json;

#[test]
fn empty_fields_normalize_to_defaults() {
    let raw = json!({ "explanation": [], "drawingSvg": null, "youtubeUrl": null }).to_string();
    let solution = normalize(&raw).unwrap();
    assert_eq!(solution.explanation, vec!["No explanation provided.".to_string()]);
    assert_eq!(solution.drawing_svg, None);
    assert_eq!(solution.video_url, None);
}

#[test]
fn complete_response_passes_through() {
    let svg = r#"<svg viewBox="0 0 10 10"><g id="step-1"/></svg>"#;
    let raw = json!({
        "explanation": ["1. Draw the XY line.", "2. Mark point A."],
        "drawingSvg": svg,
        "youtubeUrl": "https://youtu.be/abc12345678"
    })
    .to_string();
    let solution = normalize(&raw).unwrap();
    assert_eq!(solution.step_count(), 2);
    assert_eq!(solution.explanation[1], "2. Mark point A.");
    assert_eq!(solution.drawing_svg.as_deref(), Some(svg));
    assert_eq!(solution.embed_url().as_deref(), Some("https://www.youtube.com/embed/abc12345678"));
}

#[test]
fn missing_fields_are_absent() {
    let solution = normalize("{}").unwrap();
    assert_eq!(solution.explanation, vec![FALLBACK_STEP.to_string()]);
    assert!(solution.drawing_svg.is_none());
    assert!(solution.video_url.is_none());
}

#[test]
fn empty_strings_are_absent() {
    let raw = json!({ "explanation": ["a"], "drawingSvg": "", "youtubeUrl": "  " }).to_string();
    let solution = normalize(&raw).unwrap();
    assert!(solution.drawing_svg.is_none());
    assert!(solution.video_url.is_none());
}

#[test]
fn wrong_types_are_tolerated() {
    let raw = json!({ "explanation": 42, "drawingSvg": { "svg": true }, "youtubeUrl": 7 }).to_string();
    let solution = normalize(&raw).unwrap();
    assert_eq!(solution.explanation, vec![FALLBACK_STEP.to_string()]);
    assert!(solution.drawing_svg.is_none());
    assert!(solution.video_url.is_none());
}

#[test]
fn odd_steps_keep_their_position() {
    let raw = json!({ "explanation": ["one", 2, null, "", "five"] }).to_string();
    let solution = normalize(&raw).unwrap();
    assert_eq!(solution.explanation, vec!["one", "2", "", "", "five"]);
}

#[test]
fn blank_step_does_not_shift_drawing_ids() {
    let raw = json!({
        "explanation": ["1. Draw XY.", "", "3. Project a."],
        "drawingSvg": r#"<svg><g id="step-1"/><g id="step-3"/></svg>"#
    })
    .to_string();
    let solution = normalize(&raw).unwrap();

    let index = solution
        .explanation
        .iter()
        .position(|s| s == "3. Project a.")
        .unwrap();
    assert_eq!(solution.step_count(), 3);
    assert_eq!(crate::drawing::step_element_id(index), "step-3");
}

#[test]
fn array_of_blanks_is_kept() {
    let raw = json!({ "explanation": ["", " "] }).to_string();
    assert_eq!(normalize(&raw).unwrap().explanation, vec!["", " "]);
}

#[test]
fn single_string_explanation_becomes_one_step() {
    let raw = json!({ "explanation": "Draw the XY line." }).to_string();
    let solution = normalize(&raw).unwrap();
    assert_eq!(solution.explanation, vec!["Draw the XY line.".to_string()]);
}

#[test]
fn video_url_alias_is_accepted() {
    let raw = json!({ "explanation": ["a"], "videoUrl": " https://youtu.be/abc12345678 " }).to_string();
    let solution = normalize(&raw).unwrap();
    assert_eq!(solution.video_url.as_deref(), Some("https://youtu.be/abc12345678"));
}

#[test]
fn unrecognized_video_keeps_rest_of_solution() {
    let raw = json!({ "explanation": ["a"], "drawingSvg": "<svg/>", "youtubeUrl": "https://example.com/notvalid" })
        .to_string();
    let solution = normalize(&raw).unwrap();
    assert_eq!(solution.embed_url(), None);
    assert_eq!(solution.drawing_svg.as_deref(), Some("<svg/>"));
    assert_eq!(solution.explanation, vec!["a".to_string()]);
}

#[test]
fn code_fenced_json_is_accepted() {
    let raw = "```json\n{\"explanation\": [\"a\"]}\n```";
    let solution = normalize(raw).unwrap();
    assert_eq!(solution.explanation, vec!["a".to_string()]);
}

#[test]
fn non_json_is_malformed() {
    let err = normalize("Sorry, I cannot help with that.").unwrap_err();
    assert!(err.to_string().contains("malformed model response"));
}

#[test]
fn truncated_json_is_malformed() {
    assert!(normalize(r#"{"explanation": ["1. Draw"#).is_err());
}

#[test]
fn non_object_json_is_malformed() {
    let err = normalize(r#"["a", "b"]"#).unwrap_err();
    assert!(err.to_string().contains("expected object, got array"));
}
