use super::tree::Node;
use super::*;

const STEPS_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
  <g id="step-1"><line x1="0" y1="50" x2="100" y2="50"/></g>
  <g id="step-2" class="outline"><circle cx="50" cy="50" r="10"/></g>
  <text id="step-3" x="5" y="95">a'</text>
</svg>"#;

fn solution_with(svg: Option<&str>) -> Solution {
    Solution { explanation: vec!["1".into()], drawing_svg: svg.map(str::to_owned), video_url: None }
}

// =============================================================================
// parse
// =============================================================================

#[test]
fn parse_finds_step_elements() {
    let doc = parse(STEPS_SVG).unwrap();
    let step2 = doc.find_by_id("step-2").unwrap();
    let el = doc.element(step2).unwrap();
    assert_eq!(el.name, "g");
    assert!(el.has_class("outline"));
    assert!(doc.find_by_id("step-4").is_none());
}

#[test]
fn parse_find_by_id_is_exact() {
    let doc = parse(r#"<svg><g id="step-10"/><g id="step-1x"/></svg>"#).unwrap();
    assert!(doc.find_by_id("step-1").is_none());
    assert!(doc.find_by_id("step-10").is_some());
}

#[test]
fn parse_keeps_prolog_comments_and_cdata() {
    let markup = r#"<?xml version="1.0"?><!DOCTYPE svg [<!ENTITY a "b">]><!-- drawn --><svg><style><![CDATA[.x{fill:red}]]></style></svg>"#;
    let doc = parse(markup).unwrap();
    assert_eq!(doc.to_markup(), markup);
}

#[test]
fn parse_single_quoted_attributes() {
    let doc = parse("<svg><g id='step-1' data-label='say \"hi\"'/></svg>").unwrap();
    let id = doc.find_by_id("step-1").unwrap();
    assert_eq!(doc.element(id).unwrap().attr("data-label"), Some("say \"hi\""));
    assert!(doc.to_markup().contains(r#"data-label="say &quot;hi&quot;""#));
}

#[test]
fn parse_text_content_verbatim() {
    let doc = parse("<svg><text>A &amp; B</text></svg>").unwrap();
    let text_el = doc.elements().find(|(_, el)| el.name == "text").unwrap().1;
    let child = text_el.children[0];
    assert_eq!(doc.node(child), Some(&Node::Text("A &amp; B".into())));
}

#[test]
fn parse_rejects_mismatched_tags() {
    let err = parse("<svg><g></svg>").unwrap_err();
    assert_eq!(err, SvgParseError::MismatchedTag { expected: "g".into(), found: "svg".into() });
}

#[test]
fn parse_rejects_unclosed_element() {
    assert_eq!(parse("<svg><g/>").unwrap_err(), SvgParseError::Unclosed("svg".into()));
}

#[test]
fn parse_rejects_stray_end_tag() {
    assert_eq!(parse("<svg/></g>").unwrap_err(), SvgParseError::UnmatchedEndTag("g".into()));
}

#[test]
fn parse_rejects_unquoted_attribute() {
    assert!(matches!(parse("<svg width=10/>"), Err(SvgParseError::UnexpectedChar { found: '1', .. })));
}

#[test]
fn parse_rejects_plain_text() {
    assert_eq!(parse("no drawing here").unwrap_err(), SvgParseError::NoRootElement);
}

#[test]
fn parse_rejects_truncated_markup() {
    assert!(matches!(parse("<svg><g id=\"step-1"), Err(SvgParseError::UnexpectedEof { .. })));
}

// =============================================================================
// render
// =============================================================================

#[test]
fn render_round_trips_normalized_markup() {
    let markup = r#"<svg viewBox="0 0 10 10"><g id="step-1"><path d="M0 0L10 10"/></g></svg>"#;
    assert_eq!(parse(markup).unwrap().to_markup(), markup);
}

#[test]
fn render_reflects_class_changes() {
    let mut doc = parse(r#"<svg><g id="step-1"/></svg>"#).unwrap();
    let id = doc.find_by_id("step-1").unwrap();
    ClassTree::add_class(&mut doc, id, HIGHLIGHT_CLASS);
    assert_eq!(doc.to_markup(), r#"<svg><g id="step-1" class="highlight-step"/></svg>"#);
}

// =============================================================================
// class list
// =============================================================================

#[test]
fn add_class_appends_once() {
    let mut doc = parse(r#"<svg><g id="a" class="outline"/></svg>"#).unwrap();
    let id = doc.find_by_id("a").unwrap();
    ClassTree::add_class(&mut doc, id, HIGHLIGHT_CLASS);
    ClassTree::add_class(&mut doc, id, HIGHLIGHT_CLASS);
    assert_eq!(doc.element(id).unwrap().attr("class"), Some("outline highlight-step"));
}

#[test]
fn remove_class_keeps_other_classes() {
    let mut doc = parse(r#"<svg><g id="a" class="highlight-step outline highlight-step"/></svg>"#).unwrap();
    let id = doc.find_by_id("a").unwrap();
    ClassTree::remove_class(&mut doc, id, HIGHLIGHT_CLASS);
    assert_eq!(doc.element(id).unwrap().attr("class"), Some("outline"));
}

#[test]
fn remove_last_class_drops_attribute() {
    let mut doc = parse(r#"<svg><g id="a" class="highlight-step"/></svg>"#).unwrap();
    let id = doc.find_by_id("a").unwrap();
    ClassTree::remove_class(&mut doc, id, HIGHLIGHT_CLASS);
    assert_eq!(doc.element(id).unwrap().attr("class"), None);
}

#[test]
fn with_class_lists_all_marked_elements() {
    let doc = parse(r#"<svg><g class="highlight-step"/><g class="x highlight-step"/><g class="x"/></svg>"#).unwrap();
    assert_eq!(ClassTree::with_class(&doc, HIGHLIGHT_CLASS).len(), 2);
}

// =============================================================================
// step ids and export
// =============================================================================

#[test]
fn step_element_id_is_one_based() {
    assert_eq!(step_element_id(0), "step-1");
    assert_eq!(step_element_id(9), "step-10");
}

#[test]
fn download_is_byte_exact() {
    let file = download_drawing(&solution_with(Some(STEPS_SVG))).unwrap();
    assert_eq!(file.name, "egenius-drawing.svg");
    assert_eq!(file.mime_type, "image/svg+xml");
    assert_eq!(file.bytes, STEPS_SVG.as_bytes());
}

#[test]
fn download_unavailable_without_drawing() {
    assert!(download_drawing(&solution_with(None)).is_none());
}
