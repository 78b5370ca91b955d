//! Integration tests for the DiagramBuilder API
//!
//! These tests run the parse, diff and render stages on two revisions of
//! the same program.

use rungdiff::{
    DiagramBuilder, RungdiffError,
    config::{AppConfig, StyleConfig},
    diagram::{Diagram, DiffMarker},
    draw::Theme,
};

const MOTOR_V1: &[u8] = include_bytes!("fixtures/motor_v1.xml");
const MOTOR_V2: &[u8] = include_bytes!("fixtures/motor_v2.xml");

fn parse_both(builder: &DiagramBuilder) -> (Diagram, Diagram) {
    let old = builder.parse(MOTOR_V1, "main").expect("Failed to parse v1");
    let new = builder.parse(MOTOR_V2, "main").expect("Failed to parse v2");
    (old, new)
}

#[test]
fn test_parse_fixture() {
    let builder = DiagramBuilder::default();
    let (old, new) = parse_both(&builder);

    assert_eq!(old.len(), 4);
    assert_eq!(new.len(), 5);

    let contact = old.get("2".into()).expect("contact 2");
    assert_eq!(contact.top_label().value(), "start");
    assert_eq!(contact.inputs()[0].connections()[0].target(), "1");

    let coil = new.get("3".into()).expect("coil 3");
    assert_eq!(coil.inner_text().value(), "S");
}

#[test]
fn test_parse_unknown_pou_returns_error() {
    let builder = DiagramBuilder::default();

    let err = builder.parse(MOTOR_V2, "conveyor").unwrap_err();

    assert!(matches!(err, RungdiffError::Parse(_)));
    let message = err.to_string();
    assert!(message.contains("conveyor"));
    assert!(message.contains("main, alarm"));
}

#[test]
fn test_parse_pou_without_ladder_body() {
    let builder = DiagramBuilder::default();

    let diagram = builder.parse(MOTOR_V2, "alarm").expect("Failed to parse");

    assert!(diagram.is_empty());
}

#[test]
fn test_parse_invalid_xml_returns_error() {
    let builder = DiagramBuilder::default();

    let result = builder.parse(b"<project><types>", "main");

    assert!(result.is_err(), "Should return error for truncated XML");
}

#[test]
fn test_diff_revisions() {
    let builder = DiagramBuilder::default();
    let (mut old, mut new) = parse_both(&builder);

    let summary = builder.diff(&mut old, &mut new);

    assert_eq!(summary.elements_added, 1);
    assert_eq!(summary.elements_deleted, 0);
    assert_eq!(summary.labels_deleted, 2);
    assert_eq!(summary.connections_added, 2);
    assert_eq!(summary.connections_deleted, 1);

    let old_contact = old.get("2".into()).unwrap();
    assert_eq!(old_contact.marker(), DiffMarker::Unchanged);
    assert_eq!(old_contact.top_label().marker(), DiffMarker::Deleted);

    let stop = new.get("5".into()).unwrap();
    assert_eq!(stop.marker(), DiffMarker::Added);

    let old_coil = old.get("3".into()).unwrap();
    assert_eq!(old_coil.inner_text().marker(), DiffMarker::Deleted);
    assert_eq!(
        old_coil.inputs()[0].connections()[0].marker(),
        DiffMarker::Deleted
    );

    let rail = new.get("4".into()).unwrap();
    assert_eq!(
        rail.inputs()[0].connections()[0].marker(),
        DiffMarker::Unchanged
    );
}

#[test]
fn test_diff_same_revision_is_empty() {
    let builder = DiagramBuilder::default();
    let mut old = builder.parse(MOTOR_V1, "main").unwrap();
    let mut new = builder.parse(MOTOR_V1, "main").unwrap();

    assert!(builder.diff(&mut old, &mut new).is_empty());
}

#[test]
fn test_render_diffed_revisions() {
    let builder = DiagramBuilder::default();
    let (mut old, mut new) = parse_both(&builder);
    builder.diff(&mut old, &mut new);

    let old_svg = builder.render_svg(&old).expect("Failed to render old");
    let new_svg = builder.render_svg(&new).expect("Failed to render new");

    assert!(old_svg.contains("<svg"), "Output should contain SVG tag");
    assert!(old_svg.contains("</svg>"), "Output should be complete SVG");
    assert!(old_svg.contains("viewBox=\"0 0 263 60\""));
    assert!(old_svg.contains("stroke=\"red\""));
    assert!(old_svg.contains("text-decoration=\"line-through\""));
    assert!(!old_svg.contains("stroke=\"green\""));

    assert!(new_svg.contains("stroke=\"green\""));
    assert!(new_svg.contains("font-weight=\"bold\""));
    assert!(new_svg.contains("stop"));
    assert!(!new_svg.contains("stroke=\"red\""));
}

#[test]
fn test_render_without_diff_has_no_markers() {
    let builder = DiagramBuilder::default();
    let diagram = builder.parse(MOTOR_V1, "main").unwrap();

    let svg = builder.render_svg(&diagram).unwrap();

    assert!(!svg.contains("stroke=\"red\""));
    assert!(!svg.contains("stroke=\"green\""));
    assert!(svg.contains("stroke=\"white\""));
}

#[test]
fn test_builder_with_light_theme() {
    let builder = DiagramBuilder::new(AppConfig::new(StyleConfig::new(Theme::Light)));
    let diagram = builder.parse(MOTOR_V1, "main").unwrap();

    let svg = builder.render_svg(&diagram).unwrap();

    assert!(svg.contains("stroke=\"black\""));
}

#[test]
fn test_builder_reusability() {
    let builder = DiagramBuilder::default();

    let first = builder.parse(MOTOR_V1, "main").unwrap();
    let svg1 = builder.render_svg(&first).unwrap();

    let second = builder.parse(MOTOR_V2, "main").unwrap();
    let svg2 = builder.render_svg(&second).unwrap();

    assert_ne!(svg1, svg2);
}
