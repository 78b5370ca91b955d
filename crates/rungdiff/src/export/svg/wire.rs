//! Connection polylines.

use log::trace;
use svg::node::element as svg_element;

use rungdiff_core::{
    apply_stroke,
    diagram::{Element, PinSide},
    draw::{DiffPalette, LayeredOutput, RenderLayer},
};

use super::shape::points_attribute;

/// Draws every connection stored on `element`'s pins, both sides, along its
/// routing points.
///
/// Connections without routing points have no visible path and are skipped.
pub(super) fn render_wires(element: &Element, palette: &DiffPalette) -> LayeredOutput {
    let mut output = LayeredOutput::new();

    let connections = PinSide::ALL
        .into_iter()
        .flat_map(|side| element.pins(side))
        .flat_map(|pin| pin.connections());

    for connection in connections {
        if connection.routing_points().is_empty() {
            trace!(element:% = element.id(), target:% = connection.target(); "Wire without routing points");
            continue;
        }

        let points: Vec<(i32, i32)> = connection
            .routing_points()
            .iter()
            .map(|point| (point.x(), point.y()))
            .collect();
        let stroke = palette.stroke(connection.marker());
        let polyline = svg_element::Polyline::new()
            .set("points", points_attribute(&points))
            .set("fill", "none");
        output.add_to_layer(RenderLayer::Wire, Box::new(apply_stroke!(polyline, &stroke)));
    }

    output
}
