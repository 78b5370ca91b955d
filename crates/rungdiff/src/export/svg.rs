//! SVG rendering of ladder diagrams.
//!
//! Element coordinates are used as they appear in the document; one grid
//! cell is [`CELL_SIZE`] units. The canvas spans from the origin to the
//! largest element extent or routing point plus one cell.

mod shape;
mod wire;

use log::debug;
use svg::node::element as svg_element;

use rungdiff_core::{
    diagram::{Diagram, PinSide},
    draw::{DiffPalette, LayeredOutput, RenderLayer},
};

/// Side length of one grid cell.
pub const CELL_SIZE: i32 = 10;

/// Renders diagrams with a fixed [`DiffPalette`].
#[derive(Debug, Clone)]
pub struct Svg {
    palette: DiffPalette,
}

impl Svg {
    pub fn new(palette: DiffPalette) -> Self {
        Self { palette }
    }

    /// Renders a diagram, markers included, to an SVG document.
    pub fn render_diagram(&self, diagram: &Diagram) -> svg::Document {
        let (width, height) = canvas_size(diagram);

        let mut output = LayeredOutput::new();
        let background = svg_element::Rectangle::new()
            .set("width", width)
            .set("height", height)
            .set("fill", self.palette.background().to_string());
        output.add_to_layer(RenderLayer::Background, Box::new(background));

        for element in diagram.elements() {
            output.merge(shape::render_element(element, &self.palette));
            output.merge(wire::render_wires(element, &self.palette));
        }

        debug!(diagram = diagram.name(), width = width, height = height; "Diagram rendered");

        output.render().into_iter().fold(
            svg::Document::new()
                .set("viewBox", format!("0 0 {width} {height}"))
                .set("width", width)
                .set("height", height),
            |document, group| document.add(group),
        )
    }
}

/// Returns the canvas size: largest x and y over element extents and
/// routing points, plus one cell.
fn canvas_size(diagram: &Diagram) -> (i32, i32) {
    let mut max_x = 0;
    let mut max_y = 0;

    for element in diagram.elements() {
        let position = element.position();
        max_x = max_x.max(position.x() + element.width());
        max_y = max_y.max(position.y() + element.height());

        let points = PinSide::ALL
            .into_iter()
            .flat_map(|side| element.pins(side))
            .flat_map(|pin| pin.connections())
            .flat_map(|connection| connection.routing_points());
        for point in points {
            max_x = max_x.max(point.x());
            max_y = max_y.max(point.y());
        }
    }

    (max_x + CELL_SIZE, max_y + CELL_SIZE)
}
