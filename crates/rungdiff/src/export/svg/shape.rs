//! Element outlines and labels.
//!
//! Every element kind has a fixed drawing; geometry is relative to the
//! element's top-left corner `(x, y)` and its `w`/`h` extent. Outlines take
//! the element's marker, each label its own.

use svg::node::element as svg_element;

use rungdiff_core::{
    apply_stroke,
    diagram::{Element, ElementKind, LabelField, Pin, PinSide},
    draw::{DiffPalette, LayeredOutput, RenderLayer, StrokeDefinition, TextAnchor},
};

/// Width of the vertical power rail line.
const RAIL_WIDTH: f32 = 3.0;

/// Length of the stub a right rail draws towards each input pin.
const RIGHT_RAIL_STUB: i32 = 10;

/// Draws the outline and every label of `element`.
pub(super) fn render_element(element: &Element, palette: &DiffPalette) -> LayeredOutput {
    let mut output = LayeredOutput::new();

    match element.kind() {
        ElementKind::Contact => render_contact(element, palette, &mut output),
        ElementKind::Coil => render_coil(element, palette, &mut output),
        ElementKind::Connector | ElementKind::Continuation => {
            render_connector(element, palette, &mut output)
        }
        ElementKind::InVariable | ElementKind::OutVariable | ElementKind::InOutVariable => {
            render_variable(element, palette, &mut output)
        }
        ElementKind::LeftPowerRail => render_rail(element, palette, PinSide::Output, &mut output),
        ElementKind::RightPowerRail => render_rail(element, palette, PinSide::Input, &mut output),
        ElementKind::Block => render_block(element, palette, &mut output),
    }

    output
}

fn render_contact(element: &Element, palette: &DiffPalette, output: &mut LayeredOutput) {
    let Bounds { x, y, w, h } = Bounds::of(element);
    let stroke = palette.stroke(element.marker());

    for line_x in [x, x + w] {
        let line = svg_element::Line::new()
            .set("x1", line_x)
            .set("y1", y)
            .set("x2", line_x)
            .set("y2", y + h);
        output.add_to_layer(RenderLayer::Shape, Box::new(apply_stroke!(line, &stroke)));
    }

    render_top_and_inner(element, palette, output);
}

fn render_coil(element: &Element, palette: &DiffPalette, output: &mut LayeredOutput) {
    let Bounds { x, y, w, h } = Bounds::of(element);
    let stroke = palette.stroke(element.marker());

    let arcs = [
        format!("M {} {y} Q {} {} {} {}", x + 5, x - 5, y + h / 2, x + 5, y + h),
        format!(
            "M {} {y} Q {} {} {} {}",
            x + w - 5,
            x + w + 5,
            y + h / 2,
            x + w - 5,
            y + h
        ),
    ];
    for path_data in arcs {
        let path = svg_element::Path::new()
            .set("d", path_data)
            .set("fill", "none");
        output.add_to_layer(RenderLayer::Shape, Box::new(apply_stroke!(path, &stroke)));
    }

    render_top_and_inner(element, palette, output);
}

/// Connectors and continuations: a box with a chevron at each end.
fn render_connector(element: &Element, palette: &DiffPalette, output: &mut LayeredOutput) {
    let Bounds { x, y, w, h } = Bounds::of(element);
    let stroke = palette.stroke(element.marker());

    output.add_to_layer(RenderLayer::Shape, Box::new(outline(x, y, w, h, &stroke)));

    let mut chevron_stroke = stroke.clone();
    chevron_stroke.set_width(1.0);
    let chevrons = [
        [(x, y), (x + h / 2, y + h / 2), (x, y + h)],
        [(x + w - h / 2, y), (x + w, y + h / 2), (x + w - h / 2, y + h)],
    ];
    for points in chevrons {
        let chevron = svg_element::Polyline::new()
            .set("points", points_attribute(&points))
            .set("fill", "none");
        output.add_to_layer(
            RenderLayer::Shape,
            Box::new(apply_stroke!(chevron, &chevron_stroke)),
        );
    }

    render_label(
        element.inner_text(),
        palette,
        x + w / 2,
        y + 20,
        TextAnchor::Middle,
        output,
    );
}

fn render_variable(element: &Element, palette: &DiffPalette, output: &mut LayeredOutput) {
    let Bounds { x, y, w, h } = Bounds::of(element);
    let stroke = palette.stroke(element.marker());

    output.add_to_layer(RenderLayer::Shape, Box::new(outline(x, y, w, h, &stroke)));
    render_label(
        element.inner_text(),
        palette,
        x + w / 2,
        y + 20,
        TextAnchor::Middle,
        output,
    );
}

/// Power rails: a thick vertical line plus one horizontal stub per pin on
/// `side`, colored by that pin's label marker.
fn render_rail(
    element: &Element,
    palette: &DiffPalette,
    side: PinSide,
    output: &mut LayeredOutput,
) {
    let Bounds { x, y, h, .. } = Bounds::of(element);

    let rail_stroke = StrokeDefinition::new(palette.color(element.marker()), RAIL_WIDTH);
    let rail = svg_element::Line::new()
        .set("x1", x)
        .set("y1", y)
        .set("x2", x)
        .set("y2", y + h);
    output.add_to_layer(RenderLayer::Shape, Box::new(apply_stroke!(rail, &rail_stroke)));

    for pin in element.pins(side) {
        let pin_y = y + pin.position().y();
        let stub_end = match side {
            PinSide::Output => x + pin.position().x(),
            PinSide::Input => x - RIGHT_RAIL_STUB,
        };
        let stub_stroke = StrokeDefinition::new(palette.color(pin.label().marker()), 1.0);
        let stub = svg_element::Line::new()
            .set("x1", x)
            .set("y1", pin_y)
            .set("x2", stub_end)
            .set("y2", pin_y);
        output.add_to_layer(RenderLayer::Shape, Box::new(apply_stroke!(stub, &stub_stroke)));
    }
}

fn render_block(element: &Element, palette: &DiffPalette, output: &mut LayeredOutput) {
    let Bounds { x, y, w, h } = Bounds::of(element);
    let stroke = palette.stroke(element.marker());

    output.add_to_layer(RenderLayer::Shape, Box::new(outline(x, y, w, h, &stroke)));

    render_label(
        element.block_type(),
        palette,
        x + w / 2,
        y + 15,
        TextAnchor::Middle,
        output,
    );
    render_label(
        element.top_label(),
        palette,
        x + w / 2,
        y - 7,
        TextAnchor::Middle,
        output,
    );

    for pin in element.inputs() {
        render_pin_label(element, pin, 5, TextAnchor::Start, palette, output);
    }
    for pin in element.outputs() {
        render_pin_label(element, pin, -5, TextAnchor::End, palette, output);
    }
}

fn render_pin_label(
    element: &Element,
    pin: &Pin,
    inset: i32,
    anchor: TextAnchor,
    palette: &DiffPalette,
    output: &mut LayeredOutput,
) {
    let position = element.position();
    render_label(
        pin.label(),
        palette,
        position.x() + pin.position().x() + inset,
        position.y() + pin.position().y() + 5,
        anchor,
        output,
    );
}

/// Top label above the element, inner text in its lower half.
fn render_top_and_inner(element: &Element, palette: &DiffPalette, output: &mut LayeredOutput) {
    let Bounds { x, y, w, h } = Bounds::of(element);

    render_label(
        element.top_label(),
        palette,
        x + w / 2,
        y - 5,
        TextAnchor::Middle,
        output,
    );
    render_label(
        element.inner_text(),
        palette,
        x + w / 2,
        y + h / 2 + h / 4,
        TextAnchor::Middle,
        output,
    );
}

/// Adds `label` to the text layer; empty labels draw nothing.
fn render_label(
    label: &LabelField,
    palette: &DiffPalette,
    x: i32,
    y: i32,
    anchor: TextAnchor,
    output: &mut LayeredOutput,
) {
    if label.is_empty() {
        return;
    }
    let text = palette.text(label.marker()).render(label.value(), x, y, anchor);
    output.add_to_layer(RenderLayer::Text, Box::new(text));
}

fn outline(x: i32, y: i32, w: i32, h: i32, stroke: &StrokeDefinition) -> svg_element::Rectangle {
    let rect = svg_element::Rectangle::new()
        .set("x", x)
        .set("y", y)
        .set("width", w)
        .set("height", h)
        .set("fill", "none");
    apply_stroke!(rect, stroke)
}

pub(super) fn points_attribute(points: &[(i32, i32)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{x},{y}"))
        .collect::<Vec<_>>()
        .join(" ")
}

struct Bounds {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
}

impl Bounds {
    fn of(element: &Element) -> Self {
        Self {
            x: element.position().x(),
            y: element.position().y(),
            w: element.width(),
            h: element.height(),
        }
    }
}
