//! Example: Diffing two diagrams built in code
//!
//! Builds two revisions of a one-rung program with the diagram model
//! types, diffs them and prints both SVG images.

use rungdiff::{
    DiagramBuilder,
    diagram::{Connection, Diagram, Element, ElementKind, LabelField, Pin, Position},
};

fn rung(contact_variable: &str, coil_storage: &str) -> Diagram {
    let mut diagram = Diagram::new("main");

    diagram.insert(
        Element::new("1", ElementKind::LeftPowerRail, Position::new(10, 10), 3, 40)
            .with_output(Pin::new(Position::new(3, 20), 0)),
    );
    diagram.insert(
        Element::new("2", ElementKind::Contact, Position::new(60, 20), 21, 20)
            .with_top_label(LabelField::new(contact_variable))
            .with_input(Pin::new(Position::new(0, 10), 0).with_connection(Connection::new(
                "1",
                "",
                vec![Position::new(60, 30), Position::new(13, 30)],
            )))
            .with_output(Pin::new(Position::new(21, 10), 0)),
    );
    diagram.insert(
        Element::new("3", ElementKind::Coil, Position::new(150, 20), 21, 20)
            .with_top_label(LabelField::new("motor"))
            .with_inner_text(LabelField::new(coil_storage))
            .with_input(Pin::new(Position::new(0, 10), 0).with_connection(Connection::new(
                "2",
                "",
                vec![Position::new(150, 30), Position::new(81, 30)],
            ))),
    );

    diagram
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Diffing two revisions of a rung...\n");

    let mut old = rung("start", "");
    let mut new = rung("start_btn", "S");

    let builder = DiagramBuilder::default();
    let summary = builder.diff(&mut old, &mut new);
    println!("{summary:?}\n");

    println!("Old revision:\n{}\n", builder.render_svg(&old)?);
    println!("New revision:\n{}", builder.render_svg(&new)?);

    Ok(())
}
