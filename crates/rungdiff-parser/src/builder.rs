//! Builds [`Diagram`]s from the typed PLCopen tree.
//!
//! Primitives are inserted before blocks, in the kind order of
//! [`Ld::primitives`], so two builds of the same document always iterate
//! their elements identically.

use log::{debug, warn};

use rungdiff_core::diagram::{
    Connection, Diagram, Element, ElementKind, LabelField, Pin, Position,
};

use crate::plcopen::{self, Block, ConnectionPoint, Ld, Pou, Primitive};

/// Builds the diagram of one POU.
///
/// A POU without a ladder body yields an empty diagram. Elements sharing a
/// `localId` replace each other; the last one read wins.
pub fn build_diagram(pou: &Pou) -> Diagram {
    let mut diagram = Diagram::new(pou.name.as_str());

    let Some(ld) = pou.body.ld.as_ref() else {
        warn!(pou = pou.name.as_str(); "POU has no ladder diagram body, rendering an empty diagram");
        return diagram;
    };

    add_elements(&mut diagram, ld);

    debug!(pou = pou.name.as_str(), elements = diagram.len(); "Diagram built");
    diagram
}

fn add_elements(diagram: &mut Diagram, ld: &Ld) {
    let primitives = ld
        .primitives()
        .map(|(kind, primitive)| build_primitive(kind, primitive));
    let blocks = ld.blocks.iter().map(build_block);

    for element in primitives.chain(blocks) {
        let id = element.id();
        if diagram.insert(element).is_some() {
            warn!(local_id:% = id; "Duplicate localId, keeping the last element");
        }
    }
}

/// Returns the glyph or text drawn inside a primitive.
///
/// Coil modifiers are checked in the order negated, rising, set, reset,
/// falling; a later match replaces an earlier one.
pub fn inner_text(kind: ElementKind, primitive: &Primitive) -> String {
    match kind {
        ElementKind::Contact => {
            let text = if primitive.negated {
                "/"
            } else if primitive.is_rising_edge() {
                "P"
            } else if primitive.is_falling_edge() {
                "N"
            } else {
                ""
            };
            text.to_string()
        }
        ElementKind::Coil => {
            let mut text = "";
            if primitive.negated {
                text = "/";
            }
            if primitive.is_rising_edge() {
                text = "P";
            }
            if primitive.is_set() {
                text = "S";
            }
            if primitive.is_reset() {
                text = "R";
            }
            if primitive.is_falling_edge() {
                text = "N";
            }
            text.to_string()
        }
        ElementKind::Connector | ElementKind::Continuation => primitive.name.clone(),
        kind if kind.is_variable() => primitive.expression.clone().unwrap_or_default(),
        _ => String::new(),
    }
}

fn build_primitive(kind: ElementKind, primitive: &Primitive) -> Element {
    let mut element = Element::new(
        primitive.local_id.as_str(),
        kind,
        primitive.position.into(),
        primitive.width,
        primitive.height,
    )
    .with_inner_text(LabelField::new(inner_text(kind, primitive)));

    if let Some(variable) = primitive.variable.as_deref() {
        element = element.with_top_label(LabelField::new(variable));
    }

    for (order, point) in primitive.connection_points_in.iter().enumerate() {
        element = element.with_input(build_pin(point, order));
    }
    for (order, point) in primitive.connection_points_out.iter().enumerate() {
        element = element.with_output(build_pin(point, order));
    }

    element
}

fn build_block(block: &Block) -> Element {
    let mut element = Element::new(
        block.local_id.as_str(),
        ElementKind::Block,
        block.position.into(),
        block.width,
        block.height,
    )
    .with_top_label(LabelField::new(block.instance_name.as_str()))
    .with_block_type(LabelField::new(block.type_name.as_str()));

    for (order, variable) in block.input_variables.variables.iter().enumerate() {
        let pin = block_pin(block, variable, variable.connection_points_in.first(), order);
        element = element.with_input(pin);
    }
    for (order, variable) in block.output_variables.variables.iter().enumerate() {
        let pin = block_pin(block, variable, variable.connection_points_out.first(), order);
        element = element.with_output(pin);
    }

    element
}

fn block_pin(
    block: &Block,
    variable: &plcopen::BlockVariable,
    point: Option<&ConnectionPoint>,
    order: usize,
) -> Pin {
    let pin = match point {
        Some(point) => build_pin(point, order),
        None => {
            warn!(
                block = block.local_id.as_str(),
                parameter = variable.formal_parameter.as_str();
                "Block variable has no connection point, placing its pin at the origin"
            );
            Pin::new(Position::default(), order)
        }
    };
    pin.with_label(LabelField::new(variable.formal_parameter.as_str()))
}

fn build_pin(point: &ConnectionPoint, order: usize) -> Pin {
    point
        .connections
        .iter()
        .map(build_connection)
        .fold(Pin::new(point.rel_position.into(), order), Pin::with_connection)
}

fn build_connection(connection: &plcopen::Connection) -> Connection {
    Connection::new(
        connection.ref_local_id.as_str(),
        connection.formal_parameter.as_str(),
        connection.positions.iter().map(|p| Position::from(*p)).collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rungdiff_core::{diagram::PinSide, identifier::ElementId};

    fn primitive(negated: bool, edge: &str, storage: &str) -> Primitive {
        Primitive {
            negated,
            edge: edge.to_string(),
            storage: storage.to_string(),
            ..Primitive::default()
        }
    }

    fn point(x: i32, y: i32, targets: &[(&str, &str)]) -> ConnectionPoint {
        ConnectionPoint {
            rel_position: plcopen::Position { x, y },
            connections: targets
                .iter()
                .map(|(target, parameter)| plcopen::Connection {
                    ref_local_id: target.to_string(),
                    formal_parameter: parameter.to_string(),
                    positions: vec![plcopen::Position { x: 1, y: 2 }],
                })
                .collect(),
            ..ConnectionPoint::default()
        }
    }

    fn pou(ld: Ld) -> Pou {
        Pou {
            name: "main".to_string(),
            body: plcopen::Body { ld: Some(ld) },
            ..Pou::default()
        }
    }

    #[test]
    fn test_contact_inner_text() {
        let text = |p: &Primitive| inner_text(ElementKind::Contact, p);

        assert_eq!(text(&primitive(false, "", "")), "");
        assert_eq!(text(&primitive(true, "", "")), "/");
        assert_eq!(text(&primitive(true, "rising", "")), "/");
        assert_eq!(text(&primitive(false, "rising", "")), "P");
        assert_eq!(text(&primitive(false, "falling", "")), "N");
        assert_eq!(text(&primitive(false, "none", "")), "");
    }

    #[test]
    fn test_coil_inner_text_later_modifier_wins() {
        let text = |p: &Primitive| inner_text(ElementKind::Coil, p);

        assert_eq!(text(&primitive(true, "", "")), "/");
        assert_eq!(text(&primitive(false, "rising", "")), "P");
        assert_eq!(text(&primitive(true, "rising", "")), "P");
        assert_eq!(text(&primitive(true, "", "set")), "S");
        assert_eq!(text(&primitive(false, "rising", "reset")), "R");
        // Falling edge overrides the storage modifier
        assert_eq!(text(&primitive(false, "falling", "set")), "N");
        assert_eq!(text(&primitive(false, "none", "none")), "");
    }

    #[test]
    fn test_named_and_variable_inner_text() {
        let named = Primitive {
            name: "LOOP".to_string(),
            expression: Some("ignored".to_string()),
            ..Primitive::default()
        };
        assert_eq!(inner_text(ElementKind::Connector, &named), "LOOP");
        assert_eq!(inner_text(ElementKind::Continuation, &named), "LOOP");
        assert_eq!(inner_text(ElementKind::OutVariable, &named), "ignored");
        assert_eq!(inner_text(ElementKind::InVariable, &Primitive::default()), "");
        assert_eq!(inner_text(ElementKind::LeftPowerRail, &named), "");
    }

    #[test]
    fn test_primitive_pins_and_connections() {
        let contact = Primitive {
            local_id: "2".to_string(),
            width: 21,
            height: 20,
            position: plcopen::Position { x: 80, y: 20 },
            variable: Some("start".to_string()),
            connection_points_in: vec![point(0, 10, &[("1", "")])],
            connection_points_out: vec![point(21, 10, &[])],
            ..Primitive::default()
        };

        let element = build_primitive(ElementKind::Contact, &contact);

        assert_eq!(element.id(), "2");
        assert_eq!(element.position(), Position::new(80, 20));
        assert_eq!(element.top_label().value(), "start");
        assert!(element.block_type().is_empty());
        assert_eq!(element.inputs().len(), 1);
        assert_eq!(element.outputs().len(), 1);

        let input = &element.inputs()[0];
        assert_eq!(input.position(), Position::new(0, 10));
        assert_eq!(input.order(), 0);
        assert!(input.label().is_empty());

        let wire = &input.connections()[0];
        assert_eq!(wire.target(), "1");
        assert_eq!(wire.target_pin_label(), "");
        assert_eq!(wire.target_pin_index(), 0);
        assert_eq!(wire.routing_points(), &[Position::new(1, 2)]);
    }

    #[test]
    fn test_variable_has_no_top_label() {
        let variable = Primitive {
            local_id: "6".to_string(),
            expression: Some("T#5s".to_string()),
            ..Primitive::default()
        };

        let element = build_primitive(ElementKind::InVariable, &variable);

        assert!(element.top_label().is_empty());
        assert_eq!(element.inner_text().value(), "T#5s");
    }

    #[test]
    fn test_block_pins_follow_declared_variables() {
        let variable = |parameter: &str, input: Option<ConnectionPoint>| plcopen::BlockVariable {
            formal_parameter: parameter.to_string(),
            connection_points_in: input.into_iter().collect(),
            ..plcopen::BlockVariable::default()
        };
        let block = Block {
            local_id: "5".to_string(),
            type_name: "TON".to_string(),
            instance_name: "TON0".to_string(),
            input_variables: plcopen::BlockVariables {
                variables: vec![
                    variable("IN", Some(point(0, 30, &[("4", "")]))),
                    variable("PT", None),
                ],
            },
            output_variables: plcopen::BlockVariables {
                variables: vec![plcopen::BlockVariable {
                    formal_parameter: "Q".to_string(),
                    connection_points_out: vec![point(60, 30, &[("7", "")])],
                    ..plcopen::BlockVariable::default()
                }],
            },
            ..Block::default()
        };

        let element = build_block(&block);

        assert_eq!(element.kind(), ElementKind::Block);
        assert_eq!(element.top_label().value(), "TON0");
        assert_eq!(element.block_type().value(), "TON");
        assert!(element.inner_text().is_empty());

        let inputs = element.pins(PinSide::Input);
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0].label().value(), "IN");
        assert_eq!(inputs[0].position(), Position::new(0, 30));
        assert_eq!(inputs[0].connections()[0].target(), "4");
        // Missing connection point: pin at the origin without wires
        assert_eq!(inputs[1].label().value(), "PT");
        assert_eq!(inputs[1].order(), 1);
        assert_eq!(inputs[1].position(), Position::default());
        assert!(inputs[1].connections().is_empty());

        let outputs = element.pins(PinSide::Output);
        assert_eq!(outputs[0].label().value(), "Q");
        assert_eq!(outputs[0].connections()[0].target(), "7");
    }

    #[test]
    fn test_build_order_primitives_then_blocks() {
        let with_id = |id: &str| Primitive {
            local_id: id.to_string(),
            ..Primitive::default()
        };
        let ld = Ld {
            out_variables: vec![with_id("9")],
            coils: vec![with_id("3")],
            left_power_rails: vec![with_id("1")],
            contacts: vec![with_id("2"), with_id("4")],
            blocks: vec![Block {
                local_id: "0".to_string(),
                ..Block::default()
            }],
            ..Ld::default()
        };

        let diagram = build_diagram(&pou(ld));

        let ids: Vec<String> = diagram.elements().map(|e| e.id().to_string()).collect();
        assert_eq!(ids, vec!["1", "2", "4", "3", "9", "0"]);
        assert_eq!(diagram.name(), "main");
    }

    #[test]
    fn test_duplicate_local_id_last_wins() {
        let ld = Ld {
            contacts: vec![Primitive {
                local_id: "7".to_string(),
                ..Primitive::default()
            }],
            coils: vec![Primitive {
                local_id: "7".to_string(),
                ..Primitive::default()
            }],
            ..Ld::default()
        };

        let diagram = build_diagram(&pou(ld));

        assert_eq!(diagram.len(), 1);
        assert_eq!(
            diagram.get(ElementId::new("7")).map(|e| e.kind()),
            Some(ElementKind::Coil)
        );
    }

    #[test]
    fn test_missing_ld_body_builds_empty_diagram() {
        let pou = Pou {
            name: "helper".to_string(),
            ..Pou::default()
        };

        let diagram = build_diagram(&pou);

        assert!(diagram.is_empty());
        assert_eq!(diagram.name(), "helper");
    }
}
