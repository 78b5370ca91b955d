//! Pins and the wires attached to them.

use crate::{
    diagram::{DiffMarker, LabelField, Position},
    identifier::ElementId,
};

/// Selects the input or the output pin list of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinSide {
    Input,
    Output,
}

impl PinSide {
    pub const ALL: [PinSide; 2] = [PinSide::Input, PinSide::Output];
}

/// A wire from a pin to a pin of another element.
///
/// Pins are addressed by formal parameter name rather than by index, since
/// pin indices are not reliable across edits. Routing points only describe
/// how the wire is drawn and never take part in identity.
#[derive(Debug, Clone)]
pub struct Connection {
    target: ElementId,
    target_pin_label: String,
    target_pin_index: usize,
    routing_points: Vec<Position>,
    marker: DiffMarker,
}

impl Connection {
    /// Creates an unchanged connection.
    ///
    /// # Arguments
    ///
    /// * `target` - Id of the referenced element
    /// * `target_pin_label` - Formal parameter of the referenced pin, empty
    ///   for primitive-to-primitive wiring
    /// * `routing_points` - Polyline vertices in drawing order
    pub fn new(
        target: impl Into<ElementId>,
        target_pin_label: impl Into<String>,
        routing_points: Vec<Position>,
    ) -> Self {
        Self {
            target: target.into(),
            target_pin_label: target_pin_label.into(),
            target_pin_index: 0,
            routing_points,
            marker: DiffMarker::Unchanged,
        }
    }

    pub fn target(&self) -> ElementId {
        self.target
    }

    pub fn target_pin_label(&self) -> &str {
        &self.target_pin_label
    }

    /// Reserved; always 0.
    pub fn target_pin_index(&self) -> usize {
        self.target_pin_index
    }

    pub fn routing_points(&self) -> &[Position] {
        &self.routing_points
    }

    pub fn marker(&self) -> DiffMarker {
        self.marker
    }

    /// Returns `true` if both connections describe the same logical wire:
    /// same target element and same target pin label.
    pub fn same_wire(&self, other: &Connection) -> bool {
        self.target == other.target && self.target_pin_label == other.target_pin_label
    }

    pub(crate) fn set_marker(&mut self, marker: DiffMarker) {
        self.marker = marker;
    }
}

/// An attachment point of an element.
#[derive(Debug, Clone)]
pub struct Pin {
    position: Position,
    order: usize,
    label: LabelField,
    connections: Vec<Connection>,
}

impl Pin {
    /// Creates a pin without label or connections.
    ///
    /// # Arguments
    ///
    /// * `position` - Position relative to the owning element
    /// * `order` - Zero-based index within the owner's input or output list
    pub fn new(position: Position, order: usize) -> Self {
        Self {
            position,
            order,
            label: LabelField::default(),
            connections: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: LabelField) -> Self {
        self.label = label;
        self
    }

    /// Appends a connection.
    pub fn with_connection(mut self, connection: Connection) -> Self {
        self.connections.push(connection);
        self
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn label(&self) -> &LabelField {
        &self.label
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Returns `true` if any connection on this pin is the same wire as `connection`.
    pub fn has_wire(&self, connection: &Connection) -> bool {
        self.connections.iter().any(|c| c.same_wire(connection))
    }

    pub(crate) fn label_mut(&mut self) -> &mut LabelField {
        &mut self.label
    }

    pub(crate) fn connections_mut(&mut self) -> &mut [Connection] {
        &mut self.connections
    }
}
