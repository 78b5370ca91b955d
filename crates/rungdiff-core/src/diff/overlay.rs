//! Marker overlays produced by the diff engine.
//!
//! An overlay records the non-default markers of one diagram. Lookups of
//! keys that were never marked yield [`DiffMarker::Unchanged`].

use std::collections::HashMap;

use crate::{
    diagram::{Diagram, DiffMarker, Element, LabelSlot, PinSide},
    identifier::ElementId,
};

/// Addresses one label of one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LabelKey {
    element: ElementId,
    slot: LabelSlot,
}

impl LabelKey {
    pub fn new(element: ElementId, slot: LabelSlot) -> Self {
        Self { element, slot }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn slot(&self) -> LabelSlot {
        self.slot
    }
}

/// Addresses one connection: element, pin list, pin index and the
/// connection's index on that pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionKey {
    element: ElementId,
    side: PinSide,
    pin: usize,
    index: usize,
}

impl ConnectionKey {
    pub fn new(element: ElementId, side: PinSide, pin: usize, index: usize) -> Self {
        Self {
            element,
            side,
            pin,
            index,
        }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn side(&self) -> PinSide {
        self.side
    }

    pub fn pin(&self) -> usize {
        self.pin
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

/// Diff markers of a single diagram, kept apart from the diagram itself.
#[derive(Debug, Default, Clone)]
pub struct MarkerOverlay {
    elements: HashMap<ElementId, DiffMarker>,
    labels: HashMap<LabelKey, DiffMarker>,
    connections: HashMap<ConnectionKey, DiffMarker>,
}

impl MarkerOverlay {
    /// Returns the marker of the element with the given id.
    pub fn element(&self, id: ElementId) -> DiffMarker {
        self.elements.get(&id).copied().unwrap_or_default()
    }

    /// Returns the marker of a label.
    pub fn label(&self, key: LabelKey) -> DiffMarker {
        self.labels.get(&key).copied().unwrap_or_default()
    }

    /// Returns the marker of a connection.
    pub fn connection(&self, key: ConnectionKey) -> DiffMarker {
        self.connections.get(&key).copied().unwrap_or_default()
    }

    /// Returns `true` if nothing is marked.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty() && self.labels.is_empty() && self.connections.is_empty()
    }

    /// Writes the overlay into the diagram's marker fields.
    ///
    /// Every marker of the diagram is assigned, entries missing from the
    /// overlay are reset to [`DiffMarker::Unchanged`]. Applying the same
    /// overlay twice leaves the diagram as after the first application.
    pub fn apply(&self, diagram: &mut Diagram) {
        for element in diagram.elements_mut() {
            let id = element.id();
            element.set_marker(self.element(id));

            let slots: Vec<LabelSlot> = element.label_slots().collect();
            for slot in slots {
                if let Some(label) = element.label_mut(slot) {
                    label.set_marker(self.label(LabelKey::new(id, slot)));
                }
            }

            for side in PinSide::ALL {
                for (pin_index, pin) in element.pins_mut(side).iter_mut().enumerate() {
                    for (index, connection) in pin.connections_mut().iter_mut().enumerate() {
                        let key = ConnectionKey::new(id, side, pin_index, index);
                        connection.set_marker(self.connection(key));
                    }
                }
            }
        }
    }

    pub(super) fn mark_element(&mut self, id: ElementId, marker: DiffMarker) {
        set_or_clear(&mut self.elements, id, marker);
    }

    pub(super) fn mark_label(&mut self, key: LabelKey, marker: DiffMarker) {
        set_or_clear(&mut self.labels, key, marker);
    }

    pub(super) fn mark_connection(&mut self, key: ConnectionKey, marker: DiffMarker) {
        set_or_clear(&mut self.connections, key, marker);
    }

    /// Marks an element together with all of its labels, pin labels and
    /// connections.
    pub(super) fn mark_subtree(&mut self, element: &Element, marker: DiffMarker) {
        let id = element.id();
        self.mark_element(id, marker);

        for slot in element.label_slots() {
            self.mark_label(LabelKey::new(id, slot), marker);
        }

        for side in PinSide::ALL {
            for (pin_index, pin) in element.pins(side).iter().enumerate() {
                for index in 0..pin.connections().len() {
                    self.mark_connection(ConnectionKey::new(id, side, pin_index, index), marker);
                }
            }
        }
    }

    pub(super) fn count_elements(&self, marker: DiffMarker) -> usize {
        self.elements.values().filter(|m| **m == marker).count()
    }

    pub(super) fn count_labels(&self, marker: DiffMarker) -> usize {
        self.labels.values().filter(|m| **m == marker).count()
    }

    pub(super) fn count_connections(&self, marker: DiffMarker) -> usize {
        self.connections.values().filter(|m| **m == marker).count()
    }
}

fn set_or_clear<K: std::hash::Hash + Eq>(
    markers: &mut HashMap<K, DiffMarker>,
    key: K,
    marker: DiffMarker,
) {
    if marker == DiffMarker::Unchanged {
        markers.remove(&key);
    } else {
        markers.insert(key, marker);
    }
}
