//! Structural diff of two ladder diagram revisions.
//!
//! The engine correlates elements of an old and a new [`Diagram`] by their
//! stable [`ElementId`](crate::identifier::ElementId) and produces one
//! [`MarkerOverlay`] per side. The diagrams themselves are not touched;
//! [`DiagramDiff::apply`] (or [`diff_in_place`]) writes the markers into
//! them for rendering.
//!
//! # Matching rules
//!
//! - Elements missing on the other side are marked together with everything
//!   they contain (labels, pin labels, connections).
//! - Matched blocks compare their type name. A different type marks the whole
//!   element pair as replaced; an equal type compares the instance name only.
//! - Other matched elements compare their top label and inner text.
//! - Connections of matched elements are correlated pin by pin, by list
//!   position, and are equal when target element and target pin label
//!   match. Routing points are ignored. Reordered pins therefore show up as
//!   removed and re-added wires.
//!
//! # Example
//!
//! ```
//! use rungdiff_core::diagram::{Diagram, DiffMarker, Element, ElementKind, LabelField, Position};
//! use rungdiff_core::diff;
//!
//! let contact = |name: &str| {
//!     Element::new("2", ElementKind::Contact, Position::new(80, 40), 21, 20)
//!         .with_top_label(LabelField::new(name))
//! };
//! let mut old = Diagram::new("main");
//! old.insert(contact("start"));
//! let mut new = Diagram::new("main");
//! new.insert(contact("stop"));
//!
//! let summary = diff::diff_in_place(&mut old, &mut new);
//! assert_eq!(summary.labels_deleted, 1);
//! assert_eq!(
//!     new.get("2".into()).unwrap().top_label().marker(),
//!     DiffMarker::Added
//! );
//! ```

mod overlay;

pub use overlay::{ConnectionKey, LabelKey, MarkerOverlay};

use log::{debug, trace};

use crate::diagram::{Diagram, DiffMarker, Element, ElementKind, LabelSlot, PinSide};

/// Marker overlays for both sides of a diff.
#[derive(Debug, Default, Clone)]
pub struct DiagramDiff {
    old: MarkerOverlay,
    new: MarkerOverlay,
}

impl DiagramDiff {
    /// Returns the markers of the old revision (only `Deleted` entries).
    pub fn old_overlay(&self) -> &MarkerOverlay {
        &self.old
    }

    /// Returns the markers of the new revision (only `Added` entries).
    pub fn new_overlay(&self) -> &MarkerOverlay {
        &self.new
    }

    /// Returns `true` if the two revisions are structurally identical.
    pub fn is_empty(&self) -> bool {
        self.old.is_empty() && self.new.is_empty()
    }

    /// Counts the marked entities of both sides.
    pub fn summary(&self) -> DiffSummary {
        DiffSummary {
            elements_added: self.new.count_elements(DiffMarker::Added),
            elements_deleted: self.old.count_elements(DiffMarker::Deleted),
            labels_added: self.new.count_labels(DiffMarker::Added),
            labels_deleted: self.old.count_labels(DiffMarker::Deleted),
            connections_added: self.new.count_connections(DiffMarker::Added),
            connections_deleted: self.old.count_connections(DiffMarker::Deleted),
        }
    }

    /// Writes the markers into the diagrams the diff was computed from.
    pub fn apply(&self, old: &mut Diagram, new: &mut Diagram) {
        self.old.apply(old);
        self.new.apply(new);
    }

    fn compare_elements(&mut self, old: &Element, new: &Element) {
        if old.kind() == ElementKind::Block && new.kind() == ElementKind::Block {
            if old.block_type().same_value(new.block_type()) {
                self.compare_label(old, new, LabelSlot::Top);
            } else {
                debug!(
                    id:% = old.id(),
                    old_type = old.block_type().value(),
                    new_type = new.block_type().value();
                    "Block type changed"
                );
                self.old.mark_element(old.id(), DiffMarker::Deleted);
                self.new.mark_element(new.id(), DiffMarker::Added);
            }
        } else {
            self.compare_label(old, new, LabelSlot::Top);
            self.compare_label(old, new, LabelSlot::InnerText);
        }

        self.compare_connections(old, new);
    }

    fn compare_label(&mut self, old: &Element, new: &Element, slot: LabelSlot) {
        let (Some(old_label), Some(new_label)) = (old.label(slot), new.label(slot)) else {
            return;
        };

        if !old_label.same_value(new_label) {
            trace!(id:% = old.id(), slot:? = slot; "Label changed");
            self.old
                .mark_label(LabelKey::new(old.id(), slot), DiffMarker::Deleted);
            self.new
                .mark_label(LabelKey::new(new.id(), slot), DiffMarker::Added);
        }
    }

    fn compare_connections(&mut self, old: &Element, new: &Element) {
        for side in PinSide::ALL {
            mark_unmatched_wires(&mut self.old, old, new, side, DiffMarker::Deleted);
            mark_unmatched_wires(&mut self.new, new, old, side, DiffMarker::Added);
        }
    }
}

/// Numbers of marked entities after a diff.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DiffSummary {
    pub elements_added: usize,
    pub elements_deleted: usize,
    pub labels_added: usize,
    pub labels_deleted: usize,
    pub connections_added: usize,
    pub connections_deleted: usize,
}

impl DiffSummary {
    /// Returns `true` if nothing changed.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Computes the diff of two revisions of the same diagram.
///
/// Neither diagram is modified. Total over its inputs: malformed diagrams
/// yield meaningless markers, never errors.
pub fn diff(old: &Diagram, new: &Diagram) -> DiagramDiff {
    let mut result = DiagramDiff::default();

    for old_element in old.elements() {
        match new.get(old_element.id()) {
            Some(new_element) => result.compare_elements(old_element, new_element),
            None => {
                trace!(id:% = old_element.id(), kind:% = old_element.kind(); "Element deleted");
                result.old.mark_subtree(old_element, DiffMarker::Deleted);
            }
        }
    }

    for new_element in new.elements().filter(|e| !old.contains(e.id())) {
        trace!(id:% = new_element.id(), kind:% = new_element.kind(); "Element added");
        result.new.mark_subtree(new_element, DiffMarker::Added);
    }

    debug!(
        diagram = old.name(),
        old_elements = old.len(),
        new_elements = new.len();
        "Diff computed"
    );

    result
}

/// Diffs two diagrams and writes the resulting markers into both.
///
/// Any markers from an earlier diff are overwritten.
pub fn diff_in_place(old: &mut Diagram, new: &mut Diagram) -> DiffSummary {
    let result = diff(old, new);
    result.apply(old, new);
    result.summary()
}

/// Marks every connection of `element` on `side` that has no identical wire
/// on the pin at the same index of `counterpart`.
fn mark_unmatched_wires(
    overlay: &mut MarkerOverlay,
    element: &Element,
    counterpart: &Element,
    side: PinSide,
    marker: DiffMarker,
) {
    let counterpart_pins = counterpart.pins(side);

    for (pin_index, pin) in element.pins(side).iter().enumerate() {
        let counterpart_pin = counterpart_pins.get(pin_index);

        for (index, connection) in pin.connections().iter().enumerate() {
            if !counterpart_pin.is_some_and(|p| p.has_wire(connection)) {
                let key = ConnectionKey::new(element.id(), side, pin_index, index);
                overlay.mark_connection(key, marker);
            }
        }
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;
    use crate::diagram::{Connection, LabelField, Pin, Position};

    // ===================
    // Strategies
    // ===================

    fn kind_strategy() -> impl Strategy<Value = ElementKind> {
        prop::sample::select(vec![
            ElementKind::Contact,
            ElementKind::Coil,
            ElementKind::Connector,
            ElementKind::InVariable,
            ElementKind::LeftPowerRail,
            ElementKind::Block,
        ])
    }

    fn pin_strategy() -> impl Strategy<Value = Vec<(u8, String)>> {
        prop::collection::vec((0u8..8, "[A-Z]{0,2}"), 0..3)
    }

    fn element_strategy() -> impl Strategy<Value = (ElementKind, String, String, Vec<Vec<(u8, String)>>)>
    {
        (
            kind_strategy(),
            "[a-z]{0,4}",
            "[A-Z]{0,3}",
            prop::collection::vec(pin_strategy(), 0..3),
        )
    }

    fn diagram_strategy() -> impl Strategy<Value = Diagram> {
        prop::collection::vec(element_strategy(), 0..8).prop_map(|specs| {
            let mut diagram = Diagram::new("generated");
            for (index, (kind, name, type_name, pins)) in specs.into_iter().enumerate() {
                let mut element =
                    Element::new(index.to_string().as_str(), kind, Position::default(), 20, 20)
                        .with_top_label(LabelField::new(name))
                        .with_block_type(LabelField::new(type_name));
                for (order, wires) in pins.into_iter().enumerate() {
                    let mut pin = Pin::new(Position::default(), order);
                    for (target, label) in wires {
                        pin = pin.with_connection(Connection::new(
                            target.to_string().as_str(),
                            label,
                            Vec::new(),
                        ));
                    }
                    element = element.with_input(pin);
                }
                diagram.insert(element);
            }
            diagram
        })
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Diffing a diagram against a copy of itself marks nothing.
    fn check_identity_has_no_markers(diagram: Diagram) -> Result<(), TestCaseError> {
        let result = diff(&diagram, &diagram.clone());
        prop_assert!(result.is_empty(), "unexpected markers: {:?}", result);
        Ok(())
    }

    /// Swapping old and new swaps deletions and additions.
    fn check_swap_mirrors_summary(old: Diagram, new: Diagram) -> Result<(), TestCaseError> {
        let forward = diff(&old, &new).summary();
        let backward = diff(&new, &old).summary();

        prop_assert_eq!(forward.elements_added, backward.elements_deleted);
        prop_assert_eq!(forward.elements_deleted, backward.elements_added);
        prop_assert_eq!(forward.labels_added, backward.labels_deleted);
        prop_assert_eq!(forward.labels_deleted, backward.labels_added);
        prop_assert_eq!(forward.connections_added, backward.connections_deleted);
        prop_assert_eq!(forward.connections_deleted, backward.connections_added);
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn identity_has_no_markers(diagram in diagram_strategy()) {
            check_identity_has_no_markers(diagram)?;
        }

        #[test]
        fn swap_mirrors_summary(old in diagram_strategy(), new in diagram_strategy()) {
            check_swap_mirrors_summary(old, new)?;
        }
    }
}
