//! Ladder diagram model.
//!
//! A [`Diagram`] is one program-organization-unit (POU) of a PLCopen
//! document: a set of [`Element`]s keyed by their stable [`ElementId`].
//! Elements own their [`Pin`]s and pins own their outgoing [`Connection`]s.
//!
//! Every entity whose presence or value may differ between two revisions
//! carries a [`DiffMarker`]. Markers start at [`DiffMarker::Unchanged`] and
//! are only ever written by [`MarkerOverlay::apply`](crate::diff::MarkerOverlay::apply).
//!
//! # Example
//!
//! ```
//! use rungdiff_core::diagram::{Diagram, Element, ElementKind, LabelField, Position};
//!
//! let mut diagram = Diagram::new("main");
//! diagram.insert(
//!     Element::new("2", ElementKind::Contact, Position::new(80, 40), 21, 20)
//!         .with_top_label(LabelField::new("start")),
//! );
//! assert_eq!(diagram.len(), 1);
//! assert!(diagram.get("2".into()).is_some());
//! ```

mod element;
mod pin;

pub use element::{Element, ElementKind, LabelSlot};
pub use pin::{Connection, Pin, PinSide};

use std::fmt;

use indexmap::IndexMap;

use crate::identifier::ElementId;

/// Change state of a diagram entity relative to the other revision.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiffMarker {
    /// Present and equal in both revisions (also the state of un-diffed diagrams).
    #[default]
    Unchanged,
    /// Only present (or different) in the old revision.
    Deleted,
    /// Only present (or different) in the new revision.
    Added,
}

impl DiffMarker {
    /// Returns a human-readable name for this marker.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unchanged => "unchanged",
            Self::Deleted => "deleted",
            Self::Added => "added",
        }
    }
}

impl fmt::Display for DiffMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A textual annotation of an element together with its diff marker.
///
/// Two label fields are considered equal when their values are equal; the
/// marker and the on-screen position play no role.
#[derive(Debug, Default, Clone)]
pub struct LabelField {
    value: String,
    marker: DiffMarker,
}

impl LabelField {
    /// Creates an unchanged label with the given text.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            marker: DiffMarker::Unchanged,
        }
    }

    /// Returns the label text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the label's diff marker.
    pub fn marker(&self) -> DiffMarker {
        self.marker
    }

    /// Returns `true` if the label has no text.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Compares two labels by value only.
    pub fn same_value(&self, other: &LabelField) -> bool {
        self.value == other.value
    }

    pub(crate) fn set_marker(&mut self, marker: DiffMarker) {
        self.marker = marker;
    }
}

/// Integer coordinates in diagram grid units.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }
}

/// A named program-organization-unit with its ladder elements.
///
/// Elements iterate in insertion order, which keeps rendered output stable
/// across runs.
#[derive(Debug, Clone)]
pub struct Diagram {
    name: String,
    elements: IndexMap<ElementId, Element>,
}

impl Diagram {
    /// Creates an empty diagram for the POU with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            elements: IndexMap::new(),
        }
    }

    /// Returns the POU name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inserts an element keyed by its id.
    ///
    /// Returns the element previously stored under the same id, if any. The
    /// replaced element keeps its original insertion slot.
    pub fn insert(&mut self, element: Element) -> Option<Element> {
        self.elements.insert(element.id(), element)
    }

    /// Looks up an element by id.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    /// Returns `true` if an element with the given id exists.
    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    /// Iterates over the elements in insertion order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    pub(crate) fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.elements.values_mut()
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the diagram has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
