//! Ladder diagram elements.

use std::fmt;

use crate::{
    diagram::{DiffMarker, LabelField, Pin, PinSide, Position},
    identifier::ElementId,
};

/// The kind of a diagrammed ladder element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Contact,
    Coil,
    Connector,
    Continuation,
    InVariable,
    OutVariable,
    InOutVariable,
    LeftPowerRail,
    RightPowerRail,
    /// Function or function block call.
    Block,
}

impl ElementKind {
    /// Returns the PLCopen XML tag name of this kind.
    pub fn tag_name(&self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::Coil => "coil",
            Self::Connector => "connector",
            Self::Continuation => "continuation",
            Self::InVariable => "inVariable",
            Self::OutVariable => "outVariable",
            Self::InOutVariable => "inOutVariable",
            Self::LeftPowerRail => "leftPowerRail",
            Self::RightPowerRail => "rightPowerRail",
            Self::Block => "block",
        }
    }

    /// Returns `true` for the three variable reference kinds.
    pub fn is_variable(&self) -> bool {
        matches!(
            self,
            Self::InVariable | Self::OutVariable | Self::InOutVariable
        )
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag_name())
    }
}

/// Addresses one [`LabelField`] of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelSlot {
    /// Symbol glyph or expression drawn inside the shape.
    InnerText,
    /// Variable or instance name drawn above the shape.
    Top,
    /// Reserved, always empty.
    Bottom,
    /// Function block type name.
    BlockType,
    /// Formal parameter label of the pin at the given index.
    Pin(PinSide, usize),
}

impl LabelSlot {
    /// The label slots every element has, independent of its pins.
    pub const FIXED: [LabelSlot; 4] = [
        LabelSlot::InnerText,
        LabelSlot::Top,
        LabelSlot::Bottom,
        LabelSlot::BlockType,
    ];
}

/// A diagrammed unit: contact, coil, connector, continuation, variable
/// reference, power rail or block.
#[derive(Debug, Clone)]
pub struct Element {
    id: ElementId,
    kind: ElementKind,
    position: Position,
    width: i32,
    height: i32,
    inner_text: LabelField,
    top_label: LabelField,
    bottom_label: LabelField,
    block_type: LabelField,
    inputs: Vec<Pin>,
    outputs: Vec<Pin>,
    marker: DiffMarker,
}

impl Element {
    /// Creates an element without labels or pins.
    ///
    /// # Arguments
    ///
    /// * `id` - Identifier stable across revisions of the document
    /// * `kind` - The element kind
    /// * `position` - Top-left corner in diagram coordinates
    /// * `width` / `height` - Element size
    pub fn new(
        id: impl Into<ElementId>,
        kind: ElementKind,
        position: Position,
        width: i32,
        height: i32,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            position,
            width,
            height,
            inner_text: LabelField::default(),
            top_label: LabelField::default(),
            bottom_label: LabelField::default(),
            block_type: LabelField::default(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            marker: DiffMarker::Unchanged,
        }
    }

    pub fn with_inner_text(mut self, label: LabelField) -> Self {
        self.inner_text = label;
        self
    }

    pub fn with_top_label(mut self, label: LabelField) -> Self {
        self.top_label = label;
        self
    }

    pub fn with_block_type(mut self, label: LabelField) -> Self {
        self.block_type = label;
        self
    }

    /// Appends an input pin.
    pub fn with_input(mut self, pin: Pin) -> Self {
        self.inputs.push(pin);
        self
    }

    /// Appends an output pin.
    pub fn with_output(mut self, pin: Pin) -> Self {
        self.outputs.push(pin);
        self
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn inner_text(&self) -> &LabelField {
        &self.inner_text
    }

    pub fn top_label(&self) -> &LabelField {
        &self.top_label
    }

    pub fn bottom_label(&self) -> &LabelField {
        &self.bottom_label
    }

    pub fn block_type(&self) -> &LabelField {
        &self.block_type
    }

    pub fn inputs(&self) -> &[Pin] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Pin] {
        &self.outputs
    }

    /// Returns the input or output pin list.
    pub fn pins(&self, side: PinSide) -> &[Pin] {
        match side {
            PinSide::Input => &self.inputs,
            PinSide::Output => &self.outputs,
        }
    }

    pub fn marker(&self) -> DiffMarker {
        self.marker
    }

    /// Returns the label stored in `slot`, or `None` for a pin index that
    /// does not exist.
    pub fn label(&self, slot: LabelSlot) -> Option<&LabelField> {
        match slot {
            LabelSlot::InnerText => Some(&self.inner_text),
            LabelSlot::Top => Some(&self.top_label),
            LabelSlot::Bottom => Some(&self.bottom_label),
            LabelSlot::BlockType => Some(&self.block_type),
            LabelSlot::Pin(side, index) => self.pins(side).get(index).map(Pin::label),
        }
    }

    /// Iterates over every label slot of this element, fixed slots first,
    /// then input pins, then output pins.
    pub fn label_slots(&self) -> impl Iterator<Item = LabelSlot> + '_ {
        LabelSlot::FIXED.into_iter().chain(PinSide::ALL.into_iter().flat_map(
            move |side| (0..self.pins(side).len()).map(move |index| LabelSlot::Pin(side, index)),
        ))
    }

    pub(crate) fn label_mut(&mut self, slot: LabelSlot) -> Option<&mut LabelField> {
        match slot {
            LabelSlot::InnerText => Some(&mut self.inner_text),
            LabelSlot::Top => Some(&mut self.top_label),
            LabelSlot::Bottom => Some(&mut self.bottom_label),
            LabelSlot::BlockType => Some(&mut self.block_type),
            LabelSlot::Pin(side, index) => self.pins_mut(side).get_mut(index).map(Pin::label_mut),
        }
    }

    pub(crate) fn pins_mut(&mut self, side: PinSide) -> &mut [Pin] {
        match side {
            PinSide::Input => &mut self.inputs,
            PinSide::Output => &mut self.outputs,
        }
    }

    pub(crate) fn set_marker(&mut self, marker: DiffMarker) {
        self.marker = marker;
    }
}
