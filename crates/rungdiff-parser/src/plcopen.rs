//! Typed tree of a PLCopen TC6 XML document.
//!
//! Only the parts needed to draw ladder diagrams are modelled; unknown
//! elements and attributes are skipped. Numeric attributes are read
//! leniently: an integer, else a finite float truncated toward zero, else 0.
//! Booleans accept `true` and `1`; anything else reads as `false`.
//!
//! # Example
//!
//! ```
//! use rungdiff_parser::plcopen::Project;
//!
//! let xml = br#"<project xmlns="http://www.plcopen.org/xml/tc6_0201">
//!   <types><pous><pou name="main" pouType="program"/></pous></types>
//! </project>"#;
//!
//! let project = Project::from_bytes(xml).unwrap();
//! assert_eq!(project.pou_names().collect::<Vec<_>>(), vec!["main"]);
//! ```

use rungdiff_core::diagram::{self, ElementKind};
use serde::{Deserialize, Deserializer};

use crate::error::ParseError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Root `<project>` element.
#[derive(Debug, Default, Deserialize)]
pub struct Project {
    #[serde(rename = "fileHeader", default)]
    pub file_header: FileHeader,
    #[serde(rename = "contentHeader", default)]
    pub content_header: ContentHeader,
    #[serde(default)]
    pub types: Types,
}

impl Project {
    /// Deserializes a document.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Xml`] if the bytes are not a well-formed
    /// document of the expected shape.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ParseError> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        Ok(quick_xml::de::from_reader(bytes)?)
    }

    /// Looks up a POU by name.
    pub fn pou(&self, name: &str) -> Option<&Pou> {
        self.types.pous.pous.iter().find(|pou| pou.name == name)
    }

    /// Iterates over the names of all POUs in document order.
    pub fn pou_names(&self) -> impl Iterator<Item = &str> {
        self.types.pous.pous.iter().map(|pou| pou.name.as_str())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FileHeader {
    #[serde(rename = "@companyName", default)]
    pub company_name: String,
    #[serde(rename = "@productName", default)]
    pub product_name: String,
    #[serde(rename = "@productVersion", default)]
    pub product_version: String,
    #[serde(rename = "@creationDateTime", default)]
    pub creation_date_time: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContentHeader {
    #[serde(rename = "@name", default)]
    pub name: String,
    #[serde(rename = "@modificationDateTime", default)]
    pub modification_date_time: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct Types {
    #[serde(default)]
    pub pous: Pous,
}

#[derive(Debug, Default, Deserialize)]
pub struct Pous {
    #[serde(rename = "pou", default)]
    pub pous: Vec<Pou>,
}

/// A program-organization-unit.
#[derive(Debug, Default, Deserialize)]
pub struct Pou {
    #[serde(rename = "@name", default)]
    pub name: String,
    #[serde(rename = "@pouType", default)]
    pub pou_type: String,
    #[serde(default)]
    pub body: Body,
}

#[derive(Debug, Default, Deserialize)]
pub struct Body {
    /// Ladder diagram section; `None` for ST, FBD, SFC and IL bodies.
    #[serde(rename = "LD", default)]
    pub ld: Option<Ld>,
}

/// Children of an `<LD>` body, grouped by kind.
#[derive(Debug, Default, Deserialize)]
pub struct Ld {
    #[serde(rename = "leftPowerRail", default)]
    pub left_power_rails: Vec<Primitive>,
    #[serde(rename = "contact", default)]
    pub contacts: Vec<Primitive>,
    #[serde(rename = "coil", default)]
    pub coils: Vec<Primitive>,
    #[serde(rename = "rightPowerRail", default)]
    pub right_power_rails: Vec<Primitive>,
    #[serde(rename = "connector", default)]
    pub connectors: Vec<Primitive>,
    #[serde(rename = "continuation", default)]
    pub continuations: Vec<Primitive>,
    #[serde(rename = "inOutVariable", default)]
    pub in_out_variables: Vec<Primitive>,
    #[serde(rename = "inVariable", default)]
    pub in_variables: Vec<Primitive>,
    #[serde(rename = "outVariable", default)]
    pub out_variables: Vec<Primitive>,
    #[serde(rename = "block", default)]
    pub blocks: Vec<Block>,
}

impl Ld {
    /// Iterates over all non-block children tagged with their kind.
    ///
    /// Kinds come in a fixed order (left rails, contacts, coils, right rails,
    /// connectors, continuations, in-out, in and out variables), each list
    /// in document order.
    pub fn primitives(&self) -> impl Iterator<Item = (ElementKind, &Primitive)> {
        [
            (ElementKind::LeftPowerRail, &self.left_power_rails),
            (ElementKind::Contact, &self.contacts),
            (ElementKind::Coil, &self.coils),
            (ElementKind::RightPowerRail, &self.right_power_rails),
            (ElementKind::Connector, &self.connectors),
            (ElementKind::Continuation, &self.continuations),
            (ElementKind::InOutVariable, &self.in_out_variables),
            (ElementKind::InVariable, &self.in_variables),
            (ElementKind::OutVariable, &self.out_variables),
        ]
        .into_iter()
        .flat_map(|(kind, list)| list.iter().map(move |primitive| (kind, primitive)))
    }

    /// Returns the total number of children, blocks included.
    pub fn len(&self) -> usize {
        self.primitives().count() + self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Any LD child other than a block.
#[derive(Debug, Default, Deserialize)]
pub struct Primitive {
    #[serde(rename = "@localId", default)]
    pub local_id: String,
    /// Connector and continuation name.
    #[serde(rename = "@name", default)]
    pub name: String,
    #[serde(rename = "@width", default, deserialize_with = "lenient_i32")]
    pub width: i32,
    #[serde(rename = "@height", default, deserialize_with = "lenient_i32")]
    pub height: i32,
    #[serde(rename = "@negated", default, deserialize_with = "lenient_bool")]
    pub negated: bool,
    /// `rising`, `falling` or `none`.
    #[serde(rename = "@edge", default)]
    pub edge: String,
    /// `set`, `reset` or `none`.
    #[serde(rename = "@storage", default)]
    pub storage: String,
    #[serde(default)]
    pub position: Position,
    #[serde(rename = "connectionPointIn", default)]
    pub connection_points_in: Vec<ConnectionPoint>,
    #[serde(rename = "connectionPointOut", default)]
    pub connection_points_out: Vec<ConnectionPoint>,
    /// Variable bound to a contact or coil.
    #[serde(default)]
    pub variable: Option<String>,
    /// Expression of a variable reference.
    #[serde(default)]
    pub expression: Option<String>,
}

impl Primitive {
    pub fn is_rising_edge(&self) -> bool {
        self.edge == "rising"
    }

    pub fn is_falling_edge(&self) -> bool {
        self.edge == "falling"
    }

    pub fn is_set(&self) -> bool {
        self.storage == "set"
    }

    pub fn is_reset(&self) -> bool {
        self.storage == "reset"
    }
}

/// Function or function block call.
#[derive(Debug, Default, Deserialize)]
pub struct Block {
    #[serde(rename = "@localId", default)]
    pub local_id: String,
    #[serde(rename = "@typeName", default)]
    pub type_name: String,
    #[serde(rename = "@instanceName", default)]
    pub instance_name: String,
    #[serde(rename = "@width", default, deserialize_with = "lenient_i32")]
    pub width: i32,
    #[serde(rename = "@height", default, deserialize_with = "lenient_i32")]
    pub height: i32,
    #[serde(default)]
    pub position: Position,
    #[serde(rename = "inputVariables", default)]
    pub input_variables: BlockVariables,
    #[serde(rename = "inOutVariables", default)]
    pub in_out_variables: BlockVariables,
    #[serde(rename = "outputVariables", default)]
    pub output_variables: BlockVariables,
}

#[derive(Debug, Default, Deserialize)]
pub struct BlockVariables {
    #[serde(rename = "variable", default)]
    pub variables: Vec<BlockVariable>,
}

/// A formal parameter of a block.
#[derive(Debug, Default, Deserialize)]
pub struct BlockVariable {
    #[serde(rename = "@formalParameter", default)]
    pub formal_parameter: String,
    #[serde(rename = "connectionPointIn", default)]
    pub connection_points_in: Vec<ConnectionPoint>,
    #[serde(rename = "connectionPointOut", default)]
    pub connection_points_out: Vec<ConnectionPoint>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ConnectionPoint {
    #[serde(rename = "@formalParameter", default)]
    pub formal_parameter: String,
    /// Position relative to the owning element.
    #[serde(rename = "relPosition", default)]
    pub rel_position: Position,
    #[serde(rename = "connection", default)]
    pub connections: Vec<Connection>,
}

/// Reference to the element (and pin) a connection point is wired to.
#[derive(Debug, Default, Deserialize)]
pub struct Connection {
    #[serde(rename = "@refLocalId", default)]
    pub ref_local_id: String,
    #[serde(rename = "@formalParameter", default)]
    pub formal_parameter: String,
    /// Routing points in absolute coordinates.
    #[serde(rename = "position", default)]
    pub positions: Vec<Position>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Position {
    #[serde(rename = "@x", default, deserialize_with = "lenient_i32")]
    pub x: i32,
    #[serde(rename = "@y", default, deserialize_with = "lenient_i32")]
    pub y: i32,
}

impl From<Position> for diagram::Position {
    fn from(position: Position) -> Self {
        Self::new(position.x, position.y)
    }
}

fn lenient_i32<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(parse_i32(&raw))
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(parse_bool(&raw))
}

fn parse_i32(raw: &str) -> i32 {
    let raw = raw.trim();
    if let Ok(value) = raw.parse::<i32>() {
        return value;
    }
    match raw.parse::<f64>() {
        // `as` saturates at the i32 bounds
        Ok(value) if value.is_finite() => value as i32,
        _ => 0,
    }
}

fn parse_bool(raw: &str) -> bool {
    let raw = raw.trim();
    raw == "1" || raw.eq_ignore_ascii_case("true")
}
