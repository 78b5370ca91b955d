//! PLCopen XML front-end for Rungdiff.
//!
//! Reads TC6 XML documents ([`plcopen`]) and builds the ladder diagram of a
//! single POU ([`builder`]).
//!
//! # Example
//!
//! ```
//! let xml = br#"<project xmlns="http://www.plcopen.org/xml/tc6_0201">
//!   <types><pous><pou name="main" pouType="program"><body><LD>
//!     <leftPowerRail localId="1" width="3" height="40"><position x="10" y="10"/></leftPowerRail>
//!     <contact localId="2" width="21" height="20" negated="true">
//!       <position x="80" y="20"/>
//!       <variable>start</variable>
//!     </contact>
//!   </LD></body></pou></pous></types>
//! </project>"#;
//!
//! let diagram = rungdiff_parser::parse(xml, "main").unwrap();
//! assert_eq!(diagram.len(), 2);
//!
//! let err = rungdiff_parser::parse(xml, "other").unwrap_err();
//! assert!(err.to_string().contains("available: main"));
//! ```

pub mod builder;
pub mod error;
pub mod plcopen;

use log::info;

use rungdiff_core::diagram::Diagram;

pub use error::ParseError;

/// Parses a PLCopen document and builds the diagram of the named POU.
///
/// # Errors
///
/// Returns [`ParseError::Xml`] for documents that cannot be deserialized and
/// [`ParseError::PouNotFound`] if no POU has the given name.
pub fn parse(bytes: &[u8], pou_name: &str) -> Result<Diagram, ParseError> {
    let project = plcopen::Project::from_bytes(bytes)?;

    let pou = project
        .pou(pou_name)
        .ok_or_else(|| ParseError::PouNotFound {
            name: pou_name.to_string(),
            available: project.pou_names().map(str::to_string).collect(),
        })?;

    let diagram = builder::build_diagram(pou);
    info!(pou = pou_name, elements = diagram.len(); "Parsed ladder diagram");

    Ok(diagram)
}
