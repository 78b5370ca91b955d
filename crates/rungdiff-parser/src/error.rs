//! Errors of the PLCopen front-end.

use thiserror::Error;

/// Error type for reading a PLCopen document into a diagram.
///
/// Missing or malformed geometry never produces an error; it is read as
/// zero. Only documents that are not well-formed XML and lookups of absent
/// POUs fail.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The document could not be deserialized.
    #[error("invalid PLCopen XML: {0}")]
    Xml(#[from] quick_xml::DeError),

    /// The document has no POU with the requested name.
    #[error("no POU named `{name}` in the document (available: {})", .available.join(", "))]
    PouNotFound {
        name: String,
        available: Vec<String>,
    },
}
