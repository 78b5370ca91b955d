//! Error types for Rungdiff operations.

use std::io;

use thiserror::Error;

use rungdiff_parser::ParseError;

/// The main error type for Rungdiff operations.
#[derive(Debug, Error)]
pub enum RungdiffError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Render error: {0}")]
    Render(String),

    /// Failure to obtain a revision of the diagram file, e.g. from git.
    #[error("Revision error: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),
}
