//! Export functionality for ladder diagrams.
//!
//! # Pipeline Position
//!
//! ```text
//! PLCopen XML
//!     ↓ parse
//! Diagram
//!     ↓ diff (optional, writes markers)
//! Diagram with markers
//!     ↓ export (this module)
//! SVG document
//! ```
//!
//! # Available Backends
//!
//! - `svg`: SVG output via `Svg`

/// SVG export backend.
pub mod svg;
