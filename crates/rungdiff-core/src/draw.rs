//! Drawing primitives shared by renderers.
//!
//! - [`LayeredOutput`] / [`RenderLayer`]: z-ordered collection of SVG nodes
//! - [`StrokeDefinition`]: line color, width and dash pattern
//! - [`TextDefinition`]: font and decoration of labels
//! - [`DiffPalette`]: maps a [`DiffMarker`](crate::diagram::DiffMarker) to
//!   the stroke and text styles above for a given [`Theme`]

mod layer;
mod palette;
mod stroke;
mod text;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use palette::{DiffPalette, Theme};
pub use stroke::{StrokeDefinition, StrokeStyle};
pub use text::{FontWeight, TextAnchor, TextDecoration, TextDefinition};
