//! Rungdiff - visual diff of PLCopen ladder diagrams.
//!
//! Parsing, structural diffing and SVG rendering of the ladder (LD) bodies
//! of PLCopen TC6 XML projects. Two revisions of a POU are compared element
//! by element; each revision is then rendered with deleted entities in red
//! on the old side and added entities in green on the new side.

pub mod config;

mod error;
pub mod export;

pub use rungdiff_core::{color, diagram, diff, draw, identifier};

pub use error::RungdiffError;

use log::{debug, info, trace};

use config::AppConfig;
use diagram::Diagram;
use diff::DiffSummary;
use export::svg::Svg;

/// Builder for parsing, diffing and rendering ladder diagrams.
///
/// # Examples
///
/// ```rust,no_run
/// use rungdiff::{DiagramBuilder, config::AppConfig};
///
/// let old_xml = std::fs::read("old.xml").expect("Failed to read");
/// let new_xml = std::fs::read("new.xml").expect("Failed to read");
///
/// let builder = DiagramBuilder::new(AppConfig::default());
///
/// let mut old = builder.parse(&old_xml, "main").expect("Failed to parse");
/// let mut new = builder.parse(&new_xml, "main").expect("Failed to parse");
///
/// let summary = builder.diff(&mut old, &mut new);
/// println!("{} elements added", summary.elements_added);
///
/// let old_svg = builder.render_svg(&old).expect("Failed to render");
/// let new_svg = builder.render_svg(&new).expect("Failed to render");
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including style settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this builder renders with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a PLCopen XML document and build the diagram of one POU.
    ///
    /// # Arguments
    ///
    /// * `source` - Raw bytes of the XML document
    /// * `pou` - Name of the POU whose LD body is built
    ///
    /// # Errors
    ///
    /// Returns `RungdiffError::Parse` if the document is not valid PLCopen
    /// XML or contains no POU with that name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rungdiff::DiagramBuilder;
    ///
    /// let xml = br#"<project><types><pous>
    ///   <pou name="main" pouType="program"><body><LD/></body></pou>
    /// </pous></types></project>"#;
    ///
    /// let builder = DiagramBuilder::default();
    /// let diagram = builder.parse(xml, "main").expect("Failed to parse");
    /// assert!(diagram.is_empty());
    /// assert!(builder.parse(xml, "missing").is_err());
    /// ```
    pub fn parse(&self, source: &[u8], pou: &str) -> Result<Diagram, RungdiffError> {
        info!(pou = pou, bytes = source.len(); "Parsing diagram");

        let diagram = rungdiff_parser::parse(source, pou)?;

        debug!(elements = diagram.len(); "Diagram parsed successfully");
        trace!(diagram:?; "Parsed diagram");

        Ok(diagram)
    }

    /// Diff two revisions of a diagram and write the markers into both.
    ///
    /// Deleted entities are marked on `old`, added entities on `new`; all
    /// other entities are reset to unchanged, so diffing the same pair
    /// twice yields the same markers.
    pub fn diff(&self, old: &mut Diagram, new: &mut Diagram) -> DiffSummary {
        info!(old = old.name(), new = new.name(); "Diffing diagrams");

        let summary = diff::diff_in_place(old, new);

        info!(
            elements_added = summary.elements_added,
            elements_deleted = summary.elements_deleted,
            labels_added = summary.labels_added,
            labels_deleted = summary.labels_deleted,
            connections_added = summary.connections_added,
            connections_deleted = summary.connections_deleted;
            "Diff computed"
        );

        summary
    }

    /// Render a diagram, including its diff markers, to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns `RungdiffError::Config` if the style configuration is
    /// invalid and `RungdiffError::Render` if the document cannot be
    /// serialized.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rungdiff::{DiagramBuilder, diagram::Diagram};
    ///
    /// let svg = DiagramBuilder::default()
    ///     .render_svg(&Diagram::new("main"))
    ///     .expect("Failed to render");
    /// assert!(svg.contains("<svg"));
    /// ```
    pub fn render_svg(&self, diagram: &Diagram) -> Result<String, RungdiffError> {
        info!(diagram = diagram.name(), elements = diagram.len(); "Rendering diagram");

        let palette = self
            .config
            .style()
            .palette()
            .map_err(RungdiffError::Config)?;
        let document = Svg::new(palette).render_diagram(diagram);

        let mut buffer = Vec::new();
        svg::write(&mut buffer, &document)?;
        let svg_string =
            String::from_utf8(buffer).map_err(|err| RungdiffError::Render(err.to_string()))?;

        info!("SVG rendered successfully");
        Ok(svg_string)
    }
}
