//! CLI logic for the Rungdiff ladder diagram diff tool.
//!
//! Reads one or two revisions of a PLCopen file, renders the selected POU
//! of each to SVG (diffing them when there are two) and writes the images
//! to an output folder.

pub mod error_adapter;

mod args;
mod config;
mod output;
mod source;

pub use args::Args;
pub use source::{Revision, SourceError};

use std::path::PathBuf;

use log::{info, warn};

use rungdiff::{DiagramBuilder, RungdiffError};

/// Run the Rungdiff CLI application
///
/// Renders every requested revision of the diagram file and returns the
/// paths of the written images, oldest revision first.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `RungdiffError` for:
/// - Invalid revision selection or git failures
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<Vec<PathBuf>, RungdiffError> {
    info!(
        file = args.file.display().to_string(),
        pou = args.pou;
        "Processing diagram"
    );

    let revisions = source::plan_revisions(&args.refs, args.worktree)?;

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(theme) = args.style {
        app_config.style_mut().set_theme(theme);
    }

    let sources = revisions
        .iter()
        .map(|revision| source::read_revision(&args.file, revision))
        .collect::<Result<Vec<_>, _>>()?;

    let builder = DiagramBuilder::new(app_config);
    let images = render_sources(&builder, &args.pou, &sources)?;

    let output_dir = output::prepare_output_dir(args.output.as_deref())?;
    let paths = output::write_outputs(&output_dir, &images)?;

    info!(
        output_dir = output_dir.display().to_string(),
        images = paths.len();
        "SVG exported successfully"
    );

    if !args.no_open {
        if let Err(err) = output::open_folder(&output_dir) {
            warn!(err:%; "Failed to open output folder");
        }
    }

    Ok(paths)
}

/// Parses each source and renders it; two sources are diffed first.
fn render_sources(
    builder: &DiagramBuilder,
    pou: &str,
    sources: &[Vec<u8>],
) -> Result<Vec<String>, RungdiffError> {
    let mut diagrams = sources
        .iter()
        .map(|source| builder.parse(source, pou))
        .collect::<Result<Vec<_>, _>>()?;

    if let [old, new] = diagrams.as_mut_slice() {
        builder.diff(old, new);
    }

    diagrams
        .iter()
        .map(|diagram| builder.render_svg(diagram))
        .collect()
}
