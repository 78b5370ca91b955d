//! Command-line argument definitions for the Rungdiff CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the diagram file, POU and revisions,
//! the output folder, style and configuration overrides, and logging
//! verbosity.

use std::path::PathBuf;

use clap::Parser;

use rungdiff::draw::Theme;

/// Command-line arguments for the Rungdiff ladder diagram diff tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the PLCopen XML file inside a git repository
    #[arg(short, long)]
    pub file: PathBuf,

    /// Name of the POU to render
    #[arg(short, long)]
    pub pou: String,

    /// Git revision to render; pass twice to diff two revisions
    #[arg(long = "ref", value_name = "REV")]
    pub refs: Vec<String>,

    /// Use the file on disk as the newest revision
    #[arg(long)]
    pub worktree: bool,

    /// Folder for the output SVG files; a temporary folder is used otherwise
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Diagram style (dark, light), overrides the configuration file
    #[arg(short, long)]
    pub style: Option<Theme>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Do not open the output folder when done
    #[arg(long)]
    pub no_open: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
