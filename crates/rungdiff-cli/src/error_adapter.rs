//! Error adapter for converting RungdiffError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Every error gets
//! a stable code; errors the user can fix from the command line also get a
//! help text.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use rungdiff::RungdiffError;
use rungdiff_parser::ParseError;

use crate::source::SourceError;

/// Adapter rendering a [`RungdiffError`] as a miette diagnostic.
pub struct ErrorAdapter<'a>(pub &'a RungdiffError);

impl ErrorAdapter<'_> {
    /// Returns the stable diagnostic code of the wrapped error.
    pub fn code_str(&self) -> &'static str {
        match self.0 {
            RungdiffError::Io(_) => "rungdiff::io",
            RungdiffError::Parse(ParseError::Xml(_)) => "rungdiff::parse::xml",
            RungdiffError::Parse(ParseError::PouNotFound { .. }) => {
                "rungdiff::parse::pou_not_found"
            }
            RungdiffError::Config(_) => "rungdiff::config",
            RungdiffError::Render(_) => "rungdiff::render",
            RungdiffError::Source(_) => "rungdiff::source",
        }
    }
}

/// Help text for a failure to read a file revision.
fn source_help(err: &SourceError) -> Option<&'static str> {
    match err {
        SourceError::TooManyRevisions(_) => {
            Some("pass at most two revisions in total with --ref and --worktree")
        }
        SourceError::Spawn(_) => Some("make sure git is installed and on the PATH"),
        SourceError::Git { .. } => {
            Some("check that each --ref exists and the file is committed at that revision")
        }
        SourceError::OutsideRepository { .. } => {
            Some("use --worktree to render a file that is not tracked by git")
        }
        SourceError::Read { .. } => None,
    }
}

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.code_str()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            RungdiffError::Parse(ParseError::PouNotFound { .. }) => {
                "pass one of the available POU names with --pou"
            }
            RungdiffError::Parse(ParseError::Xml(_)) => {
                "check that the file is a PLCopen TC6 XML project at every requested revision"
            }
            RungdiffError::Config(_) => "check the [style] section of the configuration file",
            RungdiffError::Source(err) => {
                err.downcast_ref::<SourceError>().and_then(source_help)?
            }
            RungdiffError::Io(_) | RungdiffError::Render(_) => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Wraps a [`RungdiffError`] for rendering by miette.
pub fn to_reportable(err: &RungdiffError) -> ErrorAdapter<'_> {
    ErrorAdapter(err)
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn test_pou_not_found_code_and_help() {
        let err = RungdiffError::Parse(ParseError::PouNotFound {
            name: "main".to_string(),
            available: vec!["program0".to_string()],
        });

        let reportable = to_reportable(&err);

        assert_eq!(
            reportable.code().unwrap().to_string(),
            "rungdiff::parse::pou_not_found"
        );
        assert!(reportable.help().unwrap().to_string().contains("--pou"));
        assert!(reportable.to_string().contains("program0"));
    }

    #[test]
    fn test_io_error_has_no_help() {
        let err = RungdiffError::Io(io::Error::other("git failed"));

        let reportable = to_reportable(&err);

        assert_eq!(reportable.code().unwrap().to_string(), "rungdiff::io");
        assert!(reportable.help().is_none());
        assert_eq!(reportable.to_string(), "I/O error: git failed");
    }

    #[test]
    fn test_git_error_code_and_help() {
        let err = RungdiffError::from(SourceError::Git {
            command: "show nope:plc/main.xml".to_string(),
            stderr: "fatal: invalid object name 'nope'.".to_string(),
        });

        let reportable = to_reportable(&err);

        assert_eq!(reportable.code_str(), "rungdiff::source");
        assert!(reportable.help().unwrap().to_string().contains("--ref"));
        assert!(reportable.to_string().contains("nope:plc/main.xml"));
        let source = std::error::Error::source(&reportable).unwrap();
        assert!(source.downcast_ref::<SourceError>().is_some());
    }

    #[test]
    fn test_spawn_error_keeps_cause() {
        let err = RungdiffError::from(SourceError::Spawn(io::Error::new(
            io::ErrorKind::NotFound,
            "git not found",
        )));

        let reportable = to_reportable(&err);
        let source = std::error::Error::source(&reportable).unwrap();

        assert!(reportable.help().unwrap().to_string().contains("PATH"));
        assert_eq!(source.source().unwrap().to_string(), "git not found");
    }

    #[test]
    fn test_config_error_code() {
        let err = RungdiffError::Config("Missing configuration file: x.toml".to_string());

        assert_eq!(to_reportable(&err).code_str(), "rungdiff::config");
    }

    #[test]
    fn test_report_renders() {
        let err = RungdiffError::Render("invalid UTF-8".to_string());
        let mut writer = String::new();

        miette::GraphicalReportHandler::new()
            .render_report(&mut writer, &to_reportable(&err))
            .unwrap();

        assert!(writer.contains("invalid UTF-8"));
    }
}
