//! Retrieval of diagram file revisions.
//!
//! A revision is either a git ref, read with `git show <ref>:<path>`, or
//! the working tree copy of the file. At most two revisions are rendered:
//! the first is the old side of the diff, the second the new side.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
    process::Command,
};

use log::{debug, info};
use thiserror::Error;

use rungdiff::RungdiffError;

/// Revision used when none is given.
pub const DEFAULT_REF: &str = "HEAD";

/// Maximum number of revisions in one run.
pub const MAX_REVISIONS: usize = 2;

/// Errors raised while reading file revisions
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Too many revisions: {0} given, at most 2 can be compared")]
    TooManyRevisions(usize),

    #[error("Failed to run git: {0}")]
    Spawn(#[source] io::Error),

    #[error("`git {command}` failed: {stderr}")]
    Git { command: String, stderr: String },

    #[error("File {file} is not inside the repository at {root}")]
    OutsideRepository { file: PathBuf, root: PathBuf },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl From<SourceError> for RungdiffError {
    fn from(err: SourceError) -> Self {
        RungdiffError::Source(Box::new(err))
    }
}

/// One version of the diagram file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    /// A git commit-ish.
    Git(String),
    /// The file as currently on disk.
    Worktree,
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Git(reference) => f.write_str(reference),
            Self::Worktree => f.write_str("worktree"),
        }
    }
}

/// Orders the requested revisions, oldest first.
///
/// Git refs keep their command-line order and the working tree, if
/// requested, comes last. Without any revision the file at [`DEFAULT_REF`]
/// is rendered.
///
/// # Errors
///
/// Returns [`SourceError::TooManyRevisions`] for more than
/// [`MAX_REVISIONS`] revisions.
pub fn plan_revisions(refs: &[String], worktree: bool) -> Result<Vec<Revision>, SourceError> {
    let mut revisions: Vec<Revision> = refs.iter().cloned().map(Revision::Git).collect();
    if worktree {
        revisions.push(Revision::Worktree);
    }
    if revisions.is_empty() {
        revisions.push(Revision::Git(DEFAULT_REF.to_string()));
    }

    if revisions.len() > MAX_REVISIONS {
        return Err(SourceError::TooManyRevisions(revisions.len()));
    }

    Ok(revisions)
}

/// Reads the contents of `file` at `revision`.
///
/// # Errors
///
/// Returns an error if the file cannot be read from disk, is not inside a
/// git repository, or git cannot produce it at the requested ref.
pub fn read_revision(file: &Path, revision: &Revision) -> Result<Vec<u8>, SourceError> {
    info!(file = file.display().to_string(), revision:% = revision; "Reading revision");

    match revision {
        Revision::Worktree => fs::read(file).map_err(|source| SourceError::Read {
            path: file.to_path_buf(),
            source,
        }),
        Revision::Git(reference) => {
            let file = absolute_path(file)?;
            let directory = file.parent().unwrap_or(Path::new("/"));
            let root = repo_root(directory)?;
            let relative = repo_relative_path(&file, &root)?;

            debug!(root = root.display().to_string(), path = relative; "Resolved repository path");
            run_git(&root, &["show", &format!("{reference}:{relative}")])
        }
    }
}

/// Makes `file` absolute with its parent directory canonicalized, so the
/// file itself need not exist on disk.
fn absolute_path(file: &Path) -> Result<PathBuf, SourceError> {
    let parent = match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let parent = fs::canonicalize(parent).map_err(|source| SourceError::Read {
        path: parent.to_path_buf(),
        source,
    })?;

    Ok(match file.file_name() {
        Some(name) => parent.join(name),
        None => parent,
    })
}

fn repo_root(directory: &Path) -> Result<PathBuf, SourceError> {
    let stdout = run_git(directory, &["rev-parse", "--show-toplevel"])?;
    let root = String::from_utf8_lossy(&stdout).trim().to_string();

    fs::canonicalize(&root).map_err(|source| SourceError::Read {
        path: PathBuf::from(root),
        source,
    })
}

/// Returns `file` relative to `root` with `/` separators, as git expects.
fn repo_relative_path(file: &Path, root: &Path) -> Result<String, SourceError> {
    let relative = file
        .strip_prefix(root)
        .map_err(|_| SourceError::OutsideRepository {
            file: file.to_path_buf(),
            root: root.to_path_buf(),
        })?;

    Ok(relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/"))
}

fn run_git(directory: &Path, args: &[&str]) -> Result<Vec<u8>, SourceError> {
    let output = Command::new("git")
        .args(args)
        .current_dir(directory)
        .output()
        .map_err(SourceError::Spawn)?;

    if !output.status.success() {
        return Err(SourceError::Git {
            command: args.join(" "),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(output.stdout)
}
