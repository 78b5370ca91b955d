//! Output folder handling.

use std::{
    fs, io,
    path::{Path, PathBuf},
    process::Command,
};

use log::{debug, info};

/// Prefix of the temporary output folder.
const TEMP_DIR_PREFIX: &str = "rungdiff-";

/// Returns the folder outputs are written to, creating it if needed.
///
/// Without an explicit folder a new temporary one is created; it is kept
/// after the process exits so the images can be viewed.
///
/// # Errors
///
/// Returns an error if the folder cannot be created.
pub fn prepare_output_dir(explicit: Option<&Path>) -> io::Result<PathBuf> {
    let dir = match explicit {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            dir.to_path_buf()
        }
        None => tempfile::Builder::new()
            .prefix(TEMP_DIR_PREFIX)
            .tempdir()?
            .keep(),
    };

    info!(path = dir.display().to_string(); "Output folder ready");
    Ok(dir)
}

/// Writes one `output_<n>.svg` per image, oldest revision first.
///
/// # Errors
///
/// Returns an error if a file cannot be written.
pub fn write_outputs(dir: &Path, images: &[String]) -> io::Result<Vec<PathBuf>> {
    images
        .iter()
        .enumerate()
        .map(|(index, image)| {
            let path = dir.join(format!("output_{index}.svg"));
            fs::write(&path, image)?;
            debug!(path = path.display().to_string(), bytes = image.len(); "SVG written");
            Ok(path)
        })
        .collect()
}

/// Opens `dir` in the platform's file manager without waiting for it.
///
/// # Errors
///
/// Returns an error if the file manager cannot be started.
pub fn open_folder(dir: &Path) -> io::Result<()> {
    let program = if cfg!(target_os = "windows") {
        "explorer"
    } else if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };

    debug!(program = program, path = dir.display().to_string(); "Opening output folder");
    Command::new(program).arg(dir).spawn()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_output_dir_is_created() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");

        let dir = prepare_output_dir(Some(nested.as_path())).unwrap();

        assert_eq!(dir, nested);
        assert!(nested.is_dir());
    }

    #[test]
    fn test_temporary_output_dir() {
        let dir = prepare_output_dir(None).unwrap();

        let name = dir.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("rungdiff-"));
        assert!(dir.is_dir());

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_write_outputs_numbering() {
        let dir = tempfile::tempdir().unwrap();
        let images = vec!["<svg>old</svg>".to_string(), "<svg>new</svg>".to_string()];

        let paths = write_outputs(dir.path(), &images).unwrap();

        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("output_0.svg"));
        assert!(paths[1].ends_with("output_1.svg"));
        assert_eq!(fs::read_to_string(&paths[1]).unwrap(), "<svg>new</svg>");
    }
}
