//! Saving finished GPX documents

use crate::{AppError, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Filename used when a route name sanitizes to nothing
const FALLBACK_STEM: &str = "route";

/// Where a document should be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Standard output
    Stdout,
    /// A directory; the filename is derived from the route name
    Directory(PathBuf),
    /// An explicit file path
    File(PathBuf),
}

impl OutputTarget {
    /// Interpret the `--output` argument
    ///
    /// `None` and `-` mean stdout, an existing directory means "derive the filename",
    /// anything else is a file path.
    pub fn from_arg(arg: Option<&Path>) -> Self {
        match arg {
            None => OutputTarget::Stdout,
            Some(path) if path == Path::new("-") => OutputTarget::Stdout,
            Some(path) if path.is_dir() => OutputTarget::Directory(path.to_path_buf()),
            Some(path) => OutputTarget::File(path.to_path_buf()),
        }
    }
}

/// Build a `.gpx` filename from a route name
///
/// Path separators, characters reserved on common filesystems and control characters
/// become `_`.
pub fn suggested_filename(route_name: &str) -> String {
    let stem: String = route_name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    // Names made only of dots would resolve to the current or parent directory
    let stem = stem.trim_matches('.').trim();

    if stem.is_empty() {
        format!("{FALLBACK_STEM}.gpx")
    } else {
        format!("{stem}.gpx")
    }
}

/// Write a document to the target
///
/// # Returns
/// The path written to, or `None` for stdout
pub fn write_document(
    document: &str,
    route_name: &str,
    target: &OutputTarget,
) -> Result<Option<PathBuf>> {
    let path = match target {
        OutputTarget::Stdout => {
            let mut writer = BufWriter::new(std::io::stdout().lock());
            writer.write_all(document.as_bytes())?;
            writer.flush()?;
            return Ok(None);
        }
        OutputTarget::Directory(dir) => dir.join(suggested_filename(route_name)),
        OutputTarget::File(path) => path.clone(),
    };

    let file_error = |source| AppError::File {
        action: "write",
        path: path.clone(),
        source,
    };
    let file = File::create(&path).map_err(file_error)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(document.as_bytes()).map_err(file_error)?;
    writer.flush().map_err(file_error)?;

    tracing::debug!("Wrote {} bytes to {}", document.len(), path.display());
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggested_filename() {
        assert_eq!(suggested_filename("Mission Peak"), "Mission Peak.gpx");
        assert_eq!(suggested_filename("  Café Loop "), "Café Loop.gpx");
        assert_eq!(suggested_filename("A/B\\C: D?"), "A_B_C_ D_.gpx");
        assert_eq!(suggested_filename("Tab\there"), "Tab_here.gpx");
    }

    #[test]
    fn test_suggested_filename_fallback() {
        assert_eq!(suggested_filename(""), "route.gpx");
        assert_eq!(suggested_filename("   "), "route.gpx");
        assert_eq!(suggested_filename(".."), "route.gpx");
    }

    #[test]
    fn test_output_target_from_arg() {
        let dir = tempfile::tempdir().unwrap();

        assert_eq!(OutputTarget::from_arg(None), OutputTarget::Stdout);
        assert_eq!(
            OutputTarget::from_arg(Some(Path::new("-"))),
            OutputTarget::Stdout
        );
        assert_eq!(
            OutputTarget::from_arg(Some(dir.path())),
            OutputTarget::Directory(dir.path().to_path_buf())
        );

        let file = dir.path().join("track.gpx");
        assert_eq!(
            OutputTarget::from_arg(Some(&file)),
            OutputTarget::File(file.clone())
        );
    }

    #[test]
    fn test_write_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = OutputTarget::Directory(dir.path().to_path_buf());

        let written = write_document("<gpx/>\n", "Ridge: North", &target)
            .unwrap()
            .unwrap();

        assert_eq!(written, dir.path().join("Ridge_ North.gpx"));
        assert_eq!(std::fs::read_to_string(written).unwrap(), "<gpx/>\n");
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("explicit.gpx");

        let written = write_document("doc", "ignored", &OutputTarget::File(path.clone())).unwrap();

        assert_eq!(written, Some(path.clone()));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "doc");
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("track.gpx");

        let err = write_document("doc", "x", &OutputTarget::File(path)).unwrap_err();
        assert!(matches!(err, AppError::File { action: "write", .. }));
    }
}
