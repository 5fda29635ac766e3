//! Error conversion utilities for the CLI.
//!
//! Converts the core crate's typed errors (thiserror) into
//! user-friendly contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use zip_files_core::ArchiveError;

/// Converts an [`ArchiveError`] to a user-friendly anyhow error.
pub fn convert_archive_error(err: ArchiveError) -> anyhow::Error {
    match err {
        ArchiveError::SourceNotFound { path } => {
            anyhow!(
                "Input does not exist: {}\n\
                 HINT: No archive was written; check the path and try again.",
                path.display()
            )
        }
        ArchiveError::NotAFile { path } => {
            anyhow!(
                "'{}' is a directory\n\
                 HINT: zip-files does not expand directories; use zip-folder instead.",
                path.display()
            )
        }
        ArchiveError::NotAFolder { path } => {
            anyhow!(
                "'{}' is not a folder\n\
                 HINT: zip-folder expects exactly one directory; use zip-files for \
                 individual files.",
                path.display()
            )
        }
        ArchiveError::AutoRootRequiresOutfile => {
            anyhow!(
                "--auto-root requires --outfile\n\
                 HINT: The root folder name is derived from the output file's name."
            )
        }
        ArchiveError::InvalidPattern { pattern, reason } => {
            anyhow!(
                "Invalid exclude pattern {pattern:?}: {reason}\n\
                 HINT: Patterns are globs, e.g. '*.log' or 'build/*.o'."
            )
        }
        other => anyhow::Error::from(other),
    }
}

/// Maps a core result into an anyhow result with converted errors.
pub fn with_cli_context<T>(result: zip_files_core::Result<T>) -> anyhow::Result<T> {
    result.map_err(convert_archive_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_convert_source_not_found() {
        let err = ArchiveError::SourceNotFound {
            path: PathBuf::from("missing.txt"),
        };
        let msg = format!("{:?}", convert_archive_error(err));
        assert!(msg.contains("missing.txt"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_not_a_file_points_at_zip_folder() {
        let err = ArchiveError::NotAFile {
            path: PathBuf::from("some/dir"),
        };
        let msg = format!("{:?}", convert_archive_error(err));
        assert!(msg.contains("zip-folder"));
    }

    #[test]
    fn test_convert_passthrough() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let msg = format!("{:?}", convert_archive_error(ArchiveError::Io(io_err)));
        assert!(msg.contains("denied"));
    }
}
