//! Error types for archive building operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`ArchiveError`].
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Errors that can occur while resolving inputs or writing an archive.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The zip container writer rejected an operation.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// An input file or folder does not exist.
    #[error("input does not exist: {path}")]
    SourceNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// A directory was passed where a regular file was required.
    #[error("not a regular file: {path}")]
    NotAFile {
        /// The offending path.
        path: PathBuf,
    },

    /// A non-directory was passed where a folder was required.
    #[error("not a folder: {path}")]
    NotAFolder {
        /// The offending path.
        path: PathBuf,
    },

    /// `--auto-root` was requested without an output file to derive
    /// the root folder name from.
    #[error("--auto-root requires an output file")]
    AutoRootRequiresOutfile,

    /// An exclude pattern failed to compile.
    #[error("invalid exclude pattern {pattern:?}: {reason}")]
    InvalidPattern {
        /// The pattern as given on the command line.
        pattern: String,
        /// Why the pattern was rejected.
        reason: String,
    },

    /// Archive entry names must be valid UTF-8.
    #[error("path is not valid UTF-8: {path}")]
    NonUtf8Path {
        /// The offending path.
        path: PathBuf,
    },

    /// The input path reduces to nothing once drive, root, and parent
    /// components are stripped.
    #[error("cannot derive an archive name from {path}")]
    EmptyArchiveName {
        /// The offending path.
        path: PathBuf,
    },

    /// An unknown compression method name was given.
    #[error("unknown compression method {name:?} (expected stored, deflated, bzip2, or lzma)")]
    UnknownCompression {
        /// The name as given.
        name: String,
    },
}
