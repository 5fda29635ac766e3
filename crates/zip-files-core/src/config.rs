//! Configuration for one archive-building invocation.

use crate::Result;
use crate::compression::Compression;
use crate::error::ArchiveError;
use std::path::Path;

/// Policy for the synthetic top-level folder archive entries are
/// nested under.
///
/// Exactly one policy is active per invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RootFolder {
    /// Use each input's own path, stripped of leading separators.
    #[default]
    None,
    /// Prepend the given name as a folder.
    Explicit(String),
    /// Derive the name from the output file's base name, extension
    /// stripped. Requires a file target.
    AutoFromOutfile,
}

impl RootFolder {
    /// Resolves the policy to the concrete folder prefix, if any.
    ///
    /// An empty or `.` name adds no prefix. Trailing slashes on an
    /// explicit name are ignored.
    ///
    /// # Errors
    ///
    /// [`ArchiveError::AutoRootRequiresOutfile`] if the policy is
    /// [`RootFolder::AutoFromOutfile`] and no output file is given, and
    /// [`ArchiveError::NonUtf8Path`] if the output file name is not
    /// valid UTF-8.
    pub fn resolve(&self, outfile: Option<&Path>) -> Result<Option<String>> {
        let name = match self {
            Self::None => return Ok(None),
            Self::Explicit(name) => name.trim_end_matches('/').to_string(),
            Self::AutoFromOutfile => {
                let outfile = outfile.ok_or(ArchiveError::AutoRootRequiresOutfile)?;
                outfile
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .ok_or_else(|| ArchiveError::NonUtf8Path {
                        path: outfile.to_path_buf(),
                    })?
                    .to_string()
            }
        };
        if name.is_empty() || name == "." {
            return Ok(None);
        }
        Ok(Some(name))
    }
}

/// Configuration for building one archive.
///
/// # Examples
///
/// ```
/// use zip_files_core::BuildConfig;
/// use zip_files_core::Compression;
/// use zip_files_core::RootFolder;
///
/// let config = BuildConfig::default()
///     .with_root_folder(RootFolder::Explicit("release".to_string()))
///     .with_compression(Compression::Bzip2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BuildConfig {
    /// Root folder policy for archive names.
    pub root_folder: RootFolder,

    /// Compression method for every entry.
    pub compression: Compression,

    /// Glob patterns to exclude, matched from the right against
    /// archive names.
    pub exclude: Vec<String>,

    /// Skip entries whose final name component starts with a dot.
    ///
    /// Default: `false` (dotfiles are included).
    pub exclude_dotfiles: bool,

    /// Skip files and directories specific to version control systems.
    ///
    /// Default: `false`.
    pub exclude_vcs: bool,
}

impl BuildConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root folder policy.
    #[must_use]
    pub fn with_root_folder(mut self, root_folder: RootFolder) -> Self {
        self.root_folder = root_folder;
        self
    }

    /// Sets the compression method.
    #[must_use]
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Sets the exclude patterns.
    #[must_use]
    pub fn with_exclude(mut self, exclude: Vec<String>) -> Self {
        self.exclude = exclude;
        self
    }

    /// Sets whether dotfiles are skipped.
    #[must_use]
    pub fn with_exclude_dotfiles(mut self, exclude: bool) -> Self {
        self.exclude_dotfiles = exclude;
        self
    }

    /// Sets whether version control internals are skipped.
    #[must_use]
    pub fn with_exclude_vcs(mut self, exclude: bool) -> Self {
        self.exclude_vcs = exclude;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_resolve_none() {
        assert_eq!(RootFolder::None.resolve(None).unwrap(), None);
        assert_eq!(
            RootFolder::None
                .resolve(Some(Path::new("out.zip")))
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_resolve_explicit() {
        let policy = RootFolder::Explicit("xyz".to_string());
        assert_eq!(policy.resolve(None).unwrap(), Some("xyz".to_string()));
    }

    #[test]
    fn test_resolve_explicit_trailing_slash() {
        let policy = RootFolder::Explicit("xyz/".to_string());
        assert_eq!(policy.resolve(None).unwrap(), Some("xyz".to_string()));
    }

    #[test]
    fn test_resolve_explicit_empty_or_dot() {
        assert_eq!(
            RootFolder::Explicit(String::new()).resolve(None).unwrap(),
            None
        );
        assert_eq!(
            RootFolder::Explicit(".".to_string()).resolve(None).unwrap(),
            None
        );
    }

    #[test]
    fn test_resolve_auto_root() {
        let outfile = PathBuf::from("releases/archive.zip");
        let resolved = RootFolder::AutoFromOutfile
            .resolve(Some(&outfile))
            .unwrap();
        assert_eq!(resolved, Some("archive".to_string()));
    }

    #[test]
    fn test_resolve_auto_root_keeps_inner_extension() {
        // Only the final extension is stripped, as with Path::file_stem.
        let outfile = PathBuf::from("name.tar.zip");
        let resolved = RootFolder::AutoFromOutfile
            .resolve(Some(&outfile))
            .unwrap();
        assert_eq!(resolved, Some("name.tar".to_string()));
    }

    #[test]
    fn test_resolve_auto_root_without_outfile() {
        let err = RootFolder::AutoFromOutfile.resolve(None).unwrap_err();
        assert!(matches!(err, ArchiveError::AutoRootRequiresOutfile));
    }

    #[test]
    fn test_config_builders() {
        let config = BuildConfig::default()
            .with_compression(Compression::Stored)
            .with_exclude(vec!["*.tmp".to_string()])
            .with_exclude_dotfiles(true)
            .with_exclude_vcs(true);
        assert_eq!(config.compression, Compression::Stored);
        assert_eq!(config.exclude, vec!["*.tmp".to_string()]);
        assert!(config.exclude_dotfiles);
        assert!(config.exclude_vcs);
    }

    #[test]
    fn test_config_defaults_include_dotfiles() {
        let config = BuildConfig::default();
        assert!(!config.exclude_dotfiles);
        assert!(!config.exclude_vcs);
        assert!(config.exclude.is_empty());
        assert_eq!(config.root_folder, RootFolder::None);
    }
}
