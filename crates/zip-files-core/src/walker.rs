//! Input resolution: explicit file lists and recursive folder walks.
//!
//! Folder traversal is depth-first with siblings sorted by file name,
//! so repeated runs over an unchanged folder resolve entries in
//! identical order regardless of filesystem iteration order.

use crate::Result;
use crate::error::ArchiveError;
use crate::filters::ExcludeFilter;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

/// One file to be written into the archive.
///
/// Pairs the filesystem path with the archive-relative name the file
/// is stored under. Immutable once computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    /// Filesystem path the content is read from.
    pub path: PathBuf,

    /// Archive-relative name, with `/` separators.
    pub name: String,
}

/// Computes the archive-relative name for an input path.
///
/// Drive prefixes, root separators, `.` components, and parent
/// components are stripped; the remaining components are joined with
/// `/` and nested under `prefix` when one is given.
///
/// # Errors
///
/// [`ArchiveError::NonUtf8Path`] for non-UTF-8 components, and
/// [`ArchiveError::EmptyArchiveName`] if nothing remains after
/// stripping.
pub fn archive_name(path: &Path, prefix: Option<&str>) -> Result<String> {
    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => {
                let part = part.to_str().ok_or_else(|| ArchiveError::NonUtf8Path {
                    path: path.to_path_buf(),
                })?;
                parts.push(part);
            }
            Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
            // Parent components cannot be represented inside the
            // archive; an extractor would treat them as traversal.
            Component::ParentDir => {}
        }
    }
    if parts.is_empty() {
        return Err(ArchiveError::EmptyArchiveName {
            path: path.to_path_buf(),
        });
    }
    let name = parts.join("/");
    match prefix {
        Some(prefix) => Ok(format!("{prefix}/{name}")),
        None => Ok(name),
    }
}

/// Resolves an explicit list of file paths into archive entries, in
/// argument order.
///
/// Directories are not expanded here; passing one is an error.
///
/// # Errors
///
/// [`ArchiveError::SourceNotFound`] for missing paths and
/// [`ArchiveError::NotAFile`] for directories.
pub fn collect_files(
    files: &[PathBuf],
    prefix: Option<&str>,
    filter: &ExcludeFilter,
) -> Result<Vec<SourceEntry>> {
    let mut entries = Vec::new();
    for file in files {
        if !file.exists() {
            return Err(ArchiveError::SourceNotFound { path: file.clone() });
        }
        if file.is_dir() {
            return Err(ArchiveError::NotAFile { path: file.clone() });
        }
        let name = archive_name(file, prefix)?;
        if filter.excludes(&name) {
            continue;
        }
        entries.push(SourceEntry {
            path: file.clone(),
            name,
        });
    }
    Ok(entries)
}

/// Recursively resolves the regular files beneath a folder into
/// archive entries.
///
/// Names are relative to the folder itself, with the prefix applied;
/// directories do not become entries of their own. Symlinks that
/// point at regular files are included, symlinked directories are not
/// followed.
///
/// # Errors
///
/// [`ArchiveError::SourceNotFound`] if the folder is missing,
/// [`ArchiveError::NotAFolder`] if it is not a directory, and I/O
/// errors surfaced during the walk.
pub fn collect_folder(
    folder: &Path,
    prefix: Option<&str>,
    filter: &ExcludeFilter,
) -> Result<Vec<SourceEntry>> {
    if !folder.exists() {
        return Err(ArchiveError::SourceNotFound {
            path: folder.to_path_buf(),
        });
    }
    if !folder.is_dir() {
        return Err(ArchiveError::NotAFolder {
            path: folder.to_path_buf(),
        });
    }

    let mut entries = Vec::new();
    for entry in WalkDir::new(folder).sort_by_file_name() {
        let entry = entry.map_err(|err| {
            ArchiveError::Io(std::io::Error::other(format!("walkdir error: {err}")))
        })?;
        if !entry.path().is_file() {
            continue;
        }
        // strip_prefix cannot fail: the walk is rooted at `folder`
        let relative = entry
            .path()
            .strip_prefix(folder)
            .map_err(|err| ArchiveError::Io(std::io::Error::other(err.to_string())))?;
        let name = archive_name(relative, prefix)?;
        if filter.excludes(&name) {
            continue;
        }
        entries.push(SourceEntry {
            path: entry.into_path(),
            name,
        });
    }
    Ok(entries)
}
