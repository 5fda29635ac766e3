//! Exclude filtering for archive entries.
//!
//! Patterns are matched against the computed archive name, from the
//! right: a pattern of N slash-separated components matches the
//! trailing N components of the name, each component with glob
//! semantics. Patterns must be relative; leading slashes are ignored.

use crate::Result;
use crate::config::BuildConfig;
use crate::error::ArchiveError;
use glob::Pattern;

/// Directory names whose whole subtree belongs to a version control
/// system.
const VCS_DIRS: [&str; 6] = [".git", ".svn", ".hg", ".bzr", "CVS", "_darcs"];

/// Per-directory metadata files of version control systems.
const VCS_FILES: [&str; 7] = [
    ".gitignore",
    ".gitattributes",
    ".gitmodules",
    ".cvsignore",
    ".hgignore",
    ".hgtags",
    ".bzrignore",
];

/// Compiled exclusion rules for one archive-building invocation.
#[derive(Debug)]
pub struct ExcludeFilter {
    patterns: Vec<Vec<Pattern>>,
    exclude_dotfiles: bool,
    exclude_vcs: bool,
}

impl ExcludeFilter {
    /// Compiles the exclusion rules of a [`BuildConfig`].
    ///
    /// # Errors
    ///
    /// [`ArchiveError::InvalidPattern`] if any pattern does not
    /// compile as a glob.
    pub fn from_config(config: &BuildConfig) -> Result<Self> {
        let patterns = config
            .exclude
            .iter()
            .map(|pattern| compile_pattern(pattern))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            patterns,
            exclude_dotfiles: config.exclude_dotfiles,
            exclude_vcs: config.exclude_vcs,
        })
    }

    /// Whether the entry with the given archive name is excluded.
    ///
    /// The name is the full archive-relative name, after any root
    /// folder prefix has been applied, with `/` separators.
    #[must_use]
    pub fn excludes(&self, name: &str) -> bool {
        let components: Vec<&str> = name.split('/').collect();
        let file_name = components.last().copied().unwrap_or(name);

        if self.exclude_dotfiles && file_name.starts_with('.') {
            return true;
        }
        if self.exclude_vcs
            && (components.iter().any(|c| VCS_DIRS.contains(c)) || VCS_FILES.contains(&file_name))
        {
            return true;
        }
        self.patterns
            .iter()
            .any(|pattern| matches_from_right(&components, pattern))
    }
}

/// Splits a pattern into per-component globs.
fn compile_pattern(pattern: &str) -> Result<Vec<Pattern>> {
    pattern
        .trim_start_matches('/')
        .split('/')
        .map(|component| {
            Pattern::new(component).map_err(|err| ArchiveError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: err.msg.to_string(),
            })
        })
        .collect()
}

/// Matches the trailing components of a name against a compiled
/// pattern, component by component.
fn matches_from_right(components: &[&str], pattern: &[Pattern]) -> bool {
    if pattern.is_empty() || pattern.len() > components.len() {
        return false;
    }
    let tail = &components[components.len() - pattern.len()..];
    pattern
        .iter()
        .zip(tail)
        .all(|(glob, component)| glob.matches(component))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn filter(patterns: &[&str]) -> ExcludeFilter {
        let config =
            BuildConfig::default().with_exclude(patterns.iter().map(ToString::to_string).collect());
        ExcludeFilter::from_config(&config).unwrap()
    }

    #[test]
    fn test_single_component_matches_any_depth() {
        let filter = filter(&["*.txt"]);
        assert!(filter.excludes("hello.txt"));
        assert!(filter.excludes("folder/hello.txt"));
        assert!(filter.excludes("a/b/c/hello.txt"));
        assert!(!filter.excludes("hello.md"));
        assert!(!filter.excludes("txtfile"));
    }

    #[test]
    fn test_multi_component_matches_trailing_components() {
        let filter = filter(&["My Documents/*.md"]);
        assert!(filter.excludes("My Documents/notes.md"));
        assert!(filter.excludes("xyz/My Documents/notes.md"));
        assert!(!filter.excludes("notes.md"));
        assert!(!filter.excludes("My Documents/sub/notes.md"));
    }

    #[test]
    fn test_anchored_pattern_does_not_float() {
        // Mirrors the original "fancy excludes": "a/*.txt" removes
        // files under any directory named "a" but not under "b".
        let filter = filter(&["folder/a/*.txt", "b/*.md"]);
        assert!(filter.excludes("folder/a/1.txt"));
        assert!(!filter.excludes("folder/b/3.txt"));
        assert!(filter.excludes("folder/b/5.md"));
        assert!(!filter.excludes("folder/a/.hidden"));
    }

    #[test]
    fn test_leading_slash_ignored() {
        let filter = filter(&["/*.log"]);
        assert!(filter.excludes("debug.log"));
        assert!(filter.excludes("dir/debug.log"));
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let config = BuildConfig::default().with_exclude(vec!["[".to_string()]);
        let err = ExcludeFilter::from_config(&config).unwrap_err();
        assert!(matches!(err, ArchiveError::InvalidPattern { .. }));
    }

    #[test]
    fn test_dotfiles_included_by_default() {
        let filter = filter(&[]);
        assert!(!filter.excludes(".hidden"));
        assert!(!filter.excludes("a/.hidden"));
    }

    #[test]
    fn test_exclude_dotfiles() {
        let config = BuildConfig::default().with_exclude_dotfiles(true);
        let filter = ExcludeFilter::from_config(&config).unwrap();
        assert!(filter.excludes(".hidden"));
        assert!(filter.excludes("a/.hidden"));
        // Only the final component counts, matching the original
        // behavior: files inside dot-directories are kept.
        assert!(!filter.excludes(".config/visible.txt"));
        assert!(!filter.excludes("visible.txt"));
    }

    #[test]
    fn test_exclude_vcs_directories() {
        let config = BuildConfig::default().with_exclude_vcs(true);
        let filter = ExcludeFilter::from_config(&config).unwrap();
        assert!(filter.excludes(".git/config"));
        assert!(filter.excludes("project/.git/HEAD"));
        assert!(filter.excludes("project/.svn/entries"));
        assert!(filter.excludes("CVS/Root"));
        assert!(!filter.excludes("project/src/main.rs"));
    }

    #[test]
    fn test_exclude_vcs_metadata_files() {
        let config = BuildConfig::default().with_exclude_vcs(true);
        let filter = ExcludeFilter::from_config(&config).unwrap();
        assert!(filter.excludes(".gitignore"));
        assert!(filter.excludes("project/.gitattributes"));
        assert!(filter.excludes("project/.hgignore"));
        // Dotfiles in general stay in.
        assert!(!filter.excludes("project/.env"));
    }

    #[test]
    fn test_matches_from_right_empty_pattern() {
        assert!(!matches_from_right(&["a", "b"], &[]));
    }
}
