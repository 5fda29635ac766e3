//! Archive build reporting.

use std::time::Duration;

/// Statistics and warnings from one archive build.
///
/// # Examples
///
/// ```
/// use zip_files_core::BuildReport;
///
/// let mut report = BuildReport::new();
/// report.add_warning("duplicate archive name: a.txt");
/// assert!(report.has_warnings());
/// ```
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    /// Number of file entries written.
    pub files_added: usize,

    /// Uncompressed bytes read from the inputs.
    pub bytes_written: u64,

    /// Wall-clock duration of the build.
    pub duration: Duration,

    /// Warnings generated during the build (duplicate names).
    pub warnings: Vec<String>,
}

impl BuildReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message.
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
