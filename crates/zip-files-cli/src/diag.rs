//! Stderr diagnostics for `--debug` and warnings.
//!
//! Everything goes to stderr: stdout may carry the archive bytes.

use console::Term;
use console::style;

/// Diagnostic writer gated on the `--debug` flag.
pub struct Diag {
    enabled: bool,
    term: Term,
}

impl Diag {
    /// Creates a diagnostic writer, enabled when `--debug` was given.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            term: Term::stderr(),
        }
    }

    /// Writes a debug line, if enabled.
    pub fn debug(&self, msg: impl AsRef<str>) {
        if !self.enabled {
            return;
        }
        let _ = self
            .term
            .write_line(&format!("{} {}", style("(DEBUG)").dim(), msg.as_ref()));
    }

    /// Writes a warning line, regardless of the debug flag.
    pub fn warn(&self, msg: impl AsRef<str>) {
        let _ = self.term.write_line(&format!(
            "{} {}",
            style("warning:").yellow().bold(),
            msg.as_ref()
        ));
    }
}
