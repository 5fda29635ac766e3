//! Compression method selection.
//!
//! One method applies uniformly to every entry of an archive. Methods
//! are written at the zip library's defaults; no level tuning is
//! exposed.

use crate::error::ArchiveError;
use std::fmt;
use std::str::FromStr;
use zip::CompressionMethod;

/// Zip compression method for all entries of one archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    /// No compression.
    Stored,
    /// The standard zip compression method.
    #[default]
    Deflated,
    /// BZIP2, part of the zip standard since 2001.
    Bzip2,
    /// LZMA, part of the zip standard since 2006.
    Lzma,
}

impl Compression {
    /// All selectable methods, in presentation order.
    pub const ALL: [Self; 4] = [Self::Stored, Self::Deflated, Self::Bzip2, Self::Lzma];

    /// The lowercase command-line name of the method.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Stored => "stored",
            Self::Deflated => "deflated",
            Self::Bzip2 => "bzip2",
            Self::Lzma => "lzma",
        }
    }

    /// The corresponding method of the zip container library.
    #[must_use]
    pub(crate) fn to_zip(self) -> CompressionMethod {
        match self {
            Self::Stored => CompressionMethod::Stored,
            Self::Deflated => CompressionMethod::Deflated,
            Self::Bzip2 => CompressionMethod::Bzip2,
            Self::Lzma => CompressionMethod::Lzma,
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Compression {
    type Err = ArchiveError;

    /// Parses a method name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stored" => Ok(Self::Stored),
            "deflated" => Ok(Self::Deflated),
            "bzip2" => Ok(Self::Bzip2),
            "lzma" => Ok(Self::Lzma),
            _ => Err(ArchiveError::UnknownCompression {
                name: s.to_string(),
            }),
        }
    }
}
