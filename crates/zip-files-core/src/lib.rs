//! Path remapping and zip archive assembly for the `zip-files` and
//! `zip-folder` command line utilities.
//!
//! The library resolves a set of input paths (explicit files, or the
//! recursively expanded contents of one folder) into [`SourceEntry`]
//! values carrying an archive-relative name, optionally nested under a
//! root folder, and writes them into a zip container with a single
//! compression method per archive.
//!
//! # Examples
//!
//! ```no_run
//! use zip_files_core::ArchiveTarget;
//! use zip_files_core::BuildConfig;
//! use zip_files_core::ExcludeFilter;
//! use zip_files_core::build_archive;
//! use zip_files_core::walker::collect_folder;
//! use std::path::Path;
//!
//! # fn main() -> zip_files_core::Result<()> {
//! let config = BuildConfig::default();
//! let filter = ExcludeFilter::from_config(&config)?;
//! let entries = collect_folder(Path::new("project"), None, &filter)?;
//! let target = ArchiveTarget::File("project.zip".into());
//! let report = build_archive(&entries, config.compression, &target)?;
//! println!("added {} files", report.files_added);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod archive;
pub mod compression;
pub mod config;
pub mod error;
pub mod filters;
mod lzma;
pub mod report;
pub mod walker;

pub use archive::ArchiveTarget;
pub use archive::build_archive;
pub use compression::Compression;
pub use config::BuildConfig;
pub use config::RootFolder;
pub use error::ArchiveError;
pub use error::Result;
pub use filters::ExcludeFilter;
pub use report::BuildReport;
pub use walker::SourceEntry;
