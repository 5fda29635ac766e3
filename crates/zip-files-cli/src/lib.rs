//! Shared implementation of the `zip-files` and `zip-folder` command
//! line utilities.
//!
//! Both binaries parse their arguments here, resolve inputs through
//! `zip-files-core`, and write one zip archive to a file or stdout.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod args;
pub mod diag;
pub mod error;
pub mod run;
