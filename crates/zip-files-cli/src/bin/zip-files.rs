//! `zip-files` - create a zip file containing a list of files.

use anyhow::Result;
use clap::Parser;
use zip_files_cli::args::ZipFilesCli;

fn main() -> Result<()> {
    let cli = ZipFilesCli::parse();
    zip_files_cli::run::run_zip_files(&cli)
}
