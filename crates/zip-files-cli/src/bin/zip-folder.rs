//! `zip-folder` - create a zip file containing one folder.

use anyhow::Result;
use clap::Parser;
use zip_files_cli::args::ZipFolderCli;

fn main() -> Result<()> {
    let cli = ZipFolderCli::parse();
    zip_files_cli::run::run_zip_folder(&cli)
}
