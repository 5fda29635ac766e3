//! CLI argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;
use zip_files_core::Compression;

/// Options shared by `zip-files` and `zip-folder`.
#[derive(clap::Args, Debug)]
pub struct CommonArgs {
    /// Activate debug logging
    #[arg(long)]
    pub debug: bool,

    /// Folder name to prepend to the entries inside the zip file
    #[arg(short = 'f', long, value_name = "ROOT_FOLDER")]
    pub root_folder: Option<String>,

    /// Zip compression method: "stored" (no compression), "deflated"
    /// (the standard zip method), "bzip2", or "lzma"
    #[arg(
        short = 'c',
        long,
        value_name = "METHOD",
        default_value = "deflated",
        value_parser = parse_compression
    )]
    pub compression: Compression,

    /// Use the stem of the OUTFILE (without path and extension) as
    /// the root folder name
    #[arg(short = 'a', long, requires = "outfile", conflicts_with = "root_folder")]
    pub auto_root: bool,

    /// Glob pattern to exclude, matched from the right against the
    /// paths inside the zip file (can be given multiple times)
    #[arg(short = 'x', long = "exclude", value_name = "GLOB_PATTERN")]
    pub exclude: Vec<String>,

    /// Skip files whose name starts with a dot
    #[arg(long)]
    pub exclude_dotfiles: bool,

    /// The path of the zip file to be written. By default, the file
    /// is written to stdout
    #[arg(short = 'o', long, value_name = "OUTFILE")]
    pub outfile: Option<PathBuf>,
}

/// Create a zip file containing FILES.
#[derive(Parser, Debug)]
#[command(name = "zip-files", version, about = "Create a zip file containing FILES.")]
pub struct ZipFilesCli {
    /// Shared options.
    #[command(flatten)]
    pub common: CommonArgs,

    /// The files to include in the zip archive
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,
}

/// Create a zip file containing the FOLDER.
#[derive(Parser, Debug)]
#[command(
    name = "zip-folder",
    version,
    about = "Create a zip file containing the FOLDER."
)]
pub struct ZipFolderCli {
    /// Shared options.
    #[command(flatten)]
    pub common: CommonArgs,

    /// File from which to read additional glob patterns to exclude,
    /// one per line (can be given multiple times)
    #[arg(short = 'X', long = "exclude-from", value_name = "FILE")]
    pub exclude_from: Vec<PathBuf>,

    /// Skip files and directories specific to version control systems
    /// (Git, Mercurial, SVN, CVS, Bazaar, Darcs)
    #[arg(long)]
    pub exclude_vcs: bool,

    /// The folder to compress
    #[arg(value_name = "FOLDER")]
    pub folder: PathBuf,
}

fn parse_compression(s: &str) -> Result<Compression, String> {
    s.parse::<Compression>().map_err(|err| err.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definitions_are_consistent() {
        ZipFilesCli::command().debug_assert();
        ZipFolderCli::command().debug_assert();
    }

    #[test]
    fn test_zip_files_defaults() {
        let cli = ZipFilesCli::parse_from(["zip-files", "a.txt", "b.txt"]);
        assert_eq!(cli.common.compression, Compression::Deflated);
        assert!(!cli.common.debug);
        assert!(cli.common.outfile.is_none());
        assert_eq!(cli.files.len(), 2);
    }

    #[test]
    fn test_auto_root_requires_outfile() {
        let result = ZipFilesCli::try_parse_from(["zip-files", "--auto-root", "a.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_auto_root_conflicts_with_root_folder() {
        let result = ZipFilesCli::try_parse_from([
            "zip-files",
            "--auto-root",
            "-o",
            "out.zip",
            "-f",
            "xyz",
            "a.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_compression_rejected() {
        let result =
            ZipFilesCli::try_parse_from(["zip-files", "-c", "invalid", "a.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_compression_case_insensitive() {
        let cli = ZipFilesCli::parse_from(["zip-files", "-c", "BZIP2", "a.txt"]);
        assert_eq!(cli.common.compression, Compression::Bzip2);
    }

    #[test]
    fn test_zip_folder_flags() {
        let cli = ZipFolderCli::parse_from([
            "zip-folder",
            "--exclude-vcs",
            "-X",
            "patterns.txt",
            "-o",
            "out.zip",
            "src",
        ]);
        assert!(cli.exclude_vcs);
        assert_eq!(cli.exclude_from, vec![PathBuf::from("patterns.txt")]);
        assert_eq!(cli.folder, PathBuf::from("src"));
    }
}
