//! Command execution: options to config, input resolution, archive
//! build.

use crate::args::CommonArgs;
use crate::args::ZipFilesCli;
use crate::args::ZipFolderCli;
use crate::diag::Diag;
use crate::error::with_cli_context;
use anyhow::Context;
use anyhow::Result;
use std::path::Path;
use zip_files_core::ArchiveTarget;
use zip_files_core::BuildConfig;
use zip_files_core::BuildReport;
use zip_files_core::ExcludeFilter;
use zip_files_core::RootFolder;
use zip_files_core::SourceEntry;
use zip_files_core::build_archive;
use zip_files_core::walker;

/// Runs the `zip-files` command.
///
/// # Errors
///
/// Returns an error on missing inputs, directories among FILES, bad
/// exclude patterns, or I/O failures while writing the archive.
pub fn run_zip_files(cli: &ZipFilesCli) -> Result<()> {
    let diag = Diag::new(cli.common.debug);
    let config = build_config(&cli.common, Vec::new(), false);

    let prefix = resolve_prefix(&config, &cli.common, &diag)?;
    let filter = with_cli_context(ExcludeFilter::from_config(&config))?;
    let entries = with_cli_context(walker::collect_files(
        &cli.files,
        prefix.as_deref(),
        &filter,
    ))?;

    write_target(&entries, &config, &cli.common, &diag)
}

/// Runs the `zip-folder` command.
///
/// # Errors
///
/// Returns an error if FOLDER is missing or not a directory, an
/// exclude file cannot be read, a pattern is invalid, or writing the
/// archive fails.
pub fn run_zip_folder(cli: &ZipFolderCli) -> Result<()> {
    let diag = Diag::new(cli.common.debug);

    let mut extra_patterns = Vec::new();
    for file in &cli.exclude_from {
        let mut patterns = read_exclude_file(file)?;
        diag.debug(format!(
            "read {} exclude patterns from {}",
            patterns.len(),
            file.display()
        ));
        extra_patterns.append(&mut patterns);
    }
    let config = build_config(&cli.common, extra_patterns, cli.exclude_vcs);

    let prefix = resolve_prefix(&config, &cli.common, &diag)?;
    let filter = with_cli_context(ExcludeFilter::from_config(&config))?;
    let entries = with_cli_context(walker::collect_folder(
        &cli.folder,
        prefix.as_deref(),
        &filter,
    ))?;

    write_target(&entries, &config, &cli.common, &diag)
}

/// Assembles the core configuration from parsed options.
fn build_config(common: &CommonArgs, extra_patterns: Vec<String>, exclude_vcs: bool) -> BuildConfig {
    let root_folder = if common.auto_root {
        RootFolder::AutoFromOutfile
    } else if let Some(name) = &common.root_folder {
        RootFolder::Explicit(name.clone())
    } else {
        RootFolder::None
    };

    let mut exclude = common.exclude.clone();
    exclude.extend(extra_patterns);

    BuildConfig::default()
        .with_root_folder(root_folder)
        .with_compression(common.compression)
        .with_exclude(exclude)
        .with_exclude_dotfiles(common.exclude_dotfiles)
        .with_exclude_vcs(exclude_vcs)
}

fn resolve_prefix(
    config: &BuildConfig,
    common: &CommonArgs,
    diag: &Diag,
) -> Result<Option<String>> {
    let prefix = with_cli_context(config.root_folder.resolve(common.outfile.as_deref()))?;
    match &prefix {
        Some(name) => diag.debug(format!("root folder: {name}")),
        None => diag.debug("root folder: none"),
    }
    Ok(prefix)
}

fn write_target(
    entries: &[SourceEntry],
    config: &BuildConfig,
    common: &CommonArgs,
    diag: &Diag,
) -> Result<()> {
    for entry in entries {
        diag.debug(format!(
            "adding {} to zip as {}",
            entry.path.display(),
            entry.name
        ));
    }

    let target = match &common.outfile {
        Some(path) => {
            diag.debug(format!("writing zip file to {}", path.display()));
            ArchiveTarget::File(path.clone())
        }
        None => {
            diag.debug("routing output to stdout");
            ArchiveTarget::Stdout
        }
    };

    let report = with_cli_context(build_archive(entries, config.compression, &target))?;
    report_warnings(&report, diag);
    diag.debug(format!(
        "done: {} files, {} bytes in {:?}",
        report.files_added, report.bytes_written, report.duration
    ));
    Ok(())
}

fn report_warnings(report: &BuildReport, diag: &Diag) {
    for warning in &report.warnings {
        diag.warn(warning);
    }
}

/// Reads exclude patterns from a file, one per line. Blank lines and
/// `#` comments are ignored.
fn read_exclude_file(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read exclude file {}", path.display()))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;
    use zip_files_core::Compression;

    #[test]
    fn test_build_config_maps_flags() {
        let cli = ZipFilesCli::parse_from([
            "zip-files",
            "-c",
            "stored",
            "-f",
            "xyz",
            "-x",
            "*.tmp",
            "--exclude-dotfiles",
            "a.txt",
        ]);
        let config = build_config(&cli.common, vec!["*.bak".to_string()], true);

        assert_eq!(config.compression, Compression::Stored);
        assert_eq!(
            config.root_folder,
            RootFolder::Explicit("xyz".to_string())
        );
        assert_eq!(config.exclude, vec!["*.tmp".to_string(), "*.bak".to_string()]);
        assert!(config.exclude_dotfiles);
        assert!(config.exclude_vcs);
    }

    #[test]
    fn test_build_config_auto_root() {
        let cli = ZipFilesCli::parse_from(["zip-files", "-a", "-o", "out.zip", "a.txt"]);
        let config = build_config(&cli.common, Vec::new(), false);
        assert_eq!(config.root_folder, RootFolder::AutoFromOutfile);
    }

    #[test]
    fn test_read_exclude_file_skips_comments_and_blanks() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("patterns.txt");
        fs::write(&file, "# header\n*.log\n\n  *.tmp  \n# tail\n").unwrap();

        let patterns = read_exclude_file(&file).unwrap();
        assert_eq!(patterns, vec!["*.log".to_string(), "*.tmp".to_string()]);
    }

    #[test]
    fn test_read_exclude_file_missing() {
        let temp = TempDir::new().unwrap();
        let result = read_exclude_file(&temp.path().join("gone.txt"));
        assert!(result.is_err());
    }
}
