//! Zip archive assembly.
//!
//! Consumes resolved [`SourceEntry`] values and writes them into a zip
//! container, either at a filesystem path or on standard output. The
//! zip format ends with a central directory, so the stdout target
//! assembles the archive in memory first and streams the finished
//! buffer.

use crate::Result;
use crate::compression::Compression;
use crate::lzma::LzmaArchiveWriter;
use crate::report::BuildReport;
use crate::walker::SourceEntry;
use std::collections::HashMap;
use std::fs::File;
use std::io::Cursor;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Where the finished archive goes. Exactly one per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveTarget {
    /// A named output file.
    File(PathBuf),
    /// The process's standard output stream.
    Stdout,
}

/// Builds a zip archive from resolved entries.
///
/// Entries are written in the order given, each compressed with the
/// single selected method at library defaults. For a file target, a
/// failure mid-write removes the partial file before the error is
/// returned; the target is never left as a misleadingly valid
/// archive.
///
/// The zip container rejects literal duplicate names, so when several
/// entries resolve to the same archive name only the last one is
/// written, matching what extraction of a shadowed name would yield,
/// and each collision is recorded as a warning in the report.
///
/// # Errors
///
/// Returns an error if an input file cannot be read, the output
/// cannot be created, or the zip writer fails.
pub fn build_archive(
    entries: &[SourceEntry],
    compression: Compression,
    target: &ArchiveTarget,
) -> Result<BuildReport> {
    match target {
        ArchiveTarget::File(path) => {
            let file = File::create(path)?;
            match write_entries(file, entries, compression) {
                Ok((_, report)) => Ok(report),
                Err(err) => {
                    let _ = std::fs::remove_file(path);
                    Err(err)
                }
            }
        }
        ArchiveTarget::Stdout => {
            let (cursor, report) =
                write_entries(Cursor::new(Vec::new()), entries, compression)?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&cursor.into_inner())?;
            stdout.flush()?;
            Ok(report)
        }
    }
}

/// Writes all entries into a zip container over any seekable writer
/// and returns the writer with the finished archive.
///
/// The container library has no LZMA compressor, so that method takes
/// a dedicated assembly path; every other method goes through the
/// library's writer.
fn write_entries<W: Write + Seek>(
    writer: W,
    entries: &[SourceEntry],
    compression: Compression,
) -> Result<(W, BuildReport)> {
    let mut report = BuildReport::default();
    let start = Instant::now();

    // The container rejects duplicate names outright, so collisions
    // are resolved up front: the last occurrence of a name wins.
    let mut last: HashMap<&str, usize> = HashMap::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        if last.insert(entry.name.as_str(), index).is_some() {
            report.add_warning(format!(
                "duplicate archive name: {} (only the last occurrence is written)",
                entry.name
            ));
        }
    }
    let keep = |index: usize, entry: &SourceEntry| last[entry.name.as_str()] == index;

    let writer = if compression == Compression::Lzma {
        let mut zip = LzmaArchiveWriter::new(writer);
        for (index, entry) in entries.iter().enumerate() {
            if !keep(index, entry) {
                continue;
            }
            let file = File::open(&entry.path)?;
            report.bytes_written += zip.add_file(entry.name.as_str(), file)?;
            report.files_added += 1;
        }
        zip.finish()?
    } else {
        let mut zip = ZipWriter::new(writer);
        let options = SimpleFileOptions::default().compression_method(compression.to_zip());
        let mut buffer = vec![0u8; 64 * 1024];

        for (index, entry) in entries.iter().enumerate() {
            if !keep(index, entry) {
                continue;
            }
            let mut file = File::open(&entry.path)?;
            zip.start_file(entry.name.as_str(), options)?;

            loop {
                let bytes_read = file.read(&mut buffer)?;
                if bytes_read == 0 {
                    break;
                }
                zip.write_all(&buffer[..bytes_read])?;
                report.bytes_written += bytes_read as u64;
            }
            report.files_added += 1;
        }
        zip.finish()?
    };

    report.duration = start.elapsed();
    Ok((writer, report))
}
