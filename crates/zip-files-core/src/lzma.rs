//! LZMA (method 14) archive assembly.
//!
//! The zip container library decompresses LZMA members but refuses to
//! compress them, so archives built with the LZMA method are assembled
//! here directly: a local file header per entry, the member stream from
//! the LZMA encoder, and a central directory at the end, laid out per
//! the zip application note. Each member's data area starts with the
//! version/properties preamble the format requires (2 bytes of encoder
//! version, a 2-byte properties length, then the 5 property bytes),
//! followed by the raw LZMA stream terminated by an end-of-stream
//! marker.

use crate::Result;
use crate::error::ArchiveError;
use lzma_rust2::LzmaOptions;
use lzma_rust2::LzmaWriter;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::io::Write;
use zip::result::ZipError;

const LOCAL_HEADER_SIGNATURE: u32 = 0x0403_4b50;
const CENTRAL_HEADER_SIGNATURE: u32 = 0x0201_4b50;
const END_OF_CENTRAL_DIRECTORY_SIGNATURE: u32 = 0x0605_4b50;

/// LZMA appeared in version 6.3 of the zip application note.
const VERSION_NEEDED: u16 = 63;
/// Unix attribute host system in the high byte.
const VERSION_MADE_BY: u16 = (3 << 8) | VERSION_NEEDED;
/// Bit 1: the member stream carries an end-of-stream marker.
/// Bit 11: the entry name is UTF-8.
const GENERAL_PURPOSE_FLAGS: u16 = 0x0002 | 0x0800;
const METHOD_LZMA: u16 = 14;
/// 1980-01-01 00:00:00 in MS-DOS date/time encoding, matching the
/// constant timestamp the container library writes.
const DOS_DATE: u16 = 0x0021;
const DOS_TIME: u16 = 0;
/// Regular file, mode 644.
const EXTERNAL_ATTRIBUTES: u32 = 0o100_644 << 16;

/// One finished member, remembered for the central directory.
struct MemberRecord {
    name: String,
    name_length: u16,
    crc32: u32,
    compressed_size: u32,
    uncompressed_size: u32,
    header_offset: u32,
}

/// Writes a zip archive whose members are all LZMA-compressed.
///
/// Mirrors the subset of the container library's writer that the
/// archive builder uses: add entries one at a time, then `finish` to
/// write the central directory. Never produces zip64 records; an
/// archive that would need them is rejected instead.
pub(crate) struct LzmaArchiveWriter<W: Write + Seek> {
    inner: W,
    members: Vec<MemberRecord>,
}

impl<W: Write + Seek> LzmaArchiveWriter<W> {
    pub(crate) fn new(inner: W) -> Self {
        Self {
            inner,
            members: Vec::new(),
        }
    }

    /// Compresses `reader` into the next member and returns the number
    /// of uncompressed bytes consumed.
    pub(crate) fn add_file<R: Read>(&mut self, name: &str, mut reader: R) -> Result<u64> {
        let header_offset = field(self.inner.stream_position()?)?;
        let name_length = u16::try_from(name.len())
            .map_err(|_| ArchiveError::Zip(ZipError::UnsupportedArchive("entry name too long")))?;

        // Local file header, with the crc and sizes backpatched once
        // the member stream is finished.
        put_u32(&mut self.inner, LOCAL_HEADER_SIGNATURE)?;
        put_u16(&mut self.inner, VERSION_NEEDED)?;
        put_u16(&mut self.inner, GENERAL_PURPOSE_FLAGS)?;
        put_u16(&mut self.inner, METHOD_LZMA)?;
        put_u16(&mut self.inner, DOS_TIME)?;
        put_u16(&mut self.inner, DOS_DATE)?;
        put_u32(&mut self.inner, 0)?; // crc-32
        put_u32(&mut self.inner, 0)?; // compressed size
        put_u32(&mut self.inner, 0)?; // uncompressed size
        put_u16(&mut self.inner, name_length)?;
        put_u16(&mut self.inner, 0)?; // extra field length
        self.inner.write_all(name.as_bytes())?;

        let data_start = self.inner.stream_position()?;
        let options = LzmaOptions::default();

        // Member preamble: encoder version, properties length, then
        // the properties byte and the dictionary size.
        self.inner.write_all(&[9, 4])?;
        put_u16(&mut self.inner, 5)?;
        self.inner.write_all(&[options.get_props()])?;
        self.inner.write_all(&options.dict_size.to_le_bytes())?;
        let mut encoder = LzmaWriter::new_no_header(&mut self.inner, &options, true)?;

        let mut hasher = crc32fast::Hasher::new();
        let mut uncompressed: u64 = 0;
        let mut buffer = vec![0u8; 64 * 1024];
        loop {
            let bytes_read = reader.read(&mut buffer)?;
            if bytes_read == 0 {
                break;
            }
            hasher.update(&buffer[..bytes_read]);
            encoder.write_all(&buffer[..bytes_read])?;
            uncompressed += bytes_read as u64;
        }
        encoder.finish()?;

        let data_end = self.inner.stream_position()?;
        let record = MemberRecord {
            name: name.to_string(),
            name_length,
            crc32: hasher.finalize(),
            compressed_size: field(data_end - data_start)?,
            uncompressed_size: field(uncompressed)?,
            header_offset,
        };

        // crc-32 sits 14 bytes into the local header.
        self.inner
            .seek(SeekFrom::Start(u64::from(header_offset) + 14))?;
        put_u32(&mut self.inner, record.crc32)?;
        put_u32(&mut self.inner, record.compressed_size)?;
        put_u32(&mut self.inner, record.uncompressed_size)?;
        self.inner.seek(SeekFrom::Start(data_end))?;

        self.members.push(record);
        Ok(uncompressed)
    }

    /// Writes the central directory and returns the underlying writer.
    pub(crate) fn finish(mut self) -> Result<W> {
        let directory_start = field(self.inner.stream_position()?)?;

        for record in &self.members {
            put_u32(&mut self.inner, CENTRAL_HEADER_SIGNATURE)?;
            put_u16(&mut self.inner, VERSION_MADE_BY)?;
            put_u16(&mut self.inner, VERSION_NEEDED)?;
            put_u16(&mut self.inner, GENERAL_PURPOSE_FLAGS)?;
            put_u16(&mut self.inner, METHOD_LZMA)?;
            put_u16(&mut self.inner, DOS_TIME)?;
            put_u16(&mut self.inner, DOS_DATE)?;
            put_u32(&mut self.inner, record.crc32)?;
            put_u32(&mut self.inner, record.compressed_size)?;
            put_u32(&mut self.inner, record.uncompressed_size)?;
            put_u16(&mut self.inner, record.name_length)?;
            put_u16(&mut self.inner, 0)?; // extra field length
            put_u16(&mut self.inner, 0)?; // comment length
            put_u16(&mut self.inner, 0)?; // starting disk
            put_u16(&mut self.inner, 0)?; // internal attributes
            put_u32(&mut self.inner, EXTERNAL_ATTRIBUTES)?;
            put_u32(&mut self.inner, record.header_offset)?;
            self.inner.write_all(record.name.as_bytes())?;
        }

        let directory_end = field(self.inner.stream_position()?)?;
        let member_count = u16::try_from(self.members.len())
            .map_err(|_| ArchiveError::Zip(ZipError::UnsupportedArchive("too many entries")))?;

        put_u32(&mut self.inner, END_OF_CENTRAL_DIRECTORY_SIGNATURE)?;
        put_u16(&mut self.inner, 0)?; // this disk
        put_u16(&mut self.inner, 0)?; // central directory disk
        put_u16(&mut self.inner, member_count)?;
        put_u16(&mut self.inner, member_count)?;
        put_u32(&mut self.inner, directory_end - directory_start)?;
        put_u32(&mut self.inner, directory_start)?;
        put_u16(&mut self.inner, 0)?; // comment length
        self.inner.flush()?;

        Ok(self.inner)
    }
}

fn put_u16<W: Write>(writer: &mut W, value: u16) -> std::io::Result<()> {
    writer.write_all(&value.to_le_bytes())
}

fn put_u32<W: Write>(writer: &mut W, value: u32) -> std::io::Result<()> {
    writer.write_all(&value.to_le_bytes())
}

/// Narrows a size or offset to the 32-bit record field.
fn field(value: u64) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        ArchiveError::Zip(ZipError::UnsupportedArchive(
            "archive too large; zip64 records are not produced for LZMA output",
        ))
    })
}
