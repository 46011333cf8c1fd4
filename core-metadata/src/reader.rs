//! # Tag Reader
//!
//! Entry point that opens a file, picks the decoder from the extension and
//! returns a [`TagReport`].
//!
//! ## Overview
//!
//! - `.wma` / `.asf` / `.wmv` files go to the ASF decoder
//! - `.flac` files go to the FLAC decoder
//! - everything else is checked for ID3 (`ID3` or `TAG` at offset 0, then a
//!   trailing 128-byte ID3v1 block)
//!
//! Each decoder also implements [`TagDecoder`] so it can be driven from any
//! [`Read`] source, such as an in-memory buffer.
//!
//! ## Usage
//!
//! ```ignore
//! use core_metadata::TagReader;
//!
//! let reader = TagReader::new();
//! let report = reader.read_path("song.mp3")?;
//! println!("{} - {}", report.get("ARTIST"), report.get("TITLE"));
//! ```

use core_runtime::logging::strip_path;
use core_runtime::ReaderConfig;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;
use tracing::debug;

use crate::asf::AsfDecoder;
use crate::error::{MetadataError, Result};
use crate::flac::FlacDecoder;
use crate::id3::Id3Decoder;
use crate::report::TagReport;

/// A decoder for one tag container format.
///
/// Decoding never fails as a whole: structural errors are recorded in
/// [`TagReport::failure`] and the partial report is returned.
pub trait TagDecoder {
    fn decode(&self, reader: &mut dyn Read) -> TagReport;
}

/// Container chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Asf,
    Flac,
    Id3,
}

impl ContainerKind {
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("wma") | Some("wmv") | Some("asf") => ContainerKind::Asf,
            Some("flac") => ContainerKind::Flac,
            _ => ContainerKind::Id3,
        }
    }
}

/// Reads tags from files on disk.
#[derive(Debug, Clone, Default)]
pub struct TagReader {
    config: ReaderConfig,
}

impl TagReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ReaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Decode the tags of the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::FileNotFound`] when the path does not exist
    /// and [`MetadataError::Io`] when it cannot be opened. Problems inside the
    /// tag data are reported through [`TagReport::failure`].
    pub fn read_path(&self, path: impl AsRef<Path>) -> Result<TagReport> {
        let path = path.as_ref();
        let path_display = path.to_string_lossy();
        if !path.exists() {
            return Err(MetadataError::FileNotFound(path_display.into_owned()));
        }

        let kind = ContainerKind::from_path(path);
        debug!(file = strip_path(&path_display), ?kind, "Reading tags");

        let mut file = File::open(path)?;
        let report = match kind {
            ContainerKind::Asf => AsfDecoder::new(self.config.clone()).decode(&mut file),
            ContainerKind::Flac => FlacDecoder::new(self.config.clone()).decode(&mut file),
            ContainerKind::Id3 => {
                let decoder = Id3Decoder::new(self.config.clone());
                let report = decoder.decode(&mut file);
                if report.is_tagged() {
                    report
                } else {
                    decoder.decode_trailing(&mut file)?.unwrap_or(report)
                }
            }
        };

        debug!(
            file = strip_path(&path_display),
            format = report.version_name(),
            tags = report.tags.len(),
            images = report.image_count(),
            complete = report.is_complete(),
            "Finished reading tags"
        );
        Ok(report)
    }

    /// Decode from an in-memory buffer, choosing the decoder by signature.
    pub fn read_bytes(&self, data: &[u8]) -> TagReport {
        let mut source = data;
        if data.starts_with(&crate::asf::guid::HEADER_OBJECT.0) {
            AsfDecoder::new(self.config.clone()).decode(&mut source)
        } else if data.starts_with(crate::flac::MAGIC) {
            FlacDecoder::new(self.config.clone()).decode(&mut source)
        } else {
            let decoder = Id3Decoder::new(self.config.clone());
            let report = decoder.decode(&mut source);
            if report.is_tagged() {
                return report;
            }
            let mut cursor = io::Cursor::new(data);
            match decoder.decode_trailing(&mut cursor) {
                Ok(Some(trailing)) => trailing,
                _ => report,
            }
        }
    }
}

/// Read until `buf` is full or the source is exhausted.
///
/// Returns the number of bytes read; a short count means end of input.
pub(crate) fn read_up_to<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(filled)
}

/// Upper bound on the buffer reserved before any region bytes arrive.
const INITIAL_REGION_CAPACITY: u64 = 64 * 1024;

/// Read exactly `len` bytes or fail with a truncation error naming `context`.
///
/// The buffer grows with the bytes actually read, so a declared size near
/// `limit` over a short source costs no more than the source itself.
pub(crate) fn read_region<R: Read + ?Sized>(
    reader: &mut R,
    len: u64,
    limit: u64,
    context: &'static str,
) -> Result<Vec<u8>> {
    if len > limit {
        return Err(MetadataError::TagTooLarge {
            context,
            declared: len,
            limit,
        });
    }
    let mut buf = Vec::with_capacity(len.min(INITIAL_REGION_CAPACITY) as usize);
    (&mut *reader).take(len).read_to_end(&mut buf)?;
    if (buf.len() as u64) < len {
        return Err(MetadataError::truncated(context, len, buf.len() as u64));
    }
    Ok(buf)
}

/// Seek to the last 128 bytes of a seekable source.
pub(crate) fn seek_to_trailer<S: Seek + ?Sized>(source: &mut S, trailer_len: u64) -> io::Result<bool> {
    let end = source.seek(SeekFrom::End(0))?;
    if end < trailer_len {
        return Ok(false);
    }
    source.seek(SeekFrom::Start(end - trailer_len))?;
    Ok(true)
}
