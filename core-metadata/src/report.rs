//! # Decode Results
//!
//! A [`TagReport`] is everything one decode call produced: the detected
//! [`FormatVersion`], the native [`TagStore`], human-readable display lines,
//! embedded pictures, the audio facts an engine needs, and how many tag bytes
//! were consumed.
//!
//! Structural failures do not discard work. When a decoder hits a truncated
//! or oversized structure it stops, and the report carries the error in
//! [`TagReport::failure`] next to everything read before it.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::error::MetadataError;
use crate::normalize;
use crate::picture::ImageRecord;
use crate::store::TagStore;

/// Tag format detected at decode entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FormatVersion {
    Id3v1,
    Id3v22,
    Id3v23,
    Id3v24,
    Flac,
    Asf,
}

impl FormatVersion {
    /// Display name, e.g. `ID3V2.3.0`.
    pub fn name(&self) -> &'static str {
        match self {
            FormatVersion::Id3v1 => "ID3V1",
            FormatVersion::Id3v22 => "ID3V2.2.0",
            FormatVersion::Id3v23 => "ID3V2.3.0",
            FormatVersion::Id3v24 => "ID3V2.4.0",
            FormatVersion::Flac => "FLAC",
            FormatVersion::Asf => "ASF",
        }
    }

    /// Version for an ID3v2 major revision byte.
    pub fn from_id3v2_major(major: u8) -> Option<Self> {
        match major {
            2 => Some(FormatVersion::Id3v22),
            3 => Some(FormatVersion::Id3v23),
            4 => Some(FormatVersion::Id3v24),
            _ => None,
        }
    }

    pub fn is_id3v2(&self) -> bool {
        matches!(
            self,
            FormatVersion::Id3v22 | FormatVersion::Id3v23 | FormatVersion::Id3v24
        )
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stream facts read from the container headers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AudioProperties {
    /// Sample rate in Hz
    pub sample_rate: Option<u32>,
    pub channels: Option<u16>,
    pub bits_per_sample: Option<u16>,
    /// Bit rate in bits per second
    pub bit_rate: Option<u32>,
    /// Playback duration in milliseconds
    pub duration_ms: Option<u64>,
    pub total_samples: Option<u64>,
    /// Declared data length in bytes (ASF header extension size)
    pub data_length: Option<u64>,
}

/// Result of one decode call.
#[derive(Debug, Default, Serialize)]
pub struct TagReport {
    /// `None` when no known signature was found
    pub format: Option<FormatVersion>,
    pub tags: TagStore,
    /// Human-readable listing of everything decoded, in file order
    pub lines: Vec<String>,
    pub images: Vec<ImageRecord>,
    pub audio: AudioProperties,
    /// Bytes of tag data consumed from the stream
    pub tag_size: u64,
    /// Structural error that stopped decoding early
    #[serde(serialize_with = "serialize_failure")]
    pub failure: Option<MetadataError>,
}

impl TagReport {
    pub fn new(format: Option<FormatVersion>) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    /// Report for input without any recognised tag signature.
    pub fn untagged(tag_size: u64) -> Self {
        Self {
            tag_size,
            ..Self::default()
        }
    }

    /// Display name of the detected format, `""` when untagged.
    pub fn version_name(&self) -> &'static str {
        self.format.map(|f| f.name()).unwrap_or("")
    }

    /// Look up a canonical key (`TITLE`, `ARTIST`, ...) through the
    /// normalization table. Misses yield `""`.
    pub fn get(&self, canonical_key: &str) -> &str {
        normalize::lookup(self.format, &self.tags, canonical_key)
    }

    /// Look up a format-native key (`TIT2`, `WM/AlbumTitle`, ...).
    pub fn get_native(&self, native_key: &str) -> &str {
        self.tags.get(native_key).unwrap_or("")
    }

    pub fn is_tagged(&self) -> bool {
        self.format.is_some()
    }

    /// True when decoding ran to the end without a structural failure.
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    pub(crate) fn line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Keep `record` unless picture extraction is disabled.
    pub(crate) fn add_image(&mut self, record: ImageRecord, keep: bool) {
        if keep {
            self.images.push(record);
        }
    }

    /// Record `result` as the decode outcome.
    pub(crate) fn finish(mut self, result: crate::Result<()>) -> Self {
        if let Err(err) = result {
            tracing::warn!(format = self.version_name(), error = %err, "Tag decoding stopped early");
            self.failure = Some(err);
        }
        self
    }
}

fn serialize_failure<S: Serializer>(
    failure: &Option<MetadataError>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match failure {
        Some(err) => serializer.serialize_some(&err.to_string()),
        None => serializer.serialize_none(),
    }
}
