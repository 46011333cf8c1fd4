//! # ASF / WMA Header Decoder
//!
//! Walks the ASF Header Object at the start of a `.wma` file and decodes the
//! child objects that carry tags and stream facts.
//!
//! ## Overview
//!
//! The header object is a 30-byte preamble (GUID, 64-bit size, 32-bit child
//! count, 2 reserved bytes) followed by `count` child objects, each framed as
//! a GUID plus a 64-bit size that includes the 24-byte frame. The whole
//! header is buffered once, bounded by [`ReaderConfig::max_tag_size`], and
//! each child is parsed from a cursor limited to its declared extent.
//!
//! Decoded objects:
//! - File Properties, Stream Properties, Header Extension, Codec List
//! - Content Description (`TITLE`, `ARTIST`, `COPYRIGHT`, `COMMENT`, `RATING`)
//! - Extended Content Description (`WM/*` descriptors, `WM/Picture`)
//! - Stream Bitrate Properties
//!
//! Script Command, Marker, Bitrate Mutual Exclusion, Error Correction,
//! Content Branding and unknown objects are skipped by their declared size.

pub mod guid;
mod objects;
pub mod picture;

use core_runtime::ReaderConfig;
use std::io::Read;
use tracing::debug;

use crate::cursor::ByteCursor;
use crate::error::{MetadataError, Result};
use crate::reader::{read_region, read_up_to, TagDecoder};
use crate::report::{FormatVersion, TagReport};

use guid::{AsfObjectKind, Guid, HEADER_OBJECT};

/// Size of the Header Object preamble.
pub const HEADER_PREAMBLE_LEN: usize = 30;

/// GUID plus 64-bit size in front of every child object.
const OBJECT_FRAME_LEN: u64 = 24;

#[derive(Debug, Clone, Default)]
pub struct AsfDecoder {
    config: ReaderConfig,
}

impl AsfDecoder {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }
}

impl TagDecoder for AsfDecoder {
    fn decode(&self, reader: &mut dyn Read) -> TagReport {
        let mut preamble = [0u8; HEADER_PREAMBLE_LEN];
        let read = match read_up_to(reader, &mut preamble) {
            Ok(read) => read,
            Err(err) => return TagReport::untagged(0).finish(Err(err.into())),
        };
        if read < HEADER_PREAMBLE_LEN || preamble[..16] != HEADER_OBJECT.0 {
            debug!(read, "No ASF header object");
            return TagReport::untagged(read as u64);
        }

        let mut report = TagReport::new(Some(FormatVersion::Asf));
        report.tag_size = HEADER_PREAMBLE_LEN as u64;
        let result = self.decode_header(&preamble, reader, &mut report);
        report.finish(result)
    }
}

impl AsfDecoder {
    fn decode_header(
        &self,
        preamble: &[u8; HEADER_PREAMBLE_LEN],
        reader: &mut dyn Read,
        report: &mut TagReport,
    ) -> Result<()> {
        let mut header = ByteCursor::new(&preamble[16..], "ASF header");
        let object_size = header.read_u64_le()?;
        let object_count = header.read_u32_le()?;

        report.line("[ASF Header]");
        report.line(format!("Header Size: {}", object_size));
        report.line(format!("Object Count: {}", object_count));

        let body_len = object_size
            .checked_sub(HEADER_PREAMBLE_LEN as u64)
            .ok_or_else(|| {
                MetadataError::truncated("ASF header", HEADER_PREAMBLE_LEN as u64, object_size)
            })?;
        let body = read_region(reader, body_len, self.config.max_tag_size, "ASF header")?;
        report.tag_size += body_len;

        debug!(object_size, object_count, "Walking ASF header objects");
        let mut cursor = ByteCursor::new(&body, "ASF header");
        for _ in 0..object_count {
            let guid = Guid(cursor.read_array::<16>()?);
            let size = cursor.read_u64_le()?;
            let kind = AsfObjectKind::from_guid(&guid);

            let extent = size
                .checked_sub(OBJECT_FRAME_LEN)
                .ok_or_else(|| MetadataError::truncated(kind.name(), OBJECT_FRAME_LEN, size))?;
            if extent > cursor.remaining() as u64 {
                return Err(MetadataError::truncated(
                    kind.name(),
                    extent,
                    cursor.remaining() as u64,
                ));
            }
            let mut object = cursor.sub_cursor(extent as usize, kind.name())?;
            debug!(object = kind.name(), %guid, size, "ASF object");

            self.decode_object(kind, &mut object, report)?;
        }
        Ok(())
    }

    fn decode_object(
        &self,
        kind: AsfObjectKind,
        object: &mut ByteCursor<'_>,
        report: &mut TagReport,
    ) -> Result<()> {
        match kind {
            AsfObjectKind::FileProperties => objects::file_properties(object, report),
            AsfObjectKind::StreamProperties => {
                objects::stream_properties(object, report, &self.config)
            }
            AsfObjectKind::HeaderExtension => objects::header_extension(object, report),
            AsfObjectKind::CodecList => objects::codec_list(object, report),
            AsfObjectKind::ContentDescription => objects::content_description(object, report),
            AsfObjectKind::ExtendedContentDescription => {
                objects::extended_content_description(object, report, &self.config)
            }
            AsfObjectKind::StreamBitrateProperties => {
                objects::stream_bitrate_properties(object, report)
            }
            AsfObjectKind::ScriptCommand
            | AsfObjectKind::Marker
            | AsfObjectKind::BitrateMutualExclusion
            | AsfObjectKind::ErrorCorrection
            | AsfObjectKind::ContentBranding
            | AsfObjectKind::Unknown => {
                debug!(object = kind.name(), len = object.len(), "Skipping ASF object");
                report.line(format!("[{}]", kind.name()));
                Ok(())
            }
        }
    }
}
