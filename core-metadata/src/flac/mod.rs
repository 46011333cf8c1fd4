//! # FLAC Metadata Decoder
//!
//! Reads the metadata blocks that follow the `fLaC` marker.
//!
//! ## Overview
//!
//! Every block starts with a 4-byte header: bit 7 flags the last block,
//! bits 0-6 hold the block type and the next 3 bytes the big-endian body
//! length. Bodies are buffered one at a time, bounded by
//! [`ReaderConfig::max_tag_size`].
//!
//! | Type | Block | Handling |
//! |------|-------|----------|
//! | 0 | STREAMINFO | audio properties |
//! | 1 | PADDING | listed |
//! | 2 | APPLICATION | listed |
//! | 3 | SEEKTABLE | listed |
//! | 4 | VORBIS_COMMENT | tags |
//! | 5 | CUESHEET | listed |
//! | 6 | PICTURE | image record |
//!
//! Decoding stops at the last-block flag or at an unknown block type.

pub mod picture;
pub mod stream_info;
mod vorbis;

use core_runtime::ReaderConfig;
use std::io::Read;
use tracing::debug;

use crate::error::{MetadataError, Result};
use crate::reader::{read_region, read_up_to, TagDecoder};
use crate::report::{FormatVersion, TagReport};

use picture::FlacPicture;
use stream_info::StreamInfo;

pub const MAGIC: &[u8; 4] = b"fLaC";

const BLOCK_HEADER_LEN: usize = 4;

/// Metadata block types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    StreamInfo,
    Padding,
    Application,
    SeekTable,
    VorbisComment,
    CueSheet,
    Picture,
    Unknown(u8),
}

impl BlockType {
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => BlockType::StreamInfo,
            1 => BlockType::Padding,
            2 => BlockType::Application,
            3 => BlockType::SeekTable,
            4 => BlockType::VorbisComment,
            5 => BlockType::CueSheet,
            6 => BlockType::Picture,
            other => BlockType::Unknown(other),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FlacDecoder {
    config: ReaderConfig,
}

impl FlacDecoder {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    fn decode_blocks(&self, reader: &mut dyn Read, report: &mut TagReport) -> Result<()> {
        loop {
            let mut header = [0u8; BLOCK_HEADER_LEN];
            let read = read_up_to(reader, &mut header)?;
            if read < BLOCK_HEADER_LEN {
                return Err(MetadataError::truncated(
                    "FLAC block header",
                    BLOCK_HEADER_LEN as u64,
                    read as u64,
                ));
            }
            report.tag_size += BLOCK_HEADER_LEN as u64;

            let last = header[0] & 0x80 != 0;
            let block_type = BlockType::from_code(header[0] & 0x7F);
            let len = u32::from_be_bytes([0, header[1], header[2], header[3]]);

            if let BlockType::Unknown(code) = block_type {
                debug!(code, len, "Unknown FLAC block type, stopping");
                return Ok(());
            }

            let body = read_region(
                reader,
                u64::from(len),
                self.config.max_tag_size,
                "FLAC metadata block",
            )?;
            report.tag_size += u64::from(len);
            debug!(?block_type, len, last, "FLAC metadata block");

            self.decode_block(block_type, &body, report)?;
            if last {
                return Ok(());
            }
        }
    }

    fn decode_block(&self, block_type: BlockType, body: &[u8], report: &mut TagReport) -> Result<()> {
        match block_type {
            BlockType::StreamInfo => StreamInfo::parse(body)?.apply(report),
            BlockType::Padding => report.line("[Flac Padding]"),
            BlockType::Application => report.line("[Flac Application]"),
            BlockType::SeekTable => report.line("[Flac Seektable]"),
            BlockType::CueSheet => report.line("[Flac Cuesheet]"),
            BlockType::VorbisComment => vorbis::parse(body, report)?,
            BlockType::Picture => {
                let picture = FlacPicture::parse(body)?;
                report.lines.extend(picture.lines());
                report.add_image(picture.record, self.config.extract_pictures);
            }
            BlockType::Unknown(_) => {}
        }
        Ok(())
    }
}

impl TagDecoder for FlacDecoder {
    fn decode(&self, reader: &mut dyn Read) -> TagReport {
        let mut magic = [0u8; 4];
        let read = match read_up_to(reader, &mut magic) {
            Ok(read) => read,
            Err(err) => return TagReport::untagged(0).finish(Err(err.into())),
        };
        if read < magic.len() || &magic != MAGIC {
            debug!(read, "No fLaC marker");
            return TagReport::untagged(read as u64);
        }

        let mut report = TagReport::new(Some(FormatVersion::Flac));
        report.tag_size = MAGIC.len() as u64;
        let result = self.decode_blocks(reader, &mut report);
        report.finish(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(code: u8, last: bool, body: &[u8]) -> Vec<u8> {
        let len = (body.len() as u32).to_be_bytes();
        let mut out = vec![code | if last { 0x80 } else { 0 }, len[1], len[2], len[3]];
        out.extend_from_slice(body);
        out
    }

    #[test]
    fn test_block_types() {
        assert_eq!(BlockType::from_code(4), BlockType::VorbisComment);
        assert_eq!(BlockType::from_code(9), BlockType::Unknown(9));
    }

    #[test]
    fn test_not_flac() {
        let mut data: &[u8] = b"OggS";
        assert!(!FlacDecoder::default().decode(&mut data).is_tagged());
    }

    #[test]
    fn test_padding_then_last() {
        let mut data = MAGIC.to_vec();
        data.extend(block(1, false, &[0; 8]));
        data.extend(block(3, true, &[0; 18]));
        data.extend_from_slice(b"audio frames");

        let report = FlacDecoder::default().decode(&mut data.as_slice());
        assert!(report.is_complete());
        assert_eq!(report.tag_size, 4 + 4 + 8 + 4 + 18);
        assert_eq!(report.lines, vec!["[Flac Padding]", "[Flac Seektable]"]);
    }

    #[test]
    fn test_unknown_block_stops() {
        let mut data = MAGIC.to_vec();
        data.extend(block(1, false, &[0; 2]));
        data.extend(block(100, false, &[0; 2]));
        data.extend(block(1, true, &[0; 2]));

        let report = FlacDecoder::default().decode(&mut data.as_slice());
        assert!(report.is_complete());
        assert_eq!(report.lines.len(), 1);
    }

    #[test]
    fn test_missing_last_flag_is_truncation() {
        let mut data = MAGIC.to_vec();
        data.extend(block(1, false, &[0; 2]));
        let report = FlacDecoder::default().decode(&mut data.as_slice());
        assert!(report.failure.as_ref().unwrap().is_truncation());
    }

    #[test]
    fn test_block_over_limit() {
        let config = ReaderConfig {
            max_tag_size: 16,
            ..ReaderConfig::default()
        };
        let mut data = MAGIC.to_vec();
        data.extend(block(1, true, &[0; 32]));
        let report = FlacDecoder::new(config).decode(&mut data.as_slice());
        assert!(report.failure.as_ref().unwrap().is_size_limit());
    }
}
