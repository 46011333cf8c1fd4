//! # ID3 Decoder
//!
//! Reads ID3v1 blocks and ID3v2.2/2.3/2.4 tags.
//!
//! ## Overview
//!
//! The first three bytes select the tag kind: `TAG` is a 128-byte ID3v1
//! block, `ID3` starts an ID3v2 tag. Anything else is reported as untagged.
//! ID3v1 normally sits in the last 128 bytes of a file, so seekable sources
//! can additionally be read with [`Id3Decoder::decode_trailing`].
//!
//! Text frames, comments, pictures and owner-identifier frames are decoded;
//! every other frame is recorded with an empty value and skipped by size.

pub mod frames;
pub mod genre;
pub mod v1;
pub mod v2;

use core_runtime::ReaderConfig;
use std::io::{Read, Seek};
use tracing::debug;

use crate::error::{MetadataError, Result};
use crate::reader::{read_up_to, seek_to_trailer, TagDecoder};
use crate::report::{FormatVersion, TagReport};

#[derive(Debug, Clone, Default)]
pub struct Id3Decoder {
    config: ReaderConfig,
}

impl Id3Decoder {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Look for an ID3v1 block in the last 128 bytes of `source`.
    ///
    /// Returns `Ok(None)` when the source is shorter than a block or the
    /// block has no `TAG` signature.
    pub fn decode_trailing<S: Read + Seek + ?Sized>(
        &self,
        source: &mut S,
    ) -> Result<Option<TagReport>> {
        if !seek_to_trailer(source, v1::TAG_LEN as u64)? {
            return Ok(None);
        }
        let mut block = [0u8; v1::TAG_LEN];
        let read = read_up_to(source, &mut block)?;
        if read < v1::TAG_LEN || !block.starts_with(v1::SIGNATURE) {
            return Ok(None);
        }

        debug!("Found trailing ID3v1 tag");
        let mut report = TagReport::new(Some(FormatVersion::Id3v1));
        v1::parse(&block, &mut report);
        Ok(Some(report))
    }

    fn decode_leading_v1(&self, prefix: &[u8], reader: &mut dyn Read) -> TagReport {
        let mut block = [0u8; v1::TAG_LEN];
        block[..prefix.len()].copy_from_slice(prefix);

        let mut report = TagReport::new(Some(FormatVersion::Id3v1));
        let result = read_up_to(reader, &mut block[prefix.len()..])
            .map_err(MetadataError::from)
            .and_then(|read| {
                let total = prefix.len() + read;
                if total < v1::TAG_LEN {
                    report.tag_size = total as u64;
                    Err(MetadataError::truncated(
                        "ID3v1 tag",
                        v1::TAG_LEN as u64,
                        total as u64,
                    ))
                } else {
                    v1::parse(&block, &mut report);
                    Ok(())
                }
            });
        report.finish(result)
    }
}

impl TagDecoder for Id3Decoder {
    fn decode(&self, reader: &mut dyn Read) -> TagReport {
        let mut header = [0u8; v2::HEADER_LEN];
        let read = match read_up_to(reader, &mut header) {
            Ok(read) => read,
            Err(err) => return TagReport::untagged(0).finish(Err(err.into())),
        };
        let prefix = &header[..read];

        if prefix.starts_with(v1::SIGNATURE) {
            return self.decode_leading_v1(prefix, reader);
        }
        if !prefix.starts_with(v2::SIGNATURE) {
            debug!(read, "No ID3 signature");
            return TagReport::untagged(read as u64);
        }
        if read < v2::HEADER_LEN {
            return TagReport::untagged(read as u64).finish(Err(MetadataError::truncated(
                "ID3v2 header",
                v2::HEADER_LEN as u64,
                read as u64,
            )));
        }

        let tag_header = v2::TagHeader::parse(&header);
        let Some(version) = FormatVersion::from_id3v2_major(tag_header.major) else {
            debug!(major = tag_header.major, "Unsupported ID3v2 major version");
            return TagReport::untagged(read as u64);
        };

        let mut report = TagReport::new(Some(version));
        report.tag_size = v2::HEADER_LEN as u64;
        let result = v2::decode(tag_header, reader, &mut report, &self.config);
        report.finish(result)
    }
}
