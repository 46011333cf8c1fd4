//! ID3v2.2, ID3v2.3 and ID3v2.4 tags.
//!
//! The 10-byte header gives the major version and a synchsafe size. The
//! frame region of exactly that size is buffered and walked frame by frame.
//! Frame headers differ per major version:
//!
//! | Major | ID | Size | Flags |
//! |-------|----|------|-------|
//! | 2 | 3 bytes | 3 bytes BE | none |
//! | 3 | 4 bytes | 4 bytes BE | 2 bytes |
//! | 4 | 4 bytes | 4 bytes synchsafe | 2 bytes |

use core_runtime::ReaderConfig;
use std::io::Read;
use tracing::{debug, trace};

use super::frames;
use super::genre::resolve_numeric_genres;
use crate::cursor::{synchsafe, ByteCursor};
use crate::error::{MetadataError, Result};
use crate::reader::read_region;
use crate::report::{FormatVersion, TagReport};
use crate::tables::frame_description;
use crate::text::{latin1_decode, strip_control};

/// Length of the tag header including the `ID3` signature.
pub const HEADER_LEN: usize = 10;

pub const SIGNATURE: &[u8; 3] = b"ID3";

const FLAG_EXTENDED_HEADER: u8 = 0x40;

/// Fields of the 10-byte tag header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagHeader {
    pub major: u8,
    pub revision: u8,
    pub flags: u8,
    /// Size of the frame region, excluding the header
    pub size: u32,
}

impl TagHeader {
    /// Parse a header whose signature was already checked.
    pub fn parse(header: &[u8; HEADER_LEN]) -> Self {
        Self {
            major: header[3],
            revision: header[4],
            flags: header[5],
            size: synchsafe(&header[6..10]),
        }
    }

    fn id_len(&self) -> usize {
        if self.major == 2 {
            3
        } else {
            4
        }
    }

    fn frame_header_len(&self) -> usize {
        if self.major == 2 {
            6
        } else {
            10
        }
    }
}

/// Decode the frame region following `header`.
pub(super) fn decode(
    header: TagHeader,
    reader: &mut dyn Read,
    report: &mut TagReport,
    config: &ReaderConfig,
) -> Result<()> {
    let version = report.format.unwrap_or(FormatVersion::Id3v23);
    let region = read_region(
        reader,
        u64::from(header.size),
        config.max_tag_size,
        "ID3v2 tag",
    )?;
    report.tag_size = HEADER_LEN as u64 + u64::from(header.size);
    debug!(version = version.name(), size = header.size, "Reading ID3v2 frames");

    let mut frames = FrameWalker::new(version, config);
    let result = frames.walk(&header, &region, report);
    frames.finish(report);
    result
}

/// Frame loop state.
struct FrameWalker<'c> {
    version: FormatVersion,
    config: &'c ReaderConfig,
    /// Pictures seen so far, counted even when records are not kept
    pictures: usize,
}

impl<'c> FrameWalker<'c> {
    fn new(version: FormatVersion, config: &'c ReaderConfig) -> Self {
        Self {
            version,
            config,
            pictures: 0,
        }
    }

    fn walk(&mut self, header: &TagHeader, region: &[u8], report: &mut TagReport) -> Result<()> {
        let mut cursor = ByteCursor::new(region, "ID3v2 tag");

        if header.major >= 3 && header.flags & FLAG_EXTENDED_HEADER != 0 {
            skip_extended_header(header.major, &mut cursor)?;
        }

        while cursor.remaining() >= header.frame_header_len() {
            let id_bytes = cursor.peek(header.id_len())?;
            if id_bytes[0] == 0 {
                // Padding
                break;
            }
            let id = latin1_decode(cursor.read_bytes(header.id_len())?);
            let size = match header.major {
                2 => cursor.read_u24_be()?,
                3 => cursor.read_u32_be()?,
                _ => cursor.read_synchsafe_u32()?,
            } as usize;
            if header.major >= 3 {
                let _flags = cursor.read_u16_be()?;
            }

            if size > cursor.remaining() {
                return Err(MetadataError::truncated(
                    "ID3v2 frame",
                    size as u64,
                    cursor.remaining() as u64,
                ));
            }
            let payload = cursor.read_bytes(size)?;
            trace!(frame = %id, size, "ID3v2 frame");
            self.frame(&id, payload, report)?;
        }
        Ok(())
    }

    fn frame(&mut self, id: &str, payload: &[u8], report: &mut TagReport) -> Result<()> {
        match id {
            "PIC" | "APIC" => {
                let record = frames::picture_frame(payload, id == "PIC")?;
                let value = strip_control(&record.summary());
                self.pictures += 1;
                // Later pictures are labelled with the count including themselves
                let sep = format!(" [{}] ", self.pictures);
                report.tags.insert_joined(id, value, &sep);
                report.add_image(record, self.config.extract_pictures);
            }
            "COM" | "COMM" => {
                let value = frames::comment_frame(payload)?;
                report.tags.insert(id, strip_control(&value));
            }
            "UFI" | "UFID" | "PRIV" => {
                report.tags.insert(id, strip_control(&frames::owner_frame(payload)));
            }
            _ if id.starts_with('T') => {
                let value = frames::text_frame(payload)?;
                report.tags.insert(id, strip_control(&value));
            }
            _ => {
                debug!(frame = %id, size = payload.len(), "Skipping undecoded ID3v2 frame");
                report.tags.insert(id, "");
            }
        }
        Ok(())
    }

    /// Post-process the collected tags and render display lines.
    fn finish(&self, report: &mut TagReport) {
        if self.config.resolve_numeric_genres {
            for key in ["TCO", "TCON"] {
                let resolved = report.tags.get(key).and_then(resolve_numeric_genres);
                if let Some(names) = resolved {
                    report.tags.replace(key, names);
                }
            }
        }

        for key in ["TLE", "TLEN"] {
            if let Some(ms) = report.tags.get(key).and_then(|v| v.trim().parse().ok()) {
                report.audio.duration_ms = Some(ms);
            }
        }

        report.line(format!("[{}]", self.version.name()));
        let lines: Vec<String> = report
            .tags
            .iter()
            .flat_map(|(id, value)| {
                let label = frame_description(self.version, id).unwrap_or(id);
                [label.to_string(), format!("  {}", value)]
            })
            .collect();
        report.lines.extend(lines);
    }
}

fn skip_extended_header(major: u8, cursor: &mut ByteCursor<'_>) -> Result<()> {
    let declared = if major == 3 {
        // v2.3 size excludes the size field itself
        cursor.read_u32_be()? as usize
    } else {
        (cursor.read_synchsafe_u32()? as usize).saturating_sub(4)
    };
    cursor.skip(declared)
}
