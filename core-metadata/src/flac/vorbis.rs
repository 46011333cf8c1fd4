//! VORBIS_COMMENT metadata block.
//!
//! Unlike the rest of FLAC, the comment block uses little-endian lengths:
//! a vendor string, an entry count, then length-prefixed `KEY=VALUE`
//! entries in UTF-8.

use tracing::trace;

use crate::cursor::ByteCursor;
use crate::error::Result;
use crate::report::TagReport;

pub(super) fn parse(block: &[u8], report: &mut TagReport) -> Result<()> {
    let mut cursor = ByteCursor::new(block, "FLAC vorbis comment");
    let vendor_len = cursor.read_u32_le()? as usize;
    let vendor = String::from_utf8_lossy(cursor.read_bytes(vendor_len)?);
    report.line("[Flac Vorbis Comment]");
    report.line(vendor.into_owned());

    let declared = cursor.read_u32_le()?;
    trace!(declared, "Vorbis comment entries");

    // Entries run to the end of the block regardless of the declared count
    while !cursor.is_empty() {
        let len = cursor.read_u32_le()? as usize;
        let entry = String::from_utf8_lossy(cursor.read_bytes(len)?).into_owned();
        report.line(entry.clone());

        match entry.split_once('=') {
            Some((key, value)) if !key.is_empty() => {
                report.tags.insert(key.to_uppercase(), value);
            }
            _ => trace!(entry = %entry, "Vorbis comment without key"),
        }
    }
    Ok(())
}
