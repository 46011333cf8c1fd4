//! ID3v1 and ID3v1.1 tags: a fixed 128-byte block.

use crate::report::TagReport;
use crate::tables::id3v1_genre;
use crate::text::{latin1_decode, trim_nul_end};

/// Length of an ID3v1 block including the `TAG` signature.
pub const TAG_LEN: usize = 128;

pub const SIGNATURE: &[u8; 3] = b"TAG";

/// Decode a complete 128-byte block whose signature was already checked.
pub fn parse(block: &[u8; TAG_LEN], report: &mut TagReport) {
    let field = |range: std::ops::Range<usize>| {
        trim_nul_end(&latin1_decode(&block[range])).to_string()
    };

    report.tags.insert("TITLE", field(3..33));
    report.tags.insert("ARTIST", field(33..63));
    report.tags.insert("ALBUM", field(63..93));
    report.tags.insert("YEAR", field(93..97));
    report.tags.insert("COMMENT", field(97..125));

    // ID3v1.1 stores the track in the last comment byte after a zero byte
    if block[125] == 0 && block[126] != 0 {
        report.tags.insert("TRACKNUMBER", block[126].to_string());
    }

    report.tags.insert("GENRE", id3v1_genre(block[127]));
    report.tag_size = TAG_LEN as u64;

    let version = report.version_name();
    report.line(format!("[{}]", version));
    let lines: Vec<String> = report
        .tags
        .iter()
        .flat_map(|(key, value)| [key.to_string(), format!("  {}", value)])
        .collect();
    report.lines.extend(lines);
}
