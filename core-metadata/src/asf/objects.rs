//! Parsers for the objects inside the ASF Header Object.
//!
//! Each parser receives a cursor bounded to the object body (the 16-byte GUID
//! and 8-byte size have already been consumed by the walker) and may not read
//! past it. All integers are little-endian.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use core_runtime::ReaderConfig;
use tracing::debug;

use super::guid::{error_correction_name, stream_type_name, Guid, AUDIO_MEDIA};
use super::picture::WmPicture;
use crate::cursor::ByteCursor;
use crate::error::Result;
use crate::picture::ImageRecord;
use crate::report::TagReport;
use crate::text::{hex_preview, trim_nul_end, utf16_decode, Utf16Order};

/// Seconds between 1601-01-01 and 1970-01-01.
const FILETIME_UNIX_OFFSET_SECS: i64 = 11_644_473_600;

/// 100-nanosecond ticks per millisecond.
const TICKS_PER_MS: u64 = 10_000;

pub(super) fn file_properties(body: &mut ByteCursor<'_>, report: &mut TagReport) -> Result<()> {
    let file_id = Guid(body.read_array::<16>()?);
    let file_size = body.read_u64_le()?;
    let creation_time = body.read_u64_le()?;
    let data_packets = body.read_u64_le()?;
    let play_duration = body.read_u64_le()?;
    let send_duration = body.read_u64_le()?;
    let preroll = body.read_u64_le()?;
    let flags = body.read_u32_le()?;
    let min_packet_size = body.read_u32_le()?;
    let max_packet_size = body.read_u32_le()?;
    let max_bitrate = body.read_u32_le()?;

    report.line("[File Properties]");
    report.line(format!("File ID: {}", file_id));
    report.line(format!("File Size: {}", file_size));
    report.line(format!("Creation Date: {}", filetime_to_string(creation_time)));
    report.line(format!("Data Packets: {}", data_packets));

    // Durations are only meaningful when the broadcast flag is clear
    if flags & 0x01 == 0 {
        let play_ms = play_duration / TICKS_PER_MS;
        report.audio.duration_ms = Some(play_ms);
        report.line(format!("Play Duration: {}", format_duration(play_ms)));
        report.line(format!(
            "Send Duration: {}",
            format_duration(send_duration / TICKS_PER_MS)
        ));
    }

    report.line(format!("Preroll: {} msec", preroll));
    report.line(format!("Min Data Packet Size: {}", min_packet_size));
    report.line(format!("Max Data Packet Size: {}", max_packet_size));
    report.line(format!("Max Bitrate: {} bps", max_bitrate));
    report.audio.bit_rate = Some(max_bitrate);

    debug!(
        file_size,
        data_packets, play_duration, flags, max_bitrate, "ASF file properties"
    );
    Ok(())
}

pub(super) fn stream_properties(
    body: &mut ByteCursor<'_>,
    report: &mut TagReport,
    config: &ReaderConfig,
) -> Result<()> {
    let stream_type = Guid(body.read_array::<16>()?);
    let error_correction_type = Guid(body.read_array::<16>()?);
    let time_offset = body.read_u64_le()?;
    let type_specific_len = body.read_u32_le()? as usize;
    let error_correction_len = body.read_u32_le()? as usize;
    let flags = body.read_u16_le()?;
    let _reserved = body.read_u32_le()?;
    let type_specific = body.read_bytes(type_specific_len)?;
    let error_correction = body.read_bytes(error_correction_len)?;

    let preview = config.binary_preview_len;
    report.line("[Stream Properties]");
    report.line(format!("Stream Type: {}", stream_type_name(&stream_type)));
    report.line(format!(
        "Error Correction Type: {}",
        error_correction_name(&error_correction_type)
    ));
    report.line(format!("Time Offset: {}", time_offset / 10));
    report.line(format!("Type-Specific Data Length: {}", type_specific_len));
    report.line(format!("Stream Number: {}", flags & 0x3F));
    report.line(format!(
        "Type-Specific Data: {}",
        hex_preview(type_specific, preview)
    ));
    report.line(format!(
        "Error Correction Data: {}",
        hex_preview(error_correction, preview)
    ));

    if stream_type == AUDIO_MEDIA && type_specific.len() >= 16 {
        wave_format(type_specific, report)?;
    }
    Ok(())
}

/// WAVEFORMATEX at the start of an audio stream's type-specific data.
fn wave_format(data: &[u8], report: &mut TagReport) -> Result<()> {
    let mut wave = ByteCursor::new(data, "WAVEFORMATEX");
    let format_tag = wave.read_u16_le()?;
    let channels = wave.read_u16_le()?;
    let sample_rate = wave.read_u32_le()?;
    let avg_bytes_per_sec = wave.read_u32_le()?;
    let _block_align = wave.read_u16_le()?;
    let bits_per_sample = wave.read_u16_le()?;

    report.line(format!("Format Tag: 0x{:04X}", format_tag));
    report.audio.channels = Some(channels);
    report.audio.sample_rate = Some(sample_rate);
    if bits_per_sample > 0 {
        report.audio.bits_per_sample = Some(bits_per_sample);
    }
    if report.audio.bit_rate.is_none() {
        report.audio.bit_rate = Some(avg_bytes_per_sec.saturating_mul(8));
    }
    Ok(())
}

pub(super) fn header_extension(body: &mut ByteCursor<'_>, report: &mut TagReport) -> Result<()> {
    let _reserved_guid = body.read_array::<16>()?;
    let _reserved = body.read_u16_le()?;
    let data_size = body.read_u32_le()?;
    body.skip(data_size as usize)?;

    report.line("[Header Extension]");
    report.line(format!("Data Size: {}", data_size));
    report.audio.data_length = Some(u64::from(data_size));
    Ok(())
}

pub(super) fn codec_list(body: &mut ByteCursor<'_>, report: &mut TagReport) -> Result<()> {
    let _reserved = body.read_array::<16>()?;
    let entries = body.read_u32_le()?;

    report.line("[Codec List]");
    for _ in 0..entries {
        let codec_type = body.read_u16_le()?;
        // Lengths count UTF-16 code units including the terminator
        let name_len = body.read_u16_le()? as usize * 2;
        let name = read_counted_utf16(body, name_len)?;
        let description_len = body.read_u16_le()? as usize * 2;
        let description = read_counted_utf16(body, description_len)?;
        let info_len = body.read_u16_le()? as usize;
        body.skip(info_len)?;

        let kind = match codec_type {
            1 => "Video",
            2 => "Audio",
            _ => "Unknown",
        };
        report.line(format!("{} {}: {}", kind, name, description));

        if codec_type == 2 {
            apply_audio_codec_description(&description, report);
        }
    }
    Ok(())
}

/// Pull sample rate, bit rate and channel count out of a codec description
/// such as `"128 kbps, 44 kHz, stereo 1-pass CBR"`.
fn apply_audio_codec_description(description: &str, report: &mut TagReport) {
    report.audio.channels = Some(1);
    for part in description.split(',') {
        if part.contains("kHz") {
            if let Some(khz) = leading_number(part) {
                report.audio.sample_rate = Some((khz * 1000.0).round() as u32);
            }
        } else if part.contains("kbps") {
            if let Some(kbps) = leading_number(part) {
                report.audio.bit_rate = Some((kbps * 1000.0).round() as u32);
            }
        } else if part.contains("stereo") {
            report.audio.channels = Some(2);
        }
    }
}

fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let end = text
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(text.len());
    text[..end].parse().ok()
}

pub(super) fn content_description(
    body: &mut ByteCursor<'_>,
    report: &mut TagReport,
) -> Result<()> {
    let title_len = body.read_u16_le()? as usize;
    let author_len = body.read_u16_le()? as usize;
    let copyright_len = body.read_u16_le()? as usize;
    let description_len = body.read_u16_le()? as usize;
    let rating_len = body.read_u16_le()? as usize;

    let title = read_counted_utf16(body, title_len)?;
    let author = read_counted_utf16(body, author_len)?;
    let copyright = read_counted_utf16(body, copyright_len)?;
    let description = read_counted_utf16(body, description_len)?;
    let rating = read_counted_utf16(body, rating_len)?;

    report.line("[Content Description]");
    report.line(format!("Title: {}", title));
    report.line(format!("Author: {}", author));
    report.line(format!("Copyright: {}", copyright));
    report.line(format!("Description: {}", description));
    report.line(format!("Rating: {}", rating));

    report.tags.insert("TITLE", title);
    report.tags.insert("ARTIST", author);
    report.tags.insert("COPYRIGHT", copyright);
    report.tags.insert("COMMENT", description);
    report.tags.insert("RATING", rating);
    Ok(())
}

pub(super) fn extended_content_description(
    body: &mut ByteCursor<'_>,
    report: &mut TagReport,
    config: &ReaderConfig,
) -> Result<()> {
    let count = body.read_u16_le()?;

    report.line("[Extended Content]");
    for _ in 0..count {
        let name_len = body.read_u16_le()? as usize;
        let name = read_counted_utf16(body, name_len)?;
        let value_type = body.read_u16_le()?;
        let value_len = body.read_u16_le()? as usize;
        let raw = body.read_bytes(value_len)?;

        let value = descriptor_value(value_type, raw, config.binary_preview_len)?;
        report.line(format!("{}: {}", name, value));

        let is_picture = name == "WM/Picture" && value_type == 1 && !raw.is_empty();
        report.tags.insert(name, value);
        if is_picture {
            wm_picture(raw, report, config)?;
        }
    }
    Ok(())
}

fn descriptor_value(value_type: u16, raw: &[u8], preview_len: usize) -> Result<String> {
    let mut value = ByteCursor::new(raw, "extended content descriptor");
    let text = match value_type {
        0 => utf16_string(raw),
        1 => hex_preview(raw, preview_len),
        2 => {
            if value.read_u32_le()? == 0 {
                "false".to_string()
            } else {
                "true".to_string()
            }
        }
        3 => value.read_u32_le()?.to_string(),
        4 => value.read_u64_le()?.to_string(),
        5 => value.read_u16_le()?.to_string(),
        other => {
            debug!(value_type = other, "Unknown ASF descriptor value type");
            String::new()
        }
    };
    Ok(text)
}

fn wm_picture(raw: &[u8], report: &mut TagReport, config: &ReaderConfig) -> Result<()> {
    let picture = WmPicture::parse(raw)?;
    let record = ImageRecord::new(
        picture.mime_type,
        u32::from(picture.picture_type),
        picture.description,
        Bytes::copy_from_slice(picture.data),
        None,
    );
    report.line(format!(" PictureType: {}", record.picture_type));
    report.line(format!(" MIME Type: {}", record.mime_type));
    report.line(format!(" Description: {}", record.description));
    report.add_image(record, config.extract_pictures);
    Ok(())
}

pub(super) fn stream_bitrate_properties(
    body: &mut ByteCursor<'_>,
    report: &mut TagReport,
) -> Result<()> {
    let records = body.read_u16_le()?;

    report.line("[Stream Bitrate Properties]");
    for _ in 0..records {
        let flags = body.read_u16_le()?;
        let average_bitrate = body.read_u32_le()?;
        report.line(format!(
            "Average Bitrate: [{}] {}",
            flags & 0x7F,
            average_bitrate
        ));
        report.audio.bit_rate = Some(average_bitrate);
    }
    Ok(())
}

/// Read `len` bytes holding a UTF-16LE string plus its 2-byte terminator.
fn read_counted_utf16(body: &mut ByteCursor<'_>, len: usize) -> Result<String> {
    let raw = body.read_bytes(len)?;
    Ok(utf16_string(raw))
}

fn utf16_string(raw: &[u8]) -> String {
    let text = &raw[..raw.len().saturating_sub(2)];
    trim_nul_end(&utf16_decode(text, Utf16Order::Little)).to_string()
}

fn filetime_to_string(ticks: u64) -> String {
    let secs = (ticks / 10_000_000) as i64 - FILETIME_UNIX_OFFSET_SECS;
    let nanos = ((ticks % 10_000_000) * 100) as u32;
    DateTime::<Utc>::from_timestamp(secs, nanos)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

fn format_duration(ms: u64) -> String {
    let secs = ms / 1000;
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::FormatVersion;

    fn report() -> TagReport {
        TagReport::new(Some(FormatVersion::Asf))
    }

    fn utf16z(text: &str) -> Vec<u8> {
        let mut out: Vec<u8> = text.encode_utf16().flat_map(|u| u.to_le_bytes()).collect();
        out.extend_from_slice(&[0, 0]);
        out
    }

    #[test]
    fn test_content_description_zero_length_title() {
        let mut body = Vec::new();
        for len in [0u16, 0, 0, 0, 0] {
            body.extend_from_slice(&len.to_le_bytes());
        }
        let mut cursor = ByteCursor::new(&body, "Content Description");
        let mut report = report();
        let title_len = cursor.read_u16_le().unwrap() as usize;
        assert_eq!(cursor.position(), 2);
        assert_eq!(read_counted_utf16(&mut cursor, title_len).unwrap(), "");
        assert_eq!(cursor.position(), 2);

        let mut cursor = ByteCursor::new(&body, "Content Description");
        content_description(&mut cursor, &mut report).unwrap();
        assert_eq!(report.tags.get("TITLE"), Some(""));
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_content_description_fields() {
        let strings = ["Title", "Author", "(c)", "Desc", "PG"];
        let encoded: Vec<Vec<u8>> = strings.iter().map(|s| utf16z(s)).collect();
        let mut body = Vec::new();
        for e in &encoded {
            body.extend_from_slice(&(e.len() as u16).to_le_bytes());
        }
        for e in &encoded {
            body.extend_from_slice(e);
        }

        let mut report = report();
        content_description(&mut ByteCursor::new(&body, "cd"), &mut report).unwrap();
        assert_eq!(report.tags.get("TITLE"), Some("Title"));
        assert_eq!(report.tags.get("ARTIST"), Some("Author"));
        assert_eq!(report.tags.get("COPYRIGHT"), Some("(c)"));
        assert_eq!(report.tags.get("COMMENT"), Some("Desc"));
        assert_eq!(report.tags.get("RATING"), Some("PG"));
    }

    #[test]
    fn test_descriptor_value_types() {
        assert_eq!(descriptor_value(0, &utf16z("Rock"), 16).unwrap(), "Rock");
        assert_eq!(descriptor_value(1, &[0xDE, 0xAD, 0xBE], 2).unwrap(), "DEAD");
        assert_eq!(descriptor_value(2, &[1, 0, 0, 0], 16).unwrap(), "true");
        assert_eq!(descriptor_value(2, &[0, 0, 0, 0], 16).unwrap(), "false");
        assert_eq!(descriptor_value(3, &7u32.to_le_bytes(), 16).unwrap(), "7");
        assert_eq!(descriptor_value(4, &9u64.to_le_bytes(), 16).unwrap(), "9");
        assert_eq!(descriptor_value(5, &2005u16.to_le_bytes(), 16).unwrap(), "2005");
        assert_eq!(descriptor_value(9, &[1, 2], 16).unwrap(), "");
    }

    #[test]
    fn test_malformed_wm_picture_stops_extended_content() {
        // Declares 100 bytes of image data but carries 2
        let mut picture = vec![3u8];
        picture.extend_from_slice(&100u32.to_le_bytes());
        picture.extend(utf16z("image/png"));
        picture.extend(utf16z(""));
        picture.extend_from_slice(&[0x89, 0x50]);

        let mut body = 3u16.to_le_bytes().to_vec();
        let descriptors = [
            ("WM/AlbumTitle", 0u16, utf16z("Kept")),
            ("WM/Picture", 1, picture),
            ("WM/Year", 0, utf16z("2001")),
        ];
        for (name, value_type, value) in descriptors {
            let name = utf16z(name);
            body.extend_from_slice(&(name.len() as u16).to_le_bytes());
            body.extend_from_slice(&name);
            body.extend_from_slice(&value_type.to_le_bytes());
            body.extend_from_slice(&(value.len() as u16).to_le_bytes());
            body.extend_from_slice(&value);
        }

        let mut report = report();
        let config = ReaderConfig::default();
        let mut cursor = ByteCursor::new(&body, "ext");
        let err = extended_content_description(&mut cursor, &mut report, &config).unwrap_err();
        assert!(err.is_truncation());
        assert_eq!(report.tags.get("WM/AlbumTitle"), Some("Kept"));
        assert_eq!(report.tags.get("WM/Year"), None);
        assert_eq!(report.image_count(), 0);
    }

    #[test]
    fn test_descriptor_value_too_short() {
        assert!(descriptor_value(3, &[1, 2], 16).unwrap_err().is_truncation());
    }

    #[test]
    fn test_codec_description_parsing() {
        let mut report = report();
        apply_audio_codec_description("128 kbps, 44.1 kHz, stereo 1-pass CBR", &mut report);
        assert_eq!(report.audio.bit_rate, Some(128_000));
        assert_eq!(report.audio.sample_rate, Some(44_100));
        assert_eq!(report.audio.channels, Some(2));

        let mut report = super::tests::report();
        apply_audio_codec_description("64 kbps, 22 kHz, mono", &mut report);
        assert_eq!(report.audio.channels, Some(1));
        assert_eq!(report.audio.sample_rate, Some(22_000));
    }

    #[test]
    fn test_file_properties_broadcast_flag() {
        let mut body = vec![0u8; 16];
        body.extend_from_slice(&1000u64.to_le_bytes()); // file size
        body.extend_from_slice(&0u64.to_le_bytes()); // creation
        body.extend_from_slice(&5u64.to_le_bytes()); // packets
        body.extend_from_slice(&(2_000 * TICKS_PER_MS).to_le_bytes());
        body.extend_from_slice(&(2_000 * TICKS_PER_MS).to_le_bytes());
        body.extend_from_slice(&0u64.to_le_bytes()); // preroll
        let mut broadcast = body.clone();
        body.extend_from_slice(&0u32.to_le_bytes());
        broadcast.extend_from_slice(&1u32.to_le_bytes());
        for b in [&mut body, &mut broadcast] {
            b.extend_from_slice(&100u32.to_le_bytes());
            b.extend_from_slice(&100u32.to_le_bytes());
            b.extend_from_slice(&128_000u32.to_le_bytes());
        }

        let mut report = report();
        file_properties(&mut ByteCursor::new(&body, "fp"), &mut report).unwrap();
        assert_eq!(report.audio.duration_ms, Some(2_000));
        assert_eq!(report.audio.bit_rate, Some(128_000));
        assert!(report.lines.iter().any(|l| l == "Creation Date: 1601-01-01 00:00:00"));

        let mut report = super::tests::report();
        file_properties(&mut ByteCursor::new(&broadcast, "fp"), &mut report).unwrap();
        assert_eq!(report.audio.duration_ms, None);
    }

    #[test]
    fn test_stream_bitrate_last_record_wins() {
        let mut body = 2u16.to_le_bytes().to_vec();
        body.extend_from_slice(&1u16.to_le_bytes());
        body.extend_from_slice(&64_000u32.to_le_bytes());
        body.extend_from_slice(&0x82u16.to_le_bytes());
        body.extend_from_slice(&96_000u32.to_le_bytes());

        let mut report = report();
        stream_bitrate_properties(&mut ByteCursor::new(&body, "sbp"), &mut report).unwrap();
        assert_eq!(report.audio.bit_rate, Some(96_000));
        assert!(report.lines.contains(&"Average Bitrate: [2] 96000".to_string()));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(3_723_000), "01:02:03");
    }
}
