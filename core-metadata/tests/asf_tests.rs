//! Integration tests for the ASF header decoder
//!
//! Fixtures are synthesised byte by byte so every field offset is visible in
//! the test.

use core_metadata::asf::guid::{self, Guid};
use core_metadata::asf::AsfDecoder;
use core_metadata::{FormatVersion, TagDecoder, TagReader};
use core_runtime::ReaderConfig;

fn utf16z(text: &str) -> Vec<u8> {
    let mut out: Vec<u8> = text.encode_utf16().flat_map(|u| u.to_le_bytes()).collect();
    out.extend_from_slice(&[0, 0]);
    out
}

fn header(objects: &[(Guid, Vec<u8>)]) -> Vec<u8> {
    let body_len: usize = objects.iter().map(|(_, body)| body.len() + 24).sum();
    let mut out = guid::HEADER_OBJECT.0.to_vec();
    out.extend_from_slice(&((body_len + 30) as u64).to_le_bytes());
    out.extend_from_slice(&(objects.len() as u32).to_le_bytes());
    out.extend_from_slice(&[0x01, 0x02]);
    for (guid, body) in objects {
        out.extend_from_slice(&guid.0);
        out.extend_from_slice(&((body.len() + 24) as u64).to_le_bytes());
        out.extend_from_slice(body);
    }
    out
}

fn content_description(fields: [&str; 5]) -> Vec<u8> {
    let encoded: Vec<Vec<u8>> = fields
        .iter()
        .map(|f| if f.is_empty() { Vec::new() } else { utf16z(f) })
        .collect();
    let mut body = Vec::new();
    for e in &encoded {
        body.extend_from_slice(&(e.len() as u16).to_le_bytes());
    }
    for e in &encoded {
        body.extend_from_slice(e);
    }
    body
}

fn descriptor(name: &str, value_type: u16, value: &[u8]) -> Vec<u8> {
    let name = utf16z(name);
    let mut out = (name.len() as u16).to_le_bytes().to_vec();
    out.extend_from_slice(&name);
    out.extend_from_slice(&value_type.to_le_bytes());
    out.extend_from_slice(&(value.len() as u16).to_le_bytes());
    out.extend_from_slice(value);
    out
}

fn extended_content(descriptors: &[Vec<u8>]) -> Vec<u8> {
    let mut body = (descriptors.len() as u16).to_le_bytes().to_vec();
    for d in descriptors {
        body.extend_from_slice(d);
    }
    body
}

fn wm_picture(mime: &str, picture_type: u8, description: &str, data: &[u8]) -> Vec<u8> {
    let mut out = vec![picture_type];
    out.extend_from_slice(&(data.len() as u32).to_le_bytes());
    out.extend(utf16z(mime));
    out.extend(utf16z(description));
    out.extend_from_slice(data);
    out
}

#[test]
fn test_content_description_tags() {
    let data = header(&[(
        guid::CONTENT_DESCRIPTION,
        content_description(["Title", "Artist", "2024 Label", "Notes", "G"]),
    )]);

    let report = AsfDecoder::default().decode(&mut data.as_slice());
    assert!(report.is_complete());
    assert_eq!(report.format, Some(FormatVersion::Asf));
    assert_eq!(report.get("TITLE"), "Title");
    assert_eq!(report.get("ARTIST"), "Artist");
    assert_eq!(report.get("COPYRIGHT"), "2024 Label");
    assert_eq!(report.get("COMMENT"), "Notes");
    assert_eq!(report.get_native("RATING"), "G");
    assert_eq!(report.tag_size, data.len() as u64);
    assert_eq!(report.lines[0], "[ASF Header]");
    assert!(report.lines.contains(&"[Content Description]".to_string()));
}

#[test]
fn test_empty_title_reads_as_empty() {
    let data = header(&[(
        guid::CONTENT_DESCRIPTION,
        content_description(["", "Artist", "", "", ""]),
    )]);

    let report = AsfDecoder::default().decode(&mut data.as_slice());
    assert!(report.is_complete());
    assert_eq!(report.get("TITLE"), "");
    assert_eq!(report.get("ARTIST"), "Artist");
}

#[test]
fn test_content_description_too_small_is_truncation() {
    // Declares 10 bytes of lengths but the title needs 12 more
    let mut body = content_description(["Title", "", "", "", ""]);
    body.truncate(12);
    let data = header(&[(guid::CONTENT_DESCRIPTION, body)]);

    let report = AsfDecoder::default().decode(&mut data.as_slice());
    let failure = report.failure.as_ref().expect("decode should fail");
    assert!(failure.is_truncation());
    assert!(failure.to_string().contains("Content Description"));
}

#[test]
fn test_duplicate_descriptors_comma_join() {
    let data = header(&[(
        guid::EXTENDED_CONTENT_DESCRIPTION,
        extended_content(&[
            descriptor("WM/Composer", 0, &utf16z("first")),
            descriptor("WM/Composer", 0, &utf16z("second")),
            descriptor("WM/AlbumTitle", 0, &utf16z("Record")),
            descriptor("WM/TrackNumber", 3, &5u32.to_le_bytes()),
            descriptor("IsVBR", 2, &1u32.to_le_bytes()),
        ]),
    )]);

    let report = AsfDecoder::default().decode(&mut data.as_slice());
    assert!(report.is_complete());
    assert_eq!(report.get("COMPOSER"), "first,second");
    assert_eq!(report.get("ALBUM"), "Record");
    assert_eq!(report.get("TRACKNUMBER"), "5");
    assert_eq!(report.get_native("IsVBR"), "true");
    assert!(report.lines.contains(&"WM/AlbumTitle: Record".to_string()));
}

#[test]
fn test_wm_picture_descriptor() {
    let picture = wm_picture("image/jpeg", 3, "Front", &[0xFF, 0xD8, 0xFF, 0xE0]);
    let data = header(&[(
        guid::EXTENDED_CONTENT_DESCRIPTION,
        extended_content(&[descriptor("WM/Picture", 1, &picture)]),
    )]);

    let report = AsfDecoder::default().decode(&mut data.as_slice());
    assert!(report.is_complete());
    assert_eq!(report.image_count(), 1);
    let image = &report.images[0];
    assert_eq!(image.mime_type, "image/jpeg");
    assert_eq!(image.picture_type_code, 3);
    assert_eq!(image.description, "Front");
    assert_eq!(image.extension.as_deref(), Some("jpeg"));
    assert_eq!(image.data.as_ref(), &[0xFF, 0xD8, 0xFF, 0xE0]);
    assert!(report.lines.contains(&" MIME Type: image/jpeg".to_string()));
}

#[test]
fn test_truncated_wm_picture_is_reported() {
    let mut picture = wm_picture("image/jpeg", 3, "Front", &[0xFF, 0xD8]);
    picture[1..5].copy_from_slice(&4096u32.to_le_bytes());
    let data = header(&[
        (
            guid::CONTENT_DESCRIPTION,
            content_description(["Song", "Band", "", "", ""]),
        ),
        (
            guid::EXTENDED_CONTENT_DESCRIPTION,
            extended_content(&[descriptor("WM/Picture", 1, &picture)]),
        ),
    ]);

    let report = AsfDecoder::default().decode(&mut data.as_slice());
    assert!(report.failure.as_ref().unwrap().is_truncation());
    assert_eq!(report.get("TITLE"), "Song");
    assert_eq!(report.get("ARTIST"), "Band");
    assert_eq!(report.image_count(), 0);
}

#[test]
fn test_pictures_not_kept_when_disabled() {
    let picture = wm_picture("image/png", 3, "", &[0x89]);
    let data = header(&[(
        guid::EXTENDED_CONTENT_DESCRIPTION,
        extended_content(&[descriptor("WM/Picture", 1, &picture)]),
    )]);

    let config = ReaderConfig::builder()
        .extract_pictures(false)
        .build()
        .unwrap();
    let report = AsfDecoder::new(config).decode(&mut data.as_slice());
    assert_eq!(report.image_count(), 0);
    assert!(report.lines.contains(&" MIME Type: image/png".to_string()));
}

#[test]
fn test_binary_preview_length() {
    let data = header(&[(
        guid::EXTENDED_CONTENT_DESCRIPTION,
        extended_content(&[descriptor("Blob", 1, &[0x0A, 0x1B, 0xFF, 0x00, 0x01])]),
    )]);

    let config = ReaderConfig::builder()
        .binary_preview_len(3)
        .build()
        .unwrap();
    let report = AsfDecoder::new(config).decode(&mut data.as_slice());
    assert_eq!(report.get_native("Blob"), "0A1BFF");
}

#[test]
fn test_stream_properties_and_bitrate() {
    let mut stream = guid::AUDIO_MEDIA.0.to_vec();
    stream.extend_from_slice(&guid::AUDIO_SPREAD.0);
    stream.extend_from_slice(&0u64.to_le_bytes());
    stream.extend_from_slice(&18u32.to_le_bytes());
    stream.extend_from_slice(&0u32.to_le_bytes());
    stream.extend_from_slice(&1u16.to_le_bytes());
    stream.extend_from_slice(&0u32.to_le_bytes());
    // WAVEFORMATEX: WMA2, stereo, 44100 Hz, 16000 B/s, align, 16 bits, cbSize
    stream.extend_from_slice(&0x0161u16.to_le_bytes());
    stream.extend_from_slice(&2u16.to_le_bytes());
    stream.extend_from_slice(&44_100u32.to_le_bytes());
    stream.extend_from_slice(&16_000u32.to_le_bytes());
    stream.extend_from_slice(&4u16.to_le_bytes());
    stream.extend_from_slice(&16u16.to_le_bytes());
    stream.extend_from_slice(&0u16.to_le_bytes());

    let mut bitrate = 1u16.to_le_bytes().to_vec();
    bitrate.extend_from_slice(&1u16.to_le_bytes());
    bitrate.extend_from_slice(&128_000u32.to_le_bytes());

    let data = header(&[
        (guid::STREAM_PROPERTIES, stream),
        (guid::STREAM_BITRATE_PROPERTIES, bitrate),
    ]);

    let report = AsfDecoder::default().decode(&mut data.as_slice());
    assert!(report.is_complete());
    assert_eq!(report.audio.channels, Some(2));
    assert_eq!(report.audio.sample_rate, Some(44_100));
    assert_eq!(report.audio.bits_per_sample, Some(16));
    assert_eq!(report.audio.bit_rate, Some(128_000));
    assert!(report.lines.contains(&"Stream Type: Audio Media".to_string()));
    assert!(report
        .lines
        .contains(&"Error Correction Type: Audio_Spread".to_string()));
    assert!(report.lines.contains(&"Stream Number: 1".to_string()));
}

#[test]
fn test_codec_list_audio_entry() {
    let mut body = vec![0u8; 16];
    body.extend_from_slice(&1u32.to_le_bytes());
    body.extend_from_slice(&2u16.to_le_bytes());
    let name = utf16z("Windows Media Audio 9.2");
    body.extend_from_slice(&((name.len() / 2) as u16).to_le_bytes());
    body.extend_from_slice(&name);
    let description = utf16z("192 kbps, 48 kHz, stereo 1-pass CBR");
    body.extend_from_slice(&((description.len() / 2) as u16).to_le_bytes());
    body.extend_from_slice(&description);
    body.extend_from_slice(&2u16.to_le_bytes());
    body.extend_from_slice(&[0x61, 0x01]);

    let data = header(&[(guid::CODEC_LIST, body)]);
    let report = AsfDecoder::default().decode(&mut data.as_slice());
    assert!(report.is_complete());
    assert_eq!(report.audio.sample_rate, Some(48_000));
    assert_eq!(report.audio.bit_rate, Some(192_000));
    assert_eq!(report.audio.channels, Some(2));
    assert!(report.lines.contains(
        &"Audio Windows Media Audio 9.2: 192 kbps, 48 kHz, stereo 1-pass CBR".to_string()
    ));
}

#[test]
fn test_read_path_dispatches_wma() {
    let data = header(&[(
        guid::CONTENT_DESCRIPTION,
        content_description(["On Disk", "", "", "", ""]),
    )]);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("track.WMA");
    std::fs::write(&path, &data).unwrap();

    let report = TagReader::new().read_path(&path).unwrap();
    assert_eq!(report.format, Some(FormatVersion::Asf));
    assert_eq!(report.get("TITLE"), "On Disk");

    let sniffed = TagReader::new().read_bytes(&data);
    assert_eq!(sniffed.get("TITLE"), "On Disk");
}
