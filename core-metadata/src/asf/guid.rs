//! ASF GUIDs and the object, stream-type and error-correction tables.
//!
//! GUIDs are compared as the 16 raw bytes found in the file (the mixed-endian
//! on-disk layout), so no byte swapping happens before lookup.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Guid(pub [u8; 16]);

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.0;
        write!(
            f,
            "{:02X}{:02X}{:02X}{:02X}-{:02X}{:02X}-{:02X}{:02X}-{:02X}{:02X}-{:02X}{:02X}{:02X}{:02X}{:02X}{:02X}",
            b[3], b[2], b[1], b[0], b[5], b[4], b[7], b[6], b[8], b[9], b[10], b[11], b[12],
            b[13], b[14], b[15]
        )
    }
}

// Top-level objects
pub const HEADER_OBJECT: Guid = Guid([
    0x30, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11, 0xA6, 0xD9, 0x00, 0xAA, 0x00, 0x62, 0xCE, 0x6C,
]);

// Header objects
pub const FILE_PROPERTIES: Guid = Guid([
    0xA1, 0xDC, 0xAB, 0x8C, 0x47, 0xA9, 0xCF, 0x11, 0x8E, 0xE4, 0x00, 0xC0, 0x0C, 0x20, 0x53, 0x65,
]);
pub const STREAM_PROPERTIES: Guid = Guid([
    0x91, 0x07, 0xDC, 0xB7, 0xB7, 0xA9, 0xCF, 0x11, 0x8E, 0xE6, 0x00, 0xC0, 0x0C, 0x20, 0x53, 0x65,
]);
pub const HEADER_EXTENSION: Guid = Guid([
    0xB5, 0x03, 0xBF, 0x5F, 0x2E, 0xA9, 0xCF, 0x11, 0x8E, 0xE3, 0x00, 0xC0, 0x0C, 0x20, 0x53, 0x65,
]);
pub const CODEC_LIST: Guid = Guid([
    0x40, 0x52, 0xD1, 0x86, 0x1D, 0x31, 0xD0, 0x11, 0xA3, 0xA4, 0x00, 0xA0, 0xC9, 0x03, 0x48, 0xF6,
]);
pub const SCRIPT_COMMAND: Guid = Guid([
    0x30, 0x1A, 0xFB, 0x1E, 0x62, 0x0B, 0xD0, 0x11, 0xA3, 0x9B, 0x00, 0xA0, 0xC9, 0x03, 0x48, 0xF6,
]);
pub const MARKER: Guid = Guid([
    0x01, 0xCD, 0x87, 0xF4, 0x51, 0xA9, 0xCF, 0x11, 0x8E, 0xE6, 0x00, 0xC0, 0x0C, 0x20, 0x53, 0x65,
]);
pub const BITRATE_MUTUAL_EXCLUSION: Guid = Guid([
    0xDC, 0x29, 0xE2, 0xD6, 0xDA, 0x35, 0xD1, 0x11, 0x90, 0x34, 0x00, 0xA0, 0xC9, 0x03, 0x49, 0xBE,
]);
pub const ERROR_CORRECTION: Guid = Guid([
    0x35, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11, 0xA6, 0xD9, 0x00, 0xAA, 0x00, 0x62, 0xCE, 0x6C,
]);
pub const CONTENT_DESCRIPTION: Guid = Guid([
    0x33, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11, 0xA6, 0xD9, 0x00, 0xAA, 0x00, 0x62, 0xCE, 0x6C,
]);
pub const EXTENDED_CONTENT_DESCRIPTION: Guid = Guid([
    0x40, 0xA4, 0xD0, 0xD2, 0x07, 0xE3, 0xD2, 0x11, 0x97, 0xF0, 0x00, 0xA0, 0xC9, 0x5E, 0xA8, 0x50,
]);
pub const CONTENT_BRANDING: Guid = Guid([
    0xFA, 0xB3, 0x11, 0x22, 0x23, 0xBD, 0xD2, 0x11, 0xB4, 0xB7, 0x00, 0xA0, 0xC9, 0x55, 0xFC, 0x6E,
]);
pub const STREAM_BITRATE_PROPERTIES: Guid = Guid([
    0xCE, 0x75, 0xF8, 0x7B, 0x8D, 0x46, 0xD1, 0x11, 0x8D, 0x82, 0x00, 0x60, 0x97, 0xC9, 0xA2, 0xB2,
]);

// Stream types
pub const AUDIO_MEDIA: Guid = Guid([
    0x40, 0x9E, 0x69, 0xF8, 0x4D, 0x5B, 0xCF, 0x11, 0xA8, 0xFD, 0x00, 0x80, 0x5F, 0x5C, 0x44, 0x2B,
]);
pub const VIDEO_MEDIA: Guid = Guid([
    0xC0, 0xEF, 0x19, 0xBC, 0x4D, 0x5B, 0xCF, 0x11, 0xA8, 0xFD, 0x00, 0x80, 0x5F, 0x5C, 0x44, 0x2B,
]);
pub const COMMAND_MEDIA: Guid = Guid([
    0xC0, 0xCF, 0xDA, 0x59, 0xE6, 0x59, 0xD0, 0x11, 0xA3, 0xAC, 0x00, 0xA0, 0xC9, 0x03, 0x48, 0xF6,
]);
pub const JFIF_MEDIA: Guid = Guid([
    0x00, 0xE1, 0x1B, 0xB6, 0x4E, 0x5B, 0xCF, 0x11, 0xA8, 0xFD, 0x00, 0x80, 0x5F, 0x5C, 0x44, 0x2B,
]);
pub const DEGRADABLE_JPEG_MEDIA: Guid = Guid([
    0xE0, 0x7D, 0x90, 0x35, 0x15, 0xE4, 0xCF, 0x11, 0xA9, 0x17, 0x00, 0x80, 0x5F, 0x5C, 0x44, 0x2B,
]);
pub const FILE_TRANSFER_MEDIA: Guid = Guid([
    0x2C, 0x22, 0xBD, 0x91, 0x1C, 0xF2, 0x7A, 0x49, 0x8B, 0x6D, 0x5A, 0xA8, 0x6B, 0xFC, 0x01, 0x85,
]);
pub const BINARY_MEDIA: Guid = Guid([
    0xE2, 0x65, 0xFB, 0x3A, 0xEF, 0x47, 0xF2, 0x40, 0xAC, 0x2C, 0x70, 0xA9, 0x0D, 0x71, 0xD3, 0x43,
]);

// Error correction types
pub const NO_ERROR_CORRECTION: Guid = Guid([
    0x00, 0x57, 0xFB, 0x20, 0x55, 0x5B, 0xCF, 0x11, 0xA8, 0xFD, 0x00, 0x80, 0x5F, 0x5C, 0x44, 0x2B,
]);
pub const AUDIO_SPREAD: Guid = Guid([
    0x50, 0xCD, 0xC3, 0xBF, 0x8F, 0x61, 0xCF, 0x11, 0x8B, 0xB2, 0x00, 0xAA, 0x00, 0xB4, 0xE2, 0x20,
]);

/// Objects that may appear inside the ASF Header Object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsfObjectKind {
    FileProperties,
    StreamProperties,
    HeaderExtension,
    CodecList,
    ScriptCommand,
    Marker,
    BitrateMutualExclusion,
    ErrorCorrection,
    ContentDescription,
    ExtendedContentDescription,
    ContentBranding,
    StreamBitrateProperties,
    Unknown,
}

static OBJECT_TABLE: [(Guid, AsfObjectKind); 12] = [
    (FILE_PROPERTIES, AsfObjectKind::FileProperties),
    (STREAM_PROPERTIES, AsfObjectKind::StreamProperties),
    (HEADER_EXTENSION, AsfObjectKind::HeaderExtension),
    (CODEC_LIST, AsfObjectKind::CodecList),
    (SCRIPT_COMMAND, AsfObjectKind::ScriptCommand),
    (MARKER, AsfObjectKind::Marker),
    (BITRATE_MUTUAL_EXCLUSION, AsfObjectKind::BitrateMutualExclusion),
    (ERROR_CORRECTION, AsfObjectKind::ErrorCorrection),
    (CONTENT_DESCRIPTION, AsfObjectKind::ContentDescription),
    (EXTENDED_CONTENT_DESCRIPTION, AsfObjectKind::ExtendedContentDescription),
    (CONTENT_BRANDING, AsfObjectKind::ContentBranding),
    (STREAM_BITRATE_PROPERTIES, AsfObjectKind::StreamBitrateProperties),
];

static STREAM_TYPES: [(Guid, &str); 7] = [
    (AUDIO_MEDIA, "Audio Media"),
    (VIDEO_MEDIA, "Video Media"),
    (COMMAND_MEDIA, "Command Media"),
    (JFIF_MEDIA, "JFIF Media"),
    (DEGRADABLE_JPEG_MEDIA, "Degradable JPEG Media"),
    (FILE_TRANSFER_MEDIA, "File Transfer Media"),
    (BINARY_MEDIA, "Binary Media"),
];

static ERROR_CORRECTION_TYPES: [(Guid, &str); 2] = [
    (NO_ERROR_CORRECTION, "No_Error_Correction"),
    (AUDIO_SPREAD, "Audio_Spread"),
];

impl AsfObjectKind {
    pub fn from_guid(guid: &Guid) -> Self {
        OBJECT_TABLE
            .iter()
            .find(|(g, _)| g == guid)
            .map(|(_, kind)| *kind)
            .unwrap_or(AsfObjectKind::Unknown)
    }

    /// Section name used in display lines.
    pub fn name(&self) -> &'static str {
        match self {
            AsfObjectKind::FileProperties => "File Properties",
            AsfObjectKind::StreamProperties => "Stream Properties",
            AsfObjectKind::HeaderExtension => "Header Extension",
            AsfObjectKind::CodecList => "Codec List",
            AsfObjectKind::ScriptCommand => "Script Command",
            AsfObjectKind::Marker => "Marker",
            AsfObjectKind::BitrateMutualExclusion => "Bitrate Mutual Exclusion",
            AsfObjectKind::ErrorCorrection => "Error Correction",
            AsfObjectKind::ContentDescription => "Content Description",
            AsfObjectKind::ExtendedContentDescription => "Extended Content",
            AsfObjectKind::ContentBranding => "Content Branding",
            AsfObjectKind::StreamBitrateProperties => "Stream Bitrate Properties",
            AsfObjectKind::Unknown => "Unknown Object",
        }
    }
}

/// Name of a stream-type GUID, `""` when unknown.
pub fn stream_type_name(guid: &Guid) -> &'static str {
    STREAM_TYPES
        .iter()
        .find(|(g, _)| g == guid)
        .map(|(_, name)| *name)
        .unwrap_or("")
}

/// Name of an error-correction-type GUID, `""` when unknown.
pub fn error_correction_name(guid: &Guid) -> &'static str {
    ERROR_CORRECTION_TYPES
        .iter()
        .find(|(g, _)| g == guid)
        .map(|(_, name)| *name)
        .unwrap_or("")
}
