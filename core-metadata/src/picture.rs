//! # Embedded Picture Records
//!
//! All three containers can carry cover art: ASF in a `WM/Picture`
//! descriptor, ID3v2 in `PIC`/`APIC` frames and FLAC in `PICTURE` blocks.
//! Each decoder hands the raw fields to [`ImageRecord::new`], which resolves
//! the picture-type label from the shared table and derives a file extension
//! hint.
//!
//! Image bytes are held in [`bytes::Bytes`] so records can be cloned and
//! passed to an artwork cache without copying the payload.

use bytes::Bytes;
use serde::{Serialize, Serializer};

use crate::tables::picture_type_label;

/// One embedded picture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRecord {
    /// MIME type (`image/jpeg`) or, for ID3v2.2, the 3-character format token
    pub mime_type: String,
    /// Human-readable picture type, e.g. `Cover (front)`
    pub picture_type: String,
    /// Raw picture-type code
    pub picture_type_code: u32,
    pub description: String,
    /// Image payload; serialized as its length only
    #[serde(rename = "size", serialize_with = "serialize_len")]
    pub data: Bytes,
    /// File extension hint without the dot (`jpeg`, `png`, `JPG`)
    pub extension: Option<String>,
}

impl ImageRecord {
    /// Build a record, resolving the picture-type label.
    ///
    /// When `extension` is `None` it is derived from the MIME subtype.
    pub fn new(
        mime_type: impl Into<String>,
        picture_type_code: u32,
        description: impl Into<String>,
        data: impl Into<Bytes>,
        extension: Option<String>,
    ) -> Self {
        let mime_type = mime_type.into();
        let extension = extension.or_else(|| extension_from_mime(&mime_type));
        Self {
            picture_type: picture_type_label(picture_type_code).to_string(),
            picture_type_code,
            description: description.into(),
            data: data.into(),
            extension,
            mime_type,
        }
    }

    /// `"<mime> : <picture type> <description>"`, the form used in display
    /// lines and ID3 tag values.
    pub fn summary(&self) -> String {
        format!(
            "{} : {} {}",
            self.mime_type, self.picture_type, self.description
        )
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Subtype of a MIME string (`image/png` -> `png`).
///
/// A string without `/` is returned whole. Empty input has no extension.
pub fn extension_from_mime(mime: &str) -> Option<String> {
    let subtype = match mime.split_once('/') {
        Some((_, subtype)) => subtype,
        None => mime,
    };
    let subtype = subtype.trim();
    if subtype.is_empty() {
        None
    } else {
        Some(subtype.to_string())
    }
}

fn serialize_len<S: Serializer>(data: &Bytes, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(data.len() as u64)
}
