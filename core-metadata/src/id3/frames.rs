//! ID3v2 frame payload decoding.
//!
//! Payloads start with a text-encoding byte for every frame kind decoded
//! here:
//!
//! | Byte | Encoding | Terminator |
//! |------|----------|------------|
//! | `0x00` | ISO-8859-1 | `00` |
//! | `0x01` | UTF-16 with BOM | `00 00` |
//! | `0x02` | UTF-16BE | `00 00` |
//! | `0x03` | UTF-8 | `00` |

use crate::cursor::ByteCursor;
use crate::error::Result;
use crate::picture::ImageRecord;
use crate::text::{
    find_wide_nul, latin1_decode, split_nul, split_wide_nul, utf16_decode, utf16_decode_bom,
    Utf16Order,
};

/// ID3v2 text encoding byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Latin1,
    Utf16Bom,
    Utf16Be,
    Utf8,
}

impl TextEncoding {
    /// Unknown values fall back to ISO-8859-1.
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0x01 => TextEncoding::Utf16Bom,
            0x02 => TextEncoding::Utf16Be,
            0x03 => TextEncoding::Utf8,
            _ => TextEncoding::Latin1,
        }
    }

    fn is_wide(self) -> bool {
        matches!(self, TextEncoding::Utf16Bom | TextEncoding::Utf16Be)
    }

    fn decode(self, bytes: &[u8]) -> String {
        match self {
            TextEncoding::Latin1 => latin1_decode(bytes),
            TextEncoding::Utf16Bom => utf16_decode_bom(bytes),
            TextEncoding::Utf16Be => utf16_decode(bytes, Utf16Order::Big),
            TextEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
        }
    }
}

/// Decode one terminated string and return it with the bytes after the
/// terminator. Without a terminator the string runs to the end of `bytes`.
pub fn split_text(encoding: TextEncoding, bytes: &[u8]) -> (String, &[u8]) {
    let (text, rest) = if encoding.is_wide() {
        split_wide_nul(bytes)
    } else {
        split_nul(bytes)
    };
    (encoding.decode(text), rest)
}

/// Payload of a `T***` text frame.
pub fn text_frame(payload: &[u8]) -> Result<String> {
    let mut cursor = ByteCursor::new(payload, "ID3v2 text frame");
    let encoding = TextEncoding::from_byte(cursor.read_u8()?);
    let body = cursor.rest();
    let text = if encoding.is_wide() {
        let end = find_wide_nul(body).unwrap_or(body.len());
        encoding.decode(&body[..end])
    } else {
        split_text(encoding, body).0
    };
    Ok(text)
}

/// Payload of a `COM`/`COMM` frame: description followed by the comment text.
pub fn comment_frame(payload: &[u8]) -> Result<String> {
    let mut cursor = ByteCursor::new(payload, "ID3v2 comment frame");
    let encoding = TextEncoding::from_byte(cursor.read_u8()?);
    let _language = cursor.read_array::<3>()?;

    let (mut text, rest) = split_text(encoding, cursor.rest());
    if !rest.is_empty() {
        let (content, _) = split_text(encoding, rest);
        text.push_str(&content);
    }
    Ok(text)
}

/// Payload of a `PIC` (ID3v2.2) or `APIC` frame.
pub fn picture_frame(payload: &[u8], legacy: bool) -> Result<ImageRecord> {
    let context = if legacy {
        "ID3v2 PIC frame"
    } else {
        "ID3v2 APIC frame"
    };
    let mut cursor = ByteCursor::new(payload, context);
    let encoding = TextEncoding::from_byte(cursor.read_u8()?);

    let (mime_type, extension) = if legacy {
        // 3-character image format such as "JPG" or "PNG"
        let format = latin1_decode(cursor.read_bytes(3)?);
        (format.clone(), Some(format))
    } else {
        let (mime, _) = split_nul(cursor.rest());
        let mime_len = mime.len();
        let mime = latin1_decode(mime);
        cursor.skip((mime_len + 1).min(cursor.remaining()))?;
        (mime, None)
    };

    let picture_type = cursor.read_u8()?;
    let (description, data) = split_text(encoding, cursor.rest());

    Ok(ImageRecord::new(
        mime_type,
        u32::from(picture_type),
        description,
        data.to_vec(),
        extension,
    ))
}

/// `UFID`/`UFI`/`PRIV`: owner identifier up to the first NUL.
pub fn owner_frame(payload: &[u8]) -> String {
    latin1_decode(split_nul(payload).0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf16_bom_text() {
        let payload = [0x01, 0xFF, 0xFE, 0x41, 0x00, 0x42, 0x00, 0x00, 0x00];
        assert_eq!(text_frame(&payload).unwrap(), "AB");
    }

    #[test]
    fn test_utf16_big_endian_bom_text() {
        let payload = [0x01, 0xFE, 0xFF, 0x00, 0x41, 0x00, 0x42];
        assert_eq!(text_frame(&payload).unwrap(), "AB");
    }

    #[test]
    fn test_latin1_text_stops_at_nul() {
        let payload = [0x00, b'C', 0xE9, 0x00, b'x'];
        assert_eq!(text_frame(&payload).unwrap(), "C\u{e9}");
    }

    #[test]
    fn test_utf8_and_utf16be_text() {
        let mut payload = vec![0x03];
        payload.extend_from_slice("Ünïcode".as_bytes());
        assert_eq!(text_frame(&payload).unwrap(), "Ünïcode");

        let payload = [0x02, 0x00, 0x48, 0x00, 0x69, 0x00, 0x00];
        assert_eq!(text_frame(&payload).unwrap(), "Hi");
    }

    #[test]
    fn test_empty_text_frame_is_truncation() {
        assert!(text_frame(&[]).unwrap_err().is_truncation());
    }

    #[test]
    fn test_comment_concatenates_description_and_text() {
        let mut payload = vec![0x00];
        payload.extend_from_slice(b"eng");
        payload.extend_from_slice(b"desc\0");
        payload.extend_from_slice(b"body");
        assert_eq!(comment_frame(&payload).unwrap(), "descbody");

        let mut payload = vec![0x00];
        payload.extend_from_slice(b"eng\0Only text");
        assert_eq!(comment_frame(&payload).unwrap(), "Only text");
    }

    #[test]
    fn test_apic_frame() {
        let mut payload = vec![0x00];
        payload.extend_from_slice(b"image/jpeg\0");
        payload.push(0x03);
        payload.extend_from_slice(b"Front\0");
        payload.extend_from_slice(&[0xFF, 0xD8, 0xFF]);

        let record = picture_frame(&payload, false).unwrap();
        assert_eq!(record.mime_type, "image/jpeg");
        assert_eq!(record.extension.as_deref(), Some("jpeg"));
        assert_eq!(record.picture_type_code, 3);
        assert_eq!(record.description, "Front");
        assert_eq!(record.data.as_ref(), &[0xFF, 0xD8, 0xFF]);
    }

    #[test]
    fn test_pic_frame_uses_format_token() {
        let mut payload = vec![0x00];
        payload.extend_from_slice(b"PNG");
        payload.push(0x00);
        payload.extend_from_slice(b"\0");
        payload.extend_from_slice(&[0x89, 0x50]);

        let record = picture_frame(&payload, true).unwrap();
        assert_eq!(record.mime_type, "PNG");
        assert_eq!(record.extension.as_deref(), Some("PNG"));
        assert_eq!(record.description, "");
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_owner_frame() {
        assert_eq!(owner_frame(b"http://example.org\0\x01\x02"), "http://example.org");
    }
}
