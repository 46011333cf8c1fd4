//! `WM/Picture` descriptor payload.
//!
//! Layout: picture type (1), payload size (4, LE), NUL-terminated UTF-16LE
//! MIME type, NUL-terminated UTF-16LE description, then the image bytes.

use crate::cursor::ByteCursor;
use crate::error::{MetadataError, Result};
use crate::text::{find_wide_nul_unaligned, utf16_decode, Utf16Order};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WmPicture<'a> {
    pub picture_type: u8,
    pub mime_type: String,
    pub description: String,
    pub data: &'a [u8],
}

impl<'a> WmPicture<'a> {
    pub fn parse(payload: &'a [u8]) -> Result<Self> {
        let mut cursor = ByteCursor::new(payload, "WM/Picture");
        let picture_type = cursor.read_u8()?;
        let size = cursor.read_u32_le()? as usize;
        let mime_type = read_terminated(&mut cursor)?;
        let description = read_terminated(&mut cursor)?;
        let data = cursor.read_bytes(size)?;

        Ok(Self {
            picture_type,
            mime_type,
            description,
            data,
        })
    }
}

fn read_terminated(cursor: &mut ByteCursor<'_>) -> Result<String> {
    let rest = cursor.rest();
    let end = find_wide_nul_unaligned(rest).ok_or_else(|| {
        MetadataError::truncated(cursor.context(), rest.len() as u64 + 2, rest.len() as u64)
    })?;
    let text = utf16_decode(&rest[..end], Utf16Order::Little);
    cursor.skip(end + 2)?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16z(text: &str) -> Vec<u8> {
        let mut out: Vec<u8> = text.encode_utf16().flat_map(|u| u.to_le_bytes()).collect();
        out.extend_from_slice(&[0, 0]);
        out
    }

    #[test]
    fn test_parse_picture() {
        let mut payload = vec![0x03];
        payload.extend_from_slice(&4u32.to_le_bytes());
        payload.extend(utf16z("image/png"));
        payload.extend(utf16z("Cover"));
        payload.extend_from_slice(&[0x89, 0x50, 0x4E, 0x47]);

        let picture = WmPicture::parse(&payload).unwrap();
        assert_eq!(picture.picture_type, 3);
        assert_eq!(picture.mime_type, "image/png");
        assert_eq!(picture.description, "Cover");
        assert_eq!(picture.data, &[0x89, 0x50, 0x4E, 0x47]);
    }

    #[test]
    fn test_empty_description() {
        let mut payload = vec![0x00];
        payload.extend_from_slice(&1u32.to_le_bytes());
        payload.extend(utf16z("image/jpeg"));
        payload.extend(utf16z(""));
        payload.push(0xFF);

        let picture = WmPicture::parse(&payload).unwrap();
        assert_eq!(picture.mime_type, "image/jpeg");
        assert_eq!(picture.description, "");
        assert_eq!(picture.data, &[0xFF]);
    }

    #[test]
    fn test_short_payload_is_truncation() {
        let mut payload = vec![0x03];
        payload.extend_from_slice(&100u32.to_le_bytes());
        payload.extend(utf16z("image/png"));
        payload.extend(utf16z("x"));
        payload.extend_from_slice(&[1, 2, 3]);

        let err = WmPicture::parse(&payload).unwrap_err();
        assert!(err.is_truncation());
    }

    #[test]
    fn test_missing_terminator_is_truncation() {
        let payload = [0x03, 1, 0, 0, 0, 0x41, 0x42];
        assert!(WmPicture::parse(&payload).unwrap_err().is_truncation());
    }
}
