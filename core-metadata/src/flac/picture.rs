//! PICTURE metadata block. All integers are big-endian.

use crate::cursor::ByteCursor;
use crate::error::Result;
use crate::picture::ImageRecord;
use crate::text::latin1_decode;

/// A decoded PICTURE block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlacPicture {
    pub record: ImageRecord,
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    /// Palette size for indexed images, 0 otherwise
    pub colors: u32,
}

impl FlacPicture {
    pub fn parse(block: &[u8]) -> Result<Self> {
        let mut cursor = ByteCursor::new(block, "FLAC picture");
        let picture_type = cursor.read_u32_be()?;
        let mime_len = cursor.read_u32_be()? as usize;
        let mime_type = latin1_decode(cursor.read_bytes(mime_len)?);
        let description_len = cursor.read_u32_be()? as usize;
        let description = String::from_utf8_lossy(cursor.read_bytes(description_len)?).into_owned();
        let width = cursor.read_u32_be()?;
        let height = cursor.read_u32_be()?;
        let depth = cursor.read_u32_be()?;
        let colors = cursor.read_u32_be()?;
        let data_len = cursor.read_u32_be()? as usize;
        let data = cursor.read_bytes(data_len)?;

        Ok(Self {
            record: ImageRecord::new(mime_type, picture_type, description, data.to_vec(), None),
            width,
            height,
            depth,
            colors,
        })
    }

    pub(super) fn lines(&self) -> [String; 5] {
        [
            "[Flac Picture]".to_string(),
            format!("Picture Type: {}", self.record.picture_type),
            format!("MIME Type: {}", self.record.mime_type),
            format!("Description: {}", self.record.description),
            format!("Size: {} X {} X {}", self.width, self.height, self.depth),
        ]
    }
}
