//! Text decoding helpers shared by the decoders.
//!
//! Tag formats mix several encodings: ISO-8859-1 for ID3v1 and ID3v2
//! encoding `0x00`, UTF-16 with or without a byte-order mark for ID3v2 and
//! ASF, and UTF-8 for Vorbis comments. Invalid sequences are replaced, never
//! rejected.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// UTF-16 byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utf16Order {
    Little,
    Big,
}

/// Decode ISO-8859-1. Every byte maps to the code point of the same value.
pub fn latin1_decode(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Decode UTF-16 in the given byte order. A trailing odd byte is dropped.
pub fn utf16_decode(bytes: &[u8], order: Utf16Order) -> String {
    let units = bytes.chunks_exact(2).map(|pair| match order {
        Utf16Order::Little => LittleEndian::read_u16(pair),
        Utf16Order::Big => BigEndian::read_u16(pair),
    });
    char::decode_utf16(units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Decode UTF-16 honouring a leading byte-order mark.
///
/// `FE FF` selects big-endian, `FF FE` little-endian; without a mark the
/// text is read as little-endian. The mark itself is not part of the result.
pub fn utf16_decode_bom(bytes: &[u8]) -> String {
    match bytes {
        [0xFE, 0xFF, rest @ ..] => utf16_decode(rest, Utf16Order::Big),
        [0xFF, 0xFE, rest @ ..] => utf16_decode(rest, Utf16Order::Little),
        _ => utf16_decode(bytes, Utf16Order::Little),
    }
}

/// Index of the first NUL byte, or `None`.
pub fn find_nul(bytes: &[u8]) -> Option<usize> {
    bytes.iter().position(|&b| b == 0)
}

/// Index of the first `00 00` pair starting on an even offset, or `None`.
pub fn find_wide_nul(bytes: &[u8]) -> Option<usize> {
    bytes
        .chunks_exact(2)
        .position(|pair| pair == [0, 0])
        .map(|unit| unit * 2)
}

/// Byte-granular `00 00` search used by WM/Picture strings.
///
/// The pair may start on any offset. When the byte after the pair is also
/// zero, the last character's high byte was part of the match and the
/// terminator starts one byte later.
pub fn find_wide_nul_unaligned(bytes: &[u8]) -> Option<usize> {
    let idx = bytes.windows(2).position(|pair| pair == [0, 0])?;
    if bytes.get(idx + 2) == Some(&0) {
        Some(idx + 1)
    } else {
        Some(idx)
    }
}

/// Split off a NUL-terminated single-byte string.
///
/// Returns the string bytes and the remainder after the terminator. Without a
/// terminator the whole input is the string and the remainder is empty.
pub fn split_nul(bytes: &[u8]) -> (&[u8], &[u8]) {
    match find_nul(bytes) {
        Some(idx) => (&bytes[..idx], &bytes[idx + 1..]),
        None => (bytes, &bytes[bytes.len()..]),
    }
}

/// Split off a `00 00`-terminated UTF-16 string aligned on code units.
pub fn split_wide_nul(bytes: &[u8]) -> (&[u8], &[u8]) {
    match find_wide_nul(bytes) {
        Some(idx) => (&bytes[..idx], &bytes[idx + 2..]),
        None => (bytes, &bytes[bytes.len()..]),
    }
}

/// Remove trailing NUL padding.
pub fn trim_nul_end(text: &str) -> &str {
    text.trim_end_matches('\0')
}

/// Drop control characters, then trim surrounding whitespace.
pub fn strip_control(text: &str) -> String {
    let cleaned: String = text.chars().filter(|c| !c.is_control()).collect();
    cleaned.trim().to_string()
}

/// Uppercase hex of at most `max` leading bytes, e.g. `"0A1BFF"`.
pub fn hex_preview(bytes: &[u8], max: usize) -> String {
    bytes
        .iter()
        .take(max)
        .map(|b| format!("{:02X}", b))
        .collect()
}
