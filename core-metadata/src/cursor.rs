//! Bounded readers over in-memory tag regions.
//!
//! Every decoder first buffers a declared region (ASF header, ID3v2 frame
//! area, FLAC metadata block) and then walks it with a [`ByteCursor`]. Each
//! read advances by exactly the field width and fails with
//! [`MetadataError::TruncatedRead`] instead of reading past the region.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::error::{MetadataError, Result};

/// Position into a byte slice, bounded by the slice end.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
    context: &'static str,
}

impl<'a> ByteCursor<'a> {
    /// `context` names the structure being read and is reported on truncation.
    pub fn new(data: &'a [u8], context: &'static str) -> Self {
        Self {
            data,
            pos: 0,
            context,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn context(&self) -> &'static str {
        self.context
    }

    /// Bytes from the current position to the end, without advancing.
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    fn ensure(&self, needed: usize) -> Result<()> {
        if needed > self.remaining() {
            return Err(MetadataError::truncated(
                self.context,
                needed as u64,
                self.remaining() as u64,
            ));
        }
        Ok(())
    }

    /// Take `len` bytes and advance past them.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        self.ensure(len)?;
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.read_bytes(len).map(|_| ())
    }

    /// Look at the next `len` bytes without advancing.
    pub fn peek(&self, len: usize) -> Result<&'a [u8]> {
        self.ensure(len)?;
        Ok(&self.data[self.pos..self.pos + len])
    }

    /// Split off the next `len` bytes as their own bounded cursor.
    pub fn sub_cursor(&mut self, len: usize, context: &'static str) -> Result<ByteCursor<'a>> {
        // Report the failure under the child's name
        if len > self.remaining() {
            return Err(MetadataError::truncated(
                context,
                len as u64,
                self.remaining() as u64,
            ));
        }
        let bytes = self.read_bytes(len)?;
        Ok(ByteCursor::new(bytes, context))
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_u16_le(&mut self) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.read_bytes(2)?))
    }

    pub fn read_u32_le(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.read_bytes(4)?))
    }

    pub fn read_u64_le(&mut self) -> Result<u64> {
        Ok(LittleEndian::read_u64(self.read_bytes(8)?))
    }

    pub fn read_u16_be(&mut self) -> Result<u16> {
        Ok(BigEndian::read_u16(self.read_bytes(2)?))
    }

    pub fn read_u24_be(&mut self) -> Result<u32> {
        Ok(BigEndian::read_u24(self.read_bytes(3)?))
    }

    pub fn read_u32_be(&mut self) -> Result<u32> {
        Ok(BigEndian::read_u32(self.read_bytes(4)?))
    }

    /// Four 7-bit groups, most significant first (ID3v2 sizes).
    pub fn read_synchsafe_u32(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(synchsafe(bytes))
    }
}

/// Decode a 4-byte synchsafe integer. High bits of each byte are ignored.
pub fn synchsafe(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .take(4)
        .fold(0u32, |acc, b| (acc << 7) | u32::from(b & 0x7F))
}

/// MSB-first bit reader for packed fields such as FLAC STREAMINFO.
#[derive(Debug)]
pub struct BitReader<'a> {
    data: &'a [u8],
    bit_pos: usize,
    context: &'static str,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8], context: &'static str) -> Self {
        Self {
            data,
            bit_pos: 0,
            context,
        }
    }

    pub fn bits_remaining(&self) -> usize {
        self.data.len() * 8 - self.bit_pos
    }

    /// Read `count` bits (at most 64) as an unsigned value.
    pub fn read_bits(&mut self, count: u32) -> Result<u64> {
        debug_assert!(count <= 64);
        let count = count as usize;
        if count > self.bits_remaining() {
            return Err(MetadataError::truncated(
                self.context,
                count.div_ceil(8) as u64,
                (self.bits_remaining() / 8) as u64,
            ));
        }

        let mut value = 0u64;
        for _ in 0..count {
            let byte = self.data[self.bit_pos / 8];
            let bit = (byte >> (7 - (self.bit_pos % 8))) & 1;
            value = (value << 1) | u64::from(bit);
            self.bit_pos += 1;
        }
        Ok(value)
    }

    /// Read whole bytes; the reader must be byte-aligned.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        debug_assert_eq!(self.bit_pos % 8, 0);
        let start = self.bit_pos / 8;
        if len > self.data.len() - start {
            return Err(MetadataError::truncated(
                self.context,
                len as u64,
                (self.data.len() - start) as u64,
            ));
        }
        self.bit_pos += len * 8;
        Ok(&self.data[start..start + len])
    }
}
