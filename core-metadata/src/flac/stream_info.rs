//! STREAMINFO metadata block.

use crate::cursor::BitReader;
use crate::error::Result;
use crate::report::TagReport;
use crate::text::hex_preview;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamInfo {
    pub block_size_min: u16,
    pub block_size_max: u16,
    pub frame_size_min: u32,
    pub frame_size_max: u32,
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
    pub total_samples: u64,
    pub md5: [u8; 16],
}

impl StreamInfo {
    /// Parse the 34-byte packed STREAMINFO body.
    pub fn parse(block: &[u8]) -> Result<Self> {
        let mut bits = BitReader::new(block, "FLAC STREAMINFO");
        let block_size_min = bits.read_bits(16)? as u16;
        let block_size_max = bits.read_bits(16)? as u16;
        let frame_size_min = bits.read_bits(24)? as u32;
        let frame_size_max = bits.read_bits(24)? as u32;
        let sample_rate = bits.read_bits(20)? as u32;
        // Channels and bits per sample are stored minus one
        let channels = bits.read_bits(3)? as u16 + 1;
        let bits_per_sample = bits.read_bits(5)? as u16 + 1;
        let total_samples = bits.read_bits(36)?;
        let mut md5 = [0u8; 16];
        md5.copy_from_slice(bits.read_bytes(16)?);

        Ok(Self {
            block_size_min,
            block_size_max,
            frame_size_min,
            frame_size_max,
            sample_rate,
            channels,
            bits_per_sample,
            total_samples,
            md5,
        })
    }

    /// Duration in milliseconds, `None` when the sample rate is zero.
    pub fn duration_ms(&self) -> Option<u64> {
        (self.sample_rate > 0)
            .then(|| self.total_samples * 1000 / u64::from(self.sample_rate))
    }

    pub(super) fn apply(&self, report: &mut TagReport) {
        report.line("[FLAC Stream Info]");
        report.line(format!("BlockSizeMin: {}", self.block_size_min));
        report.line(format!("BlockSizeMax: {}", self.block_size_max));
        report.line(format!("FrameSizeMin: {}", self.frame_size_min));
        report.line(format!("FrameSizeMax: {}", self.frame_size_max));
        report.line(format!("SampleRate  : {}Hz", self.sample_rate));
        report.line(format!("Channels    : {}", self.channels));
        report.line(format!("BitPerSample: {}", self.bits_per_sample));
        report.line(format!("TotalSamples: {}", self.total_samples));
        report.line(format!("MD5: {}", hex_preview(&self.md5, self.md5.len())));

        let audio = &mut report.audio;
        audio.sample_rate = Some(self.sample_rate);
        audio.channels = Some(self.channels);
        audio.bits_per_sample = Some(self.bits_per_sample);
        audio.total_samples = Some(self.total_samples);
        audio.duration_ms = self.duration_ms();
    }
}
