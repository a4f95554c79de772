//! Canonical WAV container
//!
//! 44-byte RIFF/WAVE header with a 16-byte PCM "fmt " chunk, followed by
//! interleaved 24-bit little-endian samples.

use crate::engine::config::SAMPLE_SIZE;
use crate::error::{GeneratorError, Result};

/// Size of the canonical header in bytes
pub const HEADER_LEN: usize = 44;

/// WAV audio format code for integer PCM
pub const WAV_FORMAT_PCM: u16 = 1;

/// Bits per sample written by the encoder
pub const BITS_PER_SAMPLE: u16 = 24;

/// Scale from [-1.0, 1.0] to the 32-bit intermediate
const I32_SCALE: f64 = 2_147_483_647.0;

/// Length of the "fmt " chunk body for plain PCM
const FMT_CHUNK_LEN: u32 = 16;

/// Header bytes counted by the RIFF size field (everything after it, minus data)
const RIFF_OVERHEAD: u32 = (HEADER_LEN - 8) as u32;

/// Fields of a canonical PCM header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    pub audio_format: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    /// Payload size in bytes
    pub data_length: u32,
}

impl WavHeader {
    /// Header for 24-bit PCM with `data_length` payload bytes.
    ///
    /// Fails with `HeaderOverflow` when the RIFF size field cannot hold
    /// the file.
    pub fn pcm24(channels: u16, sample_rate: u32, data_length: u64) -> Result<Self> {
        if data_length > u64::from(u32::MAX - RIFF_OVERHEAD) {
            return Err(GeneratorError::HeaderOverflow { data_length });
        }

        let block_align = u32::from(channels) * SAMPLE_SIZE as u32;
        let block_align = u16::try_from(block_align).map_err(|_| {
            GeneratorError::invalid_config("channels", channels, "block align within 16 bits")
        })?;

        let byte_rate = sample_rate
            .checked_mul(u32::from(block_align))
            .ok_or_else(|| {
                GeneratorError::invalid_config("channels", channels, "byte rate within 32 bits")
            })?;

        Ok(WavHeader {
            audio_format: WAV_FORMAT_PCM,
            channels,
            sample_rate,
            byte_rate,
            block_align,
            bits_per_sample: BITS_PER_SAMPLE,
            data_length: data_length as u32,
        })
    }

    /// Value of the RIFF chunk size field
    pub fn riff_size(&self) -> u32 {
        RIFF_OVERHEAD + self.data_length
    }

    /// Total file size in bytes
    pub fn file_len(&self) -> usize {
        HEADER_LEN + self.data_length as usize
    }

    /// Serialize to the 44 header bytes
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];

        // RIFF chunk descriptor
        out[0..4].copy_from_slice(b"RIFF");
        out[4..8].copy_from_slice(&self.riff_size().to_le_bytes());
        out[8..12].copy_from_slice(b"WAVE");

        // fmt sub-chunk
        out[12..16].copy_from_slice(b"fmt ");
        out[16..20].copy_from_slice(&FMT_CHUNK_LEN.to_le_bytes());
        out[20..22].copy_from_slice(&self.audio_format.to_le_bytes());
        out[22..24].copy_from_slice(&self.channels.to_le_bytes());
        out[24..28].copy_from_slice(&self.sample_rate.to_le_bytes());
        out[28..32].copy_from_slice(&self.byte_rate.to_le_bytes());
        out[32..34].copy_from_slice(&self.block_align.to_le_bytes());
        out[34..36].copy_from_slice(&self.bits_per_sample.to_le_bytes());

        // data sub-chunk
        out[36..40].copy_from_slice(b"data");
        out[40..44].copy_from_slice(&self.data_length.to_le_bytes());

        out
    }

    /// Read a canonical header back from the start of `data`
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_LEN {
            return Err(invalid(format!(
                "file too short for a header: {} bytes",
                data.len()
            )));
        }

        expect_tag(data, 0, b"RIFF")?;
        expect_tag(data, 8, b"WAVE")?;
        expect_tag(data, 12, b"fmt ")?;
        expect_tag(data, 36, b"data")?;

        let fmt_len = read_u32_le(data, 16);
        if fmt_len != FMT_CHUNK_LEN {
            return Err(invalid(format!("unexpected fmt chunk size {}", fmt_len)));
        }

        let header = WavHeader {
            audio_format: read_u16_le(data, 20),
            channels: read_u16_le(data, 22),
            sample_rate: read_u32_le(data, 24),
            byte_rate: read_u32_le(data, 28),
            block_align: read_u16_le(data, 32),
            bits_per_sample: read_u16_le(data, 34),
            data_length: read_u32_le(data, 40),
        };

        let riff_size = read_u32_le(data, 4);
        if riff_size != header.riff_size() {
            return Err(invalid(format!(
                "RIFF size {} does not match data length {}",
                riff_size, header.data_length
            )));
        }

        Ok(header)
    }
}

/// Convert one sample to 24-bit little-endian PCM.
///
/// The sample is scaled to the signed 32-bit range, truncated toward zero
/// and saturated; the least significant byte is then dropped, not rounded.
#[inline]
pub fn encode_sample(sample: f64) -> [u8; SAMPLE_SIZE] {
    // `as` truncates toward zero and saturates at the i32 bounds
    let scaled = (sample * I32_SCALE) as i32;
    let bytes = scaled.to_le_bytes();
    [bytes[1], bytes[2], bytes[3]]
}

/// Decode a 24-bit little-endian sample to its signed integer value
#[inline]
pub fn decode_sample(bytes: [u8; SAMPLE_SIZE]) -> i32 {
    i32::from_le_bytes([0, bytes[0], bytes[1], bytes[2]]) >> 8
}

fn invalid(reason: String) -> GeneratorError {
    GeneratorError::InvalidWav {
        reason,
        source: None,
    }
}

fn expect_tag(data: &[u8], offset: usize, tag: &[u8; 4]) -> Result<()> {
    if &data[offset..offset + 4] != tag {
        return Err(invalid(format!(
            "expected '{}' at offset {}",
            String::from_utf8_lossy(tag),
            offset
        )));
    }
    Ok(())
}

fn read_u16_le(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

fn read_u32_le(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}
