//! Parser for the canonical 16-bit PCM layout produced by this crate.

use crate::error::{DspError, DspResult};

use super::format::{WavFormat, HEADER_LEN};

/// A parsed WAV buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedWav {
    /// Format read from the `fmt ` chunk.
    pub format: WavFormat,
    /// RIFF chunk size field (file size minus 8).
    pub riff_size: u32,
    /// Data chunk size field in bytes.
    pub data_size: u32,
    /// Interleaved samples, `channels` values per frame.
    pub samples: Vec<i16>,
}

impl DecodedWav {
    /// Number of frames (samples per channel).
    pub fn frames(&self) -> usize {
        match self.format.channels {
            0 => 0,
            channels => self.samples.len() / channels as usize,
        }
    }

    /// Samples of one channel, de-interleaved.
    pub fn channel(&self, index: usize) -> Vec<i16> {
        let channels = self.format.channels as usize;
        if index >= channels {
            return Vec::new();
        }
        self.samples
            .iter()
            .skip(index)
            .step_by(channels)
            .copied()
            .collect()
    }

    /// Left channel scaled back to `[-1.0, 1.0)`.
    pub fn first_channel_f32(&self) -> Vec<f32> {
        self.channel(0)
            .into_iter()
            .map(|s| s as f32 / 32768.0)
            .collect()
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        if self.format.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f64 / self.format.sample_rate as f64
    }
}

fn read_u16(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

/// Parses a canonical 44-byte-header, 16-bit PCM WAV buffer.
///
/// # Errors
/// `InvalidWav` when the header is truncated, a chunk tag is wrong, the
/// format is not 16-bit PCM, or the data chunk is shorter than declared.
pub fn read_wav(data: &[u8]) -> DspResult<DecodedWav> {
    if data.len() < HEADER_LEN {
        return Err(DspError::invalid_wav(format!(
            "{} bytes is shorter than the {}-byte header",
            data.len(),
            HEADER_LEN
        )));
    }
    if &data[0..4] != b"RIFF" || &data[8..12] != b"WAVE" {
        return Err(DspError::invalid_wav("missing RIFF/WAVE tags"));
    }
    if &data[12..16] != b"fmt " || read_u32(data, 16) != 16 {
        return Err(DspError::invalid_wav("expected a 16-byte fmt chunk"));
    }
    if read_u16(data, 20) != 1 {
        return Err(DspError::invalid_wav("audio format is not PCM"));
    }

    let format = WavFormat {
        channels: read_u16(data, 22),
        sample_rate: read_u32(data, 24),
        bits_per_sample: read_u16(data, 34),
    };
    if format.bits_per_sample != 16 {
        return Err(DspError::invalid_wav(format!(
            "{} bits per sample, expected 16",
            format.bits_per_sample
        )));
    }
    if format.channels == 0 {
        return Err(DspError::invalid_wav("zero channels"));
    }
    if &data[36..40] != b"data" {
        return Err(DspError::invalid_wav("missing data chunk"));
    }

    let data_size = read_u32(data, 40);
    let body = &data[HEADER_LEN..];
    if body.len() < data_size as usize {
        return Err(DspError::invalid_wav(format!(
            "data chunk declares {} bytes but {} are present",
            data_size,
            body.len()
        )));
    }

    let samples = body[..data_size as usize]
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    Ok(DecodedWav {
        format,
        riff_size: read_u32(data, 4),
        data_size,
        samples,
    })
}
