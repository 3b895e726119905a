//! Click buffer encoder.

use crate::error::{DspError, DspResult};

use super::format::{WavFormat, DEFAULT_SAMPLE_RATE};
use super::pcm::dual_mono_to_pcm16;
use super::writer::write_wav_to_vec;

/// Largest sample count whose data chunk still fits the 32-bit RIFF size.
pub const MAX_ENCODED_SAMPLES: usize = (u32::MAX as usize - 36) / 4;

/// Encodes mono float signals as stereo 16-bit WAV buffers with identical
/// left and right channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PcmEncoder {
    format: WavFormat,
    gain: f32,
}

impl PcmEncoder {
    /// Creates an encoder at the default 48 kHz.
    pub fn new(gain: f32) -> Self {
        Self::with_sample_rate(DEFAULT_SAMPLE_RATE, gain)
    }

    /// Creates an encoder that writes `sample_rate` into the header.
    pub fn with_sample_rate(sample_rate: u32, gain: f32) -> Self {
        Self {
            format: WavFormat::stereo(sample_rate),
            gain,
        }
    }

    /// Header format written by this encoder.
    pub fn format(&self) -> WavFormat {
        self.format
    }

    /// Linear gain applied before quantization.
    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Encodes `samples` into a complete WAV buffer.
    ///
    /// Out-of-range values are clamped, never rejected.
    ///
    /// # Errors
    /// `InvalidParameter` when the signal exceeds [`MAX_ENCODED_SAMPLES`].
    pub fn encode(&self, samples: &[f32]) -> DspResult<Vec<u8>> {
        if samples.len() > MAX_ENCODED_SAMPLES {
            return Err(DspError::invalid_param(
                "samples",
                format!(
                    "{} samples exceed the WAV limit of {}",
                    samples.len(),
                    MAX_ENCODED_SAMPLES
                ),
            ));
        }
        let pcm = dual_mono_to_pcm16(samples, self.gain);
        write_wav_to_vec(&self.format, &pcm)
            .map_err(|e| DspError::invalid_param("samples", e.to_string()))
    }
}
