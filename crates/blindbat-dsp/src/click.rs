//! Click rendering: band-limited noise, normalized, padded and encoded.

use log::debug;

use crate::error::{DspError, DspResult};
use crate::signal::{normalize_signal, pad_with_silence, Signal};
use crate::synthesis::{BandNoiseSynth, PhaseSource, Synthesizer};
use crate::wav::PcmEncoder;

/// Longest click or period accepted, in samples (2^24, about 350 s at 48 kHz).
pub const MAX_DURATION_SAMPLES: usize = 1 << 24;

/// Gain that maps the normalized mean magnitude of 0.5 to 4096, an eighth
/// of 16-bit full scale.
pub const DEFAULT_GAIN: f32 = 8192.0;

/// Everything needed to render one click buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickParams {
    /// Lower band edge in Hz.
    pub min_freq_hz: f32,
    /// Upper band edge in Hz.
    pub max_freq_hz: f32,
    /// Sample budget for the noise burst before cropping.
    pub duration_samples: usize,
    /// Sample rate in Hz, also written to the WAV header.
    pub sample_rate: u32,
    /// Linear gain applied before 16-bit quantization.
    pub gain: f32,
    /// Total buffer length including trailing silence, if any.
    pub period_samples: Option<usize>,
}

impl ClickParams {
    /// Creates parameters for a bare burst with no trailing silence.
    pub fn new(
        min_freq_hz: f32,
        max_freq_hz: f32,
        duration_samples: usize,
        sample_rate: u32,
    ) -> Self {
        Self {
            min_freq_hz,
            max_freq_hz,
            duration_samples,
            sample_rate,
            gain: DEFAULT_GAIN,
            period_samples: None,
        }
    }

    /// Sets the linear gain.
    pub fn with_gain(mut self, gain: f32) -> Self {
        self.gain = gain;
        self
    }

    /// Pads the rendered click with silence up to `period_samples`.
    pub fn with_period(mut self, period_samples: usize) -> Self {
        self.period_samples = Some(period_samples);
        self
    }

    /// Checks that every field is usable.
    ///
    /// # Errors
    /// `InvalidParameter` naming the first offending field.
    pub fn validate(&self) -> DspResult<()> {
        check_frequency("min_freq_hz", self.min_freq_hz)?;
        check_frequency("max_freq_hz", self.max_freq_hz)?;
        if self.max_freq_hz < self.min_freq_hz {
            return Err(DspError::invalid_param(
                "max_freq_hz",
                format!(
                    "{} Hz is below min_freq_hz {} Hz",
                    self.max_freq_hz, self.min_freq_hz
                ),
            ));
        }
        if self.sample_rate == 0 {
            return Err(DspError::invalid_param("sample_rate", "must be positive"));
        }
        if self.duration_samples == 0 || self.duration_samples > MAX_DURATION_SAMPLES {
            return Err(DspError::invalid_param(
                "duration_samples",
                format!(
                    "must be in 1..={}, got {}",
                    MAX_DURATION_SAMPLES, self.duration_samples
                ),
            ));
        }
        if !self.gain.is_finite() || self.gain < 0.0 {
            return Err(DspError::invalid_param(
                "gain",
                format!("must be finite and non-negative, got {}", self.gain),
            ));
        }
        if let Some(period) = self.period_samples {
            if period > MAX_DURATION_SAMPLES {
                return Err(DspError::invalid_param(
                    "period_samples",
                    format!("must be at most {}, got {}", MAX_DURATION_SAMPLES, period),
                ));
            }
        }
        Ok(())
    }
}

fn check_frequency(name: &str, hz: f32) -> DspResult<()> {
    if !hz.is_finite() || hz < 0.0 {
        return Err(DspError::invalid_param(
            name,
            format!("must be finite and non-negative, got {}", hz),
        ));
    }
    Ok(())
}

/// Synthesizes the float samples of one click.
///
/// # Errors
/// `InvalidParameter` for unusable params, or a degenerate-signal error when
/// the noise never crosses zero twice.
pub fn synthesize_click(params: &ClickParams, phases: &mut dyn PhaseSource) -> DspResult<Signal> {
    params.validate()?;

    let synth = BandNoiseSynth::new(params.min_freq_hz, params.max_freq_hz);
    let noise = synth.synthesize(params.duration_samples, params.sample_rate, phases)?;
    let mut click = normalize_signal(noise)?;

    if let Some(period) = params.period_samples {
        let burst = click.len();
        click = pad_with_silence(click, period);
        debug!("padded {} burst samples to {}", burst, click.len());
    }

    Ok(click)
}

/// Renders one click as a stereo 16-bit WAV buffer.
pub fn render_click(params: &ClickParams, phases: &mut dyn PhaseSource) -> DspResult<Vec<u8>> {
    let click = synthesize_click(params, phases)?;
    PcmEncoder::with_sample_rate(params.sample_rate, params.gain).encode(&click)
}
