//! BlindBat DSP core
//!
//! This crate renders short band-limited noise "clicks" for tinnitus
//! masking and encodes them as stereo 16-bit WAV buffers ready for looped
//! playback.
//!
//! # Overview
//!
//! A click is produced in five steps:
//!
//! - **Grid** - DFT bin frequencies for a power-of-two working size
//! - **Synthesis** - an indicator mask over the band, random phase per bin,
//!   Hermitian mirroring, inverse FFT
//! - **Crop** - trim to the longest zero-crossing-bounded segment within the
//!   requested length
//! - **Normalize** - scale to a mean magnitude of 0.5, then pad with silence
//!   up to the click period
//! - **Encode** - gain, saturate, truncate to `i16`, duplicate to L/R
//!
//! # Determinism
//!
//! Phases come from a PCG32 generator. Given the same seed and parameters,
//! the rendered buffer is byte-identical across runs (on the same platform).
//!
//! # Example
//!
//! ```
//! use blindbat_dsp::{render_click, rng::create_rng, ClickSettings};
//!
//! let params = ClickSettings::default().to_params(48000, 8192.0)?;
//! let wav = render_click(&params, &mut create_rng(42))?;
//! assert_eq!(&wav[0..4], b"RIFF");
//! # Ok::<(), blindbat_dsp::DspError>(())
//! ```
//!
//! # Crate Structure
//!
//! - [`click`] - Parameter validation and the render pipeline
//! - [`settings`] - Slider-style settings and their Hz/sample mappings
//! - [`session`] - Play/pause state over a pluggable player
//! - [`synthesis`] - Spectral masks, phase sources and noise synthesis
//! - [`signal`] - Zero-crossing crop, normalization and padding
//! - [`fft`] / [`grid`] - Transforms and bin frequencies
//! - [`wav`] - WAV encoder, reader and PCM hash
//! - [`analysis`] - Dominant frequency and band energy measurements

pub mod analysis;
pub mod click;
pub mod error;
pub mod fft;
pub mod grid;
pub mod rng;
pub mod session;
pub mod settings;
pub mod signal;
pub mod synthesis;
pub mod wav;

// Re-export main types at crate root
pub use click::{render_click, synthesize_click, ClickParams, DEFAULT_GAIN};
pub use error::{DspError, DspResult, FailureKind};
pub use session::{ClickPlayer, PlaybackSession};
pub use settings::{format_hertz, ClickSettings};
pub use signal::Signal;
pub use wav::PcmEncoder;

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::analysis::{band_energy_ratio, dominant_frequency};
    use crate::rng::create_rng;
    use crate::synthesis::band_limited_noise;

    #[test]
    fn test_band_limited_noise_energy_stays_in_band() {
        let mut rng = create_rng(42);
        let signal = band_limited_noise(800.0, 1200.0, 4800, 48000, &mut rng).unwrap();

        assert!(!signal.is_empty());
        let dominant = dominant_frequency(&signal, 48000);
        assert!(
            (795.0..=1205.0).contains(&dominant),
            "dominant frequency {} outside band",
            dominant
        );
        assert!(band_energy_ratio(&signal, 48000, 700.0, 1300.0) > 0.9);
    }

    #[test]
    fn test_full_click_pipeline() {
        let params = ClickSettings::default().to_params(48000, DEFAULT_GAIN).unwrap();
        let wav = render_click(&params, &mut create_rng(7)).expect("render should succeed");

        let decoded = wav::read_wav(&wav).unwrap();
        assert_eq!(decoded.frames(), 48000);
        assert_eq!(decoded.channel(0), decoded.channel(1));
    }

    #[test]
    fn test_pcm_hash_determinism() {
        let params = ClickParams::new(1000.0, 2000.0, 2400, 48000);
        let a = render_click(&params, &mut create_rng(11)).unwrap();
        let b = render_click(&params, &mut create_rng(11)).unwrap();

        assert_eq!(wav::compute_pcm_hash(&a), wav::compute_pcm_hash(&b));
    }
}
