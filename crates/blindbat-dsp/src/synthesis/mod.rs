//! Noise synthesis in the frequency domain.
//!
//! - `mask` - Band indicator masks over a DFT grid
//! - `phases` - Injectable phase sources (PCG32 or fixed)
//! - `noise` - Random-phase inverse FFT noise, cropped to zero crossings

pub mod mask;
pub mod noise;
pub mod phases;

pub use mask::{nearest_edge_bin, SpectralMask};
pub use noise::{band_limited_noise, fft_noise, random_phase_spectrum, BandNoiseSynth};
pub use phases::{FixedPhases, PhaseSource};

use crate::error::DspResult;
use crate::signal::Signal;

/// Common trait for signal generators.
pub trait Synthesizer {
    /// Generates audio samples.
    ///
    /// # Arguments
    /// * `num_samples` - Sample budget for the generated signal
    /// * `sample_rate` - Audio sample rate in Hz
    /// * `phases` - Phase source for any randomness
    fn synthesize(
        &self,
        num_samples: usize,
        sample_rate: u32,
        phases: &mut dyn PhaseSource,
    ) -> DspResult<Signal>;
}
