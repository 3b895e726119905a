//! Band-limited noise via random-phase inverse FFT.
//!
//! The band is drawn as an indicator mask over a power-of-two DFT grid.
//! Each positive bin is rotated by a random phase and mirrored as its
//! complex conjugate into the negative half, so the inverse transform is
//! real. The result is then cropped to a zero crossing near the requested
//! length.

use log::debug;

use crate::error::DspResult;
use crate::fft::{self, ComplexSpectrum};
use crate::grid::FrequencyGrid;
use crate::signal::{crop_signal, Signal};

use super::mask::SpectralMask;
use super::phases::PhaseSource;
use super::Synthesizer;

/// Builds a Hermitian spectrum from `mask` with one random phase per
/// positive bin.
///
/// Bins `1..=(n-1)/2` are rotated in increasing order, one phase each.
/// Bin 0 and, for even `n`, bin `n/2` keep the mask weight as a real value.
pub fn random_phase_spectrum(mask: &SpectralMask, phases: &mut dyn PhaseSource) -> ComplexSpectrum {
    let weights = mask.weights();
    let n = weights.len();
    let mut spectrum = ComplexSpectrum::zeros(n);
    if n == 0 {
        return spectrum;
    }

    spectrum.re[0] = weights[0];
    if n % 2 == 0 {
        spectrum.re[n / 2] = weights[n / 2];
    }

    let positive_bins = (n - 1) / 2;
    for i in 1..=positive_bins {
        let phase = phases.next_phase();
        let re = weights[i] * phase.cos();
        let im = weights[i] * phase.sin();
        spectrum.re[i] = re;
        spectrum.im[i] = im;
        spectrum.re[n - i] = re;
        spectrum.im[n - i] = -im;
    }

    spectrum
}

/// Inverse-transforms a random-phase rendition of `mask` into a real signal
/// of the same length.
pub fn fft_noise(mask: &SpectralMask, phases: &mut dyn PhaseSource) -> DspResult<Signal> {
    let spectrum = random_phase_spectrum(mask, phases);
    let time = fft::inverse(&spectrum)?;
    Ok(time.re)
}

/// Synthesizes noise with energy in `[min_freq, max_freq]` and crops it to
/// at most `samples` samples between two zero crossings.
///
/// The working resolution is the next power of two at or above `samples`,
/// so the output length is close to, not exactly, `samples`.
///
/// # Errors
/// `TooFewZeroCrossings` when the raw signal crosses zero fewer than twice.
pub fn band_limited_noise(
    min_freq: f32,
    max_freq: f32,
    samples: usize,
    sample_rate: u32,
    phases: &mut dyn PhaseSource,
) -> DspResult<Signal> {
    let padded = samples.max(1).next_power_of_two();
    let grid = FrequencyGrid::for_sample_rate(padded, sample_rate);
    let mask = SpectralMask::band(&grid, min_freq, max_freq);
    debug!(
        "band {:.1}-{:.1} Hz: samples={} padded={} active_bins={} fallback={}",
        min_freq,
        max_freq,
        samples,
        padded,
        mask.active_bins(),
        mask.is_fallback()
    );

    let raw = fft_noise(&mask, phases)?;
    let cropped = crop_signal(raw, samples)?;
    debug!("cropped to {} samples", cropped.len());
    Ok(cropped)
}

/// Band-limited noise synthesizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandNoiseSynth {
    /// Lower band edge in Hz.
    pub min_freq: f32,
    /// Upper band edge in Hz.
    pub max_freq: f32,
}

impl BandNoiseSynth {
    /// Creates a synthesizer for `[min_freq, max_freq]`.
    pub fn new(min_freq: f32, max_freq: f32) -> Self {
        Self { min_freq, max_freq }
    }
}

impl Synthesizer for BandNoiseSynth {
    fn synthesize(
        &self,
        num_samples: usize,
        sample_rate: u32,
        phases: &mut dyn PhaseSource,
    ) -> DspResult<Signal> {
        band_limited_noise(
            self.min_freq,
            self.max_freq,
            num_samples,
            sample_rate,
            phases,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DspError;
    use crate::rng::create_rng;
    use crate::synthesis::phases::FixedPhases;
    use std::f32::consts::FRAC_PI_2;

    fn band_mask(n: usize, sample_rate: u32, lo: f32, hi: f32) -> SpectralMask {
        SpectralMask::band(&FrequencyGrid::for_sample_rate(n, sample_rate), lo, hi)
    }

    #[test]
    fn test_spectrum_is_hermitian() {
        let mask = band_mask(1024, 48000, 800.0, 1200.0);
        let mut rng = create_rng(42);
        let spectrum = random_phase_spectrum(&mask, &mut rng);
        let n = spectrum.len();

        for k in 1..n / 2 {
            assert_eq!(spectrum.re[n - k], spectrum.re[k], "bin {}", k);
            assert_eq!(spectrum.im[n - k], -spectrum.im[k], "bin {}", k);
        }
        assert_eq!(spectrum.im[0], 0.0);
        assert_eq!(spectrum.im[n / 2], 0.0);
    }

    #[test]
    fn test_inverse_is_real() {
        let mask = band_mask(4096, 48000, 300.0, 5000.0);
        let mut rng = create_rng(7);
        let spectrum = random_phase_spectrum(&mask, &mut rng);
        let time = fft::inverse(&spectrum).unwrap();
        assert!(time.max_abs_imag() < 1e-6);
    }

    #[test]
    fn test_draws_one_phase_per_positive_bin() {
        let mask = SpectralMask::from_weights(vec![1.0; 16]).unwrap();
        let mut phases = FixedPhases::constant(0.0);
        random_phase_spectrum(&mask, &mut phases);
        assert_eq!(phases.drawn(), 7);
    }

    #[test]
    fn test_fixed_phase_rotates_bins() {
        let mut weights = vec![0.0; 8];
        weights[0] = 0.5;
        weights[2] = 1.0;
        weights[4] = 2.0;
        let mask = SpectralMask::from_weights(weights).unwrap();
        let mut phases = FixedPhases::constant(FRAC_PI_2);
        let spectrum = random_phase_spectrum(&mask, &mut phases);

        assert_eq!(spectrum.re[0], 0.5);
        assert_eq!(spectrum.re[4], 2.0);
        assert_eq!(spectrum.im[4], 0.0);
        assert!(spectrum.re[2].abs() < 1e-6);
        assert!((spectrum.im[2] - 1.0).abs() < 1e-6);
        assert!((spectrum.im[6] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_tiny_masks_keep_unrotated_bins() {
        let mut phases = FixedPhases::constant(1.0);

        let one = SpectralMask::from_weights(vec![3.0]).unwrap();
        let spectrum = random_phase_spectrum(&one, &mut phases);
        assert_eq!(spectrum.re, vec![3.0]);

        let two = SpectralMask::from_weights(vec![1.0, 2.0]).unwrap();
        let spectrum = random_phase_spectrum(&two, &mut phases);
        assert_eq!(spectrum.re, vec![1.0, 2.0]);
        assert_eq!(spectrum.im, vec![0.0, 0.0]);
        assert_eq!(phases.drawn(), 0);
    }

    #[test]
    fn test_fft_noise_length_matches_mask() {
        let mask = band_mask(2048, 48000, 1000.0, 2000.0);
        let mut rng = create_rng(1);
        let signal = fft_noise(&mask, &mut rng).unwrap();
        assert_eq!(signal.len(), 2048);
        assert!(signal.iter().any(|&s| s != 0.0));
    }

    #[test]
    fn test_band_limited_noise_respects_budget() {
        let mut rng = create_rng(42);
        let signal = band_limited_noise(800.0, 1200.0, 4800, 48000, &mut rng).unwrap();
        assert!(!signal.is_empty());
        assert!(signal.len() <= 4800);
    }

    #[test]
    fn test_band_limited_noise_determinism() {
        let synth = BandNoiseSynth::new(500.0, 900.0);

        let mut rng1 = create_rng(42);
        let mut rng2 = create_rng(42);

        let samples1 = synth.synthesize(1440, 48000, &mut rng1).unwrap();
        let samples2 = synth.synthesize(1440, 48000, &mut rng2).unwrap();

        assert_eq!(samples1, samples2);
    }

    #[test]
    fn test_dc_only_band_is_degenerate() {
        // A constant signal never crosses zero.
        let mut rng = create_rng(3);
        let err = band_limited_noise(0.0, 0.0, 256, 48000, &mut rng).unwrap_err();
        assert_eq!(err, DspError::TooFewZeroCrossings { found: 0 });
    }
}
