//! Power-of-two complex FFT.
//!
//! Thin wrapper over `rustfft` that works on split real/imaginary buffers.
//! The engine never pads: callers round their working size up to the next
//! power of two before building a spectrum. The inverse transform is scaled
//! by `1/n`, so `inverse(forward(x)) == x` up to rounding.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

use crate::error::{DspError, DspResult};

/// One complex value per DFT bin, stored as parallel real/imaginary parts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComplexSpectrum {
    /// Real parts.
    pub re: Vec<f32>,
    /// Imaginary parts.
    pub im: Vec<f32>,
}

impl ComplexSpectrum {
    /// Creates a spectrum from parallel parts. Lengths are checked by the
    /// transform, not here.
    pub fn new(re: Vec<f32>, im: Vec<f32>) -> Self {
        Self { re, im }
    }

    /// Creates an all-zero spectrum of `n` bins.
    pub fn zeros(n: usize) -> Self {
        Self {
            re: vec![0.0; n],
            im: vec![0.0; n],
        }
    }

    /// Creates a spectrum whose imaginary part is zero.
    pub fn from_real(samples: &[f32]) -> Self {
        Self {
            re: samples.to_vec(),
            im: vec![0.0; samples.len()],
        }
    }

    /// Number of bins (length of the real part).
    pub fn len(&self) -> usize {
        self.re.len()
    }

    /// Returns true when the spectrum has no bins.
    pub fn is_empty(&self) -> bool {
        self.re.is_empty()
    }

    /// Largest absolute imaginary part, used to check that a time-domain
    /// result is real.
    pub fn max_abs_imag(&self) -> f32 {
        self.im.iter().fold(0.0f32, |acc, v| acc.max(v.abs()))
    }

    fn validate(&self) -> DspResult<()> {
        if self.re.len() != self.im.len() {
            return Err(DspError::LengthMismatch {
                re: self.re.len(),
                im: self.im.len(),
            });
        }
        if !self.re.len().is_power_of_two() {
            return Err(DspError::NotPowerOfTwo { len: self.re.len() });
        }
        Ok(())
    }

    fn to_complex(&self) -> Vec<Complex<f32>> {
        self.re
            .iter()
            .zip(&self.im)
            .map(|(&re, &im)| Complex::new(re, im))
            .collect()
    }

    fn from_complex(buffer: &[Complex<f32>], scale: f32) -> Self {
        Self {
            re: buffer.iter().map(|c| c.re * scale).collect(),
            im: buffer.iter().map(|c| c.im * scale).collect(),
        }
    }
}

/// Forward (unscaled) DFT.
///
/// # Errors
/// `LengthMismatch` when the parts differ in length, `NotPowerOfTwo` when
/// the length is not a power of two (zero included).
pub fn forward(input: &ComplexSpectrum) -> DspResult<ComplexSpectrum> {
    input.validate()?;
    let n = input.len();

    let mut buffer = input.to_complex();
    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(n);
    fft.process(&mut buffer);

    Ok(ComplexSpectrum::from_complex(&buffer, 1.0))
}

/// Inverse DFT with `1/n` scaling.
///
/// # Errors
/// Same as [`forward`].
pub fn inverse(input: &ComplexSpectrum) -> DspResult<ComplexSpectrum> {
    input.validate()?;
    let n = input.len();

    let mut buffer = input.to_complex();
    let mut planner = FftPlanner::<f32>::new();
    let ifft = planner.plan_fft_inverse(n);
    ifft.process(&mut buffer);

    Ok(ComplexSpectrum::from_complex(&buffer, 1.0 / n as f32))
}

/// Forward DFT of a real signal.
pub fn forward_real(samples: &[f32]) -> DspResult<ComplexSpectrum> {
    forward(&ComplexSpectrum::from_real(samples))
}
