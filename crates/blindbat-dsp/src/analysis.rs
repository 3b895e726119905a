//! Coarse spectral measurements of rendered clicks.

use std::f32::consts::PI;

use crate::fft;

/// Hann-windowed power spectrum over the positive frequencies.
///
/// The signal is zero-padded to the next power of two. Returns
/// `(bin_width_hz, power_per_bin)`, with bin 0 at DC and the last entry one
/// bin below Nyquist.
fn power_spectrum(samples: &[f32], sample_rate: u32) -> Option<(f32, Vec<f32>)> {
    if samples.is_empty() || sample_rate == 0 {
        return None;
    }

    let fft_size = samples.len().next_power_of_two();
    let window_len = samples.len();
    let mut buffer = vec![0.0f32; fft_size];
    for (i, (slot, &s)) in buffer.iter_mut().zip(samples).enumerate() {
        let window = if window_len > 1 {
            0.5 * (1.0 - (2.0 * PI * i as f32 / (window_len - 1) as f32).cos())
        } else {
            1.0
        };
        *slot = s * window;
    }

    let spectrum = fft::forward_real(&buffer).ok()?;
    let nyquist = (fft_size / 2).max(1);
    let power = spectrum.re[..nyquist]
        .iter()
        .zip(&spectrum.im[..nyquist])
        .map(|(re, im)| re * re + im * im)
        .collect();

    Some((sample_rate as f32 / fft_size as f32, power))
}

/// Frequency (Hz) of the strongest positive bin, DC excluded.
///
/// Returns 0 for empty or silent input.
pub fn dominant_frequency(samples: &[f32], sample_rate: u32) -> f32 {
    let Some((bin_width, power)) = power_spectrum(samples, sample_rate) else {
        return 0.0;
    };

    let mut max_power = 0.0f32;
    let mut max_bin = 0usize;
    for (i, &p) in power.iter().enumerate().skip(1) {
        if p > max_power {
            max_power = p;
            max_bin = i;
        }
    }

    max_bin as f32 * bin_width
}

/// Fraction of positive-frequency power whose bin lies in `[lo_hz, hi_hz]`.
///
/// Returns 0 for empty or silent input.
pub fn band_energy_ratio(samples: &[f32], sample_rate: u32, lo_hz: f32, hi_hz: f32) -> f32 {
    let Some((bin_width, power)) = power_spectrum(samples, sample_rate) else {
        return 0.0;
    };

    let total: f32 = power.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }

    let in_band: f32 = power
        .iter()
        .enumerate()
        .filter(|(i, _)| {
            let freq = *i as f32 * bin_width;
            freq >= lo_hz && freq <= hi_hz
        })
        .map(|(_, p)| p)
        .sum();

    in_band / total
}
