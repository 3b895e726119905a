//! Signal post-processing: zero-crossing crop, mean-magnitude normalization
//! and silence padding.

use crate::error::{DspError, DspResult};

/// Mono samples at a fixed sample rate.
pub type Signal = Vec<f32>;

/// Mean absolute sample value after [`normalize_signal`].
pub const TARGET_MEAN_MAGNITUDE: f32 = 0.5;

/// Indices `i >= 1` where `signal[i-1]` and `signal[i]` differ in sign.
///
/// Sign is read from the sign bit, so `-0.0` counts as negative and `0.0`
/// as positive.
pub fn zero_crossings(signal: &[f32]) -> Vec<usize> {
    signal
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| pair[0].is_sign_negative() != pair[1].is_sign_negative())
        .map(|(i, _)| i + 1)
        .collect()
}

/// Crops `signal` to the longest zero-crossing-bounded segment that starts
/// at the first crossing and spans at most `budget` samples.
///
/// Returns `signal[t0..t_end]` for the latest crossing `t_end` with
/// `t_end - t0 <= budget`. When no later crossing fits the budget the
/// signal is returned unchanged.
///
/// # Errors
/// `TooFewZeroCrossings` when the signal crosses zero fewer than twice.
pub fn crop_signal(signal: Signal, budget: usize) -> DspResult<Signal> {
    let crossings = zero_crossings(&signal);
    if crossings.len() < 2 {
        return Err(DspError::TooFewZeroCrossings {
            found: crossings.len(),
        });
    }

    let start = crossings[0];
    let end = crossings[1..]
        .iter()
        .rev()
        .find(|&&t| t - start <= budget)
        .copied();

    match end {
        Some(end) => Ok(signal[start..end].to_vec()),
        None => Ok(signal),
    }
}

/// Mean of `|x|` over the signal, or `None` when it is empty.
pub fn mean_magnitude(signal: &[f32]) -> Option<f32> {
    if signal.is_empty() {
        return None;
    }
    let sum: f32 = signal.iter().map(|s| s.abs()).sum();
    Some(sum / signal.len() as f32)
}

/// Scales `signal` so its mean absolute value is [`TARGET_MEAN_MAGNITUDE`].
///
/// # Errors
/// `EmptySignal` for an empty signal, `SilentSignal` when every sample is 0.
pub fn normalize_signal(signal: Signal) -> DspResult<Signal> {
    let mean = mean_magnitude(&signal).ok_or(DspError::EmptySignal)?;
    if mean == 0.0 {
        return Err(DspError::SilentSignal);
    }

    let factor = TARGET_MEAN_MAGNITUDE / mean;
    Ok(signal.into_iter().map(|s| s * factor).collect())
}

/// Appends zeros until the signal holds `total_samples` samples.
///
/// Signals already at or beyond `total_samples` are returned as-is.
pub fn pad_with_silence(mut signal: Signal, total_samples: usize) -> Signal {
    if signal.len() < total_samples {
        signal.resize(total_samples, 0.0);
    }
    signal
}
