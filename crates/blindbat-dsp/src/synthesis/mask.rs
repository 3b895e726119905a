//! Band masks over a DFT frequency grid.

use crate::grid::FrequencyGrid;

/// Per-bin weights; a nonzero weight marks the bin as in-band.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralMask {
    weights: Vec<f32>,
    fallback: bool,
}

#[cfg(test)]
impl SpectralMask {
    /// Wraps explicit weights. The length must be a power of two.
    pub(crate) fn from_weights(weights: Vec<f32>) -> crate::error::DspResult<Self> {
        if !weights.len().is_power_of_two() {
            return Err(crate::error::DspError::NotPowerOfTwo { len: weights.len() });
        }
        Ok(Self {
            weights,
            fallback: false,
        })
    }
}

impl SpectralMask {
    /// Builds an indicator mask for `[min_freq, max_freq]` over `grid`.
    ///
    /// Every bin whose absolute frequency lies in the closed band gets
    /// weight 1. When the band falls between bins, the single bin nearest to
    /// either edge is used instead (see [`nearest_edge_bin`]).
    pub fn band(grid: &FrequencyGrid, min_freq: f32, max_freq: f32) -> Self {
        let mut weights = vec![0.0; grid.len()];
        let mut count = 0;
        for (weight, &freq) in weights.iter_mut().zip(grid.as_slice()) {
            let magnitude = freq.abs();
            if magnitude >= min_freq && magnitude <= max_freq {
                *weight = 1.0;
                count += 1;
            }
        }

        let mut fallback = false;
        if count == 0 {
            if let Some(index) = nearest_edge_bin(grid.as_slice(), min_freq, max_freq) {
                weights[index] = 1.0;
                fallback = true;
            }
        }

        Self { weights, fallback }
    }

    /// Per-bin weights.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Returns true for a zero-size mask.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Number of bins with nonzero weight.
    pub fn active_bins(&self) -> usize {
        self.weights.iter().filter(|&&w| w != 0.0).count()
    }

    /// True when no bin fell inside the band and the nearest bin was used.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }
}

/// Index of the bin whose frequency is closest to either band edge.
///
/// Distance is `min(|f - min_freq|, |f - max_freq|)` on the signed bin
/// frequency. Bins are scanned in index order with a strict comparison, so
/// the first bin reaching the minimum wins.
pub fn nearest_edge_bin(freqs: &[f32], min_freq: f32, max_freq: f32) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &freq) in freqs.iter().enumerate() {
        let distance = (freq - min_freq).abs().min((freq - max_freq).abs());
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((i, distance)),
        }
    }
    best.map(|(i, _)| i)
}
