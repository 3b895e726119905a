//! DFT bin frequencies.

/// Returns the frequency of every DFT bin for a transform of size `n` with
/// sample spacing `d` seconds.
///
/// Bins below `ceil(n/2)` carry positive frequencies `i / (n*d)`, the rest
/// carry the negative frequencies `(i - n) / (n*d)`. `d` must be positive.
pub fn fftfreq(n: usize, d: f32) -> Vec<f32> {
    let half = n.div_ceil(2);
    let scale = n as f32 * d;
    (0..n)
        .map(|i| {
            if i < half {
                i as f32 / scale
            } else {
                (i as f32 - n as f32) / scale
            }
        })
        .collect()
}

/// Per-bin frequencies (Hz) for one transform size and sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyGrid {
    freqs: Vec<f32>,
    bin_width: f32,
}

impl FrequencyGrid {
    /// Builds the grid for `n` bins and sample spacing `d` seconds.
    pub fn new(n: usize, d: f32) -> Self {
        Self {
            freqs: fftfreq(n, d),
            bin_width: 1.0 / (n as f32 * d),
        }
    }

    /// Builds the grid for `n` bins at `sample_rate` Hz.
    pub fn for_sample_rate(n: usize, sample_rate: u32) -> Self {
        Self::new(n, 1.0 / sample_rate as f32)
    }

    /// Frequency of every bin, in bin order.
    pub fn as_slice(&self) -> &[f32] {
        &self.freqs
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.freqs.len()
    }

    /// Returns true for a zero-size grid.
    pub fn is_empty(&self) -> bool {
        self.freqs.is_empty()
    }

    /// Spacing between adjacent positive bins, in Hz.
    pub fn bin_width(&self) -> f32 {
        self.bin_width
    }
}
