//! Error types for the DSP pipeline.

use thiserror::Error;

/// Result type for DSP operations.
pub type DspResult<T> = Result<T, DspError>;

/// Coarse failure classes a caller can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The input buffer cannot be processed at all (bad length, bad container).
    MalformedInput,
    /// The signal carries no usable audio this cycle.
    DegenerateSignal,
    /// A click or settings parameter is out of range.
    InvalidParameter,
    /// The external player refused the buffer.
    Playback,
}

/// Errors that can occur while synthesizing, encoding or playing a click.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DspError {
    /// Transform length is not a power of two.
    #[error("transform length {len} is not a power of two")]
    NotPowerOfTwo {
        /// The offending length.
        len: usize,
    },

    /// Real and imaginary parts differ in length.
    #[error("real/imaginary length mismatch: {re} vs {im}")]
    LengthMismatch {
        /// Length of the real part.
        re: usize,
        /// Length of the imaginary part.
        im: usize,
    },

    /// Buffer is not a canonical 16-bit PCM WAV file.
    #[error("invalid WAV data: {reason}")]
    InvalidWav {
        /// What was wrong with the buffer.
        reason: String,
    },

    /// The signal never settled into at least two zero crossings.
    #[error("signal has {found} zero crossing(s), need at least 2")]
    TooFewZeroCrossings {
        /// Number of crossings found.
        found: usize,
    },

    /// Nothing to normalize.
    #[error("signal is empty")]
    EmptySignal,

    /// Every sample is zero, so the mean magnitude is zero.
    #[error("signal is silent (all samples are zero)")]
    SilentSignal,

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// Player failed to start the loop.
    #[error("playback failed: {message}")]
    Playback {
        /// Message reported by the player.
        message: String,
    },
}

impl DspError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid WAV error.
    pub fn invalid_wav(reason: impl Into<String>) -> Self {
        Self::InvalidWav {
            reason: reason.into(),
        }
    }

    /// Returns the failure class of this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            DspError::NotPowerOfTwo { .. }
            | DspError::LengthMismatch { .. }
            | DspError::InvalidWav { .. } => FailureKind::MalformedInput,
            DspError::TooFewZeroCrossings { .. }
            | DspError::EmptySignal
            | DspError::SilentSignal => FailureKind::DegenerateSignal,
            DspError::InvalidParameter { .. } => FailureKind::InvalidParameter,
            DspError::Playback { .. } => FailureKind::Playback,
        }
    }

    /// Returns true when the caller should treat this as "no audio this cycle".
    pub fn is_degenerate(&self) -> bool {
        self.kind() == FailureKind::DegenerateSignal
    }

    /// Stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            DspError::NotPowerOfTwo { .. } => "DSP_001",
            DspError::LengthMismatch { .. } => "DSP_002",
            DspError::InvalidWav { .. } => "DSP_003",
            DspError::TooFewZeroCrossings { .. } => "DSP_004",
            DspError::EmptySignal => "DSP_005",
            DspError::SilentSignal => "DSP_006",
            DspError::InvalidParameter { .. } => "DSP_007",
            DspError::Playback { .. } => "DSP_008",
        }
    }
}
