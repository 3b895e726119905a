//! JSON output types for machine-readable CLI output.
//!
//! Every command accepts `--json`. Output is a single pretty-printed object
//! with a `success` flag, the command's result on success, and structured
//! errors on failure.

use serde::{Deserialize, Serialize};

use blindbat_dsp::DspError;

/// Error codes for CLI operations.
///
/// CLI-level failures use `CLI_XXX`; pipeline failures pass through the
/// library's `DSP_XXX` codes.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// File could not be written
    pub const FILE_WRITE: &str = "CLI_002";
    /// Settings JSON could not be parsed
    pub const SETTINGS_PARSE: &str = "CLI_003";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "DSP_004")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
        }
    }

    /// Sets the source file for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl From<&DspError> for JsonError {
    fn from(err: &DspError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

/// Output of `click` and `noise`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderOutput {
    /// Whether the buffer was rendered and written
    pub success: bool,
    /// Render details (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<RenderResult>,
    /// Errors (on failure)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub errors: Vec<JsonError>,
}

impl RenderOutput {
    /// Creates a successful output.
    pub fn success(result: RenderResult) -> Self {
        Self {
            success: true,
            result: Some(result),
            errors: Vec::new(),
        }
    }

    /// Creates a failed output.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            result: None,
            errors,
        }
    }
}

/// Details of a rendered buffer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderResult {
    /// Path the WAV file was written to
    pub output_path: String,
    /// Seed the phases were drawn from
    pub seed: u32,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Lower band edge in Hz
    pub min_freq_hz: f32,
    /// Upper band edge in Hz
    pub max_freq_hz: f32,
    /// Linear gain
    pub gain: f32,
    /// Frames written (per channel)
    pub frames: usize,
    /// File size in bytes
    pub file_size: usize,
    /// BLAKE3 hash of the PCM data
    pub pcm_hash: String,
}

/// Output of `inspect`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InspectOutput {
    /// Whether the file parsed
    pub success: bool,
    /// Header and signal details (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<InspectResult>,
    /// Errors (on failure)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub errors: Vec<JsonError>,
}

impl InspectOutput {
    /// Creates a successful output.
    pub fn success(result: InspectResult) -> Self {
        Self {
            success: true,
            result: Some(result),
            errors: Vec::new(),
        }
    }

    /// Creates a failed output.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            result: None,
            errors,
        }
    }
}

/// Header fields and measurements of a WAV file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InspectResult {
    /// Inspected file
    pub input_path: String,
    /// Channel count
    pub channels: u16,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Bits per sample
    pub bits_per_sample: u16,
    /// RIFF chunk size field
    pub riff_size: u32,
    /// Data chunk size field
    pub data_size: u32,
    /// Frames (per channel)
    pub frames: usize,
    /// Duration in seconds
    pub duration_seconds: f64,
    /// Whether every channel carries the same samples
    pub dual_mono: bool,
    /// Strongest frequency of the first channel in Hz
    pub dominant_frequency_hz: f32,
    /// BLAKE3 hash of the PCM data
    pub pcm_hash: String,
    /// BLAKE3 hash of the whole file
    pub file_hash: String,
}
