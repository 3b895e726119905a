//! Click command implementation
//!
//! Renders one masking click from settings (a JSON file, flag overrides, or
//! the defaults) and writes it as a looping-ready WAV file.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use blindbat_dsp::ClickSettings;

use super::json_output::{error_codes, JsonError};
use super::render::{self, print_json_failure, RenderJob};

/// Flag values for the click command. `None` leaves the settings value as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClickArgs {
    /// Settings JSON file
    pub settings: Option<String>,
    /// Frequency slider position, 0 to 100
    pub frequency_percentile: Option<f32>,
    /// Bandwidth slider position, 0 to 100
    pub bandwidth_percentile: Option<f32>,
    /// Clicks per second, 1 to 10
    pub clicks_per_second: Option<f32>,
    /// Click length in milliseconds, 5 to 100
    pub click_length_ms: Option<f32>,
}

impl ClickArgs {
    /// Applies the flag overrides on top of `settings`.
    pub fn apply(&self, mut settings: ClickSettings) -> ClickSettings {
        if let Some(p) = self.frequency_percentile {
            settings.frequency_percentile = p;
        }
        if let Some(q) = self.bandwidth_percentile {
            settings.frequency_bandwidth_percentile = q;
        }
        if let Some(rate) = self.clicks_per_second {
            settings.clicks_per_second = rate;
        }
        if let Some(ms) = self.click_length_ms {
            settings.click_length_ms = ms;
        }
        settings
    }
}

/// Reads a settings file. Missing keys take their defaults.
pub fn load_settings(path: &Path) -> Result<ClickSettings> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
    ClickSettings::from_json(&json)
        .with_context(|| format!("Failed to parse settings file: {}", path.display()))
}

/// Run the click command
///
/// # Arguments
/// * `args` - Settings source and overrides
/// * `sample_rate` - Output sample rate in Hz
/// * `gain` - Linear gain before quantization
/// * `seed` - Phase seed (random when absent)
/// * `out_path` - Destination WAV path
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(
    args: &ClickArgs,
    sample_rate: u32,
    gain: f32,
    seed: Option<u32>,
    out_path: &str,
    json_output: bool,
) -> Result<ExitCode> {
    let base = match args.settings.as_deref() {
        Some(path) => match load_settings(Path::new(path)) {
            Ok(settings) => settings,
            Err(e) if json_output => {
                let code = if e.downcast_ref::<std::io::Error>().is_some() {
                    error_codes::FILE_READ
                } else {
                    error_codes::SETTINGS_PARSE
                };
                return print_json_failure(JsonError::new(code, format!("{:#}", e)).with_file(path));
            }
            Err(e) => return Err(e),
        },
        None => ClickSettings::default(),
    };
    let settings = args.apply(base);
    log::debug!("click settings: {:?}", settings);

    let params = match settings.to_params(sample_rate, gain) {
        Ok(params) => params,
        Err(e) if json_output => return print_json_failure(JsonError::from(&e)),
        Err(e) => return Err(e).context("Invalid click settings"),
    };

    let job = RenderJob {
        params,
        seed,
        out_path: out_path.to_string(),
    };
    render::run(&job, "click", json_output)
}
