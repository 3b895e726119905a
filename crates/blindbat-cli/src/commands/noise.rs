//! Noise command implementation
//!
//! Renders a single band-limited noise burst between explicit band edges,
//! without settings mapping or trailing silence.

use anyhow::{Context, Result};
use std::process::ExitCode;

use blindbat_dsp::ClickParams;

use super::json_output::JsonError;
use super::render::{self, print_json_failure, RenderJob};

/// Run the noise command
///
/// # Arguments
/// * `min_freq` - Lower band edge in Hz
/// * `max_freq` - Upper band edge in Hz
/// * `samples` - Sample budget before cropping
/// * `sample_rate` - Output sample rate in Hz
/// * `gain` - Linear gain before quantization
/// * `seed` - Phase seed (random when absent)
/// * `out_path` - Destination WAV path
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on error
#[allow(clippy::too_many_arguments)]
pub fn run(
    min_freq: f32,
    max_freq: f32,
    samples: usize,
    sample_rate: u32,
    gain: f32,
    seed: Option<u32>,
    out_path: &str,
    json_output: bool,
) -> Result<ExitCode> {
    let params = ClickParams::new(min_freq, max_freq, samples, sample_rate).with_gain(gain);
    if let Err(e) = params.validate() {
        if json_output {
            return print_json_failure(JsonError::from(&e));
        }
        return Err(e).context("Invalid noise parameters");
    }

    let job = RenderJob {
        params,
        seed,
        out_path: out_path.to_string(),
    };
    render::run(&job, "noise", json_output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blindbat_dsp::wav::read_wav;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_run_writes_burst_within_budget() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("noise.wav");

        let code = run(
            800.0,
            1200.0,
            4800,
            48000,
            8192.0,
            Some(7),
            &out.to_string_lossy(),
            false,
        )
        .unwrap();
        assert_eq!(code, ExitCode::SUCCESS);

        let decoded = read_wav(&fs::read(&out).unwrap()).unwrap();
        assert!(decoded.frames() > 0);
        assert!(decoded.frames() <= 4800);
    }

    #[test]
    fn test_run_rejects_inverted_band() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("noise.wav");
        let path = out.to_string_lossy();

        let err = run(1200.0, 800.0, 4800, 48000, 1.0, None, &path, false).unwrap_err();
        assert!(format!("{:#}", err).contains("max_freq_hz"));
        assert_eq!(
            run(1200.0, 800.0, 4800, 48000, 1.0, None, &path, true).unwrap(),
            ExitCode::from(1)
        );
    }
}
