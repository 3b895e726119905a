//! Shared render-and-write path for `click` and `noise`.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::process::ExitCode;
use std::time::Instant;

use blindbat_dsp::rng::{create_rng, create_unseeded_rng};
use blindbat_dsp::wav::{compute_pcm_hash, HEADER_LEN};
use blindbat_dsp::{format_hertz, render_click, ClickParams, DspError};

use super::json_output::{error_codes, JsonError, RenderOutput, RenderResult};

/// A fully resolved render request.
#[derive(Debug, Clone)]
pub struct RenderJob {
    /// Validated pipeline parameters
    pub params: ClickParams,
    /// Phase seed; a fresh one is drawn when absent
    pub seed: Option<u32>,
    /// Destination WAV path
    pub out_path: String,
}

/// Failure of a render job, split so JSON output can report stable codes.
enum JobError {
    Dsp(DspError),
    Write(std::io::Error),
}

fn execute(job: &RenderJob) -> std::result::Result<(RenderResult, Vec<u8>), JobError> {
    let (seed, mut rng) = match job.seed {
        Some(seed) => (seed, create_rng(seed)),
        None => create_unseeded_rng(),
    };
    log::debug!("rendering with seed {}", seed);

    let wav = render_click(&job.params, &mut rng).map_err(JobError::Dsp)?;
    fs::write(&job.out_path, &wav).map_err(JobError::Write)?;

    let result = RenderResult {
        output_path: job.out_path.clone(),
        seed,
        sample_rate: job.params.sample_rate,
        min_freq_hz: job.params.min_freq_hz,
        max_freq_hz: job.params.max_freq_hz,
        gain: job.params.gain,
        frames: (wav.len() - HEADER_LEN) / 4,
        file_size: wav.len(),
        pcm_hash: compute_pcm_hash(&wav).unwrap_or_default(),
    };
    Ok((result, wav))
}

/// Run a render job
///
/// # Arguments
/// * `job` - The resolved request
/// * `label` - What is being rendered, for human output
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(job: &RenderJob, label: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(job)
    } else {
        run_human(job, label)
    }
}

fn run_human(job: &RenderJob, label: &str) -> Result<ExitCode> {
    let start = Instant::now();
    let params = &job.params;

    println!("{} {}", format!("Rendering {}:", label).cyan().bold(), job.out_path);
    println!(
        "  {} {:.1} - {:.1} Hz ({} to {})",
        "Band:".dimmed(),
        params.min_freq_hz,
        params.max_freq_hz,
        format_hertz(params.min_freq_hz),
        format_hertz(params.max_freq_hz)
    );
    println!(
        "  {} {} samples @ {} Hz, gain {}",
        "Burst:".dimmed(),
        params.duration_samples,
        params.sample_rate,
        params.gain
    );
    if let Some(period) = params.period_samples {
        println!("  {} {} samples", "Period:".dimmed(), period);
    }

    let (result, _) = match execute(job) {
        Ok(done) => done,
        Err(JobError::Dsp(e)) => {
            return Err(anyhow::Error::new(e).context(format!("Failed to render {}", label)));
        }
        Err(JobError::Write(e)) => {
            return Err(e).with_context(|| format!("Failed to write {}", job.out_path));
        }
    };

    println!("  {} {}", "Seed:".dimmed(), result.seed);
    println!("  {} {}", "Frames:".dimmed(), result.frames);
    println!("  {} {}", "PCM hash:".dimmed(), &result.pcm_hash[..16.min(result.pcm_hash.len())]);
    println!(
        "\n{} {} ({} bytes) in {:?}",
        "Wrote".green().bold(),
        result.output_path,
        result.file_size,
        start.elapsed()
    );

    Ok(ExitCode::SUCCESS)
}

fn run_json(job: &RenderJob) -> Result<ExitCode> {
    let (output, code) = match execute(job) {
        Ok((result, _)) => (RenderOutput::success(result), ExitCode::SUCCESS),
        Err(JobError::Dsp(e)) => (
            RenderOutput::failure(vec![JsonError::from(&e)]),
            ExitCode::from(1),
        ),
        Err(JobError::Write(e)) => (
            RenderOutput::failure(vec![
                JsonError::new(error_codes::FILE_WRITE, e.to_string()).with_file(&job.out_path)
            ]),
            ExitCode::from(1),
        ),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(code)
}

/// Prints a JSON failure for errors raised before a job could be built.
pub(crate) fn print_json_failure(error: JsonError) -> Result<ExitCode> {
    let output = RenderOutput::failure(vec![error]);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(ExitCode::from(1))
}
