//! Inspect command implementation
//!
//! Parses a WAV file written by `click` or `noise` and reports its header
//! fields, duration, PCM hash and dominant frequency.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::process::ExitCode;

use blindbat_dsp::analysis::dominant_frequency;
use blindbat_dsp::format_hertz;
use blindbat_dsp::wav::{compute_pcm_hash, read_wav, DecodedWav};

use super::json_output::{error_codes, InspectOutput, InspectResult, JsonError};

fn summarize(input_path: &str, data: &[u8], wav: &DecodedWav) -> InspectResult {
    let first = wav.channel(0);
    let dual_mono = (1..wav.format.channels as usize).all(|c| wav.channel(c) == first);

    InspectResult {
        input_path: input_path.to_string(),
        channels: wav.format.channels,
        sample_rate: wav.format.sample_rate,
        bits_per_sample: wav.format.bits_per_sample,
        riff_size: wav.riff_size,
        data_size: wav.data_size,
        frames: wav.frames(),
        duration_seconds: wav.duration_seconds(),
        dual_mono,
        dominant_frequency_hz: dominant_frequency(&wav.first_channel_f32(), wav.format.sample_rate),
        pcm_hash: compute_pcm_hash(data).unwrap_or_default(),
        file_hash: blake3::hash(data).to_hex().to_string(),
    }
}

/// Run the inspect command
///
/// # Arguments
/// * `input_path` - WAV file to inspect
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(input_path: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(input_path)
    } else {
        run_human(input_path)
    }
}

fn run_human(input_path: &str) -> Result<ExitCode> {
    let data =
        fs::read(input_path).with_context(|| format!("Failed to read file: {}", input_path))?;
    let wav = read_wav(&data).with_context(|| format!("Failed to parse WAV: {}", input_path))?;
    let result = summarize(input_path, &data, &wav);

    println!("{} {}", "Inspecting:".cyan().bold(), input_path);
    println!(
        "  {} {} ch, {} Hz, {}-bit",
        "Format:".dimmed(),
        result.channels,
        result.sample_rate,
        result.bits_per_sample
    );
    println!(
        "  {} RIFF {} bytes, data {} bytes",
        "Sizes:".dimmed(),
        result.riff_size,
        result.data_size
    );
    println!(
        "  {} {} frames ({:.3} s)",
        "Length:".dimmed(),
        result.frames,
        result.duration_seconds
    );
    println!(
        "  {} {}",
        "Dual mono:".dimmed(),
        if result.dual_mono { "yes".green() } else { "no".yellow() }
    );
    println!(
        "  {} {:.1} Hz ({})",
        "Dominant:".dimmed(),
        result.dominant_frequency_hz,
        format_hertz(result.dominant_frequency_hz)
    );
    println!("  {} {}", "PCM hash:".dimmed(), result.pcm_hash);
    println!("  {} {}", "File hash:".dimmed(), result.file_hash);

    Ok(ExitCode::SUCCESS)
}

fn run_json(input_path: &str) -> Result<ExitCode> {
    let output = match fs::read(input_path) {
        Err(e) => InspectOutput::failure(vec![
            JsonError::new(error_codes::FILE_READ, e.to_string()).with_file(input_path)
        ]),
        Ok(data) => match read_wav(&data) {
            Ok(wav) => InspectOutput::success(summarize(input_path, &data, &wav)),
            Err(e) => InspectOutput::failure(vec![JsonError::from(&e).with_file(input_path)]),
        },
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
