//! BlindBat CLI - render band-limited noise clicks for tinnitus masking
//!
//! This binary renders looping click buffers as WAV files and inspects
//! existing ones.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use blindbat_cli::commands;
use blindbat_cli::commands::click::ClickArgs;
use blindbat_dsp::wav::DEFAULT_SAMPLE_RATE;
use blindbat_dsp::DEFAULT_GAIN;

/// BlindBat - Band-limited noise clicks for tinnitus masking
#[derive(Parser)]
#[command(name = "blindbat")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one click period (burst plus silence) from settings
    Click {
        /// Settings JSON file (camelCase keys; missing keys use defaults)
        #[arg(long)]
        settings: Option<String>,

        /// Frequency slider position, 0-100 (200 Hz to 10 kHz)
        #[arg(long)]
        frequency_percentile: Option<f32>,

        /// Bandwidth slider position, 0-100 (10 Hz to 3 kHz)
        #[arg(long)]
        bandwidth_percentile: Option<f32>,

        /// Clicks per second, 1-10
        #[arg(long)]
        clicks_per_second: Option<f32>,

        /// Click length in milliseconds, 5-100
        #[arg(long)]
        click_length_ms: Option<f32>,

        /// Sample rate in Hz
        #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
        sample_rate: u32,

        /// Linear gain applied before 16-bit quantization
        #[arg(long, default_value_t = DEFAULT_GAIN)]
        gain: f32,

        /// Phase seed (random when omitted)
        #[arg(long)]
        seed: Option<u32>,

        /// Output WAV path
        #[arg(short, long)]
        out: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Render a single noise burst between explicit band edges
    Noise {
        /// Lower band edge in Hz
        #[arg(long)]
        min_freq: f32,

        /// Upper band edge in Hz
        #[arg(long)]
        max_freq: f32,

        /// Sample budget before zero-crossing crop
        #[arg(long)]
        samples: usize,

        /// Sample rate in Hz
        #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
        sample_rate: u32,

        /// Linear gain applied before 16-bit quantization
        #[arg(long, default_value_t = DEFAULT_GAIN)]
        gain: f32,

        /// Phase seed (random when omitted)
        #[arg(long)]
        seed: Option<u32>,

        /// Output WAV path
        #[arg(short, long)]
        out: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print header fields, duration, PCM hash and dominant frequency of a WAV file
    Inspect {
        /// WAV file to inspect
        #[arg(short, long)]
        input: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "warn"),
    );

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Click {
            settings,
            frequency_percentile,
            bandwidth_percentile,
            clicks_per_second,
            click_length_ms,
            sample_rate,
            gain,
            seed,
            out,
            json,
        } => {
            let args = ClickArgs {
                settings,
                frequency_percentile,
                bandwidth_percentile,
                clicks_per_second,
                click_length_ms,
            };
            commands::click::run(&args, sample_rate, gain, seed, &out, json)
        }
        Commands::Noise {
            min_freq,
            max_freq,
            samples,
            sample_rate,
            gain,
            seed,
            out,
            json,
        } => commands::noise::run(
            min_freq,
            max_freq,
            samples,
            sample_rate,
            gain,
            seed,
            &out,
            json,
        ),
        Commands::Inspect { input, json } => commands::inspect::run(&input, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_click_defaults() {
        let cli = Cli::try_parse_from(["blindbat", "click", "--out", "click.wav"]).unwrap();
        match cli.command {
            Commands::Click {
                settings,
                frequency_percentile,
                sample_rate,
                gain,
                seed,
                out,
                json,
                ..
            } => {
                assert!(settings.is_none());
                assert!(frequency_percentile.is_none());
                assert_eq!(sample_rate, 48000);
                assert_eq!(gain, DEFAULT_GAIN);
                assert!(seed.is_none());
                assert_eq!(out, "click.wav");
                assert!(!json);
            }
            _ => panic!("expected click command"),
        }
    }

    #[test]
    fn test_cli_parses_click_overrides() {
        let cli = Cli::try_parse_from([
            "blindbat",
            "click",
            "--settings",
            "prefs.json",
            "--frequency-percentile",
            "75",
            "--bandwidth-percentile",
            "20",
            "--clicks-per-second",
            "3",
            "--click-length-ms",
            "45",
            "--sample-rate",
            "44100",
            "--gain",
            "1000",
            "--seed",
            "9",
            "-o",
            "out.wav",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Click {
                settings,
                frequency_percentile,
                bandwidth_percentile,
                clicks_per_second,
                click_length_ms,
                sample_rate,
                gain,
                seed,
                out,
                json,
            } => {
                assert_eq!(settings.as_deref(), Some("prefs.json"));
                assert_eq!(frequency_percentile, Some(75.0));
                assert_eq!(bandwidth_percentile, Some(20.0));
                assert_eq!(clicks_per_second, Some(3.0));
                assert_eq!(click_length_ms, Some(45.0));
                assert_eq!(sample_rate, 44100);
                assert_eq!(gain, 1000.0);
                assert_eq!(seed, Some(9));
                assert_eq!(out, "out.wav");
                assert!(json);
            }
            _ => panic!("expected click command"),
        }
    }

    #[test]
    fn test_cli_requires_out_for_click() {
        let err = Cli::try_parse_from(["blindbat", "click"]).err().unwrap();
        assert!(err.to_string().contains("--out"));
    }

    #[test]
    fn test_cli_parses_noise() {
        let cli = Cli::try_parse_from([
            "blindbat",
            "noise",
            "--min-freq",
            "800",
            "--max-freq",
            "1200",
            "--samples",
            "4800",
            "--out",
            "noise.wav",
        ])
        .unwrap();
        match cli.command {
            Commands::Noise {
                min_freq,
                max_freq,
                samples,
                sample_rate,
                seed,
                ..
            } => {
                assert_eq!(min_freq, 800.0);
                assert_eq!(max_freq, 1200.0);
                assert_eq!(samples, 4800);
                assert_eq!(sample_rate, 48000);
                assert!(seed.is_none());
            }
            _ => panic!("expected noise command"),
        }
    }

    #[test]
    fn test_cli_requires_band_for_noise() {
        let err = Cli::try_parse_from([
            "blindbat",
            "noise",
            "--max-freq",
            "1200",
            "--samples",
            "10",
            "--out",
            "x.wav",
        ])
        .err()
        .unwrap();
        assert!(err.to_string().contains("--min-freq"));
    }

    #[test]
    fn test_cli_parses_inspect() {
        let cli = Cli::try_parse_from(["blindbat", "inspect", "--input", "click.wav", "--json"])
            .unwrap();
        match cli.command {
            Commands::Inspect { input, json } => {
                assert_eq!(input, "click.wav");
                assert!(json);
            }
            _ => panic!("expected inspect command"),
        }
    }
}
