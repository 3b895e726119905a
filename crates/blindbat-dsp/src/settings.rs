//! User-facing click settings and their mapping to [`ClickParams`].
//!
//! Settings are stored as slider positions: two percentiles mapped
//! geometrically onto frequency ranges, a click rate and a click length.
//! Serialized keys are camelCase so stored preference files stay readable
//! by older builds.

use serde::{Deserialize, Serialize};

use crate::click::ClickParams;
use crate::error::{DspError, DspResult};

/// Centre frequency at percentile 0, in Hz.
pub const MIN_CENTER_FREQUENCY: f32 = 200.0;
/// Ratio between the centre frequency at percentile 100 and at 0.
pub const CENTER_FREQUENCY_RATIO: f32 = 50.0;
/// Bandwidth at percentile 0, in Hz.
pub const MIN_BANDWIDTH: f32 = 10.0;
/// Ratio between the bandwidth at percentile 100 and at 0.
pub const BANDWIDTH_RATIO: f32 = 300.0;
/// Lowest band edge ever requested, in Hz.
pub const MIN_BAND_EDGE: f32 = 100.0;

fn default_percentile() -> f32 {
    50.0
}

fn default_clicks_per_second() -> f32 {
    1.0
}

fn default_click_length_ms() -> f32 {
    30.0
}

/// Persisted click configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickSettings {
    /// Position of the frequency slider, 0 to 100.
    #[serde(default = "default_percentile")]
    pub frequency_percentile: f32,
    /// Position of the bandwidth slider, 0 to 100.
    #[serde(default = "default_percentile")]
    pub frequency_bandwidth_percentile: f32,
    /// Clicks per second, 1 to 10.
    #[serde(rename = "clickFrequency", default = "default_clicks_per_second")]
    pub clicks_per_second: f32,
    /// Click duration in milliseconds, 5 to 100.
    #[serde(rename = "clickLength", default = "default_click_length_ms")]
    pub click_length_ms: f32,
}

impl Default for ClickSettings {
    fn default() -> Self {
        Self {
            frequency_percentile: default_percentile(),
            frequency_bandwidth_percentile: default_percentile(),
            clicks_per_second: default_clicks_per_second(),
            click_length_ms: default_click_length_ms(),
        }
    }
}

impl ClickSettings {
    /// Parses settings from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes settings as pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Band centre in Hz: 200 Hz at percentile 0 up to 10 kHz at 100.
    pub fn center_frequency(&self) -> f32 {
        MIN_CENTER_FREQUENCY * CENTER_FREQUENCY_RATIO.powf(self.frequency_percentile / 100.0)
    }

    /// Band width in Hz: 10 Hz at percentile 0 up to 3 kHz at 100.
    pub fn bandwidth(&self) -> f32 {
        MIN_BANDWIDTH * BANDWIDTH_RATIO.powf(self.frequency_bandwidth_percentile / 100.0)
    }

    /// Band edges `(min, max)` in Hz, with the lower edge held at or above
    /// [`MIN_BAND_EDGE`].
    pub fn band(&self) -> (f32, f32) {
        let center = self.center_frequency();
        let half = self.bandwidth() / 2.0;
        ((center - half).max(MIN_BAND_EDGE), center + half)
    }

    /// Sample budget of one click burst.
    pub fn click_samples(&self, sample_rate: u32) -> usize {
        (sample_rate as f64 * self.click_length_ms as f64 / 1000.0) as usize
    }

    /// Samples from one click onset to the next.
    pub fn period_samples(&self, sample_rate: u32) -> usize {
        (sample_rate as f64 / self.clicks_per_second as f64) as usize
    }

    /// Checks every field against its slider range.
    ///
    /// # Errors
    /// `InvalidParameter` naming the first out-of-range field.
    pub fn validate(&self) -> DspResult<()> {
        check_range("frequencyPercentile", self.frequency_percentile, 0.0, 100.0)?;
        check_range(
            "frequencyBandwidthPercentile",
            self.frequency_bandwidth_percentile,
            0.0,
            100.0,
        )?;
        check_range("clickFrequency", self.clicks_per_second, 1.0, 10.0)?;
        check_range("clickLength", self.click_length_ms, 5.0, 100.0)
    }

    /// Converts the settings into render parameters.
    ///
    /// # Errors
    /// `InvalidParameter` when a setting is out of range or the resulting
    /// parameters are unusable (for example a zero sample rate).
    pub fn to_params(&self, sample_rate: u32, gain: f32) -> DspResult<ClickParams> {
        self.validate()?;
        let (min_freq, max_freq) = self.band();
        let samples = self.click_samples(sample_rate);
        let params = ClickParams::new(min_freq, max_freq, samples, sample_rate)
            .with_gain(gain)
            .with_period(self.period_samples(sample_rate));
        params.validate()?;
        Ok(params)
    }
}

fn check_range(name: &str, value: f32, min: f32, max: f32) -> DspResult<()> {
    if !(min..=max).contains(&value) {
        return Err(DspError::invalid_param(
            name,
            format!("must be in [{}, {}], got {}", min, max, value),
        ));
    }
    Ok(())
}

/// Spoken form of a frequency: "N Hertz" below 1 kHz, otherwise
/// "A.B Kilohertz" with the tenths truncated.
pub fn format_hertz(hz: f32) -> String {
    let whole = hz as i64;
    if hz >= 1000.0 {
        format!("{}.{} Kilohertz", whole / 1000, whole % 1000 / 100)
    } else {
        format!("{} Hertz", whole)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use pretty_assertions::assert_eq;

    fn close(a: f32, b: f32, tol: f32) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn test_defaults() {
        let settings = ClickSettings::default();
        assert!(close(settings.center_frequency(), 1414.2, 0.1));
        assert!(close(settings.bandwidth(), 173.2, 0.1));

        let (lo, hi) = settings.band();
        assert!(close(lo, 1327.6, 0.1));
        assert!(close(hi, 1500.8, 0.1));
    }

    #[test]
    fn test_percentile_endpoints() {
        let low = ClickSettings {
            frequency_percentile: 0.0,
            frequency_bandwidth_percentile: 0.0,
            ..Default::default()
        };
        assert!(close(low.center_frequency(), 200.0, 1e-3));
        assert!(close(low.bandwidth(), 10.0, 1e-3));

        let high = ClickSettings {
            frequency_percentile: 100.0,
            frequency_bandwidth_percentile: 100.0,
            ..Default::default()
        };
        assert!(close(high.center_frequency(), 10000.0, 0.5));
        assert!(close(high.bandwidth(), 3000.0, 0.5));
    }

    #[test]
    fn test_lower_edge_is_clamped() {
        let settings = ClickSettings {
            frequency_percentile: 0.0,
            frequency_bandwidth_percentile: 100.0,
            ..Default::default()
        };
        let (lo, hi) = settings.band();
        assert_eq!(lo, MIN_BAND_EDGE);
        assert!(close(hi, 1700.0, 0.5));
    }

    #[test]
    fn test_sample_counts() {
        let settings = ClickSettings {
            clicks_per_second: 4.0,
            click_length_ms: 30.0,
            ..Default::default()
        };
        assert_eq!(settings.click_samples(48000), 1440);
        assert_eq!(settings.click_samples(44100), 1323);
        assert_eq!(settings.period_samples(48000), 12000);

        let thirds = ClickSettings {
            clicks_per_second: 3.0,
            ..Default::default()
        };
        assert_eq!(thirds.period_samples(44100), 14700);
    }

    #[test]
    fn test_to_params() {
        let params = ClickSettings::default().to_params(48000, 1000.0).unwrap();
        assert_eq!(params.sample_rate, 48000);
        assert_eq!(params.duration_samples, 1440);
        assert_eq!(params.period_samples, Some(48000));
        assert_eq!(params.gain, 1000.0);
    }

    #[test]
    fn test_validate_ranges() {
        let bad = [
            ClickSettings {
                frequency_percentile: 101.0,
                ..Default::default()
            },
            ClickSettings {
                frequency_bandwidth_percentile: -1.0,
                ..Default::default()
            },
            ClickSettings {
                clicks_per_second: 0.0,
                ..Default::default()
            },
            ClickSettings {
                click_length_ms: 200.0,
                ..Default::default()
            },
            ClickSettings {
                click_length_ms: f32::NAN,
                ..Default::default()
            },
        ];
        for settings in bad {
            let err = settings.to_params(48000, 1.0).unwrap_err();
            assert_eq!(err.kind(), FailureKind::InvalidParameter);
        }

        let err = ClickSettings::default().to_params(0, 1.0).unwrap_err();
        assert_eq!(err.kind(), FailureKind::InvalidParameter);
    }

    #[test]
    fn test_json_keys_and_defaults() {
        let json = ClickSettings::default().to_json_pretty().unwrap();
        assert!(json.contains("\"frequencyPercentile\""));
        assert!(json.contains("\"frequencyBandwidthPercentile\""));
        assert!(json.contains("\"clickFrequency\""));
        assert!(json.contains("\"clickLength\""));

        let partial = ClickSettings::from_json(r#"{"clickFrequency": 5}"#).unwrap();
        assert_eq!(
            partial,
            ClickSettings {
                clicks_per_second: 5.0,
                ..Default::default()
            }
        );
        assert_eq!(ClickSettings::from_json("{}").unwrap(), ClickSettings::default());
    }

    #[test]
    fn test_format_hertz() {
        assert_eq!(format_hertz(999.9), "999 Hertz");
        assert_eq!(format_hertz(1414.2), "1.4 Kilohertz");
        assert_eq!(format_hertz(10000.0), "10.0 Kilohertz");
        assert_eq!(format_hertz(1050.0), "1.0 Kilohertz");
        assert_eq!(format_hertz(3.0), "3 Hertz");
    }
}
