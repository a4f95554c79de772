//! Generation parameters
//!
//! Validation happens here, before any per-run state is allocated.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GeneratorError, Result};

/// Bytes per sample per channel (24-bit PCM)
pub const SAMPLE_SIZE: usize = 3;

/// Duration used when none is given (seconds)
pub const DEFAULT_DURATION_SECS: f64 = 10.0;

/// Largest channel count whose block align fits the 16-bit header field
pub const MAX_CHANNELS: u16 = (u16::MAX as usize / SAMPLE_SIZE) as u16;

/// Supported output sample rates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum SampleRate {
    /// 48 kHz (512K-sample PRNG period)
    #[default]
    Hz48000,
    /// 96 kHz (1024K-sample PRNG period)
    Hz96000,
}

impl SampleRate {
    /// Rate in Hz
    pub fn hz(self) -> u32 {
        match self {
            SampleRate::Hz48000 => 48_000,
            SampleRate::Hz96000 => 96_000,
        }
    }
}

impl TryFrom<u32> for SampleRate {
    type Error = GeneratorError;

    fn try_from(rate: u32) -> Result<Self> {
        match rate {
            48_000 => Ok(SampleRate::Hz48000),
            96_000 => Ok(SampleRate::Hz96000),
            _ => Err(GeneratorError::UnsupportedSampleRate { rate }),
        }
    }
}

impl From<SampleRate> for u32 {
    fn from(rate: SampleRate) -> u32 {
        rate.hz()
    }
}

impl fmt::Display for SampleRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Hz", self.hz())
    }
}

/// What to generate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Output sample rate
    pub sample_rate: SampleRate,
    /// Minimum output duration in seconds; rounded up to whole PRNG periods
    pub duration_secs: f64,
    /// Number of identical output channels
    pub channels: u16,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            sample_rate: SampleRate::Hz48000,
            duration_secs: DEFAULT_DURATION_SECS,
            channels: 1,
        }
    }
}

impl GenerationConfig {
    /// Mono config at `sample_rate` for `duration_secs`
    pub fn new(sample_rate: SampleRate, duration_secs: f64) -> Self {
        Self {
            sample_rate,
            duration_secs,
            channels: 1,
        }
    }

    pub fn with_channels(mut self, channels: u16) -> Self {
        self.channels = channels;
        self
    }

    pub fn with_duration(mut self, duration_secs: f64) -> Self {
        self.duration_secs = duration_secs;
        self
    }

    /// Check duration and channel count
    pub fn validate(&self) -> Result<()> {
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(GeneratorError::invalid_config(
                "duration_secs",
                self.duration_secs,
                "a finite number of seconds > 0",
            ));
        }

        if self.channels == 0 || self.channels > MAX_CHANNELS {
            return Err(GeneratorError::invalid_config(
                "channels",
                self.channels,
                format!("1-{}", MAX_CHANNELS),
            ));
        }

        Ok(())
    }

    /// Samples the caller asked for, before period rounding
    pub fn requested_samples(&self) -> u64 {
        (self.duration_secs * f64::from(self.sample_rate.hz())).ceil() as u64
    }

    /// Load a config from a JSON file
    pub fn from_json_file(path: &std::path::Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: GenerationConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }
}
