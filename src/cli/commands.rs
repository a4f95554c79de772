//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use hound::{SampleFormat, WavReader};
use log::{info, warn};
use serde::Serialize;

use crate::dsp::linear_to_db;
use crate::engine::{
    GenerationConfig, GenerationResult, PinkNoiseGenerator, SampleRate, WavHeader,
    AES17_CORRECTION_DB, DEFAULT_DURATION_SECS, HEADER_LEN,
};
use crate::error::{GeneratorError, Result};

/// Command-line overrides for a generation run
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions<'a> {
    pub high_rate: bool,
    pub sample_rate: Option<u32>,
    pub channels: Option<u16>,
    pub duration: Option<f64>,
    pub config: Option<&'a Path>,
}

/// Merge a config file (if any) with command-line overrides
pub fn resolve_config(options: &GenerateOptions<'_>) -> Result<GenerationConfig> {
    let mut config = match options.config {
        Some(path) => {
            info!("Loading config: {}", path.display());
            GenerationConfig::from_json_file(path)?
        }
        None => GenerationConfig::default(),
    };

    if options.high_rate {
        config.sample_rate = SampleRate::Hz96000;
    } else if let Some(rate) = options.sample_rate {
        config.sample_rate = SampleRate::try_from(rate)?;
    }

    if let Some(channels) = options.channels {
        config.channels = channels;
    }

    // Zero keeps the command-line tool's historical meaning of "default"
    match options.duration {
        Some(d) if d == 0.0 => config.duration_secs = DEFAULT_DURATION_SECS,
        Some(d) => config.duration_secs = d,
        None => {}
    }

    config.validate()?;
    Ok(config)
}

/// Generate a WAV file and optional JSON report.
pub fn generate(
    output: &Path,
    options: &GenerateOptions<'_>,
    report: Option<&Path>,
    quiet: bool,
) -> Result<GenerationResult> {
    let config = resolve_config(options)?;
    info!("Generating into: {}", output.display());

    let mut last_decile = 0;
    let result = PinkNoiseGenerator::new(config)
        .on_progress(|fraction| {
            let decile = (fraction * 10.0) as u32;
            if decile > last_decile {
                last_decile = decile;
                info!("{}% complete", decile * 10);
            }
        })
        .generate()?;

    result.write_to(output)?;

    if let Some(report_path) = report {
        result.report().write_json(report_path)?;
        info!("Report written: {}", report_path.display());
    }

    if !quiet {
        println!(
            "{:.2} seconds, RMS (dB) = {:.2}",
            result.actual_duration_secs(),
            result.rms_db()
        );
    }

    Ok(result)
}

/// Format and level summary of a WAV file
#[derive(Debug, Clone, Serialize)]
pub struct InspectSummary {
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub frames: u64,
    pub duration_secs: f64,
    pub peak_db: f64,
    /// AES17 RMS of the first channel
    pub rms_db: f64,
    /// Whether every channel carries the same samples
    pub channels_identical: bool,
    /// Whether the file starts with the canonical 44-byte header
    pub canonical_header: bool,
}

/// Decode a WAV file and report its format and level.
pub fn inspect(path: &Path, quiet: bool) -> Result<InspectSummary> {
    if !path.exists() {
        return Err(GeneratorError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("file not found: {}", path.display()),
        )));
    }

    let canonical_header = read_canonical_header(path)?.is_some();
    if !canonical_header {
        warn!("{} does not use the canonical 44-byte header", path.display());
    }

    let mut reader = WavReader::open(path).map_err(|e| GeneratorError::InvalidWav {
        reason: format!("Failed to open WAV file: {}", e),
        source: Some(Box::new(e)),
    })?;

    let spec = reader.spec();
    if spec.sample_format != SampleFormat::Int
        || spec.bits_per_sample == 0
        || spec.bits_per_sample > 32
    {
        return Err(GeneratorError::InvalidWav {
            reason: format!(
                "{:?} {}-bit samples are not integer PCM",
                spec.sample_format, spec.bits_per_sample
            ),
            source: None,
        });
    }

    let channels = usize::from(spec.channels.max(1));
    let full_scale = f64::from(1u32 << (spec.bits_per_sample - 1));

    let mut energy = 0.0_f64;
    let mut peak = 0.0_f64;
    let mut frames = 0u64;
    let mut channels_identical = true;
    let mut frame_first = 0i32;

    for (index, sample) in reader.samples::<i32>().enumerate() {
        let value = sample.map_err(|e| GeneratorError::InvalidWav {
            reason: format!("Failed to read samples: {}", e),
            source: Some(Box::new(e)),
        })?;

        let normalized = f64::from(value) / full_scale;
        peak = peak.max(normalized.abs());

        if index % channels == 0 {
            frame_first = value;
            energy += normalized * normalized;
            frames += 1;
        } else if value != frame_first {
            channels_identical = false;
        }
    }

    let rms_db = if frames == 0 || energy <= 0.0 {
        f64::NEG_INFINITY
    } else {
        10.0 * (energy / frames as f64).log10() + AES17_CORRECTION_DB
    };

    let summary = InspectSummary {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        frames,
        duration_secs: frames as f64 / f64::from(spec.sample_rate.max(1)),
        peak_db: linear_to_db(peak),
        rms_db,
        channels_identical,
        canonical_header,
    };

    if !quiet {
        println!("File: {}", path.display());
        println!(
            "Format: {} Hz, {} channel(s), {}-bit",
            summary.sample_rate, summary.channels, summary.bits_per_sample
        );
        println!("{:.2} seconds ({} frames)", summary.duration_secs, summary.frames);
        println!("Peak (dBFS) = {:.2}", summary.peak_db);
        println!("RMS (dB) = {:.2}", summary.rms_db);
        if summary.channels > 1 {
            println!("Channels identical: {}", summary.channels_identical);
        }
    }

    Ok(summary)
}

/// Parse the leading header if the file uses the canonical layout
fn read_canonical_header(path: &Path) -> Result<Option<WavHeader>> {
    let mut head = [0u8; HEADER_LEN];
    let mut file = File::open(path)?;
    if file.read_exact(&mut head).is_err() {
        return Ok(None);
    }
    Ok(WavHeader::parse(&head).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let config = resolve_config(&GenerateOptions::default()).unwrap();
        assert_eq!(config, GenerationConfig::default());
    }

    #[test]
    fn test_resolve_overrides() {
        let options = GenerateOptions {
            high_rate: true,
            channels: Some(6),
            duration: Some(2.5),
            ..Default::default()
        };
        let config = resolve_config(&options).unwrap();
        assert_eq!(config.sample_rate, SampleRate::Hz96000);
        assert_eq!(config.channels, 6);
        assert_eq!(config.duration_secs, 2.5);
    }

    #[test]
    fn test_zero_duration_means_default() {
        let options = GenerateOptions {
            duration: Some(0.0),
            ..Default::default()
        };
        let config = resolve_config(&options).unwrap();
        assert_eq!(config.duration_secs, DEFAULT_DURATION_SECS);
    }

    #[test]
    fn test_unsupported_rate_fails() {
        let options = GenerateOptions {
            sample_rate: Some(44_100),
            ..Default::default()
        };
        let err = resolve_config(&options).unwrap_err();
        assert_eq!(err.error_code(), "UNSUPPORTED_SAMPLE_RATE");
    }

    #[test]
    fn test_negative_duration_fails() {
        let options = GenerateOptions {
            duration: Some(-3.0),
            ..Default::default()
        };
        assert!(resolve_config(&options).is_err());
    }

    #[test]
    fn test_inspect_missing_file() {
        let err = inspect(Path::new("/nonexistent/path/noise.wav"), true).unwrap_err();
        assert_eq!(err.error_code(), "IO_ERROR");
    }
}
