//! CLI Tests
//!
//! Drive the command implementations against real files.

use std::path::Path;

use hound::WavReader;
use tempfile::tempdir;

use smpte_pink::cli::commands::{generate, inspect, GenerateOptions};
use smpte_pink::engine::{GenerationConfig, GenerationReport, SampleRate};

fn one_second(channels: u16) -> GenerateOptions<'static> {
    GenerateOptions {
        channels: Some(channels),
        duration: Some(1.0),
        ..Default::default()
    }
}

#[test]
fn test_generate_writes_readable_wav() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("noise.wav");

    let result = generate(&path, &one_second(2), None, true).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), result.data());

    let reader = WavReader::open(&path).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 48_000);
    assert_eq!(spec.bits_per_sample, 24);
    assert_eq!(reader.duration(), 524_288);
}

#[test]
fn test_generate_writes_report() {
    let dir = tempdir().unwrap();
    let wav = dir.path().join("noise.wav");
    let json = dir.path().join("noise.json");

    let result = generate(&wav, &one_second(1), Some(&json), true).unwrap();

    let text = std::fs::read_to_string(&json).unwrap();
    let report: GenerationReport = serde_json::from_str(&text).unwrap();
    assert_eq!(report.sha256, result.sha256());
    assert_eq!(report.output_samples, 524_288);
    assert_eq!(report.sample_rate, 48_000);
}

#[test]
fn test_generate_from_config_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.json");
    let config = GenerationConfig::new(SampleRate::Hz96000, 0.5).with_channels(3);
    std::fs::write(&config_path, serde_json::to_string(&config).unwrap()).unwrap();

    let options = GenerateOptions {
        config: Some(config_path.as_path()),
        ..Default::default()
    };
    let wav = dir.path().join("noise.wav");
    let result = generate(&wav, &options, None, true).unwrap();

    assert_eq!(result.sample_rate(), SampleRate::Hz96000);
    assert_eq!(result.channels(), 3);
    assert_eq!(result.output_samples(), 1_048_576);
}

#[test]
fn test_generate_rejects_unsupported_rate() {
    let dir = tempdir().unwrap();
    let wav = dir.path().join("noise.wav");
    let options = GenerateOptions {
        sample_rate: Some(44_100),
        ..Default::default()
    };

    let err = generate(&wav, &options, None, true).unwrap_err();
    assert_eq!(err.error_code(), "UNSUPPORTED_SAMPLE_RATE");
    assert!(!wav.exists(), "no file may be written on failure");
}

#[test]
fn test_inspect_generated_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("noise.wav");
    let result = generate(&path, &one_second(2), None, true).unwrap();

    let summary = inspect(&path, true).unwrap();
    assert!(summary.canonical_header);
    assert!(summary.channels_identical);
    assert_eq!(summary.channels, 2);
    assert_eq!(summary.frames, 524_288);
    assert!(summary.peak_db <= -9.5 + 1e-3);
    // 24-bit truncation moves the level by far less than a hundredth of a dB
    assert!((summary.rms_db - result.rms_db()).abs() < 0.01);
}

#[test]
fn test_inspect_rejects_non_wav() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("not_audio.wav");
    std::fs::write(&path, b"definitely not a RIFF file").unwrap();

    let err = inspect(Path::new(&path), true).unwrap_err();
    assert_eq!(err.error_code(), "INVALID_WAV");
}
