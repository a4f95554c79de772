//! Generation Engine Module
//!
//! Run orchestration around the signal chain:
//! - Configuration and validation
//! - Level metering and preview capture
//! - WAV container encoding

#[cfg(feature = "async-bridge")]
pub mod bridge;
pub mod config;
pub mod generator;
pub mod meter;
pub mod wav;

#[cfg(feature = "async-bridge")]
pub use bridge::spawn_generation;
pub use config::{GenerationConfig, SampleRate, DEFAULT_DURATION_SECS, MAX_CHANNELS, SAMPLE_SIZE};
pub use generator::{
    generate, GenerationReport, GenerationResult, PinkNoiseGenerator, RunPlan, DEFAULT_FILENAME,
    PROGRESS_BATCH,
};
pub use meter::{LevelMeter, AES17_CORRECTION_DB, PREVIEW_LENGTH};
pub use wav::{decode_sample, encode_sample, WavHeader, HEADER_LEN};
