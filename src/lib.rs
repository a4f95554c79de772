//! smpte-pink - Band-Limited Pink Noise Generator
//!
//! Synthesizes the SMPTE ST 2095-1 calibration signal: seeded white noise
//! shaped to a pink spectrum, band-limited to 10 Hz - 22.4 kHz,
//! hard-limited at -9.5 dBFS and written as 24-bit PCM WAV.
//!
//! # Architecture
//!
//! - `dsp`: per-sample stages (noise source, pink network, biquad cascade, limiter)
//! - `engine`: run planning, metering, WAV encoding, the generator itself
//! - `cli`: command-line front end
//!
//! # Example
//! ```no_run
//! use smpte_pink::engine::{generate, GenerationConfig, SampleRate};
//!
//! let result = generate(GenerationConfig::new(SampleRate::Hz48000, 10.0))?;
//! println!("RMS (dB) = {:.2}", result.rms_db());
//! # Ok::<(), smpte_pink::GeneratorError>(())
//! ```

pub mod cli;
pub mod dsp;
pub mod engine;
pub mod error;

pub use engine::{generate, GenerationConfig, GenerationResult, PinkNoiseGenerator, SampleRate};
pub use error::{GeneratorError, Result};
