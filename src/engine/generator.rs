//! Generation run orchestration
//!
//! Derives the run length from the config, drives the signal chain one
//! sample at a time, discards the warm-up period and feeds every later
//! sample to both the WAV payload and the level meter.

use std::path::Path;

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::dsp::{linear_to_db, PrngTier, SignalChain};
use crate::engine::config::{GenerationConfig, SampleRate, SAMPLE_SIZE};
use crate::engine::meter::LevelMeter;
use crate::engine::wav::{encode_sample, WavHeader};
use crate::error::{GeneratorError, Result};

/// Samples between progress reports
pub const PROGRESS_BATCH: u64 = 10_000;

/// Name given to generated files
pub const DEFAULT_FILENAME: &str = "pink_noise_output.wav";

/// Sample counts for one run, derived from a validated config
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunPlan {
    pub tier: PrngTier,
    /// Samples generated including warm-up; a multiple of the period
    pub total_samples: u64,
    /// Samples written after warm-up
    pub output_samples: u64,
    /// WAV payload size in bytes
    pub data_length: u64,
}

impl RunPlan {
    /// Work out run length for `config`
    pub fn for_config(config: &GenerationConfig) -> Result<Self> {
        config.validate()?;

        let tier = PrngTier::for_rate(config.sample_rate);
        let period = u64::from(tier.period);
        let overflow = || GeneratorError::HeaderOverflow {
            data_length: u64::MAX,
        };

        let mut total_samples = period
            .checked_add(config.requested_samples())
            .ok_or_else(overflow)?;
        let diff = total_samples % period;
        if diff != 0 {
            total_samples = total_samples
                .checked_add(period - diff)
                .ok_or_else(overflow)?;
        }

        let output_samples = total_samples - period;
        let data_length = output_samples
            .checked_mul(u64::from(config.channels) * SAMPLE_SIZE as u64)
            .ok_or_else(overflow)?;

        Ok(RunPlan {
            tier,
            total_samples,
            output_samples,
            data_length,
        })
    }

    /// Number of leading samples discarded to settle filter state
    pub fn warmup_samples(&self) -> u64 {
        u64::from(self.tier.period)
    }
}

/// Output of a successful run
#[derive(Debug, Clone)]
pub struct GenerationResult {
    data: Vec<u8>,
    rms_db: f64,
    peak_db: f64,
    duration_secs: f64,
    filename: String,
    preview: Vec<f64>,
    sample_rate: SampleRate,
    channels: u16,
    output_samples: u64,
}

impl GenerationResult {
    /// Complete WAV file bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// AES17 RMS level in dB
    pub fn rms_db(&self) -> f64 {
        self.rms_db
    }

    /// Largest absolute output sample in dBFS
    pub fn peak_db(&self) -> f64 {
        self.peak_db
    }

    /// Duration that was requested
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// Duration actually written, after period rounding
    pub fn actual_duration_secs(&self) -> f64 {
        self.output_samples as f64 / f64::from(self.sample_rate.hz())
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Strided output samples for waveform display
    pub fn preview(&self) -> &[f64] {
        &self.preview
    }

    pub fn sample_rate(&self) -> SampleRate {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn output_samples(&self) -> u64 {
        self.output_samples
    }

    /// Hex SHA-256 of the file bytes
    pub fn sha256(&self) -> String {
        format!("{:x}", Sha256::digest(&self.data))
    }

    /// Write the WAV file to `path`
    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, &self.data)?;
        info!("Wrote {} bytes to {}", self.data.len(), path.display());
        Ok(())
    }

    /// Metadata summary for sidecar output
    pub fn report(&self) -> GenerationReport {
        GenerationReport {
            filename: self.filename.clone(),
            sample_rate: self.sample_rate.hz(),
            channels: self.channels,
            requested_duration_secs: self.duration_secs,
            actual_duration_secs: self.actual_duration_secs(),
            output_samples: self.output_samples,
            rms_db: self.rms_db,
            peak_db: self.peak_db,
            sha256: self.sha256(),
            generated_at: Utc::now(),
        }
    }
}

/// Serializable run summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub filename: String,
    pub sample_rate: u32,
    pub channels: u16,
    pub requested_duration_secs: f64,
    pub actual_duration_secs: f64,
    pub output_samples: u64,
    pub rms_db: f64,
    pub peak_db: f64,
    pub sha256: String,
    pub generated_at: DateTime<Utc>,
}

impl GenerationReport {
    /// Write as pretty-printed JSON
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Blocking generator with an optional progress observer
pub struct PinkNoiseGenerator<'a> {
    config: GenerationConfig,
    on_progress: Option<Box<dyn FnMut(f64) + Send + 'a>>,
}

impl<'a> PinkNoiseGenerator<'a> {
    pub fn new(config: GenerationConfig) -> Self {
        Self {
            config,
            on_progress: None,
        }
    }

    /// Call `callback` with the completed fraction every `PROGRESS_BATCH` samples
    pub fn on_progress(mut self, callback: impl FnMut(f64) + Send + 'a) -> Self {
        self.on_progress = Some(Box::new(callback));
        self
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Run to completion
    pub fn generate(mut self) -> Result<GenerationResult> {
        let config = self.config;
        let plan = RunPlan::for_config(&config)?;
        let rate = config.sample_rate.hz();
        let header = WavHeader::pcm24(config.channels, rate, plan.data_length)?;

        info!(
            "Generating pink noise: {}, {} channel(s), {} output samples ({} requested)",
            config.sample_rate,
            config.channels,
            plan.output_samples,
            config.requested_samples()
        );

        let file_len = header.file_len();
        let mut data = Vec::new();
        data.try_reserve_exact(file_len)
            .map_err(|e| GeneratorError::OutOfMemory {
                details: format!("cannot allocate {} byte output buffer: {}", file_len, e),
            })?;
        data.extend_from_slice(&header.to_bytes());

        let mut chain = SignalChain::new(plan.tier, f64::from(rate));
        let mut meter = LevelMeter::new(plan.output_samples);
        let warmup = plan.warmup_samples();
        let channels = usize::from(config.channels);

        for i in 0..plan.total_samples {
            if i % PROGRESS_BATCH == 0 {
                let fraction = i as f64 / plan.total_samples as f64;
                if let Some(callback) = self.on_progress.as_mut() {
                    callback(fraction);
                }
                debug!("Progress {:.1}%", fraction * 100.0);
            }

            let sample = chain.next_sample();

            if i >= warmup {
                meter.push(sample);

                let bytes = encode_sample(sample);
                for _ in 0..channels {
                    data.extend_from_slice(&bytes);
                }
            }
        }

        debug_assert_eq!(data.len(), file_len);

        let rms_db = meter.rms_db();
        let peak_db = linear_to_db(meter.peak());
        info!(
            "{:.2} seconds, RMS (dB) = {:.2}, peak (dBFS) = {:.2}",
            plan.output_samples as f64 / f64::from(rate),
            rms_db,
            peak_db
        );

        Ok(GenerationResult {
            data,
            rms_db,
            peak_db,
            duration_secs: config.duration_secs,
            filename: DEFAULT_FILENAME.to_string(),
            preview: meter.into_preview(),
            sample_rate: config.sample_rate,
            channels: config.channels,
            output_samples: plan.output_samples,
        })
    }
}

/// Generate without progress reporting
pub fn generate(config: GenerationConfig) -> Result<GenerationResult> {
    PinkNoiseGenerator::new(config).generate()
}
