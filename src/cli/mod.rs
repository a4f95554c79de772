//! CLI Module
//!
//! Command-line interface for the pink noise generator.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// SMPTE ST 2095-1 band-limited pink noise generator
#[derive(Parser, Debug)]
#[command(name = "smpte-pink")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress statistics and informational logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a pink noise WAV file
    #[command(name = "generate")]
    Generate {
        /// Output WAV file
        output: PathBuf,

        /// Select 96 kHz sample rate (default is 48 kHz)
        #[arg(short = '9', long = "96k", conflicts_with = "sample_rate")]
        high_rate: bool,

        /// Sample rate in Hz (48000 or 96000)
        #[arg(long)]
        sample_rate: Option<u32>,

        /// Number of output channels (all contain identical noise)
        #[arg(short, long)]
        channels: Option<u16>,

        /// Minimum duration in seconds; 0 selects the default of 10
        #[arg(short, long)]
        duration: Option<f64>,

        /// JSON generation config; flags override its values
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write a JSON report next to the audio
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Print format and level statistics of a WAV file
    #[command(name = "inspect")]
    Inspect {
        /// WAV file to inspect
        path: PathBuf,
    },
}
