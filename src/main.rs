//! smpte-pink CLI
//!
//! Command-line front end for the band-limited pink noise generator.

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::info;

use smpte_pink::cli::commands::{self, GenerateOptions};
use smpte_pink::cli::{Cli, Commands};
use smpte_pink::GeneratorError;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    let default_filter = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    info!("smpte-pink v{}", env!("CARGO_PKG_VERSION"));

    let result = match cli.command {
        Some(cmd) => handle_command(cmd, cli.quiet),
        None => {
            println!("smpte-pink v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    };

    if let Err(err) = &result {
        if let Some(gen_err) = err.downcast_ref::<GeneratorError>() {
            eprintln!("[{}]", gen_err.error_code());
            for suggestion in gen_err.recovery_suggestions() {
                eprintln!("  - {}", suggestion);
            }
        }
    }

    result
}

fn handle_command(cmd: Commands, quiet: bool) -> anyhow::Result<()> {
    match cmd {
        Commands::Generate {
            output,
            high_rate,
            sample_rate,
            channels,
            duration,
            config,
            report,
        } => {
            let options = GenerateOptions {
                high_rate,
                sample_rate,
                channels,
                duration,
                config: config.as_deref(),
            };
            commands::generate(&output, &options, report.as_deref(), quiet)
                .with_context(|| format!("failed to generate {}", output.display()))?;
        }
        Commands::Inspect { path } => {
            commands::inspect(&path, quiet)
                .with_context(|| format!("failed to inspect {}", path.display()))?;
        }
    }
    Ok(())
}
