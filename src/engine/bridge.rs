//! Worker-task bridge for async hosts
//!
//! Runs the blocking generator on tokio's blocking pool and publishes
//! progress through a watch channel, so an async UI can poll progress
//! without the sample loop ever suspending.

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::engine::config::GenerationConfig;
use crate::engine::generator::{GenerationResult, PinkNoiseGenerator};
use crate::error::Result;

/// Start a run in the background.
///
/// Returns the task handle and a receiver holding the latest progress
/// fraction. Must be called from within a tokio runtime. The run cannot
/// be cancelled; dropping the handle only discards the result.
pub fn spawn_generation(
    config: GenerationConfig,
) -> (JoinHandle<Result<GenerationResult>>, watch::Receiver<f64>) {
    let (tx, rx) = watch::channel(0.0);

    let handle = tokio::task::spawn_blocking(move || {
        PinkNoiseGenerator::new(config)
            .on_progress(move |fraction| {
                // No receivers left is fine; the host stopped watching
                let _ = tx.send(fraction);
            })
            .generate()
    });

    (handle, rx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::SampleRate;

    #[tokio::test]
    async fn test_spawned_run_matches_blocking_run() {
        let config = GenerationConfig::new(SampleRate::Hz48000, 1.0);
        let (handle, rx) = spawn_generation(config);

        let spawned = handle.await.unwrap().unwrap();
        let blocking = crate::engine::generate(config).unwrap();

        assert_eq!(spawned.data(), blocking.data());
        assert!(*rx.borrow() > 0.9);
    }

    #[tokio::test]
    async fn test_spawned_run_reports_config_errors() {
        let config = GenerationConfig::new(SampleRate::Hz48000, -1.0);
        let (handle, _rx) = spawn_generation(config);

        let err = handle.await.unwrap().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIGURATION");
    }
}
