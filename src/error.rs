//! Error handling for smpte-pink
//!
//! Every failure happens before any output is produced: a run either
//! returns a complete result or one of these errors.

use thiserror::Error;

/// Result type alias for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Main error type for generator operations
#[derive(Error, Debug)]
pub enum GeneratorError {
    // Configuration Errors
    #[error("Invalid configuration: {param} = {value} (expected {expected})")]
    InvalidConfiguration {
        param: String,
        value: String,
        expected: String,
    },

    #[error("Unsupported sample rate: {rate} Hz (supported: 48000, 96000)")]
    UnsupportedSampleRate { rate: u32 },

    // Resource Errors
    #[error("Out of memory: {details}")]
    OutOfMemory { details: String },

    #[error("Output too large for a RIFF header: {data_length} payload bytes")]
    HeaderOverflow { data_length: u64 },

    // Container Errors
    #[error("Invalid WAV file: {reason}")]
    InvalidWav {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GeneratorError {
    /// Shorthand for an `InvalidConfiguration` error
    pub fn invalid_config(
        param: impl Into<String>,
        value: impl ToString,
        expected: impl Into<String>,
    ) -> Self {
        GeneratorError::InvalidConfiguration {
            param: param.into(),
            value: value.to_string(),
            expected: expected.into(),
        }
    }

    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            GeneratorError::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            GeneratorError::UnsupportedSampleRate { .. } => "UNSUPPORTED_SAMPLE_RATE",
            GeneratorError::OutOfMemory { .. } => "OUT_OF_MEMORY",
            GeneratorError::HeaderOverflow { .. } => "HEADER_OVERFLOW",
            GeneratorError::InvalidWav { .. } => "INVALID_WAV",
            GeneratorError::Io(_) => "IO_ERROR",
            GeneratorError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Check if retrying with a corrected configuration can succeed.
    ///
    /// Generation is deterministic, so retrying the same request never helps.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GeneratorError::InvalidConfiguration { .. }
                | GeneratorError::UnsupportedSampleRate { .. }
                | GeneratorError::OutOfMemory { .. }
                | GeneratorError::HeaderOverflow { .. }
        )
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            GeneratorError::InvalidConfiguration { .. } => vec![
                "Duration must be a positive number of seconds",
                "Channel count must be at least 1",
            ],
            GeneratorError::UnsupportedSampleRate { .. } => vec![
                "Use 48000 Hz (default) or 96000 Hz",
                "Pass --96k to select the high-rate tier",
            ],
            GeneratorError::OutOfMemory { .. } => vec![
                "Request a shorter duration",
                "Generate fewer channels and duplicate them downstream",
            ],
            GeneratorError::HeaderOverflow { .. } => vec![
                "WAV files are limited to 4 GiB of sample data",
                "Reduce duration or channel count",
            ],
            GeneratorError::InvalidWav { .. } => vec![
                "Only canonical 44-byte PCM headers are recognized",
                "Regenerate the file with `smpte-pink generate`",
            ],
            _ => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = GeneratorError::UnsupportedSampleRate { rate: 44100 };
        assert_eq!(err.error_code(), "UNSUPPORTED_SAMPLE_RATE");
        assert!(err.to_string().contains("44100"));
    }

    #[test]
    fn test_recovery_suggestions() {
        let err = GeneratorError::invalid_config("channels", 0, ">= 1");
        assert!(!err.recovery_suggestions().is_empty());
        assert!(err.is_recoverable());
        assert_eq!(err.error_code(), "INVALID_CONFIGURATION");
    }

    #[test]
    fn test_io_not_recoverable() {
        let err: GeneratorError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(!err.is_recoverable());
        assert_eq!(err.error_code(), "IO_ERROR");
    }
}
