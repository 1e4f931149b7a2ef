//! Error types and result utilities for chirp synthesis and spectral analysis.

use thiserror::Error;

/// Convenience type alias for results that may contain a [`ChirpError`].
pub type ChirpResult<T> = Result<T, ChirpError>;

/// Error types that can occur while synthesizing, analyzing or exporting a chirp.
#[derive(Error, Debug)]
pub enum ChirpError {
    /// The signal configuration cannot produce a usable waveform.
    ///
    /// Raised by the synthesizer for non-positive sample rates or durations,
    /// non-finite parameters, or a configuration that yields zero samples.
    #[error("Invalid configuration: `{parameter}` {reason}")]
    InvalidConfig {
        /// Name of the offending parameter.
        parameter: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The analyzer was handed data it cannot transform.
    ///
    /// This covers an empty waveform and a non-positive sample rate.
    #[error("Invalid input: `{parameter}` {reason}")]
    InvalidInput {
        /// Name of the offending argument.
        parameter: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The FFT backend reported a failure.
    #[error("Transform error: {0}")]
    Transform(String),

    /// The requested export format is not known.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Encoding or decoding a document failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// An I/O operation failed.
    #[error("I/O error while {operation}: {source}")]
    Io {
        /// What was being done when the error occurred.
        operation: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ChirpError {
    /// Creates an [`ChirpError::InvalidConfig`] error.
    pub fn invalid_config<P: Into<String>, R: Into<String>>(parameter: P, reason: R) -> Self {
        Self::InvalidConfig {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Creates an [`ChirpError::InvalidInput`] error.
    pub fn invalid_input<P: Into<String>, R: Into<String>>(parameter: P, reason: R) -> Self {
        Self::InvalidInput {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Wraps an I/O error with a description of the failed operation.
    pub fn io<O: Into<String>>(operation: O, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }

    /// Returns true for errors caused by bad parameters rather than by the environment.
    pub const fn is_validation_error(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. } | Self::InvalidInput { .. })
    }

    /// Process exit status a command-line front end should report for this error.
    ///
    /// Validation failures map to `2`, everything else to `1`.
    pub const fn exit_code(&self) -> u8 {
        if self.is_validation_error() { 2 } else { 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_exit_with_two() {
        let err = ChirpError::invalid_config("sample_rate", "must be > 0");
        assert!(err.is_validation_error());
        assert_eq!(err.exit_code(), 2);

        let err = ChirpError::invalid_input("waveform", "must not be empty");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_other_errors_exit_with_one() {
        let err = ChirpError::io(
            "writing file",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!err.is_validation_error());
        assert_eq!(err.exit_code(), 1);
        assert_eq!(ChirpError::UnsupportedFormat("xml".into()).exit_code(), 1);
    }

    #[test]
    fn test_error_messages_name_the_parameter() {
        let err = ChirpError::invalid_config("duration", "must be > 0, got -1");
        let message = err.to_string();
        assert!(message.contains("duration"));
        assert!(message.contains("must be > 0"));
    }
}
