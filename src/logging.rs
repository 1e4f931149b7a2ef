//! Log subscriber setup for the command-line front end.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the binary. Output goes to stderr so it never mixes with exported data
//! written to stdout. `RUST_LOG` takes precedence over the configured level.

use std::fmt;
use std::str::FromStr;

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt as tracing_fmt, prelude::*};

use crate::ChirpError;

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Trace level (most verbose)
    Trace,
    /// Debug level
    Debug,
    /// Info level
    Info,
    /// Warning level (default)
    #[default]
    Warn,
    /// Error level (least verbose)
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = ChirpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(ChirpError::invalid_config(
                "log_level",
                format!("unknown log level '{other}'"),
            )),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line, human-readable
    Pretty,
    /// One line per event
    #[default]
    Compact,
}

/// Logging configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogConfig {
    /// Level used when `RUST_LOG` is not set
    pub level: LogLevel,
    /// Output format
    pub format: LogFormat,
    /// Report span close events with their timings
    pub span_events: bool,
}

impl LogConfig {
    /// Creates a compact configuration at `level`.
    pub const fn with_level(level: LogLevel) -> Self {
        Self {
            level,
            format: LogFormat::Compact,
            span_events: false,
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.level.to_string()))
    }
}

/// Initialize the global logging subscriber.
///
/// Should be called once at startup; later calls leave the first subscriber
/// in place and return `false`.
pub fn init_logging(config: &LogConfig) -> bool {
    let span_events = if config.span_events {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let result = match config.format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(config.filter())
            .with(
                tracing_fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr)
                    .with_span_events(span_events),
            )
            .try_init(),
        LogFormat::Compact => tracing_subscriber::registry()
            .with(config.filter())
            .with(
                tracing_fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr)
                    .with_span_events(span_events),
            )
            .try_init(),
    };

    result.is_ok()
}
