// Correctness and logic
#![warn(clippy::unit_cmp)] // Detects comparing unit types
#![warn(clippy::match_same_arms)]
// Duplicate match arms

// Performance-focused
#![warn(clippy::inefficient_to_string)] // `format!("{}", x)` vs `x.to_string()`
#![warn(clippy::map_clone)] // Cloning inside `map()` unnecessarily
#![warn(clippy::unnecessary_to_owned)] // Detects redundant `.to_owned()` or `.clone()`
#![warn(clippy::needless_collect)] // Avoids `.collect().iter()` chains

// Style and idiomatic Rust
#![warn(clippy::redundant_clone)] // Detects unnecessary `.clone()`
#![warn(clippy::needless_return)] // Avoids `return` at the end of functions
#![warn(clippy::manual_map)] // Use `.map()` instead of manual `match`
#![warn(clippy::unwrap_used)] // Avoids using `unwrap()`

// Maintainability
#![warn(clippy::missing_panics_doc)] // Docs for functions that might panic
#![warn(missing_docs)]

//! # chirp_spectrum
//!
//! Synthesizes a linear frequency sweep ("chirp") and computes its
//! single-sided amplitude spectrum.
//!
//! The crate is a two-stage pipeline:
//!
//! 1. [`synthesize`] turns a [`SignalConfig`] into an index-aligned
//!    [`TimeSeries`] and [`Waveform`].
//! 2. [`analyze`] turns the waveform into a [`Spectrum`] of
//!    `floor(N / 2)` (frequency, magnitude) pairs.
//!
//! [`pipeline::run`] chains both and returns a [`ChirpAnalysis`] that hands
//! the two (x, y) pairs to whatever renders them. The optional
//! `serialization` feature writes those pairs as CSV or JSON.
//!
//! ## Quick Start
//!
//! ```rust
//! use chirp_spectrum::{SignalConfig, analyze, synthesize};
//!
//! // sample rate, duration, start frequency, end frequency
//! let config = SignalConfig::new(1000.0_f64, 2.0, 5.0, 100.0);
//! let (time, waveform) = synthesize(&config).unwrap();
//! assert_eq!(time.len(), 2000);
//!
//! let spectrum = analyze(&waveform, config.sample_rate).unwrap();
//! assert_eq!(spectrum.len(), 1000);
//! assert_eq!(spectrum.frequencies()[1], 0.5);
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`ChirpResult`]. Parameters are
//! validated before any computation starts, so an error never comes with a
//! partial result:
//!
//! ```rust
//! use chirp_spectrum::{ChirpError, SignalConfig, synthesize};
//!
//! let config = SignalConfig::new(1000.0_f64, 0.0, 5.0, 100.0);
//! match synthesize(&config) {
//!     Err(ChirpError::InvalidConfig { parameter, .. }) => assert_eq!(parameter, "duration"),
//!     other => panic!("unexpected result: {other:?}"),
//! }
//! ```
//!
//! ## Features
//!
//! - `serialization`: CSV and JSON export of the analysis (adds `serde_json`)
//! - `cli`: the `chirp-analyze` binary and its logging setup (adds `clap`,
//!   `colored` and `tracing-subscriber`)

mod error;

pub mod config;
pub mod generation;
#[cfg(feature = "cli")]
pub mod logging;
pub mod operations;
pub mod pipeline;
mod repr;

use std::fmt::{Debug, Display};

pub use crate::config::SignalConfig;
pub use crate::error::{ChirpError, ChirpResult};
pub use crate::generation::{synthesize, time_axis};
pub use crate::operations::fft_backends::{FftBackend, FftBackendKind};
pub use crate::operations::spectrum::{
    AnalyzerConfig, MagnitudeScaling, analyze, analyze_with, fft_frequencies,
};
pub use crate::pipeline::{ChirpAnalysis, run};
pub use crate::repr::{Spectrum, TimeSeries, Waveform};

use num_traits::{Float, FloatConst, NumCast};
use rustfft::FftNum;

/// Marker trait for real floating-point types (f32, f64)
pub trait RealFloat:
    Float + FloatConst + NumCast + FftNum + Display + Debug + serde::Serialize
{
}

impl RealFloat for f32 {}
impl RealFloat for f64 {}

/// Converts a numeric value into the working precision `F`.
///
/// # Panics
///
/// Panics if `value` cannot be represented as `F`. Every primitive integer
/// and float converts to `f32`/`f64` (possibly with rounding), so this only
/// happens for exotic `NumCast` implementations.
#[inline]
pub fn to_precision<F, T>(value: T) -> F
where
    F: RealFloat,
    T: NumCast,
{
    NumCast::from(value).expect("to_precision: valid numeric conversion")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_precision_round_trips_integers() {
        assert_eq!(to_precision::<f64, _>(2000_usize), 2000.0);
        assert_eq!(to_precision::<f32, _>(3_u32), 3.0);
        assert_eq!(to_precision::<f32, _>(0.5_f64), 0.5);
    }
}
