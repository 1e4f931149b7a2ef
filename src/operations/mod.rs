//! Spectral analysis and export operations.
//!
//! ## Module Organization
//!
//! - [`fft_backends`] - Pluggable forward FFT implementations
//! - [`spectrum`] - Single-sided amplitude spectrum extraction
//! - [`serialization`] - CSV / JSON hand-off of the analysis results
//!
//! ## Quick Start
//!
//! ```rust
//! use chirp_spectrum::operations::spectrum::{AnalyzerConfig, MagnitudeScaling, analyze_with};
//! use chirp_spectrum::operations::fft_backends::FftBackendKind;
//! use chirp_spectrum::{SignalConfig, synthesize};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SignalConfig::new(1000.0_f64, 2.0, 5.0, 100.0);
//! let (_, waveform) = synthesize(&config)?;
//!
//! let analyzer = AnalyzerConfig::new(MagnitudeScaling::SingleSided, FftBackendKind::RealFft);
//! let spectrum = analyze_with(&waveform, config.sample_rate, &analyzer)?;
//! assert_eq!(spectrum.len(), 1000);
//! # Ok(())
//! # }
//! ```

pub mod fft_backends;
#[cfg(feature = "serialization")]
pub mod serialization;
pub mod spectrum;

pub use fft_backends::{FftBackend, FftBackendKind, RealFftBackend, RustFftBackend};
#[cfg(feature = "serialization")]
pub use serialization::{ExportConfig, OutputFormat, TextDelimiter};
pub use spectrum::{AnalyzerConfig, MagnitudeScaling};
