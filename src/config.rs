//! Signal configuration for chirp synthesis.
//!
//! A [`SignalConfig`] is a plain value: it is built once, validated, and
//! passed by reference to the synthesizer. Nothing in the crate keeps
//! process-wide parameters.

#[cfg(feature = "serialization")]
use std::path::Path;

#[cfg(feature = "serialization")]
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{ChirpError, ChirpResult, RealFloat, to_precision};

/// Default sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: f64 = 1000.0;
/// Default signal duration in seconds.
pub const DEFAULT_DURATION: f64 = 2.0;
/// Default sweep start frequency in Hz.
pub const DEFAULT_START_FREQ: f64 = 5.0;
/// Default sweep end frequency in Hz.
pub const DEFAULT_END_FREQ: f64 = 100.0;

/// Parameters of a linear chirp.
///
/// `start_freq` and `end_freq` may be equal (a pure tone), descending, or even
/// negative; only the sampling parameters are constrained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalConfig<F> {
    /// Sample rate in Hz, must be positive.
    pub sample_rate: F,
    /// Signal duration in seconds, must be positive.
    pub duration: F,
    /// Instantaneous frequency at `t = 0`, in Hz.
    pub start_freq: F,
    /// Instantaneous frequency at `t = duration`, in Hz.
    pub end_freq: F,
}

impl<F: RealFloat> Default for SignalConfig<F> {
    fn default() -> Self {
        Self::new(
            to_precision(DEFAULT_SAMPLE_RATE),
            to_precision(DEFAULT_DURATION),
            to_precision(DEFAULT_START_FREQ),
            to_precision(DEFAULT_END_FREQ),
        )
    }
}

impl<F: RealFloat> SignalConfig<F> {
    /// Creates a new configuration. No validation happens here; see [`validate`](Self::validate).
    pub const fn new(sample_rate: F, duration: F, start_freq: F, end_freq: F) -> Self {
        Self {
            sample_rate,
            duration,
            start_freq,
            end_freq,
        }
    }

    /// Creates a pure tone configuration (`start_freq == end_freq`).
    pub const fn tone(sample_rate: F, duration: F, frequency: F) -> Self {
        Self::new(sample_rate, duration, frequency, frequency)
    }

    /// Checks that the configuration describes at least one sample.
    ///
    /// # Errors
    ///
    /// Returns [`ChirpError::InvalidConfig`] when the sample rate or duration
    /// is not a positive finite number, when a frequency is not finite, or
    /// when `floor(sample_rate * duration)` is zero or does not fit in `usize`.
    pub fn validate(&self) -> ChirpResult<()> {
        if !self.sample_rate.is_finite() || self.sample_rate <= F::zero() {
            return Err(ChirpError::invalid_config(
                "sample_rate",
                format!("must be a positive finite number, got {}", self.sample_rate),
            ));
        }
        if !self.duration.is_finite() || self.duration <= F::zero() {
            return Err(ChirpError::invalid_config(
                "duration",
                format!("must be a positive finite number, got {}", self.duration),
            ));
        }
        if !self.start_freq.is_finite() {
            return Err(ChirpError::invalid_config(
                "start_freq",
                format!("must be finite, got {}", self.start_freq),
            ));
        }
        if !self.end_freq.is_finite() {
            return Err(ChirpError::invalid_config(
                "end_freq",
                format!("must be finite, got {}", self.end_freq),
            ));
        }

        match (self.sample_rate * self.duration).floor().to_usize() {
            Some(0) => Err(ChirpError::invalid_config(
                "duration",
                format!(
                    "yields no samples at {} Hz (sample_rate * duration = {})",
                    self.sample_rate,
                    self.sample_rate * self.duration
                ),
            )),
            Some(_) => Ok(()),
            None => Err(ChirpError::invalid_config(
                "duration",
                "sample count does not fit in memory",
            )),
        }
    }

    /// Number of samples, `floor(sample_rate * duration)`.
    ///
    /// Returns 0 for configurations that fail [`validate`](Self::validate).
    pub fn sample_count(&self) -> usize {
        (self.sample_rate * self.duration)
            .floor()
            .to_usize()
            .unwrap_or(0)
    }

    /// Frequency slope in Hz per second.
    pub fn chirp_rate(&self) -> F {
        (self.end_freq - self.start_freq) / self.duration
    }

    /// Instantaneous frequency `f(t) = start_freq + chirp_rate * t`, in Hz.
    pub fn instantaneous_frequency(&self, t: F) -> F {
        self.start_freq + self.chirp_rate() * t
    }

    /// Instantaneous phase in radians, the time integral of `2π f(t)`:
    ///
    /// `φ(t) = 2π (start_freq t + ½ chirp_rate t²)`
    pub fn instantaneous_phase(&self, t: F) -> F {
        let half: F = to_precision(0.5);
        let two_pi = to_precision::<F, _>(2.0) * F::PI();
        two_pi * (self.start_freq * t + half * self.chirp_rate() * t * t)
    }

    /// Nyquist frequency, `sample_rate / 2`.
    pub fn nyquist(&self) -> F {
        self.sample_rate / to_precision(2.0)
    }

    /// Spacing of the analysis frequency bins, `sample_rate / N`.
    ///
    /// Returns `None` when the configuration yields no samples.
    pub fn frequency_resolution(&self) -> Option<F> {
        match self.sample_count() {
            0 => None,
            n => Some(self.sample_rate / to_precision(n)),
        }
    }
}

#[cfg(feature = "serialization")]
impl<F: RealFloat + DeserializeOwned> SignalConfig<F> {
    /// Parses a configuration from a JSON document.
    ///
    /// The document must contain the four fields `sample_rate`, `duration`,
    /// `start_freq` and `end_freq`. The result is not validated.
    ///
    /// # Errors
    ///
    /// Returns [`ChirpError::Serialization`] if the document is malformed.
    pub fn from_json_str(json: &str) -> ChirpResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| ChirpError::Serialization(format!("invalid signal config: {e}")))
    }

    /// Reads a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ChirpError::Io`] if the file cannot be read and
    /// [`ChirpError::Serialization`] if it is not a valid configuration.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ChirpResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ChirpError::io(format!("reading {}", path.display()), e))?;
        Self::from_json_str(&json)
    }
}
