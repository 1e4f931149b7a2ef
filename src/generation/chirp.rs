//! Linear chirp synthesis.
//!
//! The waveform is computed from the closed-form instantaneous phase
//! `φ(t) = 2π (f0 t + ½ k t²)` evaluated at every sample instant, rather
//! than by accumulating per-sample phase increments, so rounding error does
//! not build up over long signals.

use ndarray::Array1;
use num_traits::Float;
use tracing::{debug, trace};

use crate::{ChirpResult, RealFloat, SignalConfig, TimeSeries, Waveform};

/// Builds the sample instants for `config` without synthesizing the waveform.
///
/// # Errors
///
/// Returns [`ChirpError::InvalidConfig`](crate::ChirpError::InvalidConfig) if
/// the configuration fails [`SignalConfig::validate`].
pub fn time_axis<F: RealFloat>(config: &SignalConfig<F>) -> ChirpResult<TimeSeries<F>> {
    config.validate()?;
    Ok(TimeSeries::uniform(config.sample_count(), config.sample_rate))
}

/// Synthesizes a unit-amplitude linear chirp.
///
/// The instantaneous frequency rises (or falls) linearly from
/// `config.start_freq` at `t = 0` to `config.end_freq` at `t = duration`.
/// Both returned sequences hold `floor(sample_rate * duration)` elements and
/// are index-aligned.
///
/// # Errors
///
/// Returns [`ChirpError::InvalidConfig`](crate::ChirpError::InvalidConfig)
/// for a non-positive sample rate or duration, or when no samples would be
/// produced.
///
/// # Examples
///
/// ```rust
/// use chirp_spectrum::{SignalConfig, synthesize};
///
/// let config = SignalConfig::new(1000.0_f64, 2.0, 5.0, 100.0);
/// let (time, waveform) = synthesize(&config).unwrap();
/// assert_eq!(time.len(), 2000);
/// assert_eq!(waveform.as_array()[0], 0.0);
/// ```
pub fn synthesize<F: RealFloat>(
    config: &SignalConfig<F>,
) -> ChirpResult<(TimeSeries<F>, Waveform<F>)> {
    let time = time_axis(config)?;
    debug!(
        samples = time.len(),
        sample_rate = %config.sample_rate,
        start_freq = %config.start_freq,
        end_freq = %config.end_freq,
        "synthesizing linear chirp"
    );

    let samples = time
        .iter()
        .map(|&t| Float::sin(config.instantaneous_phase(t)))
        .collect::<Array1<F>>();
    trace!(chirp_rate = %config.chirp_rate(), "chirp synthesized");

    Ok((time, Waveform::new(samples)))
}
