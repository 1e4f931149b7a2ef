//! Value types handed between the synthesizer, the analyzer and the export layer.
//!
//! All three are immutable once built. Sample data lives in `ndarray::Array1`
//! so callers can hand it straight to numeric code without copying.

use ndarray::{Array1, ArrayView1};
use num_traits::Float;

use crate::{ChirpError, ChirpResult, RealFloat, to_precision};

/// Uniformly spaced sample instants `t_k = k / sample_rate`, starting at 0.
///
/// The interval is half-open: the signal duration itself is never included.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries<F> {
    times: Array1<F>,
    sample_rate: F,
}

impl<F: RealFloat> TimeSeries<F> {
    /// Builds `len` instants spaced at `1 / sample_rate`.
    pub fn uniform(len: usize, sample_rate: F) -> Self {
        let times = (0..len)
            .map(|k| to_precision::<F, _>(k) / sample_rate)
            .collect::<Array1<F>>();
        Self { times, sample_rate }
    }

    /// Number of instants.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Returns true if there are no instants.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Sample rate the instants were generated for.
    pub const fn sample_rate(&self) -> F {
        self.sample_rate
    }

    /// The instants as an array.
    pub const fn as_array(&self) -> &Array1<F> {
        &self.times
    }

    /// A read-only view of the instants.
    pub fn view(&self) -> ArrayView1<'_, F> {
        self.times.view()
    }

    /// Iterates over the instants in order.
    pub fn iter(&self) -> impl Iterator<Item = &F> {
        self.times.iter()
    }
}

/// Real-valued amplitude samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform<F> {
    samples: Array1<F>,
}

impl<F: RealFloat> Waveform<F> {
    /// Wraps existing samples.
    pub const fn new(samples: Array1<F>) -> Self {
        Self { samples }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if there are no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The samples as an array.
    pub const fn as_array(&self) -> &Array1<F> {
        &self.samples
    }

    /// A read-only view of the samples.
    pub fn view(&self) -> ArrayView1<'_, F> {
        self.samples.view()
    }

    /// Iterates over the samples in order.
    pub fn iter(&self) -> impl Iterator<Item = &F> {
        self.samples.iter()
    }

    /// Largest absolute sample value, or zero for an empty waveform.
    pub fn peak(&self) -> F {
        self.samples
            .iter()
            .fold(F::zero(), |acc, &x| acc.max(Float::abs(x)))
    }

    /// Consumes the waveform and returns the underlying array.
    pub fn into_inner(self) -> Array1<F> {
        self.samples
    }
}

impl<F: RealFloat> From<Vec<F>> for Waveform<F> {
    fn from(samples: Vec<F>) -> Self {
        Self::new(Array1::from_vec(samples))
    }
}

impl<F: RealFloat> From<Array1<F>> for Waveform<F> {
    fn from(samples: Array1<F>) -> Self {
        Self::new(samples)
    }
}

/// Single-sided amplitude spectrum.
///
/// Frequencies start at 0 Hz and increase by [`resolution`](Self::resolution)
/// per bin; magnitudes are non-negative and index-aligned with them.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum<F> {
    frequencies: Array1<F>,
    magnitudes: Array1<F>,
    resolution: F,
}

impl<F: RealFloat> Spectrum<F> {
    /// Builds a spectrum from index-aligned frequency and magnitude arrays.
    ///
    /// # Errors
    ///
    /// Returns [`ChirpError::InvalidInput`] if the arrays differ in length.
    pub fn new(frequencies: Array1<F>, magnitudes: Array1<F>, resolution: F) -> ChirpResult<Self> {
        if frequencies.len() != magnitudes.len() {
            return Err(ChirpError::invalid_input(
                "magnitudes",
                format!(
                    "length {} does not match {} frequency bins",
                    magnitudes.len(),
                    frequencies.len()
                ),
            ));
        }
        Ok(Self {
            frequencies,
            magnitudes,
            resolution,
        })
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// Returns true if there are no bins.
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Bin centre frequencies in Hz.
    pub const fn frequencies(&self) -> &Array1<F> {
        &self.frequencies
    }

    /// Bin magnitudes.
    pub const fn magnitudes(&self) -> &Array1<F> {
        &self.magnitudes
    }

    /// Bin spacing in Hz, `sample_rate / N`.
    pub const fn resolution(&self) -> F {
        self.resolution
    }

    /// Iterates over `(frequency, magnitude)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (F, F)> + '_ {
        self.frequencies
            .iter()
            .copied()
            .zip(self.magnitudes.iter().copied())
    }

    /// The bin with the largest magnitude as `(frequency, magnitude)`.
    ///
    /// Ties resolve to the lowest frequency. Returns `None` for an empty spectrum.
    pub fn peak(&self) -> Option<(F, F)> {
        self.iter().fold(None, |best, (freq, mag)| match best {
            Some((_, best_mag)) if mag <= best_mag => best,
            _ => Some((freq, mag)),
        })
    }

    /// Index of the bin whose centre is nearest to `frequency`.
    ///
    /// Frequencies beyond the last bin clamp to it. Returns `None` for an
    /// empty spectrum or a negative or non-finite frequency.
    pub fn bin_for(&self, frequency: F) -> Option<usize> {
        if self.is_empty() || !frequency.is_finite() || frequency < F::zero() {
            return None;
        }
        let index = (frequency / self.resolution).round().to_usize()?;
        Some(index.min(self.len() - 1))
    }

    /// Sum of squared magnitudes over bins with `low <= frequency < high`.
    pub fn band_energy(&self, low: F, high: F) -> F {
        self.iter()
            .filter(|&(freq, _)| freq >= low && freq < high)
            .fold(F::zero(), |acc, (_, mag)| acc + mag * mag)
    }

    /// Sum of squared magnitudes over every bin.
    pub fn total_energy(&self) -> F {
        self.magnitudes.iter().fold(F::zero(), |acc, &m| acc + m * m)
    }
}
