//! FFT backends for the spectral analyzer.
//!
//! The analyzer only needs "the N-point DFT of a real sequence", so the
//! transform sits behind the [`FftBackend`] trait:
//! - [`RustFftBackend`]: complex-input `rustfft`, the default.
//! - [`RealFftBackend`]: real-input `realfft`, about half the work and memory.
//!
//! Both are O(N log N) for every N (rustfft falls back to Bluestein's
//! algorithm for large prime sizes) and return the same coefficients.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use num_complex::Complex;
use realfft::{RealFftPlanner, RealToComplex};
use rustfft::{Fft, FftPlanner};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{ChirpError, ChirpResult, RealFloat};

/// Available FFT implementations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FftBackendKind {
    /// Complex FFT from `rustfft` on a zero-imaginary copy of the input.
    #[default]
    RustFft,
    /// Real-to-complex FFT from `realfft`.
    RealFft,
}

impl FftBackendKind {
    /// Instantiates the backend.
    pub fn create<F: RealFloat>(self) -> Box<dyn FftBackend<F>> {
        match self {
            Self::RustFft => Box::new(RustFftBackend::new()),
            Self::RealFft => Box::new(RealFftBackend::new()),
        }
    }

    /// Every backend, in declaration order.
    pub const fn all() -> [Self; 2] {
        [Self::RustFft, Self::RealFft]
    }
}

impl fmt::Display for FftBackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RustFft => write!(f, "rustfft"),
            Self::RealFft => write!(f, "realfft"),
        }
    }
}

impl FromStr for FftBackendKind {
    type Err = ChirpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rustfft" | "complex" => Ok(Self::RustFft),
            "realfft" | "real" => Ok(Self::RealFft),
            other => Err(ChirpError::invalid_config(
                "backend",
                format!("unknown FFT backend '{other}', expected 'rustfft' or 'realfft'"),
            )),
        }
    }
}

/// Trait for FFT backend implementations
pub trait FftBackend<F: RealFloat> {
    /// Computes the non-redundant half of the DFT of a real sequence.
    ///
    /// Returns coefficients `X_0 ..= X_{N/2}` (`N / 2 + 1` values), unscaled:
    /// `X_k = Σ x_n e^{-2πi kn/N}`.
    ///
    /// # Errors
    ///
    /// Returns [`ChirpError::InvalidInput`] for empty input and
    /// [`ChirpError::Transform`] if the underlying library fails.
    fn compute_real_fft(&mut self, input: &[F]) -> ChirpResult<Vec<Complex<F>>>;

    /// Number of coefficients returned for an input of `input_size` samples.
    fn output_size(&self, input_size: usize) -> usize {
        input_size / 2 + 1
    }

    /// Which implementation this is.
    fn kind(&self) -> FftBackendKind;
}

fn ensure_not_empty<F>(input: &[F]) -> ChirpResult<()> {
    if input.is_empty() {
        return Err(ChirpError::invalid_input(
            "input",
            "FFT input must contain at least one sample",
        ));
    }
    Ok(())
}

/// `rustfft` backend implementation
pub struct RustFftBackend<F: RealFloat> {
    planner: FftPlanner<F>,
}

impl<F: RealFloat> RustFftBackend<F> {
    /// Creates a backend with an empty planner.
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
        }
    }

    fn plan(&mut self, size: usize) -> Arc<dyn Fft<F>> {
        self.planner.plan_fft_forward(size)
    }
}

impl<F: RealFloat> Default for RustFftBackend<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: RealFloat> FftBackend<F> for RustFftBackend<F> {
    fn compute_real_fft(&mut self, input: &[F]) -> ChirpResult<Vec<Complex<F>>> {
        ensure_not_empty(input)?;
        let fft = self.plan(input.len());

        let mut buffer: Vec<Complex<F>> = input
            .iter()
            .map(|&x| Complex::new(x, F::zero()))
            .collect();
        fft.process(&mut buffer);
        trace!(size = input.len(), "rustfft forward transform");

        buffer.truncate(self.output_size(input.len()));
        Ok(buffer)
    }

    fn kind(&self) -> FftBackendKind {
        FftBackendKind::RustFft
    }
}

/// `realfft` backend implementation with per-size plan caching
pub struct RealFftBackend<F: RealFloat> {
    planner: RealFftPlanner<F>,
    cached_plans: HashMap<usize, Arc<dyn RealToComplex<F>>>,
}

impl<F: RealFloat> RealFftBackend<F> {
    /// Creates a backend with an empty plan cache.
    pub fn new() -> Self {
        Self {
            planner: RealFftPlanner::new(),
            cached_plans: HashMap::new(),
        }
    }

    fn get_or_create_plan(&mut self, size: usize) -> Arc<dyn RealToComplex<F>> {
        if let Some(plan) = self.cached_plans.get(&size) {
            plan.clone()
        } else {
            let plan = self.planner.plan_fft_forward(size);
            self.cached_plans.insert(size, plan.clone());
            plan
        }
    }
}

impl<F: RealFloat> Default for RealFftBackend<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: RealFloat> FftBackend<F> for RealFftBackend<F> {
    fn compute_real_fft(&mut self, input: &[F]) -> ChirpResult<Vec<Complex<F>>> {
        ensure_not_empty(input)?;
        let plan = self.get_or_create_plan(input.len());

        // realfft uses the input buffer as scratch space
        let mut scratch_input = plan.make_input_vec();
        scratch_input.copy_from_slice(input);
        let mut output = plan.make_output_vec();

        plan.process(&mut scratch_input, &mut output)
            .map_err(|e| ChirpError::Transform(format!("realfft forward transform: {e}")))?;
        trace!(size = input.len(), "realfft forward transform");

        Ok(output)
    }

    fn kind(&self) -> FftBackendKind {
        FftBackendKind::RealFft
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn naive_dft(input: &[f64]) -> Vec<Complex<f64>> {
        let n = input.len();
        (0..n)
            .map(|k| {
                input
                    .iter()
                    .enumerate()
                    .map(|(i, &x)| {
                        let angle = -2.0 * PI * (k * i) as f64 / n as f64;
                        Complex::new(x * angle.cos(), x * angle.sin())
                    })
                    .sum()
            })
            .collect()
    }

    fn test_signal(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| (0.3 * i as f64).sin() + 0.25 * (1.7 * i as f64).cos() + 0.1)
            .collect()
    }

    #[test]
    fn test_backends_match_naive_dft() {
        // even, odd and prime lengths
        for n in [1_usize, 2, 7, 16, 33, 97, 100] {
            let input = test_signal(n);
            let expected = naive_dft(&input);
            for kind in FftBackendKind::all() {
                let mut backend = kind.create::<f64>();
                let output = backend.compute_real_fft(&input).unwrap();
                assert_eq!(output.len(), n / 2 + 1, "{kind} with n = {n}");
                for (k, (got, want)) in output.iter().zip(&expected).enumerate() {
                    assert!(
                        (got - want).norm() < 1e-9,
                        "{kind}, n = {n}, bin {k}: {got} != {want}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_empty_input_is_rejected() {
        for kind in FftBackendKind::all() {
            let mut backend = kind.create::<f32>();
            assert!(matches!(
                backend.compute_real_fft(&[]),
                Err(ChirpError::InvalidInput { .. })
            ));
        }
    }

    #[test]
    fn test_realfft_plan_is_cached_per_size() {
        let mut backend = RealFftBackend::<f64>::new();
        backend.compute_real_fft(&test_signal(64)).unwrap();
        backend.compute_real_fft(&test_signal(64)).unwrap();
        backend.compute_real_fft(&test_signal(48)).unwrap();
        assert_eq!(backend.cached_plans.len(), 2);
    }

    #[test]
    fn test_backend_kind_parsing() {
        assert_eq!("rustfft".parse::<FftBackendKind>().unwrap(), FftBackendKind::RustFft);
        assert_eq!("RealFFT".parse::<FftBackendKind>().unwrap(), FftBackendKind::RealFft);
        assert!("fftw".parse::<FftBackendKind>().is_err());
        assert_eq!(FftBackendKind::default(), FftBackendKind::RustFft);
        assert_eq!(FftBackendKind::RealFft.to_string(), "realfft");
    }
}
