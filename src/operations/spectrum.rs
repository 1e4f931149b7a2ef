//! Single-sided amplitude spectrum of a real waveform.
//!
//! The analyzer takes the N-point DFT, keeps bins `0 .. N/2` (the
//! non-negative half, which carries all information for real input) and
//! scales magnitudes by `2 / N` so a unit sinusoid centred on a bin reads
//! roughly 1.0.
//!
//! With the default [`MagnitudeScaling::Uniform`] the DC bin is doubled like
//! every other bin, which overstates a constant offset by a factor of two.
//! [`MagnitudeScaling::SingleSided`] keeps DC at `1 / N`.

use std::fmt;
use std::str::FromStr;

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::fft_backends::FftBackendKind;
use crate::{ChirpError, ChirpResult, RealFloat, Spectrum, Waveform, to_precision};

/// How DFT coefficient magnitudes are normalized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MagnitudeScaling {
    /// `2 / N` for every retained bin, DC included.
    #[default]
    Uniform,
    /// `1 / N` for DC, `2 / N` for every other retained bin.
    SingleSided,
}

impl fmt::Display for MagnitudeScaling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uniform => write!(f, "uniform"),
            Self::SingleSided => write!(f, "single-sided"),
        }
    }
}

impl FromStr for MagnitudeScaling {
    type Err = ChirpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "uniform" => Ok(Self::Uniform),
            "single-sided" | "single_sided" | "singlesided" => Ok(Self::SingleSided),
            other => Err(ChirpError::invalid_config(
                "scaling",
                format!("unknown magnitude scaling '{other}', expected 'uniform' or 'single-sided'"),
            )),
        }
    }
}

/// Analyzer options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Magnitude normalization.
    pub scaling: MagnitudeScaling,
    /// FFT implementation.
    pub backend: FftBackendKind,
}

impl AnalyzerConfig {
    /// Creates a configuration from its parts.
    pub const fn new(scaling: MagnitudeScaling, backend: FftBackendKind) -> Self {
        Self { scaling, backend }
    }
}

/// Sample frequencies of an `n`-point DFT, in Hz.
///
/// Bin `k` maps to `k * sample_rate / n` for `k < ceil(n / 2)` and to the
/// negative frequency `(k - n) * sample_rate / n` above that, so the output
/// runs `0, df, .., -df`.
///
/// # Examples
///
/// ```rust
/// use chirp_spectrum::fft_frequencies;
///
/// let freqs = fft_frequencies(4, 8.0_f64);
/// assert_eq!(freqs, vec![0.0, 2.0, -4.0, -2.0]);
/// ```
pub fn fft_frequencies<F: RealFloat>(n: usize, sample_rate: F) -> Vec<F> {
    if n == 0 {
        return Vec::new();
    }
    let resolution = sample_rate / to_precision::<F, _>(n);
    let positive = n.div_ceil(2);

    (0..n)
        .map(|k| {
            if k < positive {
                to_precision::<F, _>(k) * resolution
            } else {
                -(to_precision::<F, _>(n - k) * resolution)
            }
        })
        .collect()
}

/// Computes the single-sided amplitude spectrum with default options.
///
/// Returns `floor(N / 2)` bins for a waveform of `N` samples. `sample_rate`
/// must be the rate the waveform was sampled at; a mismatch is not detected
/// and only mis-scales the frequency axis.
///
/// # Errors
///
/// Returns [`ChirpError::InvalidInput`] if the waveform is empty or the
/// sample rate is not a positive finite number.
///
/// # Examples
///
/// ```rust
/// use chirp_spectrum::{SignalConfig, analyze, synthesize};
///
/// let config = SignalConfig::tone(1000.0_f64, 1.0, 50.0);
/// let (_, waveform) = synthesize(&config).unwrap();
/// let spectrum = analyze(&waveform, config.sample_rate).unwrap();
///
/// let (peak_freq, peak_mag) = spectrum.peak().unwrap();
/// assert_eq!(peak_freq, 50.0);
/// assert!((peak_mag - 1.0).abs() < 1e-6);
/// ```
pub fn analyze<F: RealFloat>(waveform: &Waveform<F>, sample_rate: F) -> ChirpResult<Spectrum<F>> {
    analyze_with(waveform, sample_rate, &AnalyzerConfig::default())
}

/// Computes the single-sided amplitude spectrum with explicit options.
///
/// # Errors
///
/// Same as [`analyze`], plus [`ChirpError::Transform`] if the FFT backend fails.
pub fn analyze_with<F: RealFloat>(
    waveform: &Waveform<F>,
    sample_rate: F,
    config: &AnalyzerConfig,
) -> ChirpResult<Spectrum<F>> {
    if waveform.is_empty() {
        return Err(ChirpError::invalid_input(
            "waveform",
            "must contain at least one sample",
        ));
    }
    if !sample_rate.is_finite() || sample_rate <= F::zero() {
        return Err(ChirpError::invalid_input(
            "sample_rate",
            format!("must be a positive finite number, got {sample_rate}"),
        ));
    }

    let n = waveform.len();
    let half = n / 2;
    debug!(
        samples = n,
        bins = half,
        backend = %config.backend,
        scaling = %config.scaling,
        "analyzing waveform"
    );

    let input: Vec<F> = waveform.iter().copied().collect();
    let mut backend = config.backend.create::<F>();
    let coefficients = backend.compute_real_fft(&input)?;

    let n_f = to_precision::<F, _>(n);
    let bin_scale = to_precision::<F, _>(2.0) / n_f;
    let dc_scale = match config.scaling {
        MagnitudeScaling::Uniform => bin_scale,
        MagnitudeScaling::SingleSided => F::one() / n_f,
    };

    let magnitudes = coefficients
        .iter()
        .take(half)
        .enumerate()
        .map(|(k, c)| c.norm() * if k == 0 { dc_scale } else { bin_scale })
        .collect::<Array1<F>>();
    let frequencies = fft_frequencies(n, sample_rate)
        .into_iter()
        .take(half)
        .collect::<Array1<F>>();

    Spectrum::new(frequencies, magnitudes, sample_rate / n_f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SignalConfig, synthesize};
    use approx_eq::assert_approx_eq;

    fn chirp_spectrum(config: &SignalConfig<f64>) -> Spectrum<f64> {
        let (_, waveform) = synthesize(config).unwrap();
        analyze(&waveform, config.sample_rate).unwrap()
    }

    #[test]
    fn test_fft_frequencies_layout() {
        assert_eq!(fft_frequencies(4, 8.0_f64), vec![0.0, 2.0, -4.0, -2.0]);
        assert_eq!(fft_frequencies(5, 5.0_f64), vec![0.0, 1.0, 2.0, -2.0, -1.0]);
        assert_eq!(fft_frequencies(1, 10.0_f64), vec![0.0]);
        assert!(fft_frequencies::<f64>(0, 10.0).is_empty());
    }

    #[test]
    fn test_reference_chirp_spectrum() {
        let spectrum = chirp_spectrum(&SignalConfig::new(1000.0, 2.0, 5.0, 100.0));

        assert_eq!(spectrum.len(), 1000);
        assert_eq!(spectrum.resolution(), 0.5);
        assert_eq!(spectrum.frequencies()[0], 0.0);
        assert_eq!(spectrum.frequencies()[1], 0.5);
        assert_eq!(spectrum.frequencies()[2], 1.0);
        assert_eq!(spectrum.frequencies()[999], 499.5);

        // energy sits inside the sweep band
        let in_band = spectrum.band_energy(5.0, 100.0);
        let total = spectrum.total_energy();
        assert!(in_band / total > 0.95, "in-band share {}", in_band / total);
        assert!(spectrum.band_energy(150.0, 500.0) / total < 0.005);

        let max_above = spectrum
            .iter()
            .filter(|&(f, _)| f > 150.0)
            .map(|(_, m)| m)
            .fold(0.0, f64::max);
        assert!(max_above < 0.01, "max magnitude above 150 Hz: {max_above}");
    }

    #[test]
    fn test_spectrum_length_is_half_of_input() {
        for n in [1_usize, 2, 3, 10, 11, 1024, 1025] {
            let waveform = Waveform::from(vec![0.5_f64; n]);
            let spectrum = analyze(&waveform, 100.0).unwrap();
            assert_eq!(spectrum.len(), n / 2, "n = {n}");
        }
    }

    #[test]
    fn test_frequencies_strictly_increase_at_fixed_spacing() {
        let config = SignalConfig::new(800.0, 1.5, 10.0, 300.0);
        let spectrum = chirp_spectrum(&config);
        let df = 800.0 / 1200.0;

        assert_eq!(spectrum.frequencies()[0], 0.0);
        for pair in spectrum.frequencies().windows(2) {
            assert!(pair[1] > pair[0]);
            assert_approx_eq!(pair[1] - pair[0], df, 1e-9);
        }
        assert!(spectrum.frequencies().iter().all(|&f| f < config.nyquist()));
    }

    #[test]
    fn test_pure_tone_recovery() {
        for (rate, duration, freq) in [(1000.0, 2.0, 50.0), (8000.0, 0.5, 1000.0), (441.0, 1.0, 21.0)] {
            let spectrum = chirp_spectrum(&SignalConfig::tone(rate, duration, freq));
            let (peak_freq, peak_mag) = spectrum.peak().unwrap();
            assert_eq!(spectrum.bin_for(peak_freq), spectrum.bin_for(freq));
            assert_approx_eq!(peak_freq, freq, 1e-9);
            assert!((peak_mag - 1.0).abs() < 1e-6, "peak magnitude {peak_mag}");
        }
    }

    #[test]
    fn test_off_bin_tone_peaks_at_nearest_bin() {
        // 10.3 Hz with 1 Hz bins leaks, but the nearest bin still wins
        let spectrum = chirp_spectrum(&SignalConfig::tone(256.0, 1.0, 10.3));
        let (peak_freq, peak_mag) = spectrum.peak().unwrap();
        assert_eq!(peak_freq, 10.0);
        assert!(peak_mag > 0.6 && peak_mag <= 1.0, "peak magnitude {peak_mag}");
    }

    #[test]
    fn test_dc_scaling_modes() {
        let waveform = Waveform::from(vec![0.25_f64; 64]);

        let uniform = analyze(&waveform, 64.0).unwrap();
        assert_approx_eq!(uniform.magnitudes()[0], 0.5, 1e-12);

        let config = AnalyzerConfig::new(MagnitudeScaling::SingleSided, FftBackendKind::RustFft);
        let single_sided = analyze_with(&waveform, 64.0, &config).unwrap();
        assert_approx_eq!(single_sided.magnitudes()[0], 0.25, 1e-12);
        assert!(single_sided.magnitudes().iter().skip(1).all(|&m| m < 1e-12));
    }

    #[test]
    fn test_backends_agree() {
        let (_, waveform) = synthesize(&SignalConfig::new(1000.0_f64, 1.337, 5.0, 200.0)).unwrap();
        let spectra: Vec<_> = FftBackendKind::all()
            .into_iter()
            .map(|backend| {
                let config = AnalyzerConfig::new(MagnitudeScaling::Uniform, backend);
                analyze_with(&waveform, 1000.0, &config).unwrap()
            })
            .collect();

        assert_eq!(spectra[0].frequencies(), spectra[1].frequencies());
        for (a, b) in spectra[0].magnitudes().iter().zip(spectra[1].magnitudes()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_doubling_sample_rate() {
        let low = chirp_spectrum(&SignalConfig::new(500.0, 2.0, 5.0, 100.0));
        let high = chirp_spectrum(&SignalConfig::new(1000.0, 2.0, 5.0, 100.0));

        assert_eq!(high.len(), 2 * low.len());
        // spacing is 1 / duration either way
        assert_eq!(low.resolution(), 0.5);
        assert_eq!(high.resolution(), 0.5);
        assert_eq!(low.frequencies()[low.len() - 1], 249.5);
        assert_eq!(high.frequencies()[high.len() - 1], 499.5);
        assert_eq!(
            low.frequencies().as_slice(),
            high.frequencies().slice(ndarray::s![..low.len()]).as_slice()
        );
    }

    #[test]
    fn test_single_precision_analysis() {
        let config = SignalConfig::tone(1000.0_f32, 1.0, 100.0);
        let (_, waveform) = synthesize(&config).unwrap();
        let spectrum = analyze(&waveform, config.sample_rate).unwrap();
        let (peak_freq, peak_mag) = spectrum.peak().unwrap();
        assert_eq!(peak_freq, 100.0);
        assert!((peak_mag - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_invalid_input_is_rejected() {
        let empty = Waveform::<f64>::from(Vec::new());
        assert!(matches!(
            analyze(&empty, 1000.0),
            Err(ChirpError::InvalidInput { .. })
        ));

        let waveform = Waveform::from(vec![0.0_f64, 1.0, 0.0, -1.0]);
        for rate in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            match analyze(&waveform, rate) {
                Err(ChirpError::InvalidInput { parameter, .. }) => assert_eq!(parameter, "sample_rate"),
                other => panic!("expected InvalidInput for rate {rate}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_scaling_parsing() {
        assert_eq!("uniform".parse::<MagnitudeScaling>().unwrap(), MagnitudeScaling::Uniform);
        assert_eq!(
            "Single-Sided".parse::<MagnitudeScaling>().unwrap(),
            MagnitudeScaling::SingleSided
        );
        assert!("peak".parse::<MagnitudeScaling>().is_err());
    }
}
