//! End-to-end chirp analysis: configuration → synthesizer → analyzer.
//!
//! [`run`] executes both stages in order and bundles the results in a
//! [`ChirpAnalysis`], which exposes the two `(x, y)` pairs a renderer needs:
//! amplitude over time and magnitude over frequency.

use ndarray::Array1;
use tracing::{info, instrument};

use crate::operations::spectrum::{AnalyzerConfig, analyze_with};
use crate::{ChirpResult, RealFloat, SignalConfig, Spectrum, TimeSeries, Waveform, synthesize};

/// Results of one synthesize-then-analyze run.
#[derive(Debug, Clone, PartialEq)]
pub struct ChirpAnalysis<F> {
    config: SignalConfig<F>,
    analyzer: AnalyzerConfig,
    time: TimeSeries<F>,
    waveform: Waveform<F>,
    spectrum: Spectrum<F>,
}

impl<F: RealFloat> ChirpAnalysis<F> {
    /// The signal configuration that produced this analysis.
    pub const fn config(&self) -> &SignalConfig<F> {
        &self.config
    }

    /// The analyzer options used.
    pub const fn analyzer(&self) -> &AnalyzerConfig {
        &self.analyzer
    }

    /// Sample instants.
    pub const fn time(&self) -> &TimeSeries<F> {
        &self.time
    }

    /// Synthesized samples.
    pub const fn waveform(&self) -> &Waveform<F> {
        &self.waveform
    }

    /// Single-sided amplitude spectrum.
    pub const fn spectrum(&self) -> &Spectrum<F> {
        &self.spectrum
    }

    /// Time-domain curve as `(time, amplitude)`.
    pub const fn waveform_pair(&self) -> (&Array1<F>, &Array1<F>) {
        (self.time.as_array(), self.waveform.as_array())
    }

    /// Frequency-domain curve as `(frequency, magnitude)`.
    pub const fn spectrum_pair(&self) -> (&Array1<F>, &Array1<F>) {
        (self.spectrum.frequencies(), self.spectrum.magnitudes())
    }

    /// Splits the analysis into its parts.
    pub fn into_parts(self) -> (SignalConfig<F>, TimeSeries<F>, Waveform<F>, Spectrum<F>) {
        (self.config, self.time, self.waveform, self.spectrum)
    }
}

/// Synthesizes the chirp described by `config` and computes its spectrum.
///
/// # Errors
///
/// Returns [`ChirpError::InvalidConfig`](crate::ChirpError::InvalidConfig)
/// if the configuration is rejected by the synthesizer, or any error raised
/// by the analyzer.
///
/// # Examples
///
/// ```rust
/// use chirp_spectrum::{AnalyzerConfig, SignalConfig, run};
///
/// let analysis = run(&SignalConfig::<f64>::default(), &AnalyzerConfig::default()).unwrap();
/// let (time, amplitude) = analysis.waveform_pair();
/// let (frequency, magnitude) = analysis.spectrum_pair();
/// assert_eq!(time.len(), amplitude.len());
/// assert_eq!(frequency.len(), magnitude.len());
/// ```
#[instrument(
    level = "debug",
    skip_all,
    fields(
        sample_rate = %config.sample_rate,
        duration = %config.duration,
        start_freq = %config.start_freq,
        end_freq = %config.end_freq,
    )
)]
pub fn run<F: RealFloat>(
    config: &SignalConfig<F>,
    analyzer: &AnalyzerConfig,
) -> ChirpResult<ChirpAnalysis<F>> {
    let (time, waveform) = synthesize(config)?;
    let spectrum = analyze_with(&waveform, config.sample_rate, analyzer)?;

    match spectrum.peak() {
        Some((peak_freq, peak_mag)) => info!(
            samples = waveform.len(),
            bins = spectrum.len(),
            peak_hz = %peak_freq,
            peak_magnitude = %peak_mag,
            "chirp analysis complete"
        ),
        None => info!(
            samples = waveform.len(),
            "chirp analysis complete, waveform too short for any frequency bin"
        ),
    }

    Ok(ChirpAnalysis {
        config: *config,
        analyzer: *analyzer,
        time,
        waveform,
        spectrum,
    })
}
