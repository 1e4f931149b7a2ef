//! Export of analysis results for a downstream renderer.
//!
//! The core does not plot anything; it hands over two `(x, y)` curves.
//! This module writes them in one of two interchange formats:
//!
//! - **CSV**: a `# waveform` section (`time_s,amplitude`) followed by a
//!   `# spectrum` section (`frequency_hz,magnitude`), separated by a blank line.
//! - **JSON**: a single document holding the signal configuration, analyzer
//!   options, run metadata and both curves as parallel arrays.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use ndarray::Array1;
use serde::{Serialize, Serializer};

use crate::operations::spectrum::AnalyzerConfig;
use crate::pipeline::ChirpAnalysis;
use crate::{ChirpError, ChirpResult, RealFloat, SignalConfig};

/// Interchange format for exported results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Delimited text with one section per curve.
    #[default]
    Csv,
    /// A single JSON document.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ChirpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(ChirpError::UnsupportedFormat(format!(
                "'{other}', expected 'csv' or 'json'"
            ))),
        }
    }
}

/// Column separator for delimited text output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextDelimiter {
    /// `,`
    #[default]
    Comma,
    /// `\t`
    Tab,
    /// `;`
    Semicolon,
    /// ` `
    Space,
}

impl TextDelimiter {
    /// The separator character.
    pub const fn as_char(self) -> char {
        match self {
            Self::Comma => ',',
            Self::Tab => '\t',
            Self::Semicolon => ';',
            Self::Space => ' ',
        }
    }
}

/// Export options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportConfig {
    /// Output format.
    pub format: OutputFormat,
    /// Column separator, CSV only.
    pub delimiter: TextDelimiter,
    /// Indent the document, JSON only.
    pub pretty: bool,
}

impl ExportConfig {
    /// Creates a configuration for `format` with default options.
    pub const fn new(format: OutputFormat) -> Self {
        Self {
            format,
            delimiter: TextDelimiter::Comma,
            pretty: false,
        }
    }

    /// Sets the CSV column separator.
    pub const fn with_delimiter(mut self, delimiter: TextDelimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Enables or disables JSON indentation.
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

/// Chooses export options from a file extension.
///
/// `.csv` selects comma-separated text, `.tsv` tab-separated text and
/// `.json` a pretty-printed JSON document.
///
/// # Errors
///
/// Returns [`ChirpError::UnsupportedFormat`] for any other extension.
pub fn detect_format<P: AsRef<Path>>(path: P) -> ChirpResult<ExportConfig> {
    let extension = path
        .as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    match extension.to_lowercase().as_str() {
        "csv" => Ok(ExportConfig::new(OutputFormat::Csv)),
        "tsv" => Ok(ExportConfig::new(OutputFormat::Csv).with_delimiter(TextDelimiter::Tab)),
        "json" => Ok(ExportConfig::new(OutputFormat::Json).with_pretty(true)),
        _ => Err(ChirpError::UnsupportedFormat(format!(
            "file extension '{extension}'"
        ))),
    }
}

/// Writes `analysis` to `writer` in the configured format.
///
/// # Errors
///
/// Returns [`ChirpError::Io`] if writing fails and
/// [`ChirpError::Serialization`] if the JSON encoder fails.
pub fn write_analysis<F: RealFloat, W: Write>(
    analysis: &ChirpAnalysis<F>,
    config: &ExportConfig,
    writer: W,
) -> ChirpResult<()> {
    match config.format {
        OutputFormat::Csv => write_csv(analysis, config.delimiter, writer),
        OutputFormat::Json => write_json(analysis, config.pretty, writer),
    }
}

/// Serializes `analysis` into an in-memory buffer.
///
/// # Errors
///
/// See [`write_analysis`].
pub fn to_bytes<F: RealFloat>(
    analysis: &ChirpAnalysis<F>,
    config: &ExportConfig,
) -> ChirpResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_analysis(analysis, config, &mut buffer)?;
    Ok(buffer)
}

/// Writes `analysis` to `path`, choosing the format from the file extension.
///
/// # Errors
///
/// Returns [`ChirpError::UnsupportedFormat`] for an unknown extension and
/// [`ChirpError::Io`] if the file cannot be created or written.
pub fn save_to_file<F: RealFloat, P: AsRef<Path>>(
    analysis: &ChirpAnalysis<F>,
    path: P,
) -> ChirpResult<()> {
    let path = path.as_ref();
    let config = detect_format(path)?;
    let file = File::create(path)
        .map_err(|e| ChirpError::io(format!("creating {}", path.display()), e))?;
    let mut writer = BufWriter::new(file);
    write_analysis(analysis, &config, &mut writer)?;
    writer
        .flush()
        .map_err(|e| ChirpError::io(format!("writing {}", path.display()), e))
}

fn write_csv<F: RealFloat, W: Write>(
    analysis: &ChirpAnalysis<F>,
    delimiter: TextDelimiter,
    mut writer: W,
) -> ChirpResult<()> {
    let io_err = |e| ChirpError::io("writing CSV", e);
    let delim = delimiter.as_char();

    let (time, amplitude) = analysis.waveform_pair();
    writeln!(writer, "# waveform").map_err(io_err)?;
    writeln!(writer, "time_s{delim}amplitude").map_err(io_err)?;
    for (t, x) in time.iter().zip(amplitude.iter()) {
        writeln!(writer, "{t}{delim}{x}").map_err(io_err)?;
    }

    let (frequency, magnitude) = analysis.spectrum_pair();
    writeln!(writer).map_err(io_err)?;
    writeln!(writer, "# spectrum").map_err(io_err)?;
    writeln!(writer, "frequency_hz{delim}magnitude").map_err(io_err)?;
    for (f, m) in frequency.iter().zip(magnitude.iter()) {
        writeln!(writer, "{f}{delim}{m}").map_err(io_err)?;
    }

    writer.flush().map_err(io_err)
}

/// Serializes an array as a flat JSON sequence.
struct Column<'a, F>(&'a Array1<F>);

impl<F: Serialize> Serialize for Column<'_, F> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

#[derive(Serialize)]
struct RunMetadata<F> {
    version: &'static str,
    samples: usize,
    bins: usize,
    resolution_hz: F,
}

#[derive(Serialize)]
struct WaveformDocument<'a, F> {
    time: Column<'a, F>,
    amplitude: Column<'a, F>,
}

#[derive(Serialize)]
struct SpectrumDocument<'a, F> {
    frequency: Column<'a, F>,
    magnitude: Column<'a, F>,
}

#[derive(Serialize)]
struct AnalysisDocument<'a, F> {
    metadata: RunMetadata<F>,
    config: &'a SignalConfig<F>,
    analyzer: &'a AnalyzerConfig,
    waveform: WaveformDocument<'a, F>,
    spectrum: SpectrumDocument<'a, F>,
}

impl<'a, F: RealFloat> AnalysisDocument<'a, F> {
    fn from_analysis(analysis: &'a ChirpAnalysis<F>) -> Self {
        let (time, amplitude) = analysis.waveform_pair();
        let (frequency, magnitude) = analysis.spectrum_pair();
        Self {
            metadata: RunMetadata {
                version: env!("CARGO_PKG_VERSION"),
                samples: analysis.waveform().len(),
                bins: analysis.spectrum().len(),
                resolution_hz: analysis.spectrum().resolution(),
            },
            config: analysis.config(),
            analyzer: analysis.analyzer(),
            waveform: WaveformDocument {
                time: Column(time),
                amplitude: Column(amplitude),
            },
            spectrum: SpectrumDocument {
                frequency: Column(frequency),
                magnitude: Column(magnitude),
            },
        }
    }
}

fn write_json<F: RealFloat, W: Write>(
    analysis: &ChirpAnalysis<F>,
    pretty: bool,
    mut writer: W,
) -> ChirpResult<()> {
    let document = AnalysisDocument::from_analysis(analysis);
    let result = if pretty {
        serde_json::to_writer_pretty(&mut writer, &document)
    } else {
        serde_json::to_writer(&mut writer, &document)
    };
    result.map_err(|e| ChirpError::Serialization(format!("encoding analysis as JSON: {e}")))?;

    writeln!(writer).map_err(|e| ChirpError::io("writing JSON", e))?;
    writer.flush().map_err(|e| ChirpError::io("writing JSON", e))
}
