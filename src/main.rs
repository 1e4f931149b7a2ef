//! `chirp-analyze`: synthesize a linear chirp and export its waveform and spectrum.

use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use tracing::debug;

use chirp_spectrum::logging::{LogConfig, LogFormat, LogLevel, init_logging};
use chirp_spectrum::operations::serialization::{
    ExportConfig, OutputFormat, detect_format, write_analysis,
};
use chirp_spectrum::{
    AnalyzerConfig, ChirpAnalysis, ChirpError, ChirpResult, FftBackendKind, MagnitudeScaling,
    SignalConfig, run,
};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "chirp-analyze", version)]
#[command(about = "Synthesize a linear chirp and compute its single-sided amplitude spectrum", long_about = None)]
struct Args {
    /// Sample rate [default: 1000, or the value in --config]
    #[arg(long, value_name = "HZ", allow_negative_numbers = true)]
    rate: Option<f64>,

    /// Signal duration [default: 2, or the value in --config]
    #[arg(long, value_name = "SECONDS", allow_negative_numbers = true)]
    duration: Option<f64>,

    /// Sweep start frequency [default: 5, or the value in --config]
    #[arg(long, value_name = "HZ", allow_negative_numbers = true)]
    f0: Option<f64>,

    /// Sweep end frequency [default: 100, or the value in --config]
    #[arg(long, value_name = "HZ", allow_negative_numbers = true)]
    f1: Option<f64>,

    /// JSON file with sample_rate, duration, start_freq and end_freq; flags override it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format: csv or json [default: csv, or from the --output extension]
    #[arg(long = "out", value_name = "FORMAT")]
    out: Option<OutputFormat>,

    /// Write to this file instead of stdout
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Indent JSON output
    #[arg(long)]
    pretty: bool,

    /// Magnitude scaling: uniform or single-sided
    #[arg(long, value_name = "MODE", default_value = "uniform")]
    scaling: MagnitudeScaling,

    /// FFT backend: rustfft or realfft
    #[arg(long, value_name = "BACKEND", default_value = "rustfft")]
    backend: FftBackendKind,

    /// Print a short summary of the run to stderr
    #[arg(long)]
    summary: bool,

    /// Log level when RUST_LOG is not set: trace, debug, info, warn, error
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: LogLevel,
}

impl Args {
    /// Base configuration from --config (or the defaults), then explicit flags on top.
    fn signal_config(&self) -> ChirpResult<SignalConfig<f64>> {
        let mut config = match &self.config {
            Some(path) => SignalConfig::from_json_file(path)?,
            None => SignalConfig::default(),
        };
        if let Some(rate) = self.rate {
            config.sample_rate = rate;
        }
        if let Some(duration) = self.duration {
            config.duration = duration;
        }
        if let Some(f0) = self.f0 {
            config.start_freq = f0;
        }
        if let Some(f1) = self.f1 {
            config.end_freq = f1;
        }
        Ok(config)
    }

    fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig::new(self.scaling, self.backend)
    }

    /// An explicit --out wins, then the --output extension, then CSV.
    fn export_config(&self) -> ExportConfig {
        let detected = self
            .output
            .as_ref()
            .and_then(|path| detect_format(path).ok());
        let base = match (self.out, detected) {
            (Some(format), Some(detected)) if detected.format == format => detected,
            (Some(format), _) => ExportConfig::new(format),
            (None, Some(detected)) => detected,
            (None, None) => ExportConfig::new(OutputFormat::Csv),
        };
        if self.pretty { base.with_pretty(true) } else { base }
    }
}

fn print_summary(analysis: &ChirpAnalysis<f64>) {
    let config = analysis.config();
    eprintln!(
        "{} {} samples at {} Hz, {} Hz -> {} Hz over {} s",
        "chirp".cyan().bold(),
        analysis.waveform().len(),
        config.sample_rate,
        config.start_freq,
        config.end_freq,
        config.duration
    );
    let spectrum = analysis.spectrum();
    match spectrum.peak() {
        Some((freq, mag)) => eprintln!(
            "{} {} bins, {} Hz resolution, peak {:.4} at {} Hz",
            "spectrum".cyan().bold(),
            spectrum.len(),
            spectrum.resolution(),
            mag,
            freq
        ),
        None => eprintln!("{} no frequency bins", "spectrum".cyan().bold()),
    }
}

fn execute(args: &Args) -> ChirpResult<()> {
    let config = args.signal_config()?;
    let analysis = run(&config, &args.analyzer_config())?;
    let export = args.export_config();
    debug!(format = %export.format, "exporting analysis");

    match &args.output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .map_err(|e| ChirpError::io(format!("creating {}", path.display()), e))?;
            write_analysis(&analysis, &export, BufWriter::new(file))?;
        }
        None => {
            let stdout = io::stdout();
            write_analysis(&analysis, &export, BufWriter::new(stdout.lock()))?;
        }
    }

    if args.summary {
        print_summary(&analysis);
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&LogConfig {
        format: LogFormat::Compact,
        ..LogConfig::with_level(args.log_level)
    });

    match execute(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            ExitCode::from(err.exit_code())
        }
    }
}
