//! Command-line surface of the `ecg-stats` binary
//!
//! Values are layered: built-in defaults, then the `--config` JSON file,
//! then individual flags.

use anyhow::Context;
use clap::{ArgAction, Parser};
use ecg_distribution::Bandwidth;
use ecg_pipeline::{AnalysisConfig, BatchDriver, BatchSummary};
use ecg_record::WfdbLoader;
use ecg_render::SvgRenderer;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

/// Descriptive, distributional, autocorrelation and spectral statistics of
/// ECG segments from PhysioNet WFDB records
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "ecg-stats", version, about, long_about = None)]
pub struct Args {
    /// JSON configuration file; flags override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the WFDB records
    #[arg(long, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Record to analyse (e.g. chf01)
    #[arg(long)]
    pub record: Option<String>,

    /// Zero-based ECG channel
    #[arg(long)]
    pub channel: Option<usize>,

    /// First sample index of the segment
    #[arg(long)]
    pub start: Option<usize>,

    /// Sample index one past the end of the segment
    #[arg(long)]
    pub end: Option<usize>,

    /// Sampling rate in Hz; defaults to the rate in the record header
    #[arg(long)]
    pub fs: Option<f64>,

    /// Write plots under the output directory (true/false)
    #[arg(long, num_args = 0..=1, default_missing_value = "true", action = ArgAction::Set)]
    pub save: Option<bool>,

    /// Analyse every record in the directory instead of a single one
    #[arg(
        long,
        alias = "run_all_records",
        num_args = 0..=1,
        default_missing_value = "true",
        default_value_t = false,
        action = ArgAction::Set
    )]
    pub run_all_records: bool,

    /// Root of the plot tree
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Number of histogram bins
    #[arg(long)]
    pub bins: Option<usize>,

    /// KDE bandwidth: scott, silverman or a positive number
    #[arg(long)]
    pub bandwidth: Option<String>,

    /// Largest autocorrelation lag in samples; defaults to N - 1
    #[arg(long)]
    pub max_lag: Option<usize>,

    /// Welch segment length in samples
    #[arg(long)]
    pub segment_length: Option<usize>,
}

impl Args {
    /// Merge defaults, the config file and flags into one validated config
    pub fn resolve(&self) -> anyhow::Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::load(path)
                .with_context(|| format!("loading configuration from {}", path.display()))?,
            None => AnalysisConfig::default(),
        };

        if let Some(path) = &self.path {
            config.record_dir = path.clone();
        }
        if let Some(record) = &self.record {
            config.selector.record_id = record.clone();
        }
        if let Some(channel) = self.channel {
            config.selector.channel = channel;
        }
        if let Some(start) = self.start {
            config.selector.start = start;
        }
        if let Some(end) = self.end {
            config.selector.end = end;
        }
        if let Some(fs) = self.fs {
            config.selector.sampling_rate = Some(fs);
        }
        if let Some(save) = self.save {
            config.output.save = save;
        }
        if let Some(dir) = &self.output_dir {
            config.output.root = dir.clone();
        }
        if let Some(bins) = self.bins {
            config.density.bins = bins;
        }
        if let Some(bandwidth) = &self.bandwidth {
            config.density.bandwidth = bandwidth.parse::<Bandwidth>()?;
        }
        if let Some(max_lag) = self.max_lag {
            config.autocorrelation.max_lag = Some(max_lag);
        }
        if let Some(segment_length) = self.segment_length {
            config.spectral.segment_length = segment_length;
        }

        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

/// Run the pipeline the arguments describe
///
/// Exit code 1 when the single requested record fails or the record
/// directory cannot be listed; per-record batch failures are only reported.
pub fn run(args: &Args) -> anyhow::Result<ExitCode> {
    let config = args.resolve()?;
    info!(
        record_dir = %config.record_dir.display(),
        selector = %config.selector,
        save = config.output.save,
        "configuration resolved"
    );

    let loader = WfdbLoader::new(&config.record_dir);
    let driver = BatchDriver::new(loader, SvgRenderer::new(), &config)?;

    if args.run_all_records {
        let outcomes = match driver.run_directory() {
            Ok(outcomes) => outcomes,
            Err(err) => {
                error!(error = %err, "cannot list records");
                return Ok(ExitCode::FAILURE);
            }
        };
        for failure in outcomes.iter().filter_map(|o| o.error()) {
            error!("{failure}");
        }
        let summary = BatchSummary::from_outcomes(&outcomes);
        info!("{} of {} records analysed", summary.succeeded, summary.total);
        return Ok(ExitCode::SUCCESS);
    }

    match driver.run_default() {
        Ok(report) => {
            for path in report.written_files() {
                info!(path = %path.display(), "written");
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            error!("{err}");
            Ok(ExitCode::FAILURE)
        }
    }
}
