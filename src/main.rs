//! `ecg-stats` binary
//!
//! ```bash
//! ecg-stats --record chf01 --start 10000 --end 15000
//! ecg-stats --run-all-records --output-dir plots
//! RUST_LOG=debug ecg-stats --config run.json
//! ```

use clap::Parser;
use ecg_stats::cli::{run, Args};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
