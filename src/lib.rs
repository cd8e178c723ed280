//! # ECG segment statistics
//!
//! Facade over the workspace crates:
//!
//! - [`ecg_core`]: error taxonomy, sample/segment model, descriptive statistics
//! - [`ecg_distribution`]: ECDF, histogram and Gaussian KDE
//! - [`ecg_spectral`]: autocorrelation and Welch power spectral density
//! - [`ecg_record`]: PhysioNet WFDB record loading
//! - [`ecg_render`]: plot descriptions and SVG rendering
//! - [`ecg_pipeline`]: configuration, per-segment analysis and the batch driver
//!
//! The `ecg-stats` binary drives [`BatchDriver`] from the command
//! line (see [`cli`]).
//!
//! ```rust
//! use ecg_stats::{compute_psd, Ecdf, SignalStatistics};
//!
//! let signal: Vec<f64> = (0..1000).map(|i| (i as f64 * 0.1).sin()).collect();
//! let stats = SignalStatistics::compute(&signal).unwrap();
//! assert!(stats.std_dev > 0.0);
//!
//! let ecdf = Ecdf::compute(&signal).unwrap();
//! assert_eq!(*ecdf.probabilities().last().unwrap(), 1.0);
//!
//! let psd = compute_psd(&signal, 250.0).unwrap();
//! assert_eq!(*psd.frequencies().last().unwrap(), 125.0);
//! ```

pub use ecg_core;
pub use ecg_distribution;
pub use ecg_pipeline;
pub use ecg_record;
pub use ecg_render;
pub use ecg_spectral;

pub mod cli;

pub use ecg_core::{
    Error, Result, SampleSequence, Segment, SegmentLoader, SegmentSelector, SignalStatistics,
};
pub use ecg_distribution::{compute_pdf, Bandwidth, DensityEstimate, Ecdf};
pub use ecg_pipeline::{AnalysisConfig, BatchDriver, PipelineError, Stage};
pub use ecg_spectral::{compute_autocorrelation, compute_psd, Autocorrelation, PowerSpectrum};
