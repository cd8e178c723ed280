//! End-to-end ECG segment statistics
//!
//! Ties the workspace together: [`AnalysisConfig`] describes a run,
//! [`Analyzer`] computes statistics, ECDF/PDF, autocorrelation and power
//! spectrum for one segment, and [`BatchDriver`] loads, analyses and renders
//! one record or every record of a store. Failures carry the record id and
//! the [`Stage`] they happened in.
//!
//! # Example
//!
//! ```rust
//! use ecg_core::SegmentSelector;
//! use ecg_pipeline::{AnalysisConfig, BatchDriver};
//! use ecg_record::MemoryLoader;
//! use ecg_render::NullRenderer;
//!
//! let samples: Vec<f64> = (0..2000).map(|i| (i as f64 * 0.05).sin()).collect();
//! let loader = MemoryLoader::new().with_record("demo", 250.0, vec![samples]);
//!
//! let mut config = AnalysisConfig::default();
//! config.selector = SegmentSelector::new("demo", 0, 0, 1000);
//! config.output.save = false;
//!
//! let driver = BatchDriver::new(loader, NullRenderer, &config).unwrap();
//! let report = driver.run_default().unwrap();
//! assert_eq!(report.analysis.statistics.count, 1000);
//! ```

pub mod analysis;
pub mod config;
pub mod driver;
pub mod error;

pub use analysis::{Analyzer, SegmentAnalysis};
pub use config::{
    AnalysisConfig, OutputConfig, DEFAULT_END, DEFAULT_OUTPUT_ROOT, DEFAULT_RECORD,
    DEFAULT_RECORD_DIR, DEFAULT_START,
};
pub use driver::{BatchDriver, BatchSummary, RecordOutcome, RecordReport, RecordStatus};
pub use error::{PipelineError, Stage};
