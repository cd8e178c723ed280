//! Core types and descriptive statistics for ECG segment analysis
//!
//! This crate holds what every other crate in the workspace shares:
//!
//! - [`Error`] / [`Result`]: the error taxonomy (empty, degenerate, range,
//!   parameter and record errors)
//! - [`SampleSequence`], [`SegmentSelector`], [`Segment`]: the data model
//! - [`SegmentLoader`]: the collaborator trait record readers implement
//! - [`Curve`]: ordered (x, y) pairs every estimator result exposes
//! - [`SignalStatistics`]: mean, population variance and standard deviation
//!
//! # Example
//!
//! ```rust
//! use ecg_core::SignalStatistics;
//!
//! let stats = SignalStatistics::compute(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! assert_eq!(stats.variance, 2.0); // population variance, divisor N
//! ```

pub mod curve;
pub mod error;
pub mod sample;
pub mod statistics;
pub mod traits;

pub use curve::Curve;
pub use error::{Error, Result};
pub use sample::{validate_sampling_rate, SampleSequence, Segment, SegmentSelector};
pub use statistics::SignalStatistics;
pub use traits::SegmentLoader;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
