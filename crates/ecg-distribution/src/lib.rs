//! Empirical distribution and density estimation for ECG segments
//!
//! This crate turns a sample sequence into three distribution views:
//!
//! - **ECDF** ([`Ecdf`]): right-continuous step function, ties share the
//!   probability of their last occurrence
//! - **Histogram** ([`FixedWidthBuilder`]): equal-width bins over `[min, max]`,
//!   closed-open except the last bin
//! - **Kernel density** ([`GaussianKde`]): Gaussian kernel with a Scott
//!   (default), Silverman or fixed bandwidth
//!
//! [`DensityEstimator`] bundles the histogram and the KDE into one
//! [`DensityEstimate`], the probability density result the pipeline renders.
//!
//! # Examples
//!
//! ```rust
//! use ecg_distribution::{compute_pdf, Bandwidth, Ecdf};
//!
//! let data = vec![0.1, 0.4, 0.4, 0.9, 1.3, 0.7, 0.2];
//!
//! let ecdf = Ecdf::compute(&data).unwrap();
//! assert_eq!(*ecdf.probabilities().last().unwrap(), 1.0);
//!
//! let pdf = compute_pdf(&data, 5, Bandwidth::Scott).unwrap();
//! println!("{} (h = {:.3})", pdf.histogram, pdf.bandwidth);
//! ```
//!
//! Constant input has no spread, so the histogram width and the bandwidth are
//! undefined:
//!
//! ```rust
//! use ecg_core::Error;
//! use ecg_distribution::{compute_pdf, Bandwidth};
//!
//! let err = compute_pdf(&[5.0, 5.0, 5.0, 5.0], 30, Bandwidth::Scott).unwrap_err();
//! assert!(matches!(err, Error::DegenerateInput(_)));
//! ```

pub mod builders;
pub mod density;
pub mod ecdf;
pub mod kde;
pub mod traits;
pub mod types;

// Re-export main types and traits
pub use builders::FixedWidthBuilder;
pub use density::{compute_pdf, DegeneratePolicy, DensityConfig, DensityEstimate, DensityEstimator};
pub use ecdf::Ecdf;
pub use kde::{Bandwidth, GaussianKde};
pub use traits::HistogramBuilder;
pub use types::{Histogram, HistogramBin};

pub use ecg_core::Result;

/// Create a histogram with a fixed number of equal-width bins
pub fn fixed_histogram(data: &[f64], num_bins: usize) -> Result<Histogram> {
    FixedWidthBuilder::new(num_bins)?.build(data)
}

/// Compute the ECDF of `data`
pub fn compute_ecdf(data: &[f64]) -> Result<Ecdf> {
    Ecdf::compute(data)
}
