//! Probability density estimate: fixed-width histogram plus Gaussian KDE

use crate::builders::FixedWidthBuilder;
use crate::kde::{Bandwidth, GaussianKde};
use crate::traits::HistogramBuilder;
use crate::types::{Histogram, HistogramBin};
use ecg_core::{statistics, Curve, Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// What to do when every sample has the same value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Fail with `DegenerateInput`
    #[default]
    Fail,
    /// Return a unit-mass spike at the constant value
    Spike,
}

/// Parameters of the density estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DensityConfig {
    /// Number of equal-width histogram bins
    pub bins: usize,
    /// Kernel bandwidth rule
    pub bandwidth: Bandwidth,
    /// Number of KDE evaluation points
    pub grid_points: usize,
    /// Grid extension beyond min/max, in bandwidths
    pub padding: f64,
    /// Behaviour for constant input
    pub degenerate: DegeneratePolicy,
}

impl Default for DensityConfig {
    fn default() -> Self {
        Self {
            bins: 30,
            bandwidth: Bandwidth::Scott,
            grid_points: 1000,
            padding: 3.0,
            degenerate: DegeneratePolicy::Fail,
        }
    }
}

impl DensityConfig {
    /// Check every parameter without looking at data
    pub fn validate(&self) -> Result<()> {
        if self.bins == 0 {
            return Err(Error::InvalidParameter(
                "histogram bin count must be positive".to_string(),
            ));
        }
        if self.grid_points < 2 {
            return Err(Error::InvalidParameter(format!(
                "KDE grid needs at least 2 points, got {}",
                self.grid_points
            )));
        }
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "KDE padding must be a non-negative number of bandwidths, got {}",
                self.padding
            )));
        }
        if let Bandwidth::Fixed(h) = self.bandwidth {
            if !h.is_finite() || h <= 0.0 {
                return Err(Error::InvalidParameter(format!(
                    "kernel bandwidth must be positive and finite, got {h}"
                )));
            }
        }
        Ok(())
    }
}

/// Histogram and smoothed density curve of one sample sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityEstimate {
    /// Equal-width histogram with density-normalized bins
    pub histogram: Histogram,
    /// KDE evaluated on the grid
    pub curve: Curve,
    /// Resolved kernel bandwidth (0 for a spike)
    pub bandwidth: f64,
    /// True when this is the constant-signal spike
    pub degenerate: bool,
}

impl DensityEstimate {
    /// Unit-mass spike at `value` standing in for a constant signal
    ///
    /// The histogram holds every sample in one bin of half-width `delta` and the
    /// curve is a triangle of the same support, both integrating to one.
    pub fn spike(value: f64, count: usize) -> Self {
        let delta = (value.abs() * 1e-3).max(1e-3);
        let bin = HistogramBin::new(value - delta, value + delta, count, count);
        let histogram = Histogram::new(vec![bin], count, value, value);
        let curve = Curve::new(
            vec![value - delta, value, value + delta],
            vec![0.0, 1.0 / delta, 0.0],
        );
        Self {
            histogram,
            curve,
            bandwidth: 0.0,
            degenerate: true,
        }
    }
}

/// Builds a [`DensityEstimate`] from a sample sequence
#[derive(Debug, Clone, Default)]
pub struct DensityEstimator {
    config: DensityConfig,
}

impl DensityEstimator {
    /// Create an estimator with the given parameters
    pub fn new(config: DensityConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The estimator's parameters
    pub fn config(&self) -> &DensityConfig {
        &self.config
    }

    /// Histogram plus KDE of `samples`
    #[instrument(level = "debug", skip(self, samples), fields(n = samples.len()))]
    pub fn compute(&self, samples: &[f64]) -> Result<DensityEstimate> {
        if samples.is_empty() {
            return Err(Error::empty_input("probability density estimate"));
        }

        let (min, max) = statistics::min_max(samples);
        if min == max {
            return match self.config.degenerate {
                DegeneratePolicy::Fail => {
                    Err(Error::constant_signal("probability density estimate"))
                }
                DegeneratePolicy::Spike => {
                    debug!("constant signal at {min}, returning spike density");
                    Ok(DensityEstimate::spike(min, samples.len()))
                }
            };
        }

        let histogram = FixedWidthBuilder::new(self.config.bins)?.build(samples)?;
        let kde = GaussianKde::new(samples, self.config.bandwidth)?;
        let h = kde.bandwidth();
        let pad = self.config.padding * h;
        let curve = kde.evaluate_grid(min - pad, max + pad, self.config.grid_points)?;

        debug!(
            bandwidth = h,
            bins = histogram.len(),
            area = curve.trapezoid_area(),
            "density estimate complete"
        );

        Ok(DensityEstimate {
            histogram,
            curve,
            bandwidth: h,
            degenerate: false,
        })
    }
}

/// Histogram plus KDE with an explicit bin count and bandwidth rule
pub fn compute_pdf(samples: &[f64], bins: usize, bandwidth: Bandwidth) -> Result<DensityEstimate> {
    DensityEstimator::new(DensityConfig {
        bins,
        bandwidth,
        ..DensityConfig::default()
    })?
    .compute(samples)
}
