//! Gaussian kernel density estimation
//!
//! The density at `x` is
//!
//! ```text
//! f(x) = 1 / (N h) * sum_i phi((x - x_i) / h),   phi(u) = exp(-u^2 / 2) / sqrt(2 pi)
//! ```
//!
//! The bandwidth `h` comes from a [`Bandwidth`] rule. Both rules scale the
//! sample standard deviation `s` (divisor N - 1):
//!
//! - Scott: `h = s * N^(-1/5)`
//! - Silverman: `h = s * (3N / 4)^(-1/5)`

use ecg_core::{Curve, Error, Result, SignalStatistics};
use serde::{Deserialize, Serialize};
use statrs::consts::SQRT_2PI;
use std::fmt;
use std::str::FromStr;

/// Bandwidth selection rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Bandwidth {
    /// Scott's rule of thumb
    #[default]
    Scott,
    /// Silverman's rule of thumb
    Silverman,
    /// Explicit bandwidth in sample units
    Fixed(f64),
}

impl Bandwidth {
    /// Resolve the rule to a concrete bandwidth for `samples`
    pub fn select(&self, samples: &[f64]) -> Result<f64> {
        if samples.is_empty() {
            return Err(Error::empty_input("bandwidth selection"));
        }

        let h = match *self {
            Bandwidth::Fixed(h) => {
                if !h.is_finite() || h <= 0.0 {
                    return Err(Error::InvalidParameter(format!(
                        "kernel bandwidth must be positive and finite, got {h}"
                    )));
                }
                return Ok(h);
            }
            Bandwidth::Scott => sample_std(samples)? * scott_factor(samples.len()),
            Bandwidth::Silverman => sample_std(samples)? * silverman_factor(samples.len()),
        };

        if h > 0.0 {
            Ok(h)
        } else {
            Err(Error::constant_signal("kernel bandwidth"))
        }
    }
}

impl fmt::Display for Bandwidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bandwidth::Scott => write!(f, "scott"),
            Bandwidth::Silverman => write!(f, "silverman"),
            Bandwidth::Fixed(h) => write!(f, "{h}"),
        }
    }
}

impl FromStr for Bandwidth {
    type Err = Error;

    /// Accepts `scott`, `silverman` or a positive number
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scott" => Ok(Bandwidth::Scott),
            "silverman" => Ok(Bandwidth::Silverman),
            other => other
                .parse::<f64>()
                .ok()
                .filter(|h| h.is_finite() && *h > 0.0)
                .map(Bandwidth::Fixed)
                .ok_or_else(|| {
                    Error::InvalidParameter(format!(
                        "bandwidth must be 'scott', 'silverman' or a positive number, got '{s}'"
                    ))
                }),
        }
    }
}

/// `N^(-1/5)`
pub fn scott_factor(n: usize) -> f64 {
    (n as f64).powf(-0.2)
}

/// `(3N / 4)^(-1/5)`
pub fn silverman_factor(n: usize) -> f64 {
    (n as f64 * 0.75).powf(-0.2)
}

fn sample_std(samples: &[f64]) -> Result<f64> {
    if samples.len() < 2 {
        return Err(Error::constant_signal("kernel bandwidth"));
    }
    let stats = SignalStatistics::compute(samples)?;
    Ok(stats.sample_variance().unwrap_or(0.0).sqrt())
}

/// A Gaussian KDE with a resolved bandwidth
#[derive(Debug, Clone)]
pub struct GaussianKde<'a> {
    samples: &'a [f64],
    bandwidth: f64,
}

impl<'a> GaussianKde<'a> {
    /// Fit a KDE to `samples` with the given bandwidth rule
    pub fn new(samples: &'a [f64], rule: Bandwidth) -> Result<Self> {
        let bandwidth = rule.select(samples)?;
        Ok(Self { samples, bandwidth })
    }

    /// The resolved bandwidth
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Density at a single point
    pub fn evaluate(&self, x: f64) -> f64 {
        let h = self.bandwidth;
        let norm = 1.0 / (self.samples.len() as f64 * h * SQRT_2PI);
        let sum: f64 = self
            .samples
            .iter()
            .map(|&xi| {
                let u = (x - xi) / h;
                (-0.5 * u * u).exp()
            })
            .sum();
        sum * norm
    }

    /// Density over `points` evenly spaced values in `[lo, hi]`
    pub fn evaluate_grid(&self, lo: f64, hi: f64, points: usize) -> Result<Curve> {
        let grid = linspace(lo, hi, points)?;

        #[cfg(feature = "parallel")]
        let density: Vec<f64> = {
            use rayon::prelude::*;
            grid.par_iter().map(|&x| self.evaluate(x)).collect()
        };
        #[cfg(not(feature = "parallel"))]
        let density: Vec<f64> = grid.iter().map(|&x| self.evaluate(x)).collect();

        Ok(Curve::new(grid, density))
    }
}

/// `points` evenly spaced values from `lo` to `hi` inclusive
pub fn linspace(lo: f64, hi: f64, points: usize) -> Result<Vec<f64>> {
    if points < 2 {
        return Err(Error::InvalidParameter(format!(
            "a grid needs at least 2 points, got {points}"
        )));
    }
    if !(lo.is_finite() && hi.is_finite()) || hi < lo {
        return Err(Error::InvalidRange(format!(
            "grid bounds [{lo}, {hi}] are not an increasing finite interval"
        )));
    }
    let step = (hi - lo) / (points - 1) as f64;
    let mut grid: Vec<f64> = (0..points).map(|i| lo + i as f64 * step).collect();
    grid[points - 1] = hi;
    Ok(grid)
}
