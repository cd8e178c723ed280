//! Normalized autocorrelation
//!
//! For the mean-centered sequence `y` of length `N`,
//!
//! ```text
//! r[k] = sum_{t=0}^{N-1-k} y[t] y[t+k] / sum_t y[t]^2,   k = 0..=max_lag
//! ```
//!
//! so `r[0] = 1` and `|r[k]| <= 1`. Short workloads use the direct sum; long
//! ones go through a zero-padded FFT (Wiener-Khinchin), which gives the same
//! linear (not circular) correlation up to rounding.

use ecg_core::{statistics, validate_sampling_rate, Curve, Error, Result};
use num_complex::Complex;
use rustfft::FftPlanner;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Above this many multiply-adds the FFT path is used
const DIRECT_WORK_LIMIT: usize = 1 << 18;

/// How to evaluate the lag sums
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Pick by workload size
    Auto,
    /// O(N * max_lag) direct sum
    Direct,
    /// O(N log N) zero-padded FFT
    Fft,
}

/// Autocorrelation parameters
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AutocorrelationConfig {
    /// Largest lag in samples; `None` means `N - 1`
    pub max_lag: Option<usize>,
}

impl AutocorrelationConfig {
    /// The lag range for a sequence of `len` samples
    pub fn resolve_max_lag(&self, len: usize) -> Result<usize> {
        if len == 0 {
            return Err(Error::empty_input("autocorrelation"));
        }
        Ok(self.max_lag.unwrap_or(len - 1))
    }
}

/// Correlation coefficient per lag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Autocorrelation {
    values: Vec<f64>,
}

impl Autocorrelation {
    /// Autocorrelation of `samples` for lags `0..=max_lag`
    pub fn compute(samples: &[f64], max_lag: usize) -> Result<Self> {
        Self::compute_with(samples, max_lag, Method::Auto)
    }

    /// Autocorrelation using an explicit evaluation method
    #[instrument(level = "debug", skip(samples), fields(n = samples.len()))]
    pub fn compute_with(samples: &[f64], max_lag: usize, method: Method) -> Result<Self> {
        if samples.is_empty() {
            return Err(Error::empty_input("autocorrelation"));
        }
        if max_lag >= samples.len() {
            return Err(Error::lag_out_of_range(max_lag, samples.len()));
        }

        // Compare extremes: centering a constant can leave ulp-sized residues
        let (min, max) = statistics::min_max(samples);
        if min == max {
            return Err(Error::constant_signal("autocorrelation"));
        }
        let centered = statistics::mean_centered(samples)?;

        let use_fft = match method {
            Method::Auto => samples.len().saturating_mul(max_lag + 1) > DIRECT_WORK_LIMIT,
            Method::Direct => false,
            Method::Fft => true,
        };

        let raw = if use_fft {
            fft_lag_sums(&centered, max_lag)
        } else {
            direct_lag_sums(&centered, max_lag)
        };

        let zero_lag = raw[0];
        if zero_lag <= 0.0 {
            return Err(Error::constant_signal("autocorrelation"));
        }

        // Rounding in the FFT path can push |r| a hair past 1
        let values = raw
            .iter()
            .map(|&r| (r / zero_lag).clamp(-1.0, 1.0))
            .collect();

        debug!(max_lag, use_fft, "autocorrelation complete");
        Ok(Self { values })
    }

    /// Correlation at each lag, starting from lag 0
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Lags in samples
    pub fn lags(&self) -> impl Iterator<Item = usize> + '_ {
        0..self.values.len()
    }

    /// Largest lag computed
    pub fn max_lag(&self) -> usize {
        self.values.len() - 1
    }

    /// Number of lags, `max_lag + 1`
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a computed result
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Correlation at `lag`, if computed
    pub fn at(&self, lag: usize) -> Option<f64> {
        self.values.get(lag).copied()
    }

    /// Lags converted to seconds at `sampling_rate` Hz
    pub fn lag_seconds(&self, sampling_rate: f64) -> Result<Vec<f64>> {
        validate_sampling_rate(sampling_rate)?;
        Ok(self.lags().map(|k| k as f64 / sampling_rate).collect())
    }

    /// (lag, correlation) as a curve; lags in seconds when a rate is given
    pub fn curve(&self, sampling_rate: Option<f64>) -> Result<Curve> {
        let x = match sampling_rate {
            Some(fs) => self.lag_seconds(fs)?,
            None => self.lags().map(|k| k as f64).collect(),
        };
        Ok(Curve::new(x, self.values.clone()))
    }
}

/// Autocorrelation up to `max_lag` with automatic method selection
pub fn compute_autocorrelation(samples: &[f64], max_lag: usize) -> Result<Autocorrelation> {
    Autocorrelation::compute(samples, max_lag)
}

fn direct_lag_sums(centered: &[f64], max_lag: usize) -> Vec<f64> {
    (0..=max_lag)
        .map(|k| {
            centered[..centered.len() - k]
                .iter()
                .zip(&centered[k..])
                .map(|(a, b)| a * b)
                .sum()
        })
        .collect()
}

fn fft_lag_sums(centered: &[f64], max_lag: usize) -> Vec<f64> {
    // At least 2N - 1 points so the circular correlation equals the linear one
    let size = (2 * centered.len() - 1).next_power_of_two();

    let mut planner = FftPlanner::new();
    let forward = planner.plan_fft_forward(size);
    let inverse = planner.plan_fft_inverse(size);

    let mut buffer: Vec<Complex<f64>> = centered
        .iter()
        .map(|&y| Complex::new(y, 0.0))
        .chain(std::iter::repeat(Complex::new(0.0, 0.0)))
        .take(size)
        .collect();

    forward.process(&mut buffer);
    for c in buffer.iter_mut() {
        *c = Complex::new(c.norm_sqr(), 0.0);
    }
    inverse.process(&mut buffer);

    // rustfft leaves the inverse unnormalized
    let scale = 1.0 / size as f64;
    buffer[..=max_lag].iter().map(|c| c.re * scale).collect()
}
