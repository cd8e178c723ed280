//! Descriptive statistics of a sample sequence
//!
//! Variance is the **population** variance: the mean squared deviation from the
//! mean, divided by N (not N - 1).

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mean, population variance and standard deviation of a segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalStatistics {
    /// Number of samples
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Population variance (divisor N)
    pub variance: f64,
    /// Square root of the population variance
    pub std_dev: f64,
    /// Smallest sample
    pub min: f64,
    /// Largest sample
    pub max: f64,
}

impl SignalStatistics {
    /// Compute the statistics of `samples`
    pub fn compute(samples: &[f64]) -> Result<Self> {
        if samples.is_empty() {
            return Err(Error::empty_input("statistics"));
        }

        let (min, max) = min_max(samples);
        let count = samples.len();

        // Constant input: report exact zeros rather than rounding residue
        if min == max {
            return Ok(Self {
                count,
                mean: min,
                variance: 0.0,
                std_dev: 0.0,
                min,
                max,
            });
        }

        let mean = mean(samples)?;
        let variance = centered_variance(samples, mean);

        Ok(Self {
            count,
            mean,
            variance,
            std_dev: variance.sqrt(),
            min,
            max,
        })
    }

    /// Range of the samples
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Sample (N - 1) variance derived from the population variance
    pub fn sample_variance(&self) -> Option<f64> {
        (self.count > 1).then(|| self.variance * self.count as f64 / (self.count - 1) as f64)
    }
}

impl fmt::Display for SignalStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={}, mean={:.4}, variance={:.4}, std={:.4}",
            self.count, self.mean, self.variance, self.std_dev
        )
    }
}

/// Arithmetic mean
pub fn mean(samples: &[f64]) -> Result<f64> {
    if samples.is_empty() {
        return Err(Error::empty_input("mean"));
    }
    Ok(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Population variance (divisor N)
pub fn population_variance(samples: &[f64]) -> Result<f64> {
    Ok(SignalStatistics::compute(samples)?.variance)
}

/// Smallest and largest value of a non-empty slice
pub fn min_max(samples: &[f64]) -> (f64, f64) {
    samples
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
            (lo.min(x), hi.max(x))
        })
}

/// Subtract the mean from every sample
pub fn mean_centered(samples: &[f64]) -> Result<Vec<f64>> {
    let m = mean(samples)?;
    Ok(samples.iter().map(|&x| x - m).collect())
}

// Corrected two-pass algorithm: the second term cancels rounding error in `mean`.
fn centered_variance(samples: &[f64], mean: f64) -> f64 {
    let n = samples.len() as f64;
    let (sum_sq, sum) = samples.iter().fold((0.0, 0.0), |(sq, s), &x| {
        let d = x - mean;
        (sq + d * d, s + d)
    });
    ((sum_sq - sum * sum / n) / n).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_population_variance_example() {
        let stats = SignalStatistics::compute(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(stats.count, 5);
        assert_relative_eq!(stats.mean, 3.0);
        // Divisor N: 10 / 5, not 10 / 4
        assert_relative_eq!(stats.variance, 2.0, epsilon = 1e-12);
        assert_relative_eq!(stats.std_dev, 1.4142, epsilon = 1e-4);
        assert_relative_eq!(stats.sample_variance().unwrap(), 2.5, epsilon = 1e-12);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
    }

    #[test]
    fn test_constant_signal_has_zero_spread() {
        let stats = SignalStatistics::compute(&[5.0, 5.0, 5.0, 5.0]).unwrap();
        assert_eq!(stats.mean, 5.0);
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.range(), 0.0);
    }

    #[test]
    fn test_single_sample() {
        let stats = SignalStatistics::compute(&[-0.3]).unwrap();
        assert_eq!(stats.mean, -0.3);
        assert_eq!(stats.variance, 0.0);
        assert!(stats.sample_variance().is_none());
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(SignalStatistics::compute(&[]), Err(Error::EmptyInput(_))));
        assert!(matches!(mean(&[]), Err(Error::EmptyInput(_))));
        assert!(matches!(population_variance(&[]), Err(Error::EmptyInput(_))));
    }

    #[test]
    fn test_large_offset_is_stable() {
        // Values far from zero: naive E[x^2] - E[x]^2 loses all precision here
        let data: Vec<f64> = (0..1000).map(|i| 1e9 + (i % 2) as f64).collect();
        let stats = SignalStatistics::compute(&data).unwrap();
        assert_relative_eq!(stats.variance, 0.25, epsilon = 1e-6);
    }

    #[test]
    fn test_mean_centered() {
        let centered = mean_centered(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(centered, vec![-1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_display() {
        let stats = SignalStatistics::compute(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(
            stats.to_string(),
            "n=5, mean=3.0000, variance=2.0000, std=1.4142"
        );
    }
}
