//! Empirical cumulative distribution function
//!
//! The ECDF is the right-continuous step function `F(x) = #{x_i <= x} / N`.
//! Evaluated at the sorted samples, the i-th smallest value (1-indexed) maps to
//! `i / N`; tied values all take the probability of the last member of their
//! run, so equal amplitudes never receive different probabilities.

use ecg_core::{Curve, Error, Result};
use serde::{Deserialize, Serialize};

/// Step-function ECDF evaluated at every sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ecdf {
    values: Vec<f64>,
    probabilities: Vec<f64>,
}

impl Ecdf {
    /// Compute the ECDF of `samples`
    pub fn compute(samples: &[f64]) -> Result<Self> {
        if samples.is_empty() {
            return Err(Error::empty_input("ECDF"));
        }

        let mut values = samples.to_vec();
        values.sort_by(f64::total_cmp);

        let n = values.len();
        let mut probabilities = vec![0.0; n];
        let mut run_start = 0;
        for i in 0..n {
            let run_ends_here = i + 1 == n || values[i + 1] != values[i];
            if run_ends_here {
                let p = (i + 1) as f64 / n as f64;
                probabilities[run_start..=i].fill(p);
                run_start = i + 1;
            }
        }

        Ok(Self {
            values,
            probabilities,
        })
    }

    /// Sorted sample values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Cumulative probability at each sorted value
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Number of samples the ECDF was built from
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a computed ECDF
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Evaluate `F(x)` at an arbitrary point
    pub fn evaluate(&self, x: f64) -> f64 {
        let below_or_equal = self.values.partition_point(|&v| v <= x);
        below_or_equal as f64 / self.values.len() as f64
    }

    /// The (value, probability) pairs as a curve
    pub fn curve(&self) -> Curve {
        Curve::new(self.values.clone(), self.probabilities.clone())
    }
}
