//! Histogram building strategies

use crate::traits::HistogramBuilder;
use crate::types::{Histogram, HistogramBin};
use ecg_core::{Error, Result};

/// Fixed-width histogram builder
///
/// Creates a histogram with a specified number of equal-width bins spanning
/// `[min, max]` of the sample. Bins are closed-open except the last, which is
/// closed on both ends so the maximum is counted.
#[derive(Debug, Clone, Copy)]
pub struct FixedWidthBuilder {
    num_bins: usize,
}

impl FixedWidthBuilder {
    /// Create a new fixed-width histogram builder
    pub fn new(num_bins: usize) -> Result<Self> {
        if num_bins == 0 {
            return Err(Error::InvalidParameter(
                "histogram bin count must be positive".to_string(),
            ));
        }
        Ok(Self { num_bins })
    }

    /// Number of bins this builder produces for non-constant data
    pub fn num_bins(&self) -> usize {
        self.num_bins
    }
}

impl HistogramBuilder for FixedWidthBuilder {
    fn build(&self, sample: &[f64]) -> Result<Histogram> {
        let mut sorted = sample.to_vec();
        sorted.sort_by(f64::total_cmp);
        self.build_sorted(&sorted)
    }

    fn build_sorted(&self, sorted_sample: &[f64]) -> Result<Histogram> {
        if sorted_sample.is_empty() {
            return Err(Error::empty_input("histogram"));
        }

        // O(1) min/max from sorted data
        let total = sorted_sample.len();
        let min = sorted_sample[0];
        let max = sorted_sample[total - 1];

        if max == min {
            // All values are the same: one zero-width bin holding everything
            let bin = HistogramBin::new(min, max, total, total);
            return Ok(Histogram::new(vec![bin], total, min, max));
        }

        let width = (max - min) / self.num_bins as f64;
        let mut bins: Vec<HistogramBin> = (0..self.num_bins)
            .map(|i| {
                let left = min + i as f64 * width;
                let right = if i == self.num_bins - 1 {
                    max // Ensure last bin includes max
                } else {
                    min + (i + 1) as f64 * width
                };
                HistogramBin::new(left, right, 0, total)
            })
            .collect();

        // Single pass through sorted data
        let mut current_bin = 0;
        for &value in sorted_sample {
            while current_bin < self.num_bins - 1 && value >= bins[current_bin].right {
                current_bin += 1;
            }
            bins[current_bin].count += 1;
        }

        for bin in &mut bins {
            bin.density = bin.count as f64 / (total as f64 * bin.width());
        }

        Ok(Histogram::new(bins, total, min, max))
    }

    fn target_bins(&self) -> Option<usize> {
        Some(self.num_bins)
    }
}
