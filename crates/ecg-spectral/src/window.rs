//! Tapering windows

use std::f64::consts::PI;

/// Periodic Hann window of `length` samples
///
/// `w[n] = 0.5 - 0.5 cos(2 pi n / length)`. The periodic form (denominator
/// `length`, not `length - 1`) is the one used for spectral analysis: its
/// shifted copies at 50 % overlap sum to a constant.
pub fn hann(length: usize) -> Vec<f64> {
    match length {
        0 => Vec::new(),
        1 => vec![1.0],
        _ => {
            let n = length as f64;
            (0..length)
                .map(|i| 0.5 - 0.5 * (2.0 * PI * i as f64 / n).cos())
                .collect()
        }
    }
}

/// Sum of squared window coefficients, the power normalizer of a periodogram
pub fn energy(window: &[f64]) -> f64 {
    window.iter().map(|w| w * w).sum()
}
