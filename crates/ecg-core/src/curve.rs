//! Ordered (x, y) pairs shared by every estimator result

use serde::{Deserialize, Serialize};

/// An ordered sequence of (x, y) pairs with x non-decreasing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Curve {
    /// Build a curve from parallel axes
    ///
    /// # Panics
    /// Panics if the axes have different lengths.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        assert_eq!(x.len(), y.len(), "curve axes must have equal length");
        Self { x, y }
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// True when the curve has no points
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Iterate over (x, y) pairs
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Trapezoidal integral of y over x
    pub fn trapezoid_area(&self) -> f64 {
        self.x
            .windows(2)
            .zip(self.y.windows(2))
            .map(|(x, y)| (x[1] - x[0]) * (y[0] + y[1]) * 0.5)
            .sum()
    }

    /// (min, max) of the y values, ignoring non-finite entries
    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        bounds(&self.y)
    }

    /// (min, max) of the x values, ignoring non-finite entries
    pub fn x_bounds(&self) -> Option<(f64, f64)> {
        bounds(&self.x)
    }
}

impl FromIterator<(f64, f64)> for Curve {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        let (x, y) = iter.into_iter().unzip();
        Self { x, y }
    }
}

fn bounds(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trapezoid_area_of_unit_square() {
        let curve = Curve::new(vec![0.0, 0.5, 1.0], vec![1.0, 1.0, 1.0]);
        assert_eq!(curve.trapezoid_area(), 1.0);
    }

    #[test]
    fn test_bounds_skip_non_finite() {
        let curve: Curve = vec![(0.0, f64::NEG_INFINITY), (1.0, 2.0), (2.0, -1.0)]
            .into_iter()
            .collect();
        assert_eq!(curve.x_bounds(), Some((0.0, 2.0)));
        assert_eq!(curve.y_bounds(), Some((-1.0, 2.0)));
        assert_eq!(Curve::default().y_bounds(), None);
    }
}
