//! Backend-independent plot description

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// The five plots produced per record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlotKind {
    Signal,
    Ecdf,
    Pdf,
    Autocorrelation,
    Psd,
}

impl PlotKind {
    /// Every kind, in rendering order
    pub const ALL: [PlotKind; 5] = [
        PlotKind::Signal,
        PlotKind::Ecdf,
        PlotKind::Pdf,
        PlotKind::Autocorrelation,
        PlotKind::Psd,
    ];

    /// Output subdirectory for this kind
    pub fn dir_name(&self) -> &'static str {
        match self {
            PlotKind::Signal => "ecg_signal",
            PlotKind::Ecdf => "ecdf",
            PlotKind::Pdf => "pdf",
            PlotKind::Autocorrelation => "autocorrelation",
            PlotKind::Psd => "psd",
        }
    }
}

impl fmt::Display for PlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// How a series is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeriesStyle {
    /// Connected polyline
    Line,
    /// Unconnected dots
    Markers,
    /// Filled bars of the given width, centred on each x
    Bars { width: f64 },
}

/// Scale of the y axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisScale {
    #[default]
    Linear,
    /// Base-10 logarithmic; non-positive values are not drawn
    Log,
}

/// One labelled data series
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    pub style: SeriesStyle,
}

impl Series {
    pub fn new(label: impl Into<String>, points: Vec<(f64, f64)>, style: SeriesStyle) -> Self {
        Self {
            label: label.into(),
            points,
            style,
        }
    }

    /// Polyline through `x` and `y`
    pub fn line(label: impl Into<String>, x: &[f64], y: &[f64]) -> Self {
        Self::new(label, zip_points(x, y), SeriesStyle::Line)
    }

    /// Dots at `x` and `y`
    pub fn markers(label: impl Into<String>, x: &[f64], y: &[f64]) -> Self {
        Self::new(label, zip_points(x, y), SeriesStyle::Markers)
    }
}

fn zip_points(x: &[f64], y: &[f64]) -> Vec<(f64, f64)> {
    x.iter().copied().zip(y.iter().copied()).collect()
}

/// A complete, self-contained plot
#[derive(Debug, Clone, PartialEq)]
pub struct Plot {
    pub kind: PlotKind,
    pub record_id: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
    pub y_scale: AxisScale,
}

impl Plot {
    /// Empty plot of `kind` for `record_id`
    pub fn new(kind: PlotKind, record_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            kind,
            record_id: record_id.into(),
            title: title.into(),
            x_label: String::new(),
            y_label: String::new(),
            series: Vec::new(),
            y_scale: AxisScale::Linear,
        }
    }

    pub fn with_axes(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn with_y_scale(mut self, scale: AxisScale) -> Self {
        self.y_scale = scale;
        self
    }

    /// Total number of points across all series
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    /// `<kind>/<record>.<extension>`
    pub fn relative_path(&self, extension: &str) -> PathBuf {
        Path::new(self.kind.dir_name()).join(format!("{}.{extension}", self.record_id))
    }

    /// `<root>/<kind>/<record>.<extension>`
    pub fn output_path(&self, root: &Path, extension: &str) -> PathBuf {
        root.join(self.relative_path(extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_directories() {
        let dirs: Vec<_> = PlotKind::ALL.iter().map(|k| k.dir_name()).collect();
        assert_eq!(dirs, vec!["ecg_signal", "ecdf", "pdf", "autocorrelation", "psd"]);
    }

    #[test]
    fn test_output_path() {
        let plot = Plot::new(PlotKind::Psd, "chf01", "PSD");
        assert_eq!(
            plot.output_path(Path::new("grafice"), "svg"),
            PathBuf::from("grafice/psd/chf01.svg")
        );
    }

    #[test]
    fn test_builder() {
        let plot = Plot::new(PlotKind::Ecdf, "r", "t")
            .with_axes("x", "F(x)")
            .with_series(Series::markers("ecdf", &[1.0, 2.0], &[0.5, 1.0]))
            .with_y_scale(AxisScale::Log);
        assert_eq!(plot.point_count(), 2);
        assert_eq!(plot.series[0].points, vec![(1.0, 0.5), (2.0, 1.0)]);
        assert_eq!(plot.y_scale, AxisScale::Log);
    }
}
