//! SVG rendering with plotters

use crate::plot::{AxisScale, Plot, SeriesStyle};
use crate::renderer::{RenderTarget, Rendered, Renderer};
use ecg_core::{Error, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fmt;
use std::fs;
use std::ops::Range;
use tracing::{debug, info};

const PALETTE: [RGBColor; 4] = [BLUE, RED, GREEN, MAGENTA];

/// Renders plots as standalone SVG documents
#[derive(Debug, Clone, Copy)]
pub struct SvgRenderer {
    width: u32,
    height: u32,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 400,
        }
    }
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document size in pixels
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>, plot: &Plot) -> Result<()> {
        let log = plot.y_scale == AxisScale::Log;
        let prepared: Vec<Vec<(f64, f64)>> = plot
            .series
            .iter()
            .map(|s| project(&s.points, plot.y_scale))
            .collect();
        let (x_range, y_range) = axis_ranges(plot, &prepared);

        root.fill(&WHITE).map_err(render_error)?;
        let mut chart = ChartBuilder::on(root)
            .caption(plot.title.as_str(), ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(x_range, y_range)
            .map_err(render_error)?;

        let y_formatter = |v: &f64| {
            if log {
                format!("{:.1e}", 10f64.powf(*v))
            } else {
                format!("{v:.3}")
            }
        };
        chart
            .configure_mesh()
            .x_desc(plot.x_label.as_str())
            .y_desc(plot.y_label.as_str())
            .y_label_formatter(&y_formatter)
            .draw()
            .map_err(render_error)?;

        for (index, (series, points)) in plot.series.iter().zip(&prepared).enumerate() {
            let color = PALETTE[index % PALETTE.len()];
            match series.style {
                SeriesStyle::Line => {
                    chart
                        .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(1)))
                        .map_err(render_error)?
                        .label(series.label.as_str())
                        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
                }
                SeriesStyle::Markers => {
                    chart
                        .draw_series(points.iter().map(|&p| Circle::new(p, 2, color.filled())))
                        .map_err(render_error)?
                        .label(series.label.as_str())
                        .legend(move |(x, y)| Circle::new((x + 10, y), 3, color.filled()));
                }
                SeriesStyle::Bars { width } => {
                    let half = width / 2.0;
                    chart
                        .draw_series(points.iter().map(|&(x, y)| {
                            Rectangle::new([(x - half, 0.0), (x + half, y)], color.mix(0.5).filled())
                        }))
                        .map_err(render_error)?
                        .label(series.label.as_str())
                        .legend(move |(x, y)| {
                            Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.mix(0.5).filled())
                        });
                }
            }
        }

        if plot.series.len() > 1 {
            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(render_error)?;
        }

        root.present().map_err(render_error)?;
        Ok(())
    }
}

impl Renderer for SvgRenderer {
    fn render(&self, plot: &Plot, target: &RenderTarget) -> Result<Rendered> {
        match target {
            RenderTarget::Display => {
                let mut document = String::new();
                {
                    let root = SVGBackend::with_string(&mut document, (self.width, self.height))
                        .into_drawing_area();
                    self.draw(&root, plot)?;
                }
                debug!(kind = %plot.kind, bytes = document.len(), "plot rendered in memory");
                Ok(Rendered::Inline(document))
            }
            RenderTarget::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)?;
                }
                {
                    let root = SVGBackend::new(path, (self.width, self.height)).into_drawing_area();
                    self.draw(&root, plot)?;
                }
                info!(path = %path.display(), "plot saved");
                Ok(Rendered::File(path.clone()))
            }
        }
    }

    fn extension(&self) -> &'static str {
        "svg"
    }
}

/// Points in axis space: finite only, log10 of y on a log axis
fn project(points: &[(f64, f64)], scale: AxisScale) -> Vec<(f64, f64)> {
    points
        .iter()
        .filter_map(|&(x, y)| {
            let y = match scale {
                AxisScale::Linear => y,
                AxisScale::Log if y > 0.0 => y.log10(),
                AxisScale::Log => return None,
            };
            (x.is_finite() && y.is_finite()).then_some((x, y))
        })
        .collect()
}

fn axis_ranges(plot: &Plot, prepared: &[Vec<(f64, f64)>]) -> (Range<f64>, Range<f64>) {
    let mut x = (f64::INFINITY, f64::NEG_INFINITY);
    let mut y = (f64::INFINITY, f64::NEG_INFINITY);
    for (series, points) in plot.series.iter().zip(prepared) {
        let half = match series.style {
            SeriesStyle::Bars { width } => {
                y = (y.0.min(0.0), y.1.max(0.0));
                width / 2.0
            }
            _ => 0.0,
        };
        for &(px, py) in points {
            x = (x.0.min(px - half), x.1.max(px + half));
            y = (y.0.min(py), y.1.max(py));
        }
    }
    (padded(x, 0.0), padded(y, 0.05))
}

fn padded((lo, hi): (f64, f64), fraction: f64) -> Range<f64> {
    if !(lo.is_finite() && hi.is_finite()) {
        return 0.0..1.0;
    }
    if hi - lo <= f64::EPSILON * lo.abs().max(1.0) {
        let half = (lo.abs() * 0.05).max(0.5);
        return (lo - half)..(hi + half);
    }
    let pad = (hi - lo) * fraction;
    (lo - pad)..(hi + pad)
}

fn render_error<E: fmt::Display>(err: E) -> Error {
    Error::Render(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::{PlotKind, Series};

    #[test]
    fn test_log_projection_drops_non_positive() {
        let points = [(0.0, 10.0), (1.0, 0.0), (2.0, -1.0), (3.0, 1.0), (4.0, f64::NAN)];
        assert_eq!(
            project(&points, AxisScale::Log),
            vec![(0.0, 1.0), (3.0, 0.0)]
        );
        assert_eq!(project(&points, AxisScale::Linear).len(), 4);
    }

    #[test]
    fn test_ranges_cover_bars_and_baseline() {
        let plot = Plot::new(PlotKind::Pdf, "r", "t").with_series(Series::new(
            "hist",
            vec![(1.0, 0.5), (2.0, 0.25)],
            SeriesStyle::Bars { width: 1.0 },
        ));
        let prepared = vec![project(&plot.series[0].points, AxisScale::Linear)];
        let (x, y) = axis_ranges(&plot, &prepared);
        assert_eq!(x, 0.5..2.5);
        assert!(y.start < 0.0 && y.end > 0.5);
    }

    #[test]
    fn test_degenerate_ranges() {
        assert_eq!(padded((f64::INFINITY, f64::NEG_INFINITY), 0.05), 0.0..1.0);
        assert_eq!(padded((2.0, 2.0), 0.05), 1.5..2.5);
    }

    #[test]
    fn test_inline_document() {
        let plot = Plot::new(PlotKind::Signal, "r", "Signal")
            .with_axes("Time (s)", "Amplitude (mV)")
            .with_series(Series::line("ecg", &[0.0, 0.5, 1.0], &[0.1, -0.2, 0.3]));
        let rendered = SvgRenderer::new().render(&plot, &RenderTarget::Display).unwrap();
        match rendered {
            Rendered::Inline(svg) => {
                assert!(svg.contains("<svg"));
                assert!(svg.contains("Signal"));
            }
            other => panic!("expected inline document, got {other:?}"),
        }
    }
}
