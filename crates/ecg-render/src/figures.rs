//! Plot descriptions for each estimator result

use crate::plot::{AxisScale, Plot, PlotKind, Series, SeriesStyle};
use ecg_core::{Result, Segment};
use ecg_distribution::{DensityEstimate, Ecdf};
use ecg_spectral::{Autocorrelation, PowerSpectrum};

/// Raw samples against time in seconds
pub fn signal_plot(segment: &Segment) -> Plot {
    let time = segment.time_axis();
    Plot::new(
        PlotKind::Signal,
        &segment.record_id,
        format!("ECG signal ({}, {})", segment.record_id, segment.label),
    )
    .with_axes("Time (s)", format!("Amplitude ({})", segment.units))
    .with_series(Series::line(&segment.label, &time, &segment.samples))
}

/// Sorted samples against cumulative probability
pub fn ecdf_plot(record_id: &str, ecdf: &Ecdf, units: &str) -> Plot {
    Plot::new(PlotKind::Ecdf, record_id, "Empirical cumulative distribution (ECDF)")
        .with_axes(format!("Amplitude ({units})"), "F(x)")
        .with_series(Series::markers("ECDF", ecdf.values(), ecdf.probabilities()))
}

/// Density histogram with the KDE curve on top
pub fn pdf_plot(record_id: &str, density: &DensityEstimate, units: &str) -> Plot {
    let histogram = &density.histogram;
    let width = histogram.bins().first().map(|b| b.width()).unwrap_or(0.0);
    let bars = histogram
        .centers()
        .into_iter()
        .zip(histogram.densities())
        .collect();

    Plot::new(PlotKind::Pdf, record_id, "Probability density (PDF)")
        .with_axes(format!("Amplitude ({units})"), "Probability density")
        .with_series(Series::new(
            "Histogram (PDF)",
            bars,
            SeriesStyle::Bars { width },
        ))
        .with_series(Series::line("KDE (PDF)", &density.curve.x, &density.curve.y))
}

/// Correlation against lag, in seconds when a sampling rate is given
pub fn autocorrelation_plot(
    record_id: &str,
    acf: &Autocorrelation,
    sampling_rate: Option<f64>,
) -> Result<Plot> {
    let curve = acf.curve(sampling_rate)?;
    let x_label = if sampling_rate.is_some() {
        "Lag (s)"
    } else {
        "Lag (samples)"
    };
    Ok(
        Plot::new(PlotKind::Autocorrelation, record_id, "Autocorrelation")
            .with_axes(x_label, "Autocorrelation")
            .with_series(Series::line("ACF", &curve.x, &curve.y)),
    )
}

/// Power density against frequency on a logarithmic power axis
pub fn psd_plot(record_id: &str, spectrum: &PowerSpectrum, units: &str) -> Plot {
    Plot::new(PlotKind::Psd, record_id, "Power spectral density (PSD)")
        .with_axes("Frequency (Hz)", format!("Power density ({units}^2/Hz)"))
        .with_series(Series::line("Welch PSD", spectrum.frequencies(), spectrum.power()))
        .with_y_scale(AxisScale::Log)
}
