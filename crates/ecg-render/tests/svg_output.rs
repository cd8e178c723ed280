//! SVG files written to a scratch output root

use ecg_render::{AxisScale, Plot, PlotKind, RenderTarget, Rendered, Renderer, Series, SvgRenderer};
use std::fs;
use std::path::PathBuf;

struct ScratchDir(PathBuf);

impl ScratchDir {
    fn new() -> Self {
        Self(std::env::temp_dir().join(format!("ecg-render-{}", uuid::Uuid::new_v4())))
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

fn psd_like_plot(record_id: &str) -> Plot {
    let freqs: Vec<f64> = (0..=64).map(|k| k as f64 * 125.0 / 64.0).collect();
    let power: Vec<f64> = freqs.iter().map(|f| 1.0 / (1.0 + f * f)).collect();
    let mut power_with_zero = power.clone();
    power_with_zero[0] = 0.0;
    Plot::new(PlotKind::Psd, record_id, "Power spectral density (PSD)")
        .with_axes("Frequency (Hz)", "Power density (mV^2/Hz)")
        .with_series(Series::line("Welch PSD", &freqs, &power_with_zero))
        .with_y_scale(AxisScale::Log)
}

#[test]
fn test_file_target_creates_kind_directory() {
    let scratch = ScratchDir::new();
    let plot = psd_like_plot("chf01");
    let path = plot.output_path(&scratch.0, "svg");

    let rendered = SvgRenderer::new()
        .render(&plot, &RenderTarget::File(path.clone()))
        .unwrap();
    assert_eq!(rendered, Rendered::File(path.clone()));
    assert!(scratch.0.join("psd").is_dir());

    let document = fs::read_to_string(&path).unwrap();
    assert!(document.contains("<svg"));
    assert!(document.contains("Power spectral density"));
}

#[test]
fn test_existing_file_is_overwritten() {
    let scratch = ScratchDir::new();
    let plot = psd_like_plot("chf02");
    let path = plot.output_path(&scratch.0, "svg");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "stale").unwrap();

    SvgRenderer::new()
        .render(&plot, &RenderTarget::File(path.clone()))
        .unwrap();
    let document = fs::read_to_string(&path).unwrap();
    assert!(!document.starts_with("stale"));
    assert!(document.contains("<svg"));
}

#[test]
fn test_every_kind_renders_inline() {
    let renderer = SvgRenderer::new().with_size(640, 320);
    for kind in PlotKind::ALL {
        let plot = Plot::new(kind, "rec", kind.dir_name())
            .with_series(Series::line("a", &[0.0, 1.0, 2.0], &[1.0, 0.5, 2.0]))
            .with_series(Series::markers("b", &[0.5, 1.5], &[0.7, 1.2]));
        let rendered = renderer.render(&plot, &RenderTarget::Display).unwrap();
        assert!(matches!(rendered, Rendered::Inline(ref svg) if svg.contains("<svg")));
    }
}
