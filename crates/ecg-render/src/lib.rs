//! Plot rendering for ECG segment statistics
//!
//! Estimator results are first described as backend-independent [`Plot`]
//! values (see [`figures`]), then handed to a [`Renderer`]. [`SvgRenderer`]
//! draws them with plotters; [`NullRenderer`] discards them.
//!
//! Saved plots follow the layout `<output-root>/<kind>/<record-id>.svg` with
//! kinds `ecg_signal`, `ecdf`, `pdf`, `autocorrelation` and `psd`.
//!
//! ```rust
//! use ecg_render::{Plot, PlotKind, RenderTarget, Rendered, Renderer, Series, SvgRenderer};
//!
//! let plot = Plot::new(PlotKind::Ecdf, "chf01", "ECDF")
//!     .with_axes("Amplitude (mV)", "F(x)")
//!     .with_series(Series::markers("ECDF", &[0.1, 0.2, 0.4], &[1.0 / 3.0, 2.0 / 3.0, 1.0]));
//!
//! let rendered = SvgRenderer::new().render(&plot, &RenderTarget::Display).unwrap();
//! assert!(matches!(rendered, Rendered::Inline(_)));
//! ```

pub mod figures;
pub mod plot;
pub mod renderer;
pub mod svg;

pub use plot::{AxisScale, Plot, PlotKind, Series, SeriesStyle};
pub use renderer::{NullRenderer, RenderTarget, Rendered, Renderer};
pub use svg::SvgRenderer;
