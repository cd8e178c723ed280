//! # Spectral and correlation analysis for ECG segments
//!
//! FFT-based estimators built on RustFFT:
//!
//! - [`PowerSpectrum`]: Welch power spectral density with a periodic Hann
//!   window, per-segment mean removal and one-sided density scaling
//! - [`Autocorrelation`]: mean-centered autocorrelation normalized to 1 at
//!   lag 0, evaluated directly or through a zero-padded FFT
//!
//! ## Basic Usage
//!
//! ```rust
//! use ecg_spectral::{compute_autocorrelation, compute_psd};
//!
//! let fs = 250.0;
//! let signal: Vec<f64> = (0..2500)
//!     .map(|i| (2.0 * std::f64::consts::PI * 1.2 * i as f64 / fs).sin())
//!     .collect();
//!
//! let spectrum = compute_psd(&signal, fs).unwrap();
//! assert_eq!(*spectrum.frequencies().last().unwrap(), fs / 2.0);
//!
//! let acf = compute_autocorrelation(&signal, 500).unwrap();
//! assert_eq!(acf.at(0), Some(1.0));
//! ```

pub mod autocorrelation;
pub mod psd;
pub mod window;

pub use autocorrelation::{compute_autocorrelation, Autocorrelation, AutocorrelationConfig, Method};
pub use psd::{compute_psd, PowerSpectrum, SpectralConfig};
