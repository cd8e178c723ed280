//! Welch power spectral density
//!
//! The signal is cut into segments of `segment_length` samples that overlap by
//! `overlap` of their length. Each segment has its mean removed, is tapered
//! with a periodic Hann window and transformed; the one-sided periodograms
//! are averaged:
//!
//! ```text
//! P_k = c_k |X_k|^2 / (fs * sum(w^2)),   c_k = 1 for DC and Nyquist, 2 otherwise
//! ```
//!
//! The result is a power/frequency density (units²/Hz) on the frequency grid
//! `k * fs / nfft` for `k = 0..=nfft/2`. Odd segment lengths are zero-padded by
//! one sample so the grid always ends exactly at `fs / 2`.

use crate::window;
use ecg_core::{statistics, validate_sampling_rate, Curve, Error, Result};
use num_complex::Complex;
use rustfft::FftPlanner;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Welch parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectralConfig {
    /// Samples per segment, clamped to the signal length
    pub segment_length: usize,
    /// Fraction of a segment shared with the next one, in `[0, 1)`
    pub overlap: f64,
}

impl Default for SpectralConfig {
    fn default() -> Self {
        Self {
            segment_length: 2048,
            overlap: 0.5,
        }
    }
}

impl SpectralConfig {
    /// Reject a zero segment length or an overlap outside [0, 1)
    pub fn validate(&self) -> Result<()> {
        if self.segment_length == 0 {
            return Err(Error::InvalidParameter(
                "Welch segment length must be positive".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.overlap) {
            return Err(Error::InvalidParameter(format!(
                "Welch overlap must lie in [0, 1), got {}",
                self.overlap
            )));
        }
        Ok(())
    }

    /// Segment length, hop and segment count for a signal of `n` samples
    fn layout(&self, n: usize) -> (usize, usize, usize) {
        let segment = self.segment_length.min(n);
        let shared = (segment as f64 * self.overlap).floor() as usize;
        let hop = (segment - shared).max(1);
        let count = (n - segment) / hop + 1;
        (segment, hop, count)
    }
}

/// One-sided power spectral density
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerSpectrum {
    frequencies: Vec<f64>,
    power: Vec<f64>,
    sampling_rate: f64,
    segments: usize,
}

impl PowerSpectrum {
    /// Welch estimate of `samples` taken at `sampling_rate` Hz
    #[instrument(level = "debug", skip(samples, config), fields(n = samples.len()))]
    pub fn compute(samples: &[f64], sampling_rate: f64, config: &SpectralConfig) -> Result<Self> {
        validate_sampling_rate(sampling_rate)?;
        config.validate()?;
        if samples.is_empty() {
            return Err(Error::empty_input("power spectral density"));
        }

        let (segment_len, hop, count) = config.layout(samples.len());
        let nfft = segment_len + segment_len % 2;
        let bins = nfft / 2 + 1;

        let taper = window::hann(segment_len);
        let scale = 1.0 / (sampling_rate * window::energy(&taper));

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(nfft);
        let mut buffer = vec![Complex::new(0.0, 0.0); nfft];
        let mut power = vec![0.0; bins];

        for s in 0..count {
            let chunk = &samples[s * hop..s * hop + segment_len];
            let centered = statistics::mean_centered(chunk)?;

            for (slot, (x, w)) in buffer.iter_mut().zip(centered.iter().zip(&taper)) {
                *slot = Complex::new(x * w, 0.0);
            }
            for slot in buffer[segment_len..].iter_mut() {
                *slot = Complex::new(0.0, 0.0);
            }

            fft.process(&mut buffer);

            for (k, p) in power.iter_mut().enumerate() {
                let one_sided = if k == 0 || k == nfft / 2 { 1.0 } else { 2.0 };
                *p += one_sided * buffer[k].norm_sqr() * scale;
            }
        }

        for p in power.iter_mut() {
            *p /= count as f64;
        }

        let df = sampling_rate / nfft as f64;
        let mut frequencies: Vec<f64> = (0..bins).map(|k| k as f64 * df).collect();
        frequencies[bins - 1] = sampling_rate / 2.0;

        debug!(segment_len, hop, segments = count, nfft, "welch estimate complete");

        Ok(Self {
            frequencies,
            power,
            sampling_rate,
            segments: count,
        })
    }

    /// Frequency grid in Hz, from 0 to the Nyquist frequency inclusive
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Power density at each frequency
    pub fn power(&self) -> &[f64] {
        &self.power
    }

    /// Number of frequency bins
    pub fn len(&self) -> usize {
        self.power.len()
    }

    /// Always false for a computed spectrum
    pub fn is_empty(&self) -> bool {
        self.power.is_empty()
    }

    /// Sampling rate in Hz the spectrum was computed at
    pub fn sampling_rate(&self) -> f64 {
        self.sampling_rate
    }

    /// Number of averaged segments
    pub fn segments(&self) -> usize {
        self.segments
    }

    /// Spacing of the frequency grid in Hz
    pub fn resolution(&self) -> f64 {
        if self.frequencies.len() < 2 {
            return self.sampling_rate / 2.0;
        }
        self.frequencies[1] - self.frequencies[0]
    }

    /// Integrated power, `sum(P_k) * df`
    ///
    /// By Parseval this equals the mean of the windowed segment power,
    /// `sum((x w)^2) / sum(w^2)`, so it approximates the signal variance.
    pub fn total_power(&self) -> f64 {
        self.power.iter().sum::<f64>() * self.resolution()
    }

    /// Frequency of the strongest non-DC component
    pub fn peak_frequency(&self) -> Option<f64> {
        self.power
            .iter()
            .enumerate()
            .skip(1)
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(k, _)| self.frequencies[k])
    }

    /// The (frequency, power) pairs as a curve
    pub fn curve(&self) -> Curve {
        Curve::new(self.frequencies.clone(), self.power.clone())
    }
}

/// Welch PSD with the default segment length and overlap
pub fn compute_psd(samples: &[f64], sampling_rate: f64) -> Result<PowerSpectrum> {
    PowerSpectrum::compute(samples, sampling_rate, &SpectralConfig::default())
}
