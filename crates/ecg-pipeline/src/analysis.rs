//! Per-segment analysis: statistics, distribution, autocorrelation, spectrum

use crate::config::AnalysisConfig;
use crate::error::{PipelineError, Stage};
use ecg_core::{Result, Segment, SignalStatistics};
use ecg_distribution::{DensityEstimate, DensityEstimator, Ecdf};
use ecg_spectral::{Autocorrelation, AutocorrelationConfig, PowerSpectrum, SpectralConfig};
use tracing::{debug, instrument};

/// Every estimator result for one segment
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentAnalysis {
    pub statistics: SignalStatistics,
    pub ecdf: Ecdf,
    pub density: DensityEstimate,
    pub autocorrelation: Autocorrelation,
    pub spectrum: PowerSpectrum,
}

/// Runs the four independent estimators over a segment
#[derive(Debug, Clone)]
pub struct Analyzer {
    density: DensityEstimator,
    autocorrelation: AutocorrelationConfig,
    spectral: SpectralConfig,
}

impl Analyzer {
    /// Build from the estimator sections of `config`
    pub fn new(config: &AnalysisConfig) -> Result<Self> {
        config.spectral.validate()?;
        Ok(Self {
            density: DensityEstimator::new(config.density.clone())?,
            autocorrelation: config.autocorrelation.clone(),
            spectral: config.spectral.clone(),
        })
    }

    /// Analyse `segment`; the first failing estimator determines the error
    #[instrument(level = "debug", skip(self, segment), fields(record = %segment.record_id, n = segment.samples.len()))]
    pub fn analyze(&self, segment: &Segment) -> std::result::Result<SegmentAnalysis, PipelineError> {
        let samples: &[f64] = &segment.samples;
        let fs = segment.sampling_rate;

        #[cfg(feature = "parallel")]
        let ((statistics, distribution), (autocorrelation, spectrum)) = rayon::join(
            || {
                rayon::join(
                    || SignalStatistics::compute(samples),
                    || self.distribution(samples),
                )
            },
            || {
                rayon::join(
                    || self.autocorrelation(samples),
                    || PowerSpectrum::compute(samples, fs, &self.spectral),
                )
            },
        );

        #[cfg(not(feature = "parallel"))]
        let (statistics, distribution, autocorrelation, spectrum) = (
            SignalStatistics::compute(samples),
            self.distribution(samples),
            self.autocorrelation(samples),
            PowerSpectrum::compute(samples, fs, &self.spectral),
        );

        let id = segment.record_id.as_str();
        let statistics = statistics.map_err(|e| PipelineError::new(id, Stage::Statistics, e))?;
        let (ecdf, density) =
            distribution.map_err(|e| PipelineError::new(id, Stage::Distribution, e))?;
        let autocorrelation =
            autocorrelation.map_err(|e| PipelineError::new(id, Stage::Autocorrelation, e))?;
        let spectrum = spectrum.map_err(|e| PipelineError::new(id, Stage::Spectrum, e))?;

        debug!(
            bandwidth = density.bandwidth,
            max_lag = autocorrelation.max_lag(),
            psd_segments = spectrum.segments(),
            "segment analysed"
        );

        Ok(SegmentAnalysis {
            statistics,
            ecdf,
            density,
            autocorrelation,
            spectrum,
        })
    }

    fn distribution(&self, samples: &[f64]) -> Result<(Ecdf, DensityEstimate)> {
        Ok((Ecdf::compute(samples)?, self.density.compute(samples)?))
    }

    fn autocorrelation(&self, samples: &[f64]) -> Result<Autocorrelation> {
        let max_lag = self.autocorrelation.resolve_max_lag(samples.len())?;
        Autocorrelation::compute(samples, max_lag)
    }
}
