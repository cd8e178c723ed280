//! Single-record and batch orchestration
//!
//! A [`BatchDriver`] owns a [`SegmentLoader`], a [`Renderer`] and an
//! [`Analyzer`]. Each record runs load → analyse → render independently; in
//! batch mode a failing record becomes a failed [`RecordOutcome`] and the
//! batch moves on to the next record.

use crate::analysis::{Analyzer, SegmentAnalysis};
use crate::config::{AnalysisConfig, OutputConfig};
use crate::error::{PipelineError, Stage};
use ecg_core::{Result, Segment, SegmentLoader, SegmentSelector};
use ecg_render::figures::{autocorrelation_plot, ecdf_plot, pdf_plot, psd_plot, signal_plot};
use ecg_render::{Plot, PlotKind, RenderTarget, Rendered, Renderer};
use serde::Serialize;
use tracing::{info, instrument, warn};

/// Everything produced for one successfully processed record
#[derive(Debug, Clone)]
pub struct RecordReport {
    pub selector: SegmentSelector,
    /// Sampling rate the segment was analysed at
    pub sampling_rate: f64,
    pub analysis: SegmentAnalysis,
    /// One entry per plot, in [`ecg_render::PlotKind::ALL`] order
    pub artifacts: Vec<Rendered>,
}

impl RecordReport {
    pub fn record_id(&self) -> &str {
        &self.selector.record_id
    }

    /// Paths of plots written to disk
    pub fn written_files(&self) -> impl Iterator<Item = &std::path::PathBuf> {
        self.artifacts.iter().filter_map(Rendered::path)
    }
}

#[derive(Debug)]
pub enum RecordStatus {
    Succeeded(RecordReport),
    Failed(PipelineError),
}

/// Result of attempting one record in a batch
#[derive(Debug)]
pub struct RecordOutcome {
    pub record_id: String,
    pub status: RecordStatus,
}

impl RecordOutcome {
    fn from_result(record_id: String, result: std::result::Result<RecordReport, PipelineError>) -> Self {
        let status = match result {
            Ok(report) => RecordStatus::Succeeded(report),
            Err(err) => RecordStatus::Failed(err),
        };
        Self { record_id, status }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, RecordStatus::Succeeded(_))
    }

    pub fn report(&self) -> Option<&RecordReport> {
        match &self.status {
            RecordStatus::Succeeded(report) => Some(report),
            RecordStatus::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&PipelineError> {
        match &self.status {
            RecordStatus::Succeeded(_) => None,
            RecordStatus::Failed(err) => Some(err),
        }
    }
}

/// Succeeded / failed counts of a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[RecordOutcome]) -> Self {
        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        Self {
            total: outcomes.len(),
            succeeded,
            failed: outcomes.len() - succeeded,
        }
    }
}

/// Runs the pipeline over one record or a whole record store
#[derive(Debug)]
pub struct BatchDriver<L, R> {
    loader: L,
    renderer: R,
    analyzer: Analyzer,
    selector: SegmentSelector,
    output: OutputConfig,
}

impl<L: SegmentLoader, R: Renderer> BatchDriver<L, R> {
    /// Validate `config` and build a driver around `loader` and `renderer`
    pub fn new(loader: L, renderer: R, config: &AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            loader,
            renderer,
            analyzer: Analyzer::new(config)?,
            selector: config.selector.clone(),
            output: config.output.clone(),
        })
    }

    /// Selector used by [`run_default`](Self::run_default) and as the
    /// channel/range template in batch mode
    pub fn selector(&self) -> &SegmentSelector {
        &self.selector
    }

    /// Process the configured record
    pub fn run_default(&self) -> std::result::Result<RecordReport, PipelineError> {
        self.run_record(&self.selector)
    }

    /// Load, analyse and render one segment
    #[instrument(level = "info", skip(self, selector), fields(record = %selector.record_id))]
    pub fn run_record(
        &self,
        selector: &SegmentSelector,
    ) -> std::result::Result<RecordReport, PipelineError> {
        let record_id = selector.record_id.as_str();
        let segment = self
            .loader
            .load(selector)
            .map_err(|e| PipelineError::new(record_id, Stage::Load, e))?;

        let analysis = self.analyzer.analyze(&segment)?;
        info!(
            channel = segment.channel,
            label = %segment.label,
            fs = segment.sampling_rate,
            "{}",
            analysis.statistics
        );

        let artifacts = self
            .render_all(&segment, &analysis)
            .map_err(|e| PipelineError::new(record_id, Stage::Render, e))?;

        Ok(RecordReport {
            selector: selector.clone(),
            sampling_rate: segment.sampling_rate,
            analysis,
            artifacts,
        })
    }

    /// Process each record id with the configured channel and range
    pub fn run_records<I, S>(&self, record_ids: I) -> Vec<RecordOutcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let outcomes: Vec<RecordOutcome> = record_ids
            .into_iter()
            .map(|id| {
                let selector = self.selector.for_record(id);
                let result = self.run_record(&selector);
                if let Err(err) = &result {
                    warn!(record = %selector.record_id, stage = %err.stage, error = %err.source, "record failed");
                }
                RecordOutcome::from_result(selector.record_id, result)
            })
            .collect();

        let summary = BatchSummary::from_outcomes(&outcomes);
        info!(
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "batch finished"
        );
        outcomes
    }

    /// Process every record the loader can enumerate
    ///
    /// Fails only when the record store itself cannot be listed.
    pub fn run_directory(&self) -> Result<Vec<RecordOutcome>> {
        let ids = self.loader.record_ids()?;
        info!(records = ids.len(), "starting batch");
        Ok(self.run_records(ids))
    }

    fn render_all(&self, segment: &Segment, analysis: &SegmentAnalysis) -> Result<Vec<Rendered>> {
        if !self.renderer.is_enabled() {
            return Ok(vec![Rendered::Skipped; PlotKind::ALL.len()]);
        }
        let record_id = segment.record_id.as_str();
        let units = segment.units.as_str();
        let plots = [
            signal_plot(segment),
            ecdf_plot(record_id, &analysis.ecdf, units),
            pdf_plot(record_id, &analysis.density, units),
            autocorrelation_plot(record_id, &analysis.autocorrelation, Some(segment.sampling_rate))?,
            psd_plot(record_id, &analysis.spectrum, units),
        ];
        plots.iter().map(|plot| self.render(plot)).collect()
    }

    fn render(&self, plot: &Plot) -> Result<Rendered> {
        let target = if self.output.save {
            RenderTarget::File(plot.output_path(&self.output.root, self.renderer.extension()))
        } else {
            RenderTarget::Display
        };
        self.renderer.render(plot, &target)
    }
}
