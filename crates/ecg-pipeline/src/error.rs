//! Stage-tagged pipeline failures

use ecg_core::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Step of the per-record pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Load,
    Statistics,
    Distribution,
    Autocorrelation,
    Spectrum,
    Render,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Load => "load",
            Stage::Statistics => "statistics",
            Stage::Distribution => "distribution",
            Stage::Autocorrelation => "autocorrelation",
            Stage::Spectrum => "spectrum",
            Stage::Render => "render",
        };
        f.write_str(name)
    }
}

/// A record's pipeline failed at `stage`
#[derive(Debug, Error)]
#[error("record {record_id}: {stage} stage failed: {source}")]
pub struct PipelineError {
    pub record_id: String,
    pub stage: Stage,
    pub source: Error,
}

impl PipelineError {
    pub fn new(record_id: impl Into<String>, stage: Stage, source: Error) -> Self {
        Self {
            record_id: record_id.into(),
            stage,
            source,
        }
    }
}
