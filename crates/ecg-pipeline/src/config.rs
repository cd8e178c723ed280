//! Analysis configuration
//!
//! Every field has a default, so a JSON file only needs the values it
//! changes:
//!
//! ```json
//! {
//!   "record_dir": "physionet.org/files/chfdb/1.0.0/",
//!   "selector": { "record_id": "chf03", "channel": 1, "start": 0, "end": 7500 },
//!   "density": { "bins": 50, "bandwidth": "silverman" },
//!   "spectral": { "segment_length": 1024 },
//!   "output": { "root": "plots", "save": true }
//! }
//! ```

use ecg_core::{Error, Result, SegmentSelector};
use ecg_distribution::DensityConfig;
use ecg_spectral::{AutocorrelationConfig, SpectralConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory of the PhysioNet Congestive Heart Failure database mirror
pub const DEFAULT_RECORD_DIR: &str = "physionet.org/files/chfdb/1.0.0/";
pub const DEFAULT_RECORD: &str = "chf01";
pub const DEFAULT_START: usize = 10_000;
pub const DEFAULT_END: usize = 15_000;
pub const DEFAULT_OUTPUT_ROOT: &str = "grafice";

/// Where rendered plots go
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Root of the `<kind>/<record>.<ext>` tree
    pub root: PathBuf,
    /// Write files; when false plots are rendered in memory only
    pub save: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            save: true,
        }
    }
}

/// Everything one pipeline run needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Directory holding the `.hea` / `.dat` records
    pub record_dir: PathBuf,
    /// Channel, range and optional sampling rate; the record id is the
    /// single-record target and is replaced per record in batch mode
    pub selector: SegmentSelector,
    pub density: DensityConfig,
    pub autocorrelation: AutocorrelationConfig,
    pub spectral: SpectralConfig,
    pub output: OutputConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            record_dir: PathBuf::from(DEFAULT_RECORD_DIR),
            selector: SegmentSelector::new(DEFAULT_RECORD, 0, DEFAULT_START, DEFAULT_END),
            density: DensityConfig::default(),
            autocorrelation: AutocorrelationConfig::default(),
            spectral: SpectralConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Parse a JSON document, filling missing fields with defaults
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Config(format!("invalid JSON: {e}")))
    }

    /// Read and parse a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Check every parameter that can be checked without data
    pub fn validate(&self) -> Result<()> {
        self.selector.validate()?;
        self.density.validate()?;
        self.spectral.validate()?;
        if let Some(max_lag) = self.autocorrelation.max_lag {
            if max_lag >= self.selector.len() {
                return Err(Error::lag_out_of_range(max_lag, self.selector.len()));
            }
        }
        if self.output.save && self.output.root.as_os_str().is_empty() {
            return Err(Error::Config(
                "output root must not be empty when saving plots".to_string(),
            ));
        }
        Ok(())
    }
}
