//! Sample sequences, segment selectors and loaded segments

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// An immutable, non-empty sequence of finite amplitude samples
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSequence {
    samples: Vec<f64>,
}

impl SampleSequence {
    /// Wrap a buffer of samples, rejecting empty buffers and NaN/infinite values
    pub fn new(samples: Vec<f64>) -> Result<Self> {
        if samples.is_empty() {
            return Err(Error::empty_input("sample sequence"));
        }
        if let Some(index) = samples.iter().position(|x| !x.is_finite()) {
            return Err(Error::NonFinite { index });
        }
        Ok(Self { samples })
    }

    /// Borrow the samples
    pub fn as_slice(&self) -> &[f64] {
        &self.samples
    }

    /// Number of samples (always at least one)
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; kept for API symmetry with slices
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl Deref for SampleSequence {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.samples
    }
}

impl AsRef<[f64]> for SampleSequence {
    fn as_ref(&self) -> &[f64] {
        &self.samples
    }
}

impl TryFrom<Vec<f64>> for SampleSequence {
    type Error = Error;

    fn try_from(samples: Vec<f64>) -> Result<Self> {
        Self::new(samples)
    }
}

/// Identifies one channel range of one record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSelector {
    /// Record identifier (file stem, e.g. `chf01`)
    pub record_id: String,
    /// Zero-based channel index
    pub channel: usize,
    /// First sample index (inclusive)
    pub start: usize,
    /// Last sample index (exclusive)
    pub end: usize,
    /// Overrides the sampling rate stored with the record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampling_rate: Option<f64>,
}

impl SegmentSelector {
    /// Create a selector for `start..end` of `channel`
    pub fn new(record_id: impl Into<String>, channel: usize, start: usize, end: usize) -> Self {
        Self {
            record_id: record_id.into(),
            channel,
            start,
            end,
            sampling_rate: None,
        }
    }

    /// Attach an explicit sampling rate in Hz
    pub fn with_sampling_rate(mut self, sampling_rate: f64) -> Self {
        self.sampling_rate = Some(sampling_rate);
        self
    }

    /// Same channel and range, different record
    pub fn for_record(&self, record_id: impl Into<String>) -> Self {
        Self {
            record_id: record_id.into(),
            ..self.clone()
        }
    }

    /// Number of samples the selector covers
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// True when the range covers no samples
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check the record-independent invariants
    pub fn validate(&self) -> Result<()> {
        if self.record_id.trim().is_empty() {
            return Err(Error::InvalidParameter(
                "record identifier must not be empty".to_string(),
            ));
        }
        if self.end <= self.start {
            return Err(Error::InvalidRange(format!(
                "end index {} must be greater than start index {}",
                self.end, self.start
            )));
        }
        if let Some(fs) = self.sampling_rate {
            validate_sampling_rate(fs)?;
        }
        Ok(())
    }
}

impl fmt::Display for SegmentSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[ch{}][{}..{}]",
            self.record_id, self.channel, self.start, self.end
        )
    }
}

/// A loaded segment: samples plus the metadata the estimators need
#[derive(Debug, Clone)]
pub struct Segment {
    /// Record the samples came from
    pub record_id: String,
    /// Channel index within the record
    pub channel: usize,
    /// Index of the first sample within the record
    pub start: usize,
    /// Sampling rate in Hz
    pub sampling_rate: f64,
    /// Signal description from the record (e.g. `ECG1`)
    pub label: String,
    /// Physical units of the samples (e.g. `mV`)
    pub units: String,
    /// The samples themselves
    pub samples: SampleSequence,
}

impl Segment {
    /// Duration of the segment in seconds
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sampling_rate
    }

    /// Time axis in seconds, relative to the segment start
    pub fn time_axis(&self) -> Vec<f64> {
        (0..self.samples.len())
            .map(|i| i as f64 / self.sampling_rate)
            .collect()
    }
}

/// Reject non-positive or non-finite sampling rates
pub fn validate_sampling_rate(sampling_rate: f64) -> Result<()> {
    if !sampling_rate.is_finite() || sampling_rate <= 0.0 {
        return Err(Error::InvalidParameter(format!(
            "sampling rate must be a positive number of Hz, got {sampling_rate}"
        )));
    }
    Ok(())
}
