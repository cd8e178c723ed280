//! Error types for ECG segment analysis
//!
//! Provides a unified error type shared by the estimator, loader, renderer and
//! pipeline crates.

use thiserror::Error;

/// Core error type for ECG segment analysis
#[derive(Error, Debug)]
pub enum Error {
    /// The operation received a zero-length sample sequence
    #[error("Empty input: {0} requires at least one sample")]
    EmptyInput(String),

    /// The input has zero spread and the requested computation is undefined
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// A requested index or lag range is inconsistent with the available data
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A sample is NaN or infinite
    #[error("Non-finite sample at index {index}")]
    NonFinite { index: usize },

    /// The record (header or signal file) does not exist
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    /// The requested channel does not exist in the record
    #[error("Invalid channel {channel}: record has {available} channel(s)")]
    InvalidChannel { channel: usize, available: usize },

    /// The requested sample range exceeds the physical record length
    #[error("Range {start}..{end} out of bounds for record of length {length}")]
    RangeOutOfBounds {
        start: usize,
        end: usize,
        length: usize,
    },

    /// The record exists but could not be decoded
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// Plot rendering or persistence failed
    #[error("Render error: {0}")]
    Render(String),

    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (for file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for empty input
    pub fn empty_input(operation: &str) -> Self {
        Self::EmptyInput(operation.to_string())
    }

    /// Create an error for a constant signal
    pub fn constant_signal(operation: &str) -> Self {
        Self::DegenerateInput(format!(
            "{operation} is undefined for a constant signal (zero spread)"
        ))
    }

    /// Create an error for a lag that does not fit the sequence
    pub fn lag_out_of_range(max_lag: usize, len: usize) -> Self {
        Self::InvalidRange(format!(
            "max lag {max_lag} must be smaller than the sequence length {len}"
        ))
    }
}
