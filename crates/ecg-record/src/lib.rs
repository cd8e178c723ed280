//! WFDB record access for ECG segment analysis
//!
//! Implements [`ecg_core::SegmentLoader`] for a directory of PhysioNet WFDB
//! records (a `.hea` header plus one or more signal files) and for records
//! held in memory.
//!
//! Physical values are `(digital - baseline) / gain` using the calibration
//! of each signal line. Only single-segment records with one sample per frame
//! and storage formats 16, 212 and 80 are read.
//!
//! ```no_run
//! use ecg_core::{SegmentLoader, SegmentSelector};
//! use ecg_record::WfdbLoader;
//!
//! let loader = WfdbLoader::new("physionet.org/files/chfdb/1.0.0/");
//! let segment = loader.load(&SegmentSelector::new("chf01", 0, 10_000, 15_000))?;
//! println!("{} samples of {} at {} Hz", segment.samples.len(), segment.label, segment.sampling_rate);
//! # Ok::<(), ecg_core::Error>(())
//! ```

pub mod format;
pub mod header;
pub mod loader;
pub mod memory;

pub use format::StorageFormat;
pub use header::{RecordHeader, SignalSpec, DEFAULT_GAIN, DEFAULT_SAMPLING_RATE};
pub use loader::{WfdbLoader, HEADER_EXTENSION};
pub use memory::MemoryLoader;
