//! Segment loading from a directory of WFDB records

use crate::format::StorageFormat;
use crate::header::RecordHeader;
use ecg_core::{Error, Result, SampleSequence, Segment, SegmentLoader, SegmentSelector};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Header file extension
pub const HEADER_EXTENSION: &str = "hea";

/// Loads segments from `<root>/<record>.hea` and the signal files it names
#[derive(Debug, Clone)]
pub struct WfdbLoader {
    root: PathBuf,
}

impl WfdbLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory the records are resolved against
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a record's header file
    pub fn header_path(&self, record_id: &str) -> PathBuf {
        self.root.join(format!("{record_id}.{HEADER_EXTENSION}"))
    }

    /// Read and parse a record's header
    pub fn header(&self, record_id: &str) -> Result<RecordHeader> {
        let path = self.header_path(record_id);
        if !path.is_file() {
            return Err(Error::RecordNotFound(format!(
                "{record_id}: no header at {}",
                path.display()
            )));
        }
        RecordHeader::from_file(&path)
    }
}

impl SegmentLoader for WfdbLoader {
    #[instrument(level = "debug", skip(self), fields(record = %selector.record_id))]
    fn load(&self, selector: &SegmentSelector) -> Result<Segment> {
        selector.validate()?;
        let header = self.header(&selector.record_id)?;

        let (group, position) =
            header
                .file_group(selector.channel)
                .ok_or(Error::InvalidChannel {
                    channel: selector.channel,
                    available: header.num_signals(),
                })?;
        let spec = group[position];
        let frame_width = group.len();

        let data_path = self.root.join(&spec.file_name);
        let mut file = File::open(&data_path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::RecordNotFound(format!(
                "{}: no signal file at {}",
                selector.record_id,
                data_path.display()
            )),
            _ => Error::Io(e),
        })?;

        let stored_bytes = file.metadata()?.len().saturating_sub(spec.byte_offset);
        let stored_frames = spec.format.samples_in(stored_bytes as usize) / frame_width;
        let length = header.num_samples.unwrap_or(stored_frames);
        if selector.end > length {
            return Err(Error::RangeOutOfBounds {
                start: selector.start,
                end: selector.end,
                length,
            });
        }
        if selector.end > stored_frames {
            return Err(Error::MalformedRecord(format!(
                "{} holds {stored_frames} frame(s), header declares {length}",
                data_path.display()
            )));
        }

        let digital = read_channel(
            &mut file,
            spec.format,
            spec.byte_offset,
            frame_width,
            position,
            selector.start,
            selector.end,
        )?;
        let physical: Vec<f64> = digital.into_iter().map(|d| spec.to_physical(d)).collect();

        let sampling_rate = selector.sampling_rate.unwrap_or(header.sampling_rate);
        let label = if spec.description.is_empty() {
            format!("signal {}", selector.channel)
        } else {
            spec.description.clone()
        };

        debug!(
            format = %spec.format,
            frames = physical.len(),
            sampling_rate,
            "segment loaded"
        );

        Ok(Segment {
            record_id: selector.record_id.clone(),
            channel: selector.channel,
            start: selector.start,
            sampling_rate,
            label,
            units: spec.units.clone(),
            samples: SampleSequence::new(physical)?,
        })
    }

    fn record_ids(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(HEADER_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.push(stem.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }
}

/// Digital samples of one signal for frames `[start, end)`, reading only that span
fn read_channel<R: Read + Seek>(
    reader: &mut R,
    format: StorageFormat,
    byte_offset: u64,
    frame_width: usize,
    position: usize,
    start: usize,
    end: usize,
) -> Result<Vec<i32>> {
    let first = start * frame_width;
    let last = end * frame_width;
    let (byte_start, byte_end) = format.byte_span(first, last);

    reader.seek(SeekFrom::Start(byte_offset + byte_start as u64))?;
    let mut bytes = Vec::with_capacity(byte_end - byte_start);
    reader
        .take((byte_end - byte_start) as u64)
        .read_to_end(&mut bytes)?;

    // Format 212 spans start on an even sample index
    let lead = first - format.samples_in(byte_start);
    let flat = format.decode(&bytes);

    Ok(flat
        .iter()
        .skip(lead + position)
        .step_by(frame_width)
        .take(end - start)
        .copied()
        .collect())
}
