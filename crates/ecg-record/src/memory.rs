//! In-memory record store

use ecg_core::{Error, Result, SampleSequence, Segment, SegmentLoader, SegmentSelector};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct StoredRecord {
    sampling_rate: f64,
    channels: Vec<Vec<f64>>,
}

/// A [`SegmentLoader`] over physical samples held in memory
///
/// Applies the same channel and range checks as the file-backed loader, which
/// makes it the loader of choice for pipeline tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    records: BTreeMap<String, StoredRecord>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a record with one sample vector per channel
    pub fn insert(
        &mut self,
        record_id: impl Into<String>,
        sampling_rate: f64,
        channels: Vec<Vec<f64>>,
    ) -> &mut Self {
        self.records.insert(
            record_id.into(),
            StoredRecord {
                sampling_rate,
                channels,
            },
        );
        self
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with_record(
        mut self,
        record_id: impl Into<String>,
        sampling_rate: f64,
        channels: Vec<Vec<f64>>,
    ) -> Self {
        self.insert(record_id, sampling_rate, channels);
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl SegmentLoader for MemoryLoader {
    fn load(&self, selector: &SegmentSelector) -> Result<Segment> {
        selector.validate()?;
        let record = self
            .records
            .get(&selector.record_id)
            .ok_or_else(|| Error::RecordNotFound(selector.record_id.clone()))?;
        let channel = record
            .channels
            .get(selector.channel)
            .ok_or(Error::InvalidChannel {
                channel: selector.channel,
                available: record.channels.len(),
            })?;
        if selector.end > channel.len() {
            return Err(Error::RangeOutOfBounds {
                start: selector.start,
                end: selector.end,
                length: channel.len(),
            });
        }

        Ok(Segment {
            record_id: selector.record_id.clone(),
            channel: selector.channel,
            start: selector.start,
            sampling_rate: selector.sampling_rate.unwrap_or(record.sampling_rate),
            label: format!("signal {}", selector.channel),
            units: "mV".to_string(),
            samples: SampleSequence::new(channel[selector.start..selector.end].to_vec())?,
        })
    }

    fn record_ids(&self) -> Result<Vec<String>> {
        Ok(self.records.keys().cloned().collect())
    }
}
