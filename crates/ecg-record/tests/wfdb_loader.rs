//! File-backed loader tests over records written to a scratch directory

use approx::assert_relative_eq;
use ecg_core::{Error, SegmentLoader, SegmentSelector};
use ecg_record::WfdbLoader;
use std::fs;
use std::path::{Path, PathBuf};

struct ScratchDir(PathBuf);

impl ScratchDir {
    fn new() -> Self {
        let path = std::env::temp_dir().join(format!("ecg-record-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&path).unwrap();
        Self(path)
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

/// Two interleaved format-16 signals: ch0 = i, ch1 = 1000 - 2i
fn write_format16_record(dir: &Path, name: &str, frames: i16, declare_length: bool) {
    let length = if declare_length {
        format!(" {frames}")
    } else {
        String::new()
    };
    let header = format!(
        "{name} 2 360{length}\n\
         {name}.dat 16 100(0)/mV 16 0 0 0 0 MLII\n\
         {name}.dat 16 200(1000)/mV 16 0 0 0 0 V5\n"
    );
    fs::write(dir.join(format!("{name}.hea")), header).unwrap();

    let mut bytes = Vec::new();
    for i in 0..frames {
        bytes.extend_from_slice(&i.to_le_bytes());
        bytes.extend_from_slice(&(1000 - 2 * i).to_le_bytes());
    }
    fs::write(dir.join(format!("{name}.dat")), bytes).unwrap();
}

/// One format-212 signal holding i - frames / 2, laid out like chfdb
fn write_format212_record(dir: &Path, name: &str, frames: i32) {
    fs::write(
        dir.join(format!("{name}.hea")),
        format!("{name} 1 250 {frames}\n{name}.dat 212 200/mV 12 0 0 0 0 ECG1\n"),
    )
    .unwrap();

    let samples: Vec<i32> = (0..frames).map(|i| i - frames / 2).collect();
    let mut bytes = Vec::new();
    for pair in samples.chunks(2) {
        let a = pair[0] & 0xFFF;
        let b = pair.get(1).copied().unwrap_or(0) & 0xFFF;
        bytes.push((a & 0xFF) as u8);
        bytes.push((((b >> 8) << 4) | (a >> 8)) as u8);
        bytes.push((b & 0xFF) as u8);
    }
    fs::write(dir.join(format!("{name}.dat")), bytes).unwrap();
}

#[test]
fn test_load_interleaved_channels_with_calibration() {
    let scratch = ScratchDir::new();
    write_format16_record(&scratch.0, "rec1", 50, true);
    let loader = WfdbLoader::new(&scratch.0);

    let seg0 = loader.load(&SegmentSelector::new("rec1", 0, 10, 15)).unwrap();
    assert_eq!(seg0.sampling_rate, 360.0);
    assert_eq!(seg0.label, "MLII");
    assert_eq!(seg0.units, "mV");
    let expected0 = [0.10, 0.11, 0.12, 0.13, 0.14];
    for (got, want) in seg0.samples.iter().zip(expected0) {
        assert_relative_eq!(*got, want, epsilon = 1e-12);
    }

    // (1000 - 2i - 1000) / 200
    let seg1 = loader.load(&SegmentSelector::new("rec1", 1, 10, 12)).unwrap();
    assert_eq!(seg1.label, "V5");
    assert_relative_eq!(seg1.samples[0], -0.10, epsilon = 1e-12);
    assert_relative_eq!(seg1.samples[1], -0.11, epsilon = 1e-12);
}

#[test]
fn test_format212_segment() {
    let scratch = ScratchDir::new();
    write_format212_record(&scratch.0, "chf99", 101);
    let loader = WfdbLoader::new(&scratch.0);

    let segment = loader.load(&SegmentSelector::new("chf99", 0, 47, 54)).unwrap();
    let digital: Vec<f64> = segment.samples.iter().map(|v| v * 200.0).collect();
    let expected: Vec<f64> = (47..54).map(|i| f64::from(i - 50)).collect();
    for (got, want) in digital.iter().zip(&expected) {
        assert_relative_eq!(*got, *want, epsilon = 1e-9);
    }
    assert_eq!(segment.sampling_rate, 250.0);

    // Odd final sample shares its three-byte group with padding
    let tail = loader.load(&SegmentSelector::new("chf99", 0, 99, 101)).unwrap();
    assert_relative_eq!(tail.samples[1] * 200.0, 50.0, epsilon = 1e-9);
}

#[test]
fn test_selector_sampling_rate_overrides_header() {
    let scratch = ScratchDir::new();
    write_format16_record(&scratch.0, "rec1", 20, true);
    let loader = WfdbLoader::new(&scratch.0);
    let selector = SegmentSelector::new("rec1", 0, 0, 10).with_sampling_rate(250.0);
    assert_eq!(loader.load(&selector).unwrap().sampling_rate, 250.0);
}

#[test]
fn test_length_derived_from_file_size() {
    let scratch = ScratchDir::new();
    write_format16_record(&scratch.0, "rec2", 30, false);
    let loader = WfdbLoader::new(&scratch.0);

    assert!(loader.load(&SegmentSelector::new("rec2", 0, 0, 30)).is_ok());
    assert!(matches!(
        loader.load(&SegmentSelector::new("rec2", 0, 0, 31)),
        Err(Error::RangeOutOfBounds { length: 30, .. })
    ));
}

#[test]
fn test_record_errors() {
    let scratch = ScratchDir::new();
    write_format16_record(&scratch.0, "rec1", 50, true);
    fs::write(scratch.0.join("orphan.hea"), "orphan 1 250 10\norphan.dat 16\n").unwrap();
    fs::write(scratch.0.join("broken.hea"), "broken two\n").unwrap();
    fs::write(scratch.0.join("latin1.hea"), b"latin1 1 250 10\xe9\n").unwrap();
    let loader = WfdbLoader::new(&scratch.0);

    assert!(matches!(
        loader.load(&SegmentSelector::new("missing", 0, 0, 10)),
        Err(Error::RecordNotFound(_))
    ));
    assert!(matches!(
        loader.load(&SegmentSelector::new("orphan", 0, 0, 10)),
        Err(Error::RecordNotFound(_))
    ));
    assert!(matches!(
        loader.load(&SegmentSelector::new("broken", 0, 0, 10)),
        Err(Error::MalformedRecord(_))
    ));
    assert!(matches!(
        loader.load(&SegmentSelector::new("latin1", 0, 0, 10)),
        Err(Error::MalformedRecord(_))
    ));
    assert!(matches!(
        loader.load(&SegmentSelector::new("rec1", 2, 0, 10)),
        Err(Error::InvalidChannel { channel: 2, available: 2 })
    ));
    assert!(matches!(
        loader.load(&SegmentSelector::new("rec1", 0, 40, 60)),
        Err(Error::RangeOutOfBounds { start: 40, end: 60, length: 50 })
    ));
}

#[test]
fn test_record_ids_lists_headers_sorted() {
    let scratch = ScratchDir::new();
    write_format16_record(&scratch.0, "rec2", 5, true);
    write_format16_record(&scratch.0, "rec1", 5, true);
    fs::write(scratch.0.join("notes.txt"), "not a record").unwrap();

    let loader = WfdbLoader::new(&scratch.0);
    assert_eq!(loader.record_ids().unwrap(), vec!["rec1", "rec2"]);

    let missing = WfdbLoader::new(scratch.0.join("nope"));
    assert!(matches!(missing.record_ids(), Err(Error::Io(_))));
}
