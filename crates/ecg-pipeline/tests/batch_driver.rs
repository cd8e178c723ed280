//! Batch runs over in-memory and on-disk record stores

use approx::assert_relative_eq;
use ecg_core::{Error, SegmentSelector};
use ecg_pipeline::{AnalysisConfig, BatchDriver, BatchSummary, RecordStatus, Stage};
use ecg_record::{MemoryLoader, WfdbLoader};
use ecg_render::{NullRenderer, PlotKind, Rendered, SvgRenderer};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use std::fs;
use std::path::{Path, PathBuf};

struct ScratchDir(PathBuf);

impl ScratchDir {
    fn new() -> Self {
        let path = std::env::temp_dir().join(format!("ecg-pipeline-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&path).unwrap();
        Self(path)
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

/// Roughly ECG-shaped: 1.2 Hz beat, sharp QRS-like peak, baseline noise (mV)
fn synthetic_ecg(n: usize, fs: f64, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 0.02).unwrap();
    (0..n)
        .map(|i| {
            let t = i as f64 / fs;
            let phase = (t * 1.2).fract() - 0.5;
            let qrs = (-phase * phase / 0.0005).exp();
            0.1 * (2.0 * std::f64::consts::PI * 0.3 * t).sin() + qrs + noise.sample(&mut rng)
        })
        .collect()
}

/// One format-212 signal at 250 Hz with gain 200 ADC units per mV
fn write_record(dir: &Path, name: &str, millivolts: &[f64]) {
    fs::write(
        dir.join(format!("{name}.hea")),
        format!(
            "{name} 1 250 {}\n{name}.dat 212 200/mV 12 0 0 0 0 ECG1\n",
            millivolts.len()
        ),
    )
    .unwrap();

    let digital: Vec<i32> = millivolts
        .iter()
        .map(|v| ((v * 200.0).round() as i32).clamp(-2048, 2047))
        .collect();
    let mut bytes = Vec::new();
    for pair in digital.chunks(2) {
        let a = pair[0] & 0xFFF;
        let b = pair.get(1).copied().unwrap_or(0) & 0xFFF;
        bytes.push((a & 0xFF) as u8);
        bytes.push((((b >> 8) << 4) | (a >> 8)) as u8);
        bytes.push((b & 0xFF) as u8);
    }
    fs::write(dir.join(format!("{name}.dat")), bytes).unwrap();
}

fn config(output_root: &Path, save: bool) -> AnalysisConfig {
    let mut config = AnalysisConfig::default();
    config.selector = SegmentSelector::new("rec1", 0, 0, 2500);
    config.output.root = output_root.to_path_buf();
    config.output.save = save;
    config
}

#[test]
fn test_missing_record_does_not_abort_batch() {
    let loader = MemoryLoader::new()
        .with_record("rec1", 250.0, vec![synthetic_ecg(3000, 250.0, 1)])
        .with_record("rec3", 250.0, vec![synthetic_ecg(3000, 250.0, 3)]);
    let driver = BatchDriver::new(loader, NullRenderer, &config(Path::new("unused"), false)).unwrap();

    let outcomes = driver.run_records(["rec1", "rec2", "rec3"]);
    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[0].is_success());
    assert!(outcomes[2].is_success());

    let failure = outcomes[1].error().unwrap();
    assert_eq!(outcomes[1].record_id, "rec2");
    assert_eq!(failure.stage, Stage::Load);
    assert!(matches!(failure.source, Error::RecordNotFound(ref id) if id == "rec2"));

    assert_eq!(
        BatchSummary::from_outcomes(&outcomes),
        BatchSummary {
            total: 3,
            succeeded: 2,
            failed: 1
        }
    );
}

#[test]
fn test_directory_batch_writes_plot_tree() {
    let records = ScratchDir::new();
    let output = ScratchDir::new();
    write_record(&records.0, "rec1", &synthetic_ecg(3000, 250.0, 11));
    write_record(&records.0, "rec2", &synthetic_ecg(3000, 250.0, 12));
    write_record(&records.0, "rec3", &synthetic_ecg(3000, 250.0, 13));
    fs::remove_file(records.0.join("rec2.dat")).unwrap();

    let driver = BatchDriver::new(
        WfdbLoader::new(&records.0),
        SvgRenderer::new(),
        &config(&output.0, true),
    )
    .unwrap();
    let outcomes = driver.run_directory().unwrap();

    let ids: Vec<&str> = outcomes.iter().map(|o| o.record_id.as_str()).collect();
    assert_eq!(ids, ["rec1", "rec2", "rec3"]);
    assert!(matches!(
        outcomes[1].error().map(|e| &e.source),
        Some(Error::RecordNotFound(_))
    ));

    for outcome in [&outcomes[0], &outcomes[2]] {
        let report = outcome.report().unwrap();
        assert_eq!(report.sampling_rate, 250.0);
        assert_eq!(report.written_files().count(), PlotKind::ALL.len());
        for kind in PlotKind::ALL {
            let path = output
                .0
                .join(kind.dir_name())
                .join(format!("{}.svg", outcome.record_id));
            assert!(path.is_file(), "missing {}", path.display());
        }
    }
    assert!(!output.0.join("psd").join("rec2.svg").exists());
}

#[test]
fn test_degenerate_record_fails_in_distribution_stage() {
    let loader = MemoryLoader::new()
        .with_record("flat", 250.0, vec![vec![0.5; 3000]])
        .with_record("rec1", 250.0, vec![synthetic_ecg(3000, 250.0, 5)]);
    let driver = BatchDriver::new(loader, NullRenderer, &config(Path::new("unused"), false)).unwrap();

    let outcomes = driver.run_directory().unwrap();
    assert_eq!(outcomes.len(), 2);
    match &outcomes[0].status {
        RecordStatus::Failed(err) => {
            assert_eq!(err.record_id, "flat");
            assert_eq!(err.stage, Stage::Distribution);
            assert!(matches!(err.source, Error::DegenerateInput(_)));
        }
        RecordStatus::Succeeded(_) => panic!("constant record must fail"),
    }
    assert!(outcomes[1].is_success());
}

#[test]
fn test_single_record_statistics_and_inline_plots() {
    let samples = synthetic_ecg(3000, 250.0, 7);
    let loader = MemoryLoader::new().with_record("rec1", 250.0, vec![samples.clone()]);
    let driver = BatchDriver::new(loader, SvgRenderer::new(), &config(Path::new("unused"), false)).unwrap();

    let report = driver.run_default().unwrap();
    let window = &samples[..2500];
    let mean = window.iter().sum::<f64>() / 2500.0;
    assert_relative_eq!(report.analysis.statistics.mean, mean, epsilon = 1e-12);
    assert_eq!(report.analysis.autocorrelation.values()[0], 1.0);
    assert_eq!(report.artifacts.len(), 5);
    assert!(report
        .artifacts
        .iter()
        .all(|a| matches!(a, Rendered::Inline(svg) if svg.contains("<svg"))));
    assert_eq!(report.written_files().count(), 0);
}

#[test]
fn test_unlistable_directory_is_an_error() {
    let missing = std::env::temp_dir().join(format!("ecg-missing-{}", uuid::Uuid::new_v4()));
    let driver = BatchDriver::new(
        WfdbLoader::new(&missing),
        NullRenderer,
        &config(Path::new("unused"), false),
    )
    .unwrap();
    assert!(matches!(driver.run_directory(), Err(Error::Io(_))));
}

#[test]
fn test_config_file_drives_the_run() {
    let scratch = ScratchDir::new();
    let path = scratch.0.join("run.json");
    fs::write(
        &path,
        r#"{
            "selector": { "record_id": "rec1", "channel": 0, "start": 500, "end": 1500 },
            "density": { "bins": 12 },
            "autocorrelation": { "max_lag": 250 },
            "output": { "save": false }
        }"#,
    )
    .unwrap();
    let config = AnalysisConfig::load(&path).unwrap();

    let loader = MemoryLoader::new().with_record("rec1", 250.0, vec![synthetic_ecg(2000, 250.0, 9)]);
    let report = BatchDriver::new(loader, NullRenderer, &config)
        .unwrap()
        .run_default()
        .unwrap();
    assert_eq!(report.analysis.statistics.count, 1000);
    assert_eq!(report.analysis.density.histogram.len(), 12);
    assert_eq!(report.analysis.autocorrelation.max_lag(), 250);
}
