use easy_reader::geometry::{GeometryLookup, LayoutTable};
use easy_reader::parser::EasyParser;
use easy_reader::{read_raw_easy, ReadError, ReadWarning, ReaderOptions, SCALING_FACTOR};
use std::path::{Path, PathBuf};

const INFO: &str = "\
Total number of channels: 2
EEG sampling rate: 500
Channel 1: Fp1
Channel 2: Fp2
StartDate: 1000
";

fn write_pair(dir: &Path, stem: &str, info: Option<&str>, easy: &str) -> PathBuf {
    if let Some(info) = info {
        std::fs::write(dir.join(format!("{stem}.info")), info).unwrap();
    }
    let path = dir.join(format!("{stem}.easy"));
    std::fs::write(&path, easy).unwrap();
    path
}

#[test]
fn reads_two_channel_recording() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_pair(dir.path(), "rec", Some(INFO), "0.001\t0.002\t0\t123456\n");

    let rec = read_raw_easy(&path).unwrap();
    let d = &rec.descriptor;
    assert_eq!(d.channel_names(), ["Fp1", "Fp2", "STI 014"]);
    assert_eq!(d.sample_rate(), 500.0);
    assert_eq!(d.start_time(), Some(1.0));
    assert_eq!(d.file_name(), "rec.info");

    assert_eq!(rec.data.dim(), (3, 1));
    assert_eq!(rec.data[[0, 0]], 0.001 * SCALING_FACTOR);
    assert_eq!(rec.data[[1, 0]], 0.002 * SCALING_FACTOR);
    assert_eq!(rec.data[[2, 0]], 0.0);
    assert_eq!(rec.event_channel.to_vec(), vec![0.0]);
}

#[test]
fn matrix_shape_excludes_timestamp() {
    let dir = tempfile::tempdir().unwrap();
    let rows: String = (0..25)
        .map(|i| format!("{i}\t{}\t{}\t{}\n", i * 2, i % 5, 1000 + 2 * i))
        .collect();
    let path = write_pair(dir.path(), "long", Some(INFO), &rows);

    let rec = read_raw_easy(&path).unwrap();
    assert_eq!(rec.data.dim(), (3, 25));
    assert!(rec.data.iter().all(|v| *v < 1000.0));
    assert_eq!(rec.events().len(), 20);
}

#[test]
fn wrong_extension_fails_before_metadata() {
    let dir = tempfile::tempdir().unwrap();
    // Unparsable sidecar: would raise a lookup error if it were read.
    std::fs::write(dir.path().join("rec.info"), "garbage\n").unwrap();
    let path = dir.path().join("rec.txt");
    std::fs::write(&path, "1\t2\t0\t0\n").unwrap();

    assert!(matches!(read_raw_easy(&path), Err(ReadError::Format { .. })));
}

#[test]
fn missing_sidecar_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_pair(dir.path(), "lonely", None, "1\t2\t0\t0\n");

    match read_raw_easy(&path) {
        Err(ReadError::MissingMetadata { path: info }) => {
            assert_eq!(info, dir.path().join("lonely.info"));
        }
        other => panic!("expected MissingMetadata, got {other:?}"),
    }
}

#[test]
fn missing_sample_rate_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let info = "Total number of channels: 2\nChannel 1: Fp1\nChannel 2: Fp2\nStartDate: 1000\n";
    let path = write_pair(dir.path(), "norate", Some(info), "1\t2\t0\t0\n");

    match read_raw_easy(&path) {
        Err(ReadError::FieldNotFound { label, file }) => {
            assert_eq!(label, "EEG sampling rate:");
            assert_eq!(file, "norate.info");
        }
        other => panic!("expected FieldNotFound, got {other:?}"),
    }
}

#[test]
fn column_count_disagreement_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_pair(dir.path(), "wide", Some(INFO), "1\t2\t3\t0\t0\n");

    match read_raw_easy(&path) {
        Err(ReadError::ShapeMismatch { expected, actual, file }) => {
            assert_eq!((expected, actual), (4, 5));
            assert_eq!(file, "wide.easy");
        }
        other => panic!("expected ShapeMismatch, got {other:?}"),
    }
}

#[test]
fn options_control_stim_name_and_warnings() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_pair(dir.path(), "opts", Some(INFO), "1\t2\t4\t0\n");
    let options = ReaderOptions {
        stim_channel: "TRIG".to_string(),
        preload: false,
        ..Default::default()
    };

    let parser = EasyParser::with_options(&path, &options, None).unwrap();
    let rec = parser.recording;
    assert_eq!(rec.descriptor.stim_channel(), "TRIG");
    assert_eq!(rec.channel("TRIG").unwrap().to_vec(), vec![4.0]);
    assert!(rec.warnings.contains(&ReadWarning::PreloadIgnored));
    assert!(rec
        .warnings
        .iter()
        .any(|w| matches!(w, ReadWarning::GeometryUnavailable { .. })));
}

#[test]
fn layout_positions_are_attached() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_pair(dir.path(), "geo", Some(INFO), "1\t2\t0\t0\n");
    let mut table = LayoutTable::new();
    table.insert("cap", "Fp1", [0.1, 0.2, 0.3]);
    table.insert("cap", "Fp2", [-0.1, 0.2, 0.3]);
    let options = ReaderOptions {
        layout: Some("cap".to_string()),
        ..Default::default()
    };

    let rec = EasyParser::with_options(&path, &options, Some(&table as &dyn GeometryLookup))
        .unwrap()
        .into_recording();
    let geometry = rec.descriptor.geometry().unwrap();
    assert_eq!(geometry.len(), 2);
    assert_eq!(geometry["Fp2"], [-0.1, 0.2, 0.3]);
    assert!(rec.warnings.is_empty());
}

#[test]
fn summary_row_describes_recording() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_pair(dir.path(), "sum", Some(INFO), "1\t2\t0\t0\n3\t4\t9\t2\n");

    let df = EasyParser::from_data_file(&path).unwrap().to_summary_row().unwrap();
    assert_eq!(df.height(), 1);
    assert_eq!(df.column("num_samples").unwrap().u64().unwrap().get(0), Some(2));
    assert_eq!(df.column("num_events").unwrap().u64().unwrap().get(0), Some(1));
    assert_eq!(df.column("start_time_s").unwrap().f64().unwrap().get(0), Some(1.0));
}

#[test]
fn absent_sample_file_is_named_in_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("gone.info"), INFO).unwrap();
    let path = dir.path().join("gone.easy");

    match read_raw_easy(&path) {
        Err(err @ ReadError::Io { .. }) => {
            assert!(err.to_string().contains("gone.easy"), "{err}");
        }
        other => panic!("expected Io, got {other:?}"),
    }
}

#[test]
fn short_row_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_pair(dir.path(), "cut", Some(INFO), "1\t2\t0\t10\n3\t4\n5\t6\t0\t14\n");

    assert!(matches!(
        read_raw_easy(&path),
        Err(ReadError::ShapeMismatch { expected: 4, actual: 2, .. })
    ));
}
