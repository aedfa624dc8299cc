use ndarray::Array2;

use eclipse_core::frame::Frame;
use eclipse_core::recorder::{DetectionEvent, EventRecorder};
use eclipse_core::snapshot::{
    snapshot_file_name, DirectorySink, SnapshotFormat, SnapshotRef, SnapshotSink,
};
use eclipse_core::stage::StageLabel;
use eclipse_core::timestamp::Timestamp;

fn event(name: &str, seconds: u64, frame_index: usize) -> DetectionEvent {
    DetectionEvent {
        event_name: name.to_string(),
        timestamp: Timestamp::from_seconds(seconds),
        snapshot: SnapshotRef::new(format!("{name}.png")),
        frame_index,
        from: StageLabel::Sun,
        to: StageLabel::PartialSolarEclipse,
    }
}

// ---------------------------------------------------------------------------
// EventRecorder
// ---------------------------------------------------------------------------

#[test]
fn test_empty_recorder_has_no_summary() {
    let recorder = EventRecorder::new();
    assert!(recorder.is_empty());
    assert!(recorder.first().is_none());
    assert!(recorder.last().is_none());
    assert!(recorder.summary().is_none());
}

#[test]
fn test_recorder_keeps_arrival_order() {
    let mut recorder = EventRecorder::new();
    recorder.record(event("onset of partial eclipse", 100, 30));
    recorder.record(event("onset of totality", 200, 60));
    recorder.record(event("end of totality", 300, 90));

    let names: Vec<_> = recorder.events().iter().map(|e| e.event_name.as_str()).collect();
    assert_eq!(
        names,
        vec!["onset of partial eclipse", "onset of totality", "end of totality"]
    );
    assert_eq!(recorder.len(), 3);
}

#[test]
fn test_summary_first_and_last() {
    let mut recorder = EventRecorder::new();
    recorder.record(event("onset of partial eclipse", 46_500, 30));
    recorder.record(event("end of partial eclipse", 50_000, 60));

    let summary = recorder.summary().unwrap();
    assert_eq!(summary.first_event_name, "onset of partial eclipse");
    assert_eq!(summary.first_timestamp.to_string(), "12:55:00");
    assert_eq!(summary.last_event_name, "end of partial eclipse");
    assert_eq!(summary.last_timestamp.to_string(), "13:53:20");
}

#[test]
fn test_single_event_is_both_first_and_last() {
    let mut recorder = EventRecorder::new();
    recorder.record(event("onset of annularity", 10, 30));
    let summary = recorder.summary().unwrap();
    assert_eq!(summary.first_event_name, summary.last_event_name);
    assert_eq!(summary.first_timestamp, summary.last_timestamp);
}

#[test]
fn test_recorder_does_not_deduplicate() {
    let mut recorder = EventRecorder::new();
    recorder.record(event("onset of partial eclipse", 10, 30));
    recorder.record(event("onset of partial eclipse", 10, 31));
    assert_eq!(recorder.len(), 2);
    assert_eq!(recorder.snapshots().count(), 2);
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

#[test]
fn test_snapshot_file_name_convention() {
    let ts = Timestamp::from_seconds(12 * 3600 + 55 * 60 + 5);
    assert_eq!(
        snapshot_file_name("onset of partial eclipse", &ts, "jpg"),
        "onset_of_partial_eclipse_12-55-05.jpg"
    );
}

#[test]
fn test_snapshot_format_extensions() {
    assert_eq!(SnapshotFormat::Png.extension(), "png");
    assert_eq!(SnapshotFormat::Jpeg.extension(), "jpg");
    assert_eq!(SnapshotFormat::Tiff.extension(), "tiff");
    assert_eq!(SnapshotFormat::default(), SnapshotFormat::Png);
}

#[test]
fn test_directory_sink_writes_and_discards() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("shots");
    let mut sink = DirectorySink::create(&out, SnapshotFormat::Png).unwrap();
    assert!(out.is_dir());

    let data = Array2::from_shape_fn((4, 6), |(r, c)| (r * 6 + c) as f32 / 24.0);
    let frame = Frame::new(data, 8);
    let snapshot = sink
        .capture(&frame, "onset_of_totality_00-00-01.png")
        .unwrap();
    assert!(snapshot.path().exists());
    assert_eq!(snapshot.file_name(), Some("onset_of_totality_00-00-01.png"));

    let img = image::open(snapshot.path()).unwrap();
    assert_eq!(img.width(), 6);
    assert_eq!(img.height(), 4);

    sink.discard(&snapshot).unwrap();
    assert!(!snapshot.path().exists());
    // Discarding twice is harmless.
    sink.discard(&snapshot).unwrap();
}

#[test]
fn test_directory_sink_tiff() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = DirectorySink::create(dir.path(), SnapshotFormat::Tiff).unwrap();
    assert_eq!(sink.extension(), "tiff");
    let frame = Frame::new(Array2::from_elem((3, 3), 0.5), 16);
    let snapshot = sink.capture(&frame, "end_of_totality_01-00-00.tiff").unwrap();
    let img = image::open(snapshot.path()).unwrap();
    assert_eq!(img.width(), 3);
}
