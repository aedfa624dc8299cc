use tracing::{debug, info, warn};

use crate::classify::StageClassifier;
use crate::detector::{Sample, TransitionDetector};
use crate::error::{EclipseError, Result};
use crate::io::VideoSource;
use crate::recorder::{DetectionEvent, EventRecorder};
use crate::rules::RuleTable;
use crate::sampler::FrameSampler;
use crate::session::VideoSession;
use crate::snapshot::{snapshot_file_name, SnapshotSink};
use crate::timestamp::TimestampMapper;

use super::types::{ProgressReporter, ScanReport, ScanStage, StampedTransition};

/// Scan a video once, classify the sampled frames and record every stage
/// transition with a snapshot of the frame where it was first seen.
///
/// Any error aborts the scan. Snapshots captured before the failure are
/// discarded and no partial log is returned.
pub fn run_scan<V, C, K>(
    source: &V,
    classifier: &C,
    sink: &mut K,
    session: &VideoSession,
    rules: &RuleTable,
    reporter: &dyn ProgressReporter,
) -> Result<ScanReport>
where
    V: VideoSource + ?Sized,
    C: StageClassifier + ?Sized,
    K: SnapshotSink + ?Sized,
{
    let available = source.metadata().total_frames;
    if session.total_frames() > available {
        return Err(EclipseError::InvalidVideoMetadata(format!(
            "session expects {} frames but the source has {}",
            session.total_frames(),
            available
        )));
    }

    info!(
        fps = session.fps(),
        total_frames = session.total_frames(),
        start = session.start_offset().as_secs(),
        classifier = classifier.name(),
        rules = rules.len(),
        "Starting eclipse scan"
    );

    let mut report = ScanReport::default();
    reporter.begin_stage(ScanStage::Classifying, Some(session.total_frames()));
    let outcome = scan_frames(source, classifier, sink, session, rules, reporter, &mut report);
    reporter.finish_stage();

    match outcome {
        Ok(()) => {
            info!(
                events = report.events.len(),
                samples = report.samples_classified,
                "Eclipse scan complete"
            );
            Ok(report)
        }
        Err(e) => {
            warn!(error = %e, "Scan aborted; discarding partial results");
            discard_snapshots(sink, &report.events, reporter);
            Err(e)
        }
    }
}

fn scan_frames<V, C, K>(
    source: &V,
    classifier: &C,
    sink: &mut K,
    session: &VideoSession,
    rules: &RuleTable,
    reporter: &dyn ProgressReporter,
    report: &mut ScanReport,
) -> Result<()>
where
    V: VideoSource + ?Sized,
    C: StageClassifier + ?Sized,
    K: SnapshotSink + ?Sized,
{
    let sampler = FrameSampler::for_session(session);
    let mapper = TimestampMapper::new(session);
    let mut detector = TransitionDetector::new(rules);

    for point in sampler.iter() {
        let frame = source.read_frame(point.frame_index)?;
        let label = classifier.classify(&frame)?.map(|c| {
            debug!(
                frame = point.frame_index,
                label = %c.label,
                confidence = c.confidence,
                "Classified frame"
            );
            c.label
        });

        report.samples_classified += 1;
        match &label {
            Some(l) => *report.label_counts.entry(l.name().to_string()).or_default() += 1,
            None => report.samples_without_detection += 1,
        }

        let sample = Sample::new(point, label);
        if let Some(transition) = detector.observe(&sample) {
            let timestamp = mapper.timestamp(sample.frame_index);
            let file_name =
                snapshot_file_name(&transition.event_name, &timestamp, sink.extension());
            let snapshot = sink.capture(&frame, &file_name)?;
            info!(
                event = %transition.event_name,
                time = %timestamp,
                frame = transition.frame_index,
                "Detected eclipse stage"
            );
            report.events.record(DetectionEvent {
                event_name: transition.event_name,
                timestamp,
                snapshot,
                frame_index: transition.frame_index,
                from: transition.from,
                to: transition.to,
            });
        }

        reporter.advance(point.frame_index + 1);
    }

    reporter.advance(session.total_frames());
    Ok(())
}

fn discard_snapshots<K: SnapshotSink + ?Sized>(
    sink: &mut K,
    events: &EventRecorder,
    reporter: &dyn ProgressReporter,
) {
    if events.is_empty() {
        return;
    }
    reporter.begin_stage(ScanStage::Discarding, Some(events.len()));
    for (i, snapshot) in events.snapshots().enumerate() {
        if let Err(e) = sink.discard(snapshot) {
            warn!(path = %snapshot.path().display(), error = %e, "Failed to discard snapshot");
        }
        reporter.advance(i + 1);
    }
    reporter.finish_stage();
}

/// Run the detector over already-labelled samples, without video or
/// snapshots. Samples must be in frame order.
pub fn scan_labels<'a, I>(
    session: &VideoSession,
    rules: &RuleTable,
    samples: I,
) -> Vec<StampedTransition>
where
    I: IntoIterator<Item = &'a Sample>,
{
    let mapper = TimestampMapper::new(session);
    let mut detector = TransitionDetector::new(rules);
    samples
        .into_iter()
        .filter_map(|sample| detector.observe(sample))
        .map(|transition| StampedTransition {
            timestamp: mapper.timestamp(transition.frame_index),
            transition,
        })
        .collect()
}
