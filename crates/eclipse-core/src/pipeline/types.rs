use std::collections::BTreeMap;

use crate::detector::Transition;
use crate::recorder::{EventRecorder, EventSummary};
use crate::timestamp::Timestamp;

/// Scan stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanStage {
    Classifying,
    Discarding,
}

impl std::fmt::Display for ScanStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Classifying => write!(f, "Classifying frames"),
            Self::Discarding => write!(f, "Discarding snapshots"),
        }
    }
}

/// Progress reporting for a scan.
///
/// Implementors can use this to drive progress bars, logging, or any other
/// UI feedback. All methods have default no-op implementations. Progress is
/// advisory and never affects the result.
pub trait ProgressReporter {
    /// A new stage has started. `total_items` is the number of work items in
    /// this stage (e.g., frame count), if known.
    fn begin_stage(&self, _stage: ScanStage, _total_items: Option<usize>) {}

    /// Work items completed so far within the current stage.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// No-op progress reporter.
pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}

/// Outcome of a completed scan.
#[derive(Clone, Debug, Default)]
pub struct ScanReport {
    pub events: EventRecorder,
    /// Sampled frames handed to the classifier.
    pub samples_classified: usize,
    pub samples_without_detection: usize,
    /// How often each stage label won, keyed by label name.
    pub label_counts: BTreeMap<String, usize>,
}

impl ScanReport {
    pub fn summary(&self) -> Option<EventSummary> {
        self.events.summary()
    }
}

/// A transition with its wall-clock time, produced without touching video.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StampedTransition {
    pub transition: Transition,
    pub timestamp: Timestamp,
}
