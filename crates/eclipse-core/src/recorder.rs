use crate::snapshot::SnapshotRef;
use crate::stage::StageLabel;
use crate::timestamp::Timestamp;

/// A stamped, recorded stage transition.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectionEvent {
    pub event_name: String,
    pub timestamp: Timestamp,
    pub snapshot: SnapshotRef,
    pub frame_index: usize,
    pub from: StageLabel,
    pub to: StageLabel,
}

/// First and last event of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventSummary {
    pub first_event_name: String,
    pub first_timestamp: Timestamp,
    pub last_event_name: String,
    pub last_timestamp: Timestamp,
}

/// Append-only log of detection events in processing order.
#[derive(Clone, Debug, Default)]
pub struct EventRecorder {
    events: Vec<DetectionEvent>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: DetectionEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[DetectionEvent] {
        &self.events
    }

    pub fn first(&self) -> Option<&DetectionEvent> {
        self.events.first()
    }

    pub fn last(&self) -> Option<&DetectionEvent> {
        self.events.last()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn summary(&self) -> Option<EventSummary> {
        let first = self.first()?;
        let last = self.last()?;
        Some(EventSummary {
            first_event_name: first.event_name.clone(),
            first_timestamp: first.timestamp,
            last_event_name: last.event_name.clone(),
            last_timestamp: last.timestamp,
        })
    }

    pub fn snapshots(&self) -> impl Iterator<Item = &SnapshotRef> {
        self.events.iter().map(|e| &e.snapshot)
    }

    pub fn into_events(self) -> Vec<DetectionEvent> {
        self.events
    }
}
