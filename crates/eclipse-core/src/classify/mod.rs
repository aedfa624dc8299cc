pub mod recorded;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::frame::Frame;
use crate::stage::StageLabel;

pub use recorded::RecordedClassifier;

/// One labelled guess for a frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: StageLabel,
    pub confidence: f32,
}

impl Classification {
    pub fn new(label: StageLabel, confidence: f32) -> Self {
        Self { label, confidence }
    }
}

/// Image classifier that names the eclipse stage visible in a frame.
///
/// Implementations return the single winning label, or `Ok(None)` when
/// nothing was detected. Errors abort the scan.
pub trait StageClassifier {
    fn classify(&self, frame: &Frame) -> Result<Option<Classification>>;

    /// Short human-readable identifier for logs.
    fn name(&self) -> &str {
        "classifier"
    }
}

impl<C: StageClassifier + ?Sized> StageClassifier for &C {
    fn classify(&self, frame: &Frame) -> Result<Option<Classification>> {
        (**self).classify(frame)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Highest-confidence candidate at or above `min_confidence`.
///
/// Ties keep the earlier candidate.
pub fn best_candidate(
    candidates: &[Classification],
    min_confidence: f32,
) -> Option<&Classification> {
    candidates
        .iter()
        .filter(|c| c.confidence >= min_confidence)
        .fold(None, |best: Option<&Classification>, c| match best {
            Some(b) if b.confidence >= c.confidence => Some(b),
            _ => Some(c),
        })
}
