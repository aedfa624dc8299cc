use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::{EclipseError, Result};
use crate::frame::Frame;

use super::{best_candidate, Classification, StageClassifier};

#[derive(Debug, Deserialize)]
struct DetectionsFile {
    model: Option<String>,
    #[serde(default)]
    frames: Vec<FrameDetections>,
}

#[derive(Debug, Deserialize)]
struct FrameDetections {
    index: usize,
    #[serde(default)]
    detections: Vec<Classification>,
}

/// Replays detections produced by an external model run.
///
/// The detections file is TOML:
///
/// ```toml
/// model = "best.pt"
///
/// [[frames]]
/// index = 30
/// detections = [
///     { label = "Sun", confidence = 0.91 },
///     { label = "Partial Solar Eclipse", confidence = 0.12 },
/// ]
/// ```
///
/// Frames that are absent or carry no detections classify as "no detection".
pub struct RecordedClassifier {
    model: Option<String>,
    frames: HashMap<usize, Vec<Classification>>,
    min_confidence: f32,
}

impl RecordedClassifier {
    pub fn from_toml_str(contents: &str, min_confidence: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&min_confidence) {
            return Err(EclipseError::Config(format!(
                "minimum confidence must be within [0, 1], got {min_confidence}"
            )));
        }

        let file: DetectionsFile = toml::from_str(contents)
            .map_err(|e| EclipseError::Config(format!("invalid detections file: {e}")))?;

        let mut frames = HashMap::with_capacity(file.frames.len());
        for entry in file.frames {
            if frames.insert(entry.index, entry.detections).is_some() {
                return Err(EclipseError::Config(format!(
                    "frame {} listed more than once in detections file",
                    entry.index
                )));
            }
        }

        Ok(Self {
            model: file.model,
            frames,
            min_confidence,
        })
    }

    pub fn load(path: &Path, min_confidence: f32) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let classifier = Self::from_toml_str(&contents, min_confidence)?;
        info!(
            path = %path.display(),
            frames = classifier.frames.len(),
            model = classifier.model.as_deref().unwrap_or("unknown"),
            "Loaded recorded detections"
        );
        Ok(classifier)
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn min_confidence(&self) -> f32 {
        self.min_confidence
    }

    /// Number of frames with an entry in the file.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

impl StageClassifier for RecordedClassifier {
    fn classify(&self, frame: &Frame) -> Result<Option<Classification>> {
        let frame_index = frame.metadata.frame_index;
        let Some(candidates) = self.frames.get(&frame_index) else {
            return Ok(None);
        };

        if let Some(bad) = candidates
            .iter()
            .find(|c| !(0.0..=1.0).contains(&c.confidence))
        {
            return Err(EclipseError::Classifier {
                frame_index,
                message: format!(
                    "confidence {} for '{}' is outside [0, 1]",
                    bad.confidence, bad.label
                ),
            });
        }

        Ok(best_candidate(candidates, self.min_confidence).cloned())
    }

    fn name(&self) -> &str {
        self.model.as_deref().unwrap_or("recorded detections")
    }
}
