use std::time::Duration;

use crate::error::{EclipseError, Result};

/// Frame rate and frame count as reported by a video source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VideoMetadata {
    /// `None` when the container carries no timing information.
    pub frame_rate: Option<f64>,
    pub total_frames: usize,
}

/// Validated parameters of a single scan. Read-only once built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VideoSession {
    fps: f64,
    total_frames: usize,
    start_offset: Duration,
}

impl VideoSession {
    pub fn new(fps: f64, total_frames: usize, start_offset: Duration) -> Result<Self> {
        validate_fps(fps)?;
        if total_frames == 0 {
            return Err(EclipseError::InvalidVideoMetadata(
                "video contains no frames".into(),
            ));
        }
        // Every frame's wall-clock second must be representable.
        let last_second = ((total_frames - 1) as f64 / fps).round_ties_even();
        let fits = last_second < u64::MAX as f64
            && start_offset.as_secs().checked_add(last_second as u64).is_some();
        if !fits {
            return Err(EclipseError::InvalidVideoMetadata(format!(
                "start offset of {} s plus {} frames at {fps} fps overflows the clock",
                start_offset.as_secs(),
                total_frames
            )));
        }
        Ok(Self {
            fps,
            total_frames,
            start_offset,
        })
    }

    /// Build a session from source metadata. `fps_override` wins over the
    /// rate reported by the source.
    pub fn from_metadata(
        metadata: VideoMetadata,
        fps_override: Option<f64>,
        start_offset: Duration,
    ) -> Result<Self> {
        let fps = fps_override.or(metadata.frame_rate).ok_or_else(|| {
            EclipseError::InvalidVideoMetadata(
                "frame rate unavailable; supply it explicitly".into(),
            )
        })?;
        Self::new(fps, metadata.total_frames, start_offset)
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn total_frames(&self) -> usize {
        self.total_frames
    }

    pub fn start_offset(&self) -> Duration {
        self.start_offset
    }

    /// Length of the video in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.total_frames as f64 / self.fps
    }
}

pub(crate) fn validate_fps(fps: f64) -> Result<()> {
    if !fps.is_finite() || fps <= 0.0 {
        return Err(EclipseError::InvalidVideoMetadata(format!(
            "frame rate must be positive, got {fps}"
        )));
    }
    Ok(())
}
