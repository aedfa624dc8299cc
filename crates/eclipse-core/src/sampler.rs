use crate::error::Result;
use crate::session::{validate_fps, VideoSession};

/// A frame chosen for classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SamplePoint {
    pub frame_index: usize,
    /// Whole second of video this frame stands for.
    pub elapsed_seconds: u64,
}

/// Picks roughly one frame per second of video.
///
/// Frame `i` is sampled when `i / fps` lies strictly within one frame
/// duration of a whole second. For non-integer frame rates two neighbouring
/// frames can both qualify for the same second.
#[derive(Clone, Copy, Debug)]
pub struct FrameSampler {
    fps: f64,
    total_frames: usize,
}

impl FrameSampler {
    pub fn new(fps: f64, total_frames: usize) -> Result<Self> {
        validate_fps(fps)?;
        Ok(Self { fps, total_frames })
    }

    pub fn for_session(session: &VideoSession) -> Self {
        Self {
            fps: session.fps(),
            total_frames: session.total_frames(),
        }
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn total_frames(&self) -> usize {
        self.total_frames
    }

    /// Test a single frame. Returns `None` if the frame is skipped or lies
    /// past the end of the video.
    pub fn sample_point(&self, frame_index: usize) -> Option<SamplePoint> {
        if frame_index >= self.total_frames {
            return None;
        }
        let second = (frame_index as f64 / self.fps).round_ties_even();
        // |i/fps - k| < 1/fps  <=>  |i - k*fps| < 1, which stays exact for
        // integral frame rates.
        let distance = (frame_index as f64 - second * self.fps).abs();
        (distance < 1.0).then_some(SamplePoint {
            frame_index,
            elapsed_seconds: second as u64,
        })
    }

    pub fn is_sampled(&self, frame_index: usize) -> bool {
        self.sample_point(frame_index).is_some()
    }

    /// Lazily walk all frames in order, yielding the sampled ones.
    pub fn iter(&self) -> impl Iterator<Item = SamplePoint> + '_ {
        (0..self.total_frames).filter_map(move |i| self.sample_point(i))
    }

    pub fn sample_count(&self) -> usize {
        self.iter().count()
    }
}
