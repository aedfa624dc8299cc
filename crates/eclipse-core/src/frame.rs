use ndarray::Array2;
use std::path::PathBuf;

/// A single decoded video frame, grayscale.
/// Pixel values are f32 in [0.0, 1.0].
#[derive(Clone, Debug)]
pub struct Frame {
    /// Pixel data, row-major, shape = (height, width)
    pub data: Array2<f32>,
    /// Original bit depth before conversion (8 or 16)
    pub original_bit_depth: u8,
    pub metadata: FrameMetadata,
}

impl Frame {
    pub fn new(data: Array2<f32>, bit_depth: u8) -> Self {
        Self {
            data,
            original_bit_depth: bit_depth,
            metadata: FrameMetadata::default(),
        }
    }

    /// Attach the frame's position within the video.
    pub fn with_index(mut self, frame_index: usize) -> Self {
        self.metadata.frame_index = frame_index;
        self
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }
}

#[derive(Clone, Debug, Default)]
pub struct FrameMetadata {
    pub frame_index: usize,
    /// Capture time in 100 ns ticks, when the container records one.
    pub timestamp_ticks: Option<u64>,
}

/// Color/Bayer mode of the source data.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ColorMode {
    Mono,
    BayerRGGB,
    BayerGRBG,
    BayerGBRG,
    BayerBGGR,
    RGB,
    BGR,
}

/// Metadata about the source file.
#[derive(Clone, Debug)]
pub struct SourceInfo {
    pub filename: PathBuf,
    pub total_frames: usize,
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_mode: ColorMode,
    /// Frame rate derived from the capture timestamps, if present.
    pub frame_rate: Option<f64>,
    pub observer: Option<String>,
    pub telescope: Option<String>,
    pub instrument: Option<String>,
}
