use thiserror::Error;

#[derive(Error, Debug)]
pub enum EclipseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid SER file: {0}")]
    InvalidSer(String),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Frame index {index} out of range (total: {total})")]
    FrameIndexOutOfRange { index: usize, total: usize },

    #[error("Invalid start time '{0}': expected SS, MM:SS or HH:MM:SS")]
    InvalidStartTimeFormat(String),

    #[error("Invalid video metadata: {0}")]
    InvalidVideoMetadata(String),

    #[error("Classifier failed on frame {frame_index}: {message}")]
    Classifier { frame_index: usize, message: String },

    #[error("Invalid transition rule table: {0}")]
    RuleTable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, EclipseError>;
