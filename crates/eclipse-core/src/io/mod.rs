pub mod image_io;
pub mod ser;

use crate::error::Result;
use crate::frame::Frame;
use crate::session::VideoMetadata;

/// Random-access source of decoded video frames.
pub trait VideoSource {
    fn metadata(&self) -> VideoMetadata;

    fn read_frame(&self, index: usize) -> Result<Frame>;
}
