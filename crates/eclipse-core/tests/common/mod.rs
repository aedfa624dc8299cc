#![allow(dead_code)]

use std::cell::RefCell;

use eclipse_core::classify::{Classification, StageClassifier};
use eclipse_core::error::{EclipseError, Result};
use eclipse_core::frame::Frame;
use eclipse_core::io::ser::SER_HEADER_SIZE;
use eclipse_core::snapshot::{SnapshotRef, SnapshotSink};
use eclipse_core::stage::StageLabel;

/// Build a SER file header with configurable bit depth and color mode.
///
/// `color_id`: 0=MONO, 8=BAYER_RGGB, 9=BAYER_GRBG, 10=BAYER_GBRG, 11=BAYER_BGGR,
///             100=RGB, 101=BGR
pub fn build_ser_header_full(
    width: u32,
    height: u32,
    bit_depth: u32,
    num_frames: usize,
    color_id: i32,
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(SER_HEADER_SIZE);

    // Magic (14 bytes)
    buf.extend_from_slice(b"LUCAM-RECORDER");
    // LuID (4 bytes)
    buf.extend_from_slice(&0i32.to_le_bytes());
    // ColorID (4 bytes)
    buf.extend_from_slice(&color_id.to_le_bytes());
    // LittleEndian = 0 (treated as little-endian)
    buf.extend_from_slice(&0i32.to_le_bytes());
    // Width
    buf.extend_from_slice(&(width as i32).to_le_bytes());
    // Height
    buf.extend_from_slice(&(height as i32).to_le_bytes());
    // PixelDepth
    buf.extend_from_slice(&(bit_depth as i32).to_le_bytes());
    // FrameCount
    buf.extend_from_slice(&(num_frames as i32).to_le_bytes());
    // Observer (40 bytes)
    let mut observer = [0u8; 40];
    observer[..4].copy_from_slice(b"Test");
    buf.extend_from_slice(&observer);
    // Instrument (40 bytes)
    buf.extend_from_slice(&[0u8; 40]);
    // Telescope (40 bytes)
    let mut telescope = [0u8; 40];
    telescope[..7].copy_from_slice(b"MyScope");
    buf.extend_from_slice(&telescope);
    // DateTime (8 bytes)
    buf.extend_from_slice(&0u64.to_le_bytes());
    // DateTimeUTC (8 bytes)
    buf.extend_from_slice(&0u64.to_le_bytes());

    assert_eq!(buf.len(), SER_HEADER_SIZE);
    buf
}

/// Build a complete synthetic mono 8-bit SER file with the given frame data.
pub fn build_ser_with_frames(width: u32, height: u32, frames: &[Vec<u8>]) -> Vec<u8> {
    let mut buf = build_ser_header_full(width, height, 8, frames.len(), 0);
    for frame in frames {
        buf.extend_from_slice(frame);
    }
    buf
}

/// Mono 8-bit SER whose frame `i` is filled with the value `i % 256`, plus a
/// timestamp trailer at the given frame rate.
pub fn build_timed_ser(width: u32, height: u32, num_frames: usize, fps: f64) -> Vec<u8> {
    let frames: Vec<Vec<u8>> = (0..num_frames)
        .map(|i| vec![(i % 256) as u8; (width * height) as usize])
        .collect();
    let mut buf = build_ser_with_frames(width, height, &frames);
    let ticks_per_frame = 10_000_000.0 / fps;
    let epoch: u64 = 638_000_000_000_000_000;
    for i in 0..num_frames {
        let ts = epoch + (i as f64 * ticks_per_frame).round() as u64;
        buf.extend_from_slice(&ts.to_le_bytes());
    }
    buf
}

/// Write a SER buffer to a temporary file and return the temp file handle.
///
/// The file stays alive as long as the returned `NamedTempFile` is not dropped.
pub fn write_test_ser(data: &[u8]) -> tempfile::NamedTempFile {
    use std::io::Write;
    let mut f = tempfile::NamedTempFile::new().expect("create temp file");
    f.write_all(data).expect("write SER data");
    f.flush().expect("flush");
    f
}

/// Parse a label name, panicking on empty input.
pub fn label(name: &str) -> StageLabel {
    name.parse().expect("valid label")
}

/// Classifier that answers from a frame-index -> label script and fails on
/// the listed frames.
pub struct ScriptedClassifier {
    script: Vec<(usize, Option<StageLabel>)>,
    fail_on: Option<usize>,
    pub calls: RefCell<Vec<usize>>,
}

impl ScriptedClassifier {
    pub fn new(script: Vec<(usize, Option<StageLabel>)>) -> Self {
        Self {
            script,
            fail_on: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn failing_on(mut self, frame_index: usize) -> Self {
        self.fail_on = Some(frame_index);
        self
    }
}

impl StageClassifier for ScriptedClassifier {
    fn classify(&self, frame: &Frame) -> Result<Option<Classification>> {
        let index = frame.metadata.frame_index;
        self.calls.borrow_mut().push(index);
        if self.fail_on == Some(index) {
            return Err(EclipseError::Classifier {
                frame_index: index,
                message: "malformed frame".into(),
            });
        }
        Ok(self
            .script
            .iter()
            .find(|(i, _)| *i == index)
            .and_then(|(_, l)| l.clone())
            .map(|l| Classification::new(l, 0.9)))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Snapshot sink that keeps captured frames in memory.
#[derive(Default)]
pub struct MemorySink {
    pub captured: Vec<(String, usize)>,
    pub discarded: Vec<SnapshotRef>,
    /// Fail the capture after this many have succeeded.
    capture_limit: Option<usize>,
}

impl MemorySink {
    pub fn failing_after(captures: usize) -> Self {
        Self {
            capture_limit: Some(captures),
            ..Self::default()
        }
    }
}

impl SnapshotSink for MemorySink {
    fn capture(&mut self, frame: &Frame, file_name: &str) -> Result<SnapshotRef> {
        if self.capture_limit == Some(self.captured.len()) {
            return Err(EclipseError::Io(std::io::Error::other("disk full")));
        }
        self.captured
            .push((file_name.to_string(), frame.metadata.frame_index));
        Ok(SnapshotRef::new(format!("mem/{file_name}")))
    }

    fn discard(&mut self, snapshot: &SnapshotRef) -> Result<()> {
        self.discarded.push(snapshot.clone());
        Ok(())
    }

    fn extension(&self) -> &str {
        "png"
    }
}
