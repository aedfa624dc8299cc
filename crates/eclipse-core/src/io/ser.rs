use std::fs::File;
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};
use memmap2::Mmap;
use ndarray::Array2;
use tracing::warn;

use crate::consts::SER_TICKS_PER_SECOND;
use crate::error::{EclipseError, Result};
use crate::frame::{ColorMode, Frame, FrameMetadata, SourceInfo};
use crate::session::VideoMetadata;

use super::VideoSource;

pub const SER_HEADER_SIZE: usize = 178;
const SER_MAGIC: &[u8; 14] = b"LUCAM-RECORDER";

/// ITU-R BT.601 luma weights for RGB frames.
const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

/// SER file header (178 bytes).
#[derive(Clone, Debug)]
pub struct SerHeader {
    pub color_id: i32,
    pub little_endian: bool,
    pub width: u32,
    pub height: u32,
    pub pixel_depth: u32,
    pub frame_count: u32,
    pub observer: String,
    pub instrument: String,
    pub telescope: String,
    pub date_time: u64,
    pub date_time_utc: u64,
}

impl SerHeader {
    /// Bytes per pixel plane (1 for 8-bit, 2 for 9-16 bit).
    pub fn bytes_per_pixel_plane(&self) -> usize {
        if self.pixel_depth <= 8 { 1 } else { 2 }
    }

    /// Number of planes per pixel (1 for mono/bayer, 3 for RGB/BGR).
    pub fn planes_per_pixel(&self) -> usize {
        match self.color_id {
            100 | 101 => 3,
            _ => 1,
        }
    }

    /// Total bytes per frame.
    pub fn frame_byte_size(&self) -> Result<usize> {
        let pixels = (self.width as usize)
            .checked_mul(self.height as usize)
            .ok_or(EclipseError::InvalidDimensions {
                width: self.width,
                height: self.height,
            })?;
        let bytes_per_pixel = self.bytes_per_pixel_plane() * self.planes_per_pixel();
        pixels
            .checked_mul(bytes_per_pixel)
            .ok_or_else(|| EclipseError::InvalidSer("Frame size calculation overflow".into()))
    }

    pub fn color_mode(&self) -> ColorMode {
        match self.color_id {
            0 => ColorMode::Mono,
            8 => ColorMode::BayerRGGB,
            9 => ColorMode::BayerGRBG,
            10 => ColorMode::BayerGBRG,
            11 => ColorMode::BayerBGGR,
            100 => ColorMode::RGB,
            101 => ColorMode::BGR,
            _ => ColorMode::Mono,
        }
    }
}

/// Memory-mapped SER file reader.
pub struct SerReader {
    mmap: Mmap,
    pub header: SerHeader,
    frame_size: usize,
    /// Offset of the timestamp trailer, i.e. the end of the frame data.
    trailer_offset: usize,
}

impl SerReader {
    /// Open a SER file and parse its header.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };

        if mmap.len() < SER_HEADER_SIZE {
            return Err(EclipseError::InvalidSer(
                "File too small for SER header".into(),
            ));
        }

        if &mmap[0..14] != SER_MAGIC {
            return Err(EclipseError::InvalidSer(
                "Missing LUCAM-RECORDER magic".into(),
            ));
        }

        let header = parse_header(&mmap[..SER_HEADER_SIZE])?;

        let frame_size = header.frame_byte_size()?;
        let trailer_offset = frame_size
            .checked_mul(header.frame_count as usize)
            .and_then(|n| n.checked_add(SER_HEADER_SIZE))
            .ok_or_else(|| EclipseError::InvalidSer("Frame data size overflows".into()))?;
        if mmap.len() < trailer_offset {
            return Err(EclipseError::InvalidSer(format!(
                "File truncated: expected at least {} bytes, got {}",
                trailer_offset,
                mmap.len()
            )));
        }

        Ok(Self {
            mmap,
            header,
            frame_size,
            trailer_offset,
        })
    }

    pub fn frame_count(&self) -> usize {
        self.header.frame_count as usize
    }

    /// Size of the frame data in bytes, excluding header and trailer.
    pub fn data_size(&self) -> usize {
        self.trailer_offset - SER_HEADER_SIZE
    }

    /// Get the raw bytes for a single frame (zero-copy from mmap).
    pub fn frame_raw(&self, index: usize) -> Result<&[u8]> {
        let count = self.frame_count();
        if index >= count {
            return Err(EclipseError::FrameIndexOutOfRange {
                index,
                total: count,
            });
        }
        // Bounded by the size check in `open`.
        let offset = SER_HEADER_SIZE + index * self.frame_size;
        Ok(&self.mmap[offset..offset + self.frame_size])
    }

    /// Read a single frame, converting to f32 in [0.0, 1.0].
    ///
    /// Bayer data is returned undemosaiced; RGB/BGR is reduced to luma.
    pub fn read_frame(&self, index: usize) -> Result<Frame> {
        let raw = self.frame_raw(index)?;
        let h = self.header.height as usize;
        let w = self.header.width as usize;
        let bpp = self.header.bytes_per_pixel_plane();
        let planes = self.header.planes_per_pixel();
        let depth = self.header.pixel_depth;
        let le = self.header.little_endian;

        let data = if planes == 1 {
            decode_plane(raw, h, w, bpp, 1, 0, depth, le)
        } else {
            let (r, b) = match self.header.color_mode() {
                ColorMode::BGR => (2, 0),
                _ => (0, 2),
            };
            let red = decode_plane(raw, h, w, bpp, planes, r, depth, le);
            let green = decode_plane(raw, h, w, bpp, planes, 1, depth, le);
            let blue = decode_plane(raw, h, w, bpp, planes, b, depth, le);
            red * LUMA_WEIGHTS[0] + green * LUMA_WEIGHTS[1] + blue * LUMA_WEIGHTS[2]
        };

        let mut frame = Frame::new(data, bpp as u8 * 8);
        frame.metadata = FrameMetadata {
            frame_index: index,
            timestamp_ticks: self.read_timestamp(index),
        };
        Ok(frame)
    }

    /// Read per-frame timestamp from the optional trailer.
    fn read_timestamp(&self, index: usize) -> Option<u64> {
        let ts_offset = index.checked_mul(8)?.checked_add(self.trailer_offset)?;
        let bytes = self.mmap.get(ts_offset..ts_offset.checked_add(8)?)?;
        Some(u64::from_le_bytes(bytes.try_into().ok()?))
    }

    /// Whether the file carries a complete timestamp trailer.
    pub fn has_timestamps(&self) -> bool {
        self.frame_count()
            .checked_mul(8)
            .and_then(|n| n.checked_add(self.trailer_offset))
            .is_some_and(|end| self.mmap.len() >= end)
    }

    /// Mean capture rate between the first and last frame, from the
    /// timestamp trailer. `None` without a usable trailer.
    pub fn frame_rate(&self) -> Option<f64> {
        let count = self.frame_count();
        if count < 2 || !self.has_timestamps() {
            return None;
        }
        let first = self.read_timestamp(0)?;
        let last = self.read_timestamp(count - 1)?;
        if last <= first {
            warn!(first, last, "SER timestamps are not increasing; ignoring trailer");
            return None;
        }
        let span_seconds = (last - first) as f64 / SER_TICKS_PER_SECOND;
        Some((count - 1) as f64 / span_seconds)
    }

    /// Build SourceInfo from the header.
    pub fn source_info(&self, path: &Path) -> SourceInfo {
        SourceInfo {
            filename: path.to_path_buf(),
            total_frames: self.frame_count(),
            width: self.header.width,
            height: self.header.height,
            bit_depth: self.header.pixel_depth as u8,
            color_mode: self.header.color_mode(),
            frame_rate: self.frame_rate(),
            observer: non_empty(&self.header.observer),
            telescope: non_empty(&self.header.telescope),
            instrument: non_empty(&self.header.instrument),
        }
    }
}

impl VideoSource for SerReader {
    fn metadata(&self) -> VideoMetadata {
        VideoMetadata {
            frame_rate: self.frame_rate(),
            total_frames: self.frame_count(),
        }
    }

    fn read_frame(&self, index: usize) -> Result<Frame> {
        SerReader::read_frame(self, index)
    }
}

fn parse_header(buf: &[u8]) -> Result<SerHeader> {
    let mut cursor = std::io::Cursor::new(&buf[14..]); // skip magic

    let _lu_id = cursor.read_i32::<LittleEndian>()?;
    let color_id = cursor.read_i32::<LittleEndian>()?;
    let le_flag = cursor.read_i32::<LittleEndian>()?;
    let width = cursor.read_i32::<LittleEndian>()?;
    let height = cursor.read_i32::<LittleEndian>()?;
    let pixel_depth = cursor.read_i32::<LittleEndian>()?;
    let frame_count = cursor.read_i32::<LittleEndian>()?;

    let observer = read_fixed_string(&buf[42..82]);
    let instrument = read_fixed_string(&buf[82..122]);
    let telescope = read_fixed_string(&buf[122..162]);

    let mut cursor = std::io::Cursor::new(&buf[162..]);
    let date_time = cursor.read_u64::<LittleEndian>()?;
    let date_time_utc = cursor.read_u64::<LittleEndian>()?;

    if width <= 0 || height <= 0 {
        return Err(EclipseError::InvalidSer(format!(
            "Invalid frame dimensions {width}x{height}"
        )));
    }

    if !(1..=16).contains(&pixel_depth) {
        return Err(EclipseError::InvalidSer(format!(
            "Unsupported pixel depth {pixel_depth}"
        )));
    }

    if frame_count < 0 {
        return Err(EclipseError::InvalidSer(format!(
            "Negative frame count {frame_count}"
        )));
    }

    // Many writers (FireCapture among them) store 0 for little-endian data
    // despite the format notes; only 1 means big-endian here.
    let little_endian = le_flag != 1;

    Ok(SerHeader {
        color_id,
        little_endian,
        width: width as u32,
        height: height as u32,
        pixel_depth: pixel_depth as u32,
        frame_count: frame_count as u32,
        observer,
        instrument,
        telescope,
        date_time,
        date_time_utc,
    })
}

fn read_fixed_string(buf: &[u8]) -> String {
    String::from_utf8_lossy(buf)
        .trim_end_matches('\0')
        .trim()
        .to_string()
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}

#[allow(clippy::too_many_arguments)]
fn decode_plane(
    raw: &[u8],
    height: usize,
    width: usize,
    bytes_per_sample: usize,
    planes: usize,
    plane_index: usize,
    bit_depth: u32,
    little_endian: bool,
) -> Array2<f32> {
    let max_val = ((1u32 << bit_depth) - 1) as f32;

    Array2::from_shape_fn((height, width), |(row, col)| {
        let idx = ((row * width + col) * planes + plane_index) * bytes_per_sample;
        let val = if bytes_per_sample == 1 {
            raw[idx] as f32
        } else {
            let pair = [raw[idx], raw[idx + 1]];
            if little_endian {
                u16::from_le_bytes(pair) as f32
            } else {
                u16::from_be_bytes(pair) as f32
            }
        };
        (val / max_val).min(1.0)
    })
}
