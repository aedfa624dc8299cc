use std::path::Path;

use image::{GrayImage, ImageFormat, Luma};

use crate::error::Result;
use crate::frame::Frame;

fn to_gray8(frame: &Frame) -> GrayImage {
    let h = frame.height();
    let w = frame.width();

    let mut img = GrayImage::new(w as u32, h as u32);
    for row in 0..h {
        for col in 0..w {
            let val = (frame.data[[row, col]].clamp(0.0, 1.0) * 255.0) as u8;
            img.put_pixel(col as u32, row as u32, Luma([val]));
        }
    }
    img
}

/// Save a frame as 16-bit grayscale TIFF.
pub fn save_tiff(frame: &Frame, path: &Path) -> Result<()> {
    let h = frame.height();
    let w = frame.width();

    let pixels: Vec<u16> = frame
        .data
        .iter()
        .map(|v| (v.clamp(0.0, 1.0) * 65535.0) as u16)
        .collect();

    let img = image::ImageBuffer::<Luma<u16>, Vec<u16>>::from_raw(w as u32, h as u32, pixels)
        .ok_or_else(|| crate::error::EclipseError::InvalidDimensions {
            width: w as u32,
            height: h as u32,
        })?;
    img.save_with_format(path, ImageFormat::Tiff)?;
    Ok(())
}

/// Save a frame as 8-bit grayscale PNG.
pub fn save_png(frame: &Frame, path: &Path) -> Result<()> {
    to_gray8(frame).save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save a frame as 8-bit grayscale JPEG.
pub fn save_jpeg(frame: &Frame, path: &Path) -> Result<()> {
    to_gray8(frame).save_with_format(path, ImageFormat::Jpeg)?;
    Ok(())
}

/// Save frame, choosing format from file extension. Unknown extensions
/// fall back to PNG.
pub fn save_image(frame: &Frame, path: &Path) -> Result<()> {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("tiff" | "tif") => save_tiff(frame, path),
        Some("jpg" | "jpeg") => save_jpeg(frame, path),
        _ => save_png(frame, path),
    }
}
