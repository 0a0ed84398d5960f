//! I/O helpers for target photographs and JSON reports.
//!
//! - `load_grayscale_image` / `decode_grayscale`: JPEG/PNG/BMP into an owned
//!   8-bit gray buffer (color inputs are converted on decode).
//! - `save_grayscale_f32` / `save_mask_png`: debug dumps of pipeline buffers.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ImageF32, ImageU8};
use crate::threshold::BinaryMask;
use image::{GrayImage, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Owned 8-bit grayscale buffer produced by decoding a photograph.
#[derive(Clone, Debug)]
pub struct GrayBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl GrayBuffer {
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Borrow as a read-only [`ImageU8`] view.
    pub fn as_view(&self) -> ImageU8<'_> {
        ImageU8 {
            w: self.width,
            h: self.height,
            stride: self.width,
            data: &self.data,
        }
    }
}

/// Load a photograph from disk and convert to 8-bit grayscale.
pub fn load_grayscale_image(path: &Path) -> Result<GrayBuffer, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to decode {}: {e}", path.display()))?
        .into_luma8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    Ok(GrayBuffer::new(width, height, img.into_raw()))
}

/// Decode in-memory image bytes (JPEG/PNG/BMP) to 8-bit grayscale.
///
/// This is the entry point for callers that fetch image bytes from an
/// external store rather than the filesystem.
pub fn decode_grayscale(bytes: &[u8]) -> Result<GrayBuffer, String> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| format!("Failed to decode image bytes: {e}"))?
        .into_luma8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    Ok(GrayBuffer::new(width, height, img.into_raw()))
}

/// Save a float image to a grayscale PNG, clamping values into [0, 255].
pub fn save_grayscale_f32(image: &ImageF32, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(image.w as u32, image.h as u32);
    for y in 0..image.h {
        for (x, &px) in image.row(y).iter().enumerate() {
            let v = (px * 255.0).clamp(0.0, 255.0);
            out.put_pixel(x as u32, y as u32, Luma([v as u8]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Save a binary mask to a black/white PNG.
pub fn save_mask_png(mask: &BinaryMask, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(mask.w as u32, mask.h as u32);
    for y in 0..mask.h {
        for x in 0..mask.w {
            let v = if mask.get(x, y) { 255u8 } else { 0u8 };
            out.put_pixel(x as u32, y as u32, Luma([v]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_rejects_garbage_bytes() {
        let err = decode_grayscale(&[0u8, 1, 2, 3]).unwrap_err();
        assert!(err.contains("Failed to decode"), "unexpected error: {err}");
    }
}
