//! Pixel buffers and lossless image I/O.
//!
//! A [`PixelBuffer`] is an interleaved, row-major grid of 8-bit samples. Every
//! sample is one embedding slot. Files are decoded with the `image` crate and
//! always written back as PNG.

use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageReader, RgbImage, RgbaImage};

use crate::error::{Result, StegVaultError};

/// Minimum number of channels per pixel.
pub const MIN_CHANNELS: usize = 3;

/// An 8-bit, interleaved pixel grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw samples, checking the layout.
    pub fn new(width: u32, height: u32, channels: usize, data: Vec<u8>) -> Result<Self> {
        if channels < MIN_CHANNELS {
            return Err(StegVaultError::ImageFormat(format!(
                "Image needs at least {} channels per pixel (got {})",
                MIN_CHANNELS, channels
            )));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(channels))
            .ok_or_else(|| StegVaultError::ImageFormat("Image dimensions overflow".to_string()))?;
        if data.len() != expected {
            return Err(StegVaultError::ImageFormat(format!(
                "Sample buffer has {} bytes, expected {} for {}x{}x{}",
                data.len(),
                expected,
                width,
                height,
                channels
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Three-channel RGB buffer.
    pub fn rgb(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        Self::new(width, height, 3, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Number of addressable LSB slots (one per sample).
    pub fn slot_count(&self) -> usize {
        self.data.len()
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}

/// Decode a cover or stego image from disk.
pub fn load_cover(path: &Path) -> Result<PixelBuffer> {
    let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    log::debug!(
        "decoded {} ({}x{}, {:?})",
        path.display(),
        image.width(),
        image.height(),
        image.color()
    );
    from_dynamic(image)
}

/// Decode an in-memory PNG. Other formats are rejected.
pub fn decode_png(bytes: &[u8]) -> Result<PixelBuffer> {
    from_dynamic(image::load_from_memory_with_format(
        bytes,
        image::ImageFormat::Png,
    )?)
}

/// Encode a buffer as PNG.
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>> {
    let color = match buffer.channels() {
        3 => ExtendedColorType::Rgb8,
        4 => ExtendedColorType::Rgba8,
        other => {
            return Err(StegVaultError::ImageFormat(format!(
                "PNG output supports 3 or 4 channels (got {})",
                other
            )))
        }
    };
    let mut out = Vec::new();
    PngEncoder::new(&mut out).write_image(
        buffer.as_raw(),
        buffer.width(),
        buffer.height(),
        color,
    )?;
    Ok(out)
}

/// Write a stego image as PNG, replacing `path` atomically.
pub fn save_stego(buffer: &PixelBuffer, path: &Path) -> Result<()> {
    let is_png = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("png"))
        .unwrap_or(false);
    if !is_png {
        log::warn!(
            "{} does not end in .png; writing PNG data anyway",
            path.display()
        );
    }
    let encoded = encode_png(buffer)?;
    crate::fs::write_atomic(path, &encoded)?;
    Ok(())
}

fn from_dynamic(image: DynamicImage) -> Result<PixelBuffer> {
    match image {
        DynamicImage::ImageRgb8(rgb) => from_rgb(rgb),
        DynamicImage::ImageRgba8(rgba) => {
            log::warn!("flattening alpha channel onto a white background");
            from_rgb(flatten_on_white(&rgba))
        }
        other => Err(StegVaultError::ImageFormat(format!(
            "Unsupported color type {:?}; use an 8-bit RGB or RGBA image",
            other.color()
        ))),
    }
}

fn from_rgb(rgb: RgbImage) -> Result<PixelBuffer> {
    let (width, height) = rgb.dimensions();
    PixelBuffer::rgb(width, height, rgb.into_raw())
}

/// Composite RGBA over opaque white.
fn flatten_on_white(rgba: &RgbaImage) -> RgbImage {
    let (width, height) = rgba.dimensions();
    let mut out = Vec::with_capacity(width as usize * height as usize * 3);
    for pixel in rgba.as_raw().chunks_exact(4) {
        let alpha = u16::from(pixel[3]);
        for &channel in &pixel[..3] {
            let blended = (u16::from(channel) * alpha + 255 * (255 - alpha) + 127) / 255;
            out.push(blended as u8);
        }
    }
    // Buffer length is width * height * 3 by construction.
    RgbImage::from_raw(width, height, out).unwrap_or_else(|| RgbImage::new(width, height))
}
