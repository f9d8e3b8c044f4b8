//! How many payload bytes a cover image can hold.

use serde::Serialize;

use super::image::PixelBuffer;
use crate::payload::ENVELOPE_OVERHEAD;

/// One payload bit per sample.
pub const BITS_PER_SLOT: usize = 1;

/// Payload capacity of an image in bytes: `floor(width * height * channels / 8)`.
pub fn calculate_capacity(image: &PixelBuffer) -> usize {
    image.slot_count() * BITS_PER_SLOT / 8
}

/// Capacity summary for a cover image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapacityReport {
    pub width: u32,
    pub height: u32,
    pub channels: usize,
    pub total_slots: usize,
    pub capacity_bytes: usize,
    /// Largest secret that fits after the envelope and tag overhead.
    pub max_secret_bytes: usize,
}

impl CapacityReport {
    /// Summarize `image` for a cipher whose tag adds `tag_len` bytes.
    pub fn for_image(image: &PixelBuffer, tag_len: usize) -> Self {
        let capacity_bytes = calculate_capacity(image);
        Self {
            width: image.width(),
            height: image.height(),
            channels: image.channels(),
            total_slots: image.slot_count(),
            capacity_bytes,
            max_secret_bytes: capacity_bytes.saturating_sub(ENVELOPE_OVERHEAD + tag_len),
        }
    }

    /// Whether a secret of `secret_len` bytes fits.
    pub fn fits(&self, secret_len: usize) -> bool {
        secret_len <= self.max_secret_bytes
            && self.capacity_bytes >= ENVELOPE_OVERHEAD
    }
}
