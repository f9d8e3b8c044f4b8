//! Steganographic layer: pixel buffers, capacity, slot permutation and the
//! LSB codec.

pub mod capacity;
pub mod codec;
pub mod image;
pub mod permute;

pub use capacity::{calculate_capacity, CapacityReport};
pub use codec::{embed, extract, extract_header, HEADER_BITS};
pub use image::{decode_png, encode_png, load_cover, save_stego, PixelBuffer};
pub use permute::{generate, PixelPermutation};
