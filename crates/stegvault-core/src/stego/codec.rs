//! LSB embedding of a payload into a pixel buffer.
//!
//! Payload bits are taken most significant first. The first
//! [`HEADER_LENGTH`] bytes (magic and salt) fill slots `0..HEADER_BITS` in
//! raster order so they can be read back without a key. The remaining bits go
//! to slots `HEADER_BITS + perm[i]`, where `perm` is the keyed permutation of
//! the slots after the header. Only the least significant bit of a touched
//! sample ever changes.

use super::image::PixelBuffer;
use super::permute::PixelPermutation;
use crate::error::{Result, StegVaultError};
use crate::payload::HEADER_LENGTH;

/// Slots reserved for the sequential header.
pub const HEADER_BITS: usize = HEADER_LENGTH * 8;

/// Hide `payload` in a copy of `cover`.
pub fn embed(cover: &PixelBuffer, payload: &[u8], seed: u32) -> Result<PixelBuffer> {
    check_fits(cover, payload.len())?;

    let mut stego = cover.clone();
    let samples = stego.as_raw_mut();
    let (header, body) = payload.split_at(HEADER_LENGTH);

    for (slot, bit) in bits(header).enumerate() {
        set_lsb(&mut samples[slot], bit);
    }

    let keyed_len = samples.len() - HEADER_BITS;
    for (offset, bit) in PixelPermutation::new(seed, keyed_len).zip(bits(body)) {
        set_lsb(&mut samples[HEADER_BITS + offset], bit);
    }

    log::debug!(
        "embedded {} payload bytes into {} of {} slots",
        payload.len(),
        payload.len() * 8,
        samples.len()
    );
    Ok(stego)
}

/// Read `payload_len` bytes previously hidden with `seed`.
pub fn extract(stego: &PixelBuffer, payload_len: usize, seed: u32) -> Result<Vec<u8>> {
    check_fits(stego, payload_len)?;

    let samples = stego.as_raw();
    let mut payload = Vec::with_capacity(payload_len);
    payload.extend(pack(samples[..HEADER_BITS].iter().map(|s| s & 1)));

    let keyed_len = samples.len() - HEADER_BITS;
    let body_bits = (payload_len - HEADER_LENGTH) * 8;
    payload.extend(pack(
        PixelPermutation::new(seed, keyed_len)
            .take(body_bits)
            .map(|offset| samples[HEADER_BITS + offset] & 1),
    ));
    Ok(payload)
}

/// Read the sequential header (magic and salt) without a seed.
pub fn extract_header(stego: &PixelBuffer) -> Result<[u8; HEADER_LENGTH]> {
    let samples = stego.as_raw();
    if samples.len() < HEADER_BITS {
        return Err(StegVaultError::CapacityExceeded {
            needed: HEADER_LENGTH,
            available: samples.len() / 8,
        });
    }
    let mut header = [0u8; HEADER_LENGTH];
    for (dst, byte) in header
        .iter_mut()
        .zip(pack(samples[..HEADER_BITS].iter().map(|s| s & 1)))
    {
        *dst = byte;
    }
    Ok(header)
}

fn check_fits(image: &PixelBuffer, payload_len: usize) -> Result<()> {
    let slots = image.slot_count();
    if payload_len.saturating_mul(8) > slots {
        return Err(StegVaultError::CapacityExceeded {
            needed: payload_len,
            available: slots / 8,
        });
    }
    if payload_len < HEADER_LENGTH {
        return Err(StegVaultError::MalformedPayload(format!(
            "Payload of {} bytes is shorter than the {}-byte header",
            payload_len, HEADER_LENGTH
        )));
    }
    Ok(())
}

fn set_lsb(sample: &mut u8, bit: u8) {
    *sample = (*sample & 0xFE) | bit;
}

fn bits(bytes: &[u8]) -> impl Iterator<Item = u8> + '_ {
    bytes
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |shift| (byte >> shift) & 1))
}

/// Group bits (MSB first) into bytes. A trailing partial byte is dropped.
fn pack(bits: impl Iterator<Item = u8>) -> impl Iterator<Item = u8> {
    let mut bits = bits.peekable();
    std::iter::from_fn(move || {
        bits.peek()?;
        let mut byte = 0u8;
        for _ in 0..8 {
            byte = (byte << 1) | bits.next()?;
        }
        Some(byte)
    })
}
