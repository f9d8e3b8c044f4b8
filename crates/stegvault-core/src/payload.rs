//! Payload envelope: `magic(4) ‖ salt(16) ‖ nonce(24) ‖ ciphertext`.
//!
//! The envelope carries no length field. [`parse`] takes everything after
//! byte 44 as ciphertext, so the caller must hand it a payload of exactly the
//! length that was embedded.

use crate::crypto::{NONCE_LENGTH, SALT_LENGTH};
use crate::error::{Result, StegVaultError};

/// Format identifier, version 1.
pub const MAGIC: [u8; 4] = *b"SPW1";

/// Length of the magic prefix.
pub const MAGIC_LENGTH: usize = 4;

/// Bytes written sequentially before the keyed region (magic + salt).
pub const HEADER_LENGTH: usize = MAGIC_LENGTH + SALT_LENGTH;

/// Fixed bytes before the ciphertext.
pub const ENVELOPE_OVERHEAD: usize = HEADER_LENGTH + NONCE_LENGTH;

/// Borrowed view of a parsed payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadParts<'a> {
    pub salt: &'a [u8; SALT_LENGTH],
    pub nonce: &'a [u8; NONCE_LENGTH],
    pub ciphertext: &'a [u8],
}

/// Build a payload from its parts.
pub fn serialize(
    salt: &[u8; SALT_LENGTH],
    nonce: &[u8; NONCE_LENGTH],
    ciphertext: &[u8],
) -> Vec<u8> {
    let mut payload = Vec::with_capacity(ENVELOPE_OVERHEAD + ciphertext.len());
    payload.extend_from_slice(&MAGIC);
    payload.extend_from_slice(salt);
    payload.extend_from_slice(nonce);
    payload.extend_from_slice(ciphertext);
    payload
}

/// Split a payload into salt, nonce and ciphertext, checking the magic.
pub fn parse(payload: &[u8]) -> Result<PayloadParts<'_>> {
    let parts = split(payload)?;
    if !has_magic(payload) {
        return Err(StegVaultError::MalformedPayload(
            "Invalid magic header".to_string(),
        ));
    }
    Ok(parts)
}

/// Split a payload without looking at the magic.
///
/// Used by restore, which checks the magic itself so that a bad header costs
/// the same work as a wrong passphrase.
pub(crate) fn split(payload: &[u8]) -> Result<PayloadParts<'_>> {
    if payload.len() < ENVELOPE_OVERHEAD {
        return Err(StegVaultError::MalformedPayload(format!(
            "Payload too short: {} bytes (minimum {})",
            payload.len(),
            ENVELOPE_OVERHEAD
        )));
    }
    let (salt, rest) = payload[MAGIC_LENGTH..].split_at(SALT_LENGTH);
    let (nonce, ciphertext) = rest.split_at(NONCE_LENGTH);
    Ok(PayloadParts {
        salt: array_ref(salt)?,
        nonce: array_ref(nonce)?,
        ciphertext,
    })
}

/// Compare the first four bytes with [`MAGIC`] without early exit.
pub fn has_magic(bytes: &[u8]) -> bool {
    if bytes.len() < MAGIC_LENGTH {
        return false;
    }
    bytes[..MAGIC_LENGTH]
        .iter()
        .zip(MAGIC.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

/// Payload length for a secret of `secret_len` bytes under a cipher with `tag_len` overhead.
pub fn payload_len(secret_len: usize, tag_len: usize) -> usize {
    ENVELOPE_OVERHEAD + secret_len + tag_len
}

/// First four salt bytes as a big-endian seed for the slot permutation.
pub fn seed_from_salt(salt: &[u8; SALT_LENGTH]) -> u32 {
    u32::from_be_bytes([salt[0], salt[1], salt[2], salt[3]])
}

fn array_ref<const N: usize>(bytes: &[u8]) -> Result<&[u8; N]> {
    bytes
        .try_into()
        .map_err(|_| StegVaultError::MalformedPayload(format!("Expected {} bytes", N)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_layout() {
        let salt = [b'a'; 16];
        let nonce = [b'b'; 24];
        let ciphertext = [b'c'; 32];

        let payload = serialize(&salt, &nonce, &ciphertext);

        assert_eq!(payload.len(), 44 + 32);
        assert_eq!(&payload[..4], b"SPW1");
        assert_eq!(&payload[4..20], &salt);
        assert_eq!(&payload[20..44], &nonce);
        assert_eq!(&payload[44..], &ciphertext);
    }

    #[test]
    fn test_parse_valid_payload() {
        let salt = [1u8; 16];
        let nonce = [2u8; 24];
        let payload = serialize(&salt, &nonce, b"ciphertext-and-tag");

        let parts = parse(&payload).unwrap();
        assert_eq!(parts.salt, &salt);
        assert_eq!(parts.nonce, &nonce);
        assert_eq!(parts.ciphertext, b"ciphertext-and-tag");
    }

    #[test]
    fn test_parse_exact_minimum_has_empty_ciphertext() {
        let payload = serialize(&[0u8; 16], &[0u8; 24], &[]);
        let parts = parse(&payload).unwrap();
        assert!(parts.ciphertext.is_empty());
    }

    #[test]
    fn test_parse_payload_too_short() {
        let mut short = b"SPW1".to_vec();
        short.extend_from_slice(&[0u8; 39]);

        let err = parse(&short).unwrap_err();
        assert!(matches!(err, StegVaultError::MalformedPayload(_)));
        assert!(err.to_string().contains("too short"));
    }

    #[test]
    fn test_parse_invalid_magic() {
        let mut payload = serialize(&[0u8; 16], &[0u8; 24], &[0u8; 16]);
        payload[0] = b'X';

        let err = parse(&payload).unwrap_err();
        assert!(err.to_string().contains("Invalid magic header"));
        assert!(split(&payload).is_ok());
    }

    #[test]
    fn test_trailing_bytes_become_ciphertext() {
        let mut payload = serialize(&[0u8; 16], &[0u8; 24], b"abc");
        payload.extend_from_slice(b"extra");
        assert_eq!(parse(&payload).unwrap().ciphertext, b"abcextra");
    }

    #[test]
    fn test_seed_is_big_endian_prefix() {
        let mut salt = [0xFFu8; 16];
        salt[..4].copy_from_slice(&[0x12, 0x34, 0x56, 0x78]);
        assert_eq!(seed_from_salt(&salt), 0x1234_5678);
    }

    #[test]
    fn test_payload_len() {
        assert_eq!(payload_len(21, 16), 81);
        assert_eq!(payload_len(0, 16), 60);
    }

    #[test]
    fn test_has_magic() {
        assert!(has_magic(b"SPW1rest"));
        assert!(!has_magic(b"SPW2rest"));
        assert!(!has_magic(b"SP"));
    }
}
