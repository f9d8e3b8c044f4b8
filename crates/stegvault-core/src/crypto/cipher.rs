//! Authenticated encryption.
//!
//! XChaCha20-Poly1305 is used with a 24-byte random nonce and no associated
//! data. Decryption is all-or-nothing: a tag mismatch returns
//! [`StegVaultError::Authentication`] and no plaintext bytes.

use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{Key, XChaCha20Poly1305, XNonce};
use zeroize::Zeroizing;

use super::key::DerivedKey;
use crate::error::{Result, StegVaultError};

/// Nonce length in bytes for XChaCha20-Poly1305.
pub const NONCE_LENGTH: usize = 24;

/// Poly1305 tag length in bytes.
pub const TAG_LENGTH: usize = 16;

/// Authenticated cipher strategy.
pub trait AeadCipher {
    /// Bytes the ciphertext grows by relative to the plaintext.
    fn tag_len(&self) -> usize;

    /// Encrypt `plaintext`, returning `ciphertext ‖ tag`.
    fn encrypt(&self, plaintext: &[u8], key: &DerivedKey, nonce: &[u8]) -> Result<Vec<u8>>;

    /// Decrypt `ciphertext ‖ tag`.
    ///
    /// Fails with [`StegVaultError::Authentication`] on any tag mismatch.
    fn decrypt(
        &self,
        ciphertext: &[u8],
        key: &DerivedKey,
        nonce: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>>;
}

/// XChaCha20-Poly1305 (extended nonce ChaCha20 + Poly1305).
#[derive(Debug, Default, Clone, Copy)]
pub struct XChaCha20Poly1305Cipher;

impl XChaCha20Poly1305Cipher {
    fn cipher(key: &DerivedKey) -> XChaCha20Poly1305 {
        XChaCha20Poly1305::new(Key::from_slice(key.as_bytes()))
    }

    fn check_nonce(nonce: &[u8]) -> Result<&XNonce> {
        if nonce.len() != NONCE_LENGTH {
            return Err(StegVaultError::InvalidInput(format!(
                "Nonce must be exactly {} bytes (got {})",
                NONCE_LENGTH,
                nonce.len()
            )));
        }
        Ok(XNonce::from_slice(nonce))
    }
}

impl AeadCipher for XChaCha20Poly1305Cipher {
    fn tag_len(&self) -> usize {
        TAG_LENGTH
    }

    fn encrypt(&self, plaintext: &[u8], key: &DerivedKey, nonce: &[u8]) -> Result<Vec<u8>> {
        let nonce = Self::check_nonce(nonce)?;
        Self::cipher(key)
            .encrypt(nonce, plaintext)
            .map_err(|e| StegVaultError::Crypto(format!("Encryption failed: {}", e)))
    }

    fn decrypt(
        &self,
        ciphertext: &[u8],
        key: &DerivedKey,
        nonce: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>> {
        let nonce = Self::check_nonce(nonce)?;
        if ciphertext.len() < TAG_LENGTH {
            return Err(StegVaultError::Authentication);
        }
        Self::cipher(key)
            .decrypt(nonce, ciphertext)
            .map(Zeroizing::new)
            .map_err(|_| StegVaultError::Authentication)
    }
}
