//! Passphrase-based sealing of a secret.
//!
//! Combines a [`KeyDerivation`] strategy with an [`AeadCipher`] strategy. Each
//! call to [`Sealer::encrypt_data`] draws a fresh salt and nonce from the OS
//! random source.

use zeroize::Zeroizing;

use super::cipher::{AeadCipher, XChaCha20Poly1305Cipher, NONCE_LENGTH};
use super::key::{Argon2Kdf, KeyDerivation, SALT_LENGTH};
use crate::error::{Result, StegVaultError};

/// Output of [`Sealer::encrypt_data`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sealed {
    pub ciphertext: Vec<u8>,
    pub salt: [u8; SALT_LENGTH],
    pub nonce: [u8; NONCE_LENGTH],
}

/// Encrypts and decrypts secrets under a passphrase.
#[derive(Debug, Clone)]
pub struct Sealer<K = Argon2Kdf, C = XChaCha20Poly1305Cipher> {
    kdf: K,
    cipher: C,
}

impl Default for Sealer {
    fn default() -> Self {
        Self::new(Argon2Kdf::default(), XChaCha20Poly1305Cipher)
    }
}

impl<K: KeyDerivation, C: AeadCipher> Sealer<K, C> {
    /// Build a sealer from explicit strategies.
    pub fn new(kdf: K, cipher: C) -> Self {
        Self { kdf, cipher }
    }

    pub fn kdf(&self) -> &K {
        &self.kdf
    }

    /// Tag overhead of the configured cipher.
    pub fn tag_len(&self) -> usize {
        self.cipher.tag_len()
    }

    /// Encrypt `secret` under `passphrase` with a fresh random salt and nonce.
    pub fn encrypt_data(&self, secret: &[u8], passphrase: &str) -> Result<Sealed> {
        let salt: [u8; SALT_LENGTH] = random_bytes()?;
        let nonce: [u8; NONCE_LENGTH] = random_bytes()?;

        let key = self.kdf.derive_key(passphrase, &salt)?;
        let ciphertext = self.cipher.encrypt(secret, &key, &nonce)?;
        log::debug!(
            "sealed {} plaintext bytes into {} ciphertext bytes",
            secret.len(),
            ciphertext.len()
        );

        Ok(Sealed {
            ciphertext,
            salt,
            nonce,
        })
    }

    /// Decrypt a sealed secret.
    ///
    /// Every failure (bad salt, KDF error, tag mismatch) is reported as
    /// [`StegVaultError::DecryptionFailed`].
    pub fn decrypt_data(
        &self,
        ciphertext: &[u8],
        salt: &[u8],
        nonce: &[u8],
        passphrase: &str,
    ) -> Result<Zeroizing<Vec<u8>>> {
        let key = self
            .kdf
            .derive_key(passphrase, salt)
            .map_err(|_| StegVaultError::DecryptionFailed)?;
        self.cipher
            .decrypt(ciphertext, &key, nonce)
            .map_err(|_| StegVaultError::DecryptionFailed)
    }
}

/// Fill an array from the operating system's CSPRNG.
pub fn random_bytes<const N: usize>() -> Result<[u8; N]> {
    let mut bytes = [0u8; N];
    getrandom::getrandom(&mut bytes)
        .map_err(|e| StegVaultError::Crypto(format!("Failed to gather randomness: {}", e)))?;
    Ok(bytes)
}
