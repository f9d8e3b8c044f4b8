//! Whole-operation backup and restore.
//!
//! [`StegVault::backup`] seals a secret, wraps it in the payload envelope and
//! hides it in a cover image. [`StegVault::restore`] reverses the pipeline.
//!
//! Restore reports every failure after its input checks as
//! [`StegVaultError::DecryptionFailed`]. A bad magic header does not short
//! circuit: the key is still derived and the tag still checked, so a corrupted
//! image and a wrong passphrase cost the same and look the same.

use std::path::{Path, PathBuf};

use serde::Serialize;
use zeroize::Zeroizing;

use crate::config::CryptoConfig;
use crate::crypto::{
    validate_passphrase, AeadCipher, Argon2Kdf, KeyDerivation, Sealer, XChaCha20Poly1305Cipher,
    SALT_LENGTH,
};
use crate::error::{Result, StegVaultError};
use crate::payload::{self, ENVELOPE_OVERHEAD, MAGIC_LENGTH};
use crate::stego::{self, CapacityReport, PixelBuffer};

/// Result of [`StegVault::backup`].
#[derive(Debug, Clone)]
pub struct Backup {
    pub stego: PixelBuffer,
    /// Needed for restore; the image does not record it.
    pub payload_length: usize,
}

/// Result of [`StegVault::backup_file`].
#[derive(Debug, Clone, Serialize)]
pub struct BackupReport {
    pub output_path: PathBuf,
    pub payload_length: usize,
    pub capacity: CapacityReport,
}

/// Backup and restore engine.
#[derive(Debug, Clone)]
pub struct StegVault<K = Argon2Kdf, C = XChaCha20Poly1305Cipher> {
    sealer: Sealer<K, C>,
}

impl Default for StegVault {
    fn default() -> Self {
        Self {
            sealer: Sealer::default(),
        }
    }
}

impl StegVault {
    /// Engine with the default algorithms and the given cost settings.
    pub fn with_config(config: CryptoConfig) -> Result<Self> {
        Ok(Self::new(Argon2Kdf::new(config)?, XChaCha20Poly1305Cipher))
    }
}

impl<K: KeyDerivation, C: AeadCipher> StegVault<K, C> {
    pub fn new(kdf: K, cipher: C) -> Self {
        Self {
            sealer: Sealer::new(kdf, cipher),
        }
    }

    pub fn sealer(&self) -> &Sealer<K, C> {
        &self.sealer
    }

    /// Capacity of `image` for this engine's cipher.
    pub fn capacity_report(&self, image: &PixelBuffer) -> CapacityReport {
        CapacityReport::for_image(image, self.sealer.tag_len())
    }

    /// Hide `secret` in a copy of `cover`.
    ///
    /// Capacity is checked before the key is derived.
    pub fn backup(&self, cover: &PixelBuffer, secret: &[u8], passphrase: &str) -> Result<Backup> {
        validate_passphrase(passphrase)?;

        let needed = payload::payload_len(secret.len(), self.sealer.tag_len());
        let available = stego::calculate_capacity(cover);
        if needed > available {
            return Err(StegVaultError::CapacityExceeded { needed, available });
        }

        let sealed = self.sealer.encrypt_data(secret, passphrase)?;
        let payload = payload::serialize(&sealed.salt, &sealed.nonce, &sealed.ciphertext);
        let seed = payload::seed_from_salt(&sealed.salt);
        let stego = stego::embed(cover, &payload, seed)?;

        log::debug!(
            "backup complete: {} byte payload in {} byte capacity",
            payload.len(),
            available
        );
        Ok(Backup {
            stego,
            payload_length: payload.len(),
        })
    }

    /// Recover a secret from `image` given the payload length reported by backup.
    pub fn restore(
        &self,
        image: &PixelBuffer,
        payload_length: usize,
        passphrase: &str,
    ) -> Result<Zeroizing<Vec<u8>>> {
        if payload_length < ENVELOPE_OVERHEAD {
            return Err(StegVaultError::InvalidInput(format!(
                "Payload length must be at least {} bytes (got {})",
                ENVELOPE_OVERHEAD, payload_length
            )));
        }
        let available = stego::calculate_capacity(image);
        if payload_length > available {
            return Err(StegVaultError::CapacityExceeded {
                needed: payload_length,
                available,
            });
        }

        let header = stego::extract_header(image).map_err(|_| StegVaultError::DecryptionFailed)?;
        let magic_ok = payload::has_magic(&header);

        let mut salt = [0u8; SALT_LENGTH];
        salt.copy_from_slice(&header[MAGIC_LENGTH..]);
        let seed = payload::seed_from_salt(&salt);

        let extracted = stego::extract(image, payload_length, seed)
            .map_err(|_| StegVaultError::DecryptionFailed)?;
        let parts = payload::split(&extracted).map_err(|_| StegVaultError::DecryptionFailed)?;
        let outcome =
            self.sealer
                .decrypt_data(parts.ciphertext, parts.salt, parts.nonce, passphrase);

        match outcome {
            Ok(secret) if magic_ok => Ok(secret),
            _ => {
                log::debug!("restore failed");
                Err(StegVaultError::DecryptionFailed)
            }
        }
    }

    /// Load `cover_path`, hide `secret`, and write the stego PNG to `output_path`.
    pub fn backup_file(
        &self,
        cover_path: &Path,
        output_path: &Path,
        secret: &[u8],
        passphrase: &str,
    ) -> Result<BackupReport> {
        let cover = stego::load_cover(cover_path)?;
        let capacity = self.capacity_report(&cover);
        let backup = self.backup(&cover, secret, passphrase)?;
        stego::save_stego(&backup.stego, output_path)?;
        log::info!("wrote stego image to {}", output_path.display());

        Ok(BackupReport {
            output_path: output_path.to_path_buf(),
            payload_length: backup.payload_length,
            capacity,
        })
    }

    /// Load `stego_path` and restore the secret hidden in it.
    pub fn restore_file(
        &self,
        stego_path: &Path,
        payload_length: usize,
        passphrase: &str,
    ) -> Result<Zeroizing<Vec<u8>>> {
        let image = stego::load_cover(stego_path)?;
        self.restore(&image, payload_length, passphrase)
    }
}
