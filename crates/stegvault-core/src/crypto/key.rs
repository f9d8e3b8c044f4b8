//! Key derivation using Argon2id.
//!
//! This module derives encryption keys from passphrases using the Argon2id
//! algorithm, which is memory-hard and resistant to GPU-based attacks.

use argon2::Argon2;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::config::CryptoConfig;
use crate::error::{Result, StegVaultError};

/// Length of derived key in bytes (32 bytes = 256 bits for XChaCha20-Poly1305).
pub const KEY_LENGTH: usize = 32;

/// Required salt length in bytes.
pub const SALT_LENGTH: usize = 16;

/// A cryptographic key derived from a passphrase.
///
/// This type ensures that key material is securely zeroized from memory
/// when dropped, reducing the window of exposure.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    /// The raw key bytes (zeroized on drop)
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    /// Create a new DerivedKey from raw bytes.
    ///
    /// # Security
    ///
    /// The caller is responsible for ensuring the bytes come from a secure source.
    pub fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate encryption operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Passphrase-to-key strategy.
///
/// The engine receives an implementation through its constructor.
pub trait KeyDerivation {
    /// Derive a key from `passphrase` and `salt`.
    ///
    /// Must be deterministic: the same inputs always give the same key.
    fn derive_key(&self, passphrase: &str, salt: &[u8]) -> Result<DerivedKey>;
}

/// Argon2id key derivation with explicit, versioned cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Kdf {
    config: CryptoConfig,
}

impl Argon2Kdf {
    /// Create a derivation strategy from validated cost settings.
    pub fn new(config: CryptoConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The cost settings this instance derives with.
    pub fn config(&self) -> &CryptoConfig {
        &self.config
    }
}

impl Default for Argon2Kdf {
    fn default() -> Self {
        Self {
            config: CryptoConfig::default(),
        }
    }
}

impl KeyDerivation for Argon2Kdf {
    fn derive_key(&self, passphrase: &str, salt: &[u8]) -> Result<DerivedKey> {
        derive_key_with(&self.config, passphrase, salt)
    }
}

/// Derive an encryption key from a passphrase using Argon2id.
///
/// # Arguments
///
/// * `config` - Argon2id cost settings
/// * `passphrase` - The passphrase to derive from
/// * `salt` - Random salt, exactly 16 bytes
///
/// # Security
///
/// - Same passphrase + salt always produces same key (deterministic)
/// - Different salt produces different key
/// - Memory-hard: requires `argon2_memory_cost` KiB of RAM
///
/// # Examples
///
/// ```
/// use stegvault_core::config::CryptoConfig;
/// use stegvault_core::crypto::derive_key_with;
///
/// let config = CryptoConfig { argon2_time_cost: 1, argon2_memory_cost: 64, argon2_parallelism: 1 };
/// let salt = [7u8; 16];
/// let key = derive_key_with(&config, "my-passphrase", &salt).unwrap();
/// assert_eq!(key.as_bytes().len(), 32);
/// ```
pub fn derive_key_with(config: &CryptoConfig, passphrase: &str, salt: &[u8]) -> Result<DerivedKey> {
    if salt.len() != SALT_LENGTH {
        return Err(StegVaultError::KeyDerivation(format!(
            "Salt must be exactly {} bytes (got {})",
            SALT_LENGTH,
            salt.len()
        )));
    }

    let params = argon2::Params::new(
        config.argon2_memory_cost,
        config.argon2_time_cost,
        config.argon2_parallelism,
        Some(KEY_LENGTH),
    )
    .map_err(|e| StegVaultError::KeyDerivation(format!("Failed to create Argon2 params: {}", e)))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let mut key_bytes = [0u8; KEY_LENGTH];
    argon2
        .hash_password_into(passphrase.as_bytes(), salt, &mut key_bytes)
        .map_err(|e| StegVaultError::KeyDerivation(format!("Key derivation failed: {}", e)))?;

    let key = DerivedKey::from_bytes(key_bytes);
    key_bytes.zeroize();
    Ok(key)
}
