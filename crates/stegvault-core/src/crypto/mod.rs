//! Cryptographic operations for StegVault.
//!
//! - **Argon2id**: memory-hard key derivation from passphrase + 16-byte salt
//! - **XChaCha20-Poly1305**: authenticated encryption with a 24-byte nonce
//!
//! ## Threat Model
//!
//! We defend against:
//! - Theft of the stego image without the passphrase
//! - Offline brute-force attacks on the passphrase
//! - Tampering with the embedded ciphertext
//!
//! We do NOT defend against:
//! - Statistical steganalysis beyond keyed bit placement
//! - Compromised OS / keylogger

pub mod cipher;
pub mod key;
pub mod passphrase;
pub mod sealer;

pub use cipher::{AeadCipher, XChaCha20Poly1305Cipher, NONCE_LENGTH, TAG_LENGTH};
pub use key::{derive_key_with, Argon2Kdf, DerivedKey, KeyDerivation, KEY_LENGTH, SALT_LENGTH};
pub use passphrase::{check_strength, validate_passphrase};
pub use sealer::{random_bytes, Sealed, Sealer};
