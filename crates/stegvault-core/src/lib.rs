//! # StegVault Core
//!
//! Core library for StegVault - passphrase-protected secret backup hidden in
//! the least significant bits of lossless images.
//!
//! This crate holds the cryptography, payload format and steganographic codec,
//! independent of the CLI.
//!
//! ## Architecture
//!
//! - **crypto**: Argon2id key derivation and XChaCha20-Poly1305 sealing
//! - **payload**: the `magic ‖ salt ‖ nonce ‖ ciphertext` envelope
//! - **stego**: pixel buffers, capacity, keyed slot permutation, LSB codec
//! - **engine**: whole-operation backup and restore
//! - **config**: explicit cost settings
//!
//! ## Example
//!
//! ```
//! use stegvault_core::{CryptoConfig, PixelBuffer, StegVault};
//!
//! let config = CryptoConfig {
//!     argon2_time_cost: 1,
//!     argon2_memory_cost: 64,
//!     argon2_parallelism: 1,
//! };
//! let vault = StegVault::with_config(config).unwrap();
//! let cover = PixelBuffer::rgb(64, 64, vec![128; 64 * 64 * 3]).unwrap();
//!
//! let backup = vault.backup(&cover, b"seed words", "passphrase").unwrap();
//! let secret = vault
//!     .restore(&backup.stego, backup.payload_length, "passphrase")
//!     .unwrap();
//! assert_eq!(secret.as_slice(), b"seed words");
//! ```

pub mod config;
pub mod crypto;
pub mod engine;
pub mod error;
pub mod fs;
pub mod payload;
pub mod stego;

pub use config::CryptoConfig;
pub use engine::{Backup, BackupReport, StegVault};
pub use error::{Result, StegVaultError};
pub use stego::{CapacityReport, PixelBuffer};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
