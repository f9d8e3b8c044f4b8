//! Error types for StegVault core operations.
//!
//! Low-level components report what went wrong precisely. The restore path
//! in [`crate::engine`] folds every decryption-stage failure into
//! [`StegVaultError::DecryptionFailed`].

use thiserror::Error;

/// Result type alias for StegVault operations.
pub type Result<T> = std::result::Result<T, StegVaultError>;

/// Core error type for StegVault operations.
#[derive(Debug, Error)]
pub enum StegVaultError {
    /// Key derivation rejected its parameters (salt length, cost settings)
    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    /// AEAD tag mismatch
    #[error("Authentication failed")]
    Authentication,

    /// Bad magic or undersized payload
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// Payload does not fit into the cover image
    #[error("Payload size ({needed} bytes) exceeds image capacity ({available} bytes)")]
    CapacityExceeded { needed: usize, available: usize },

    /// Unreadable or unsupported image
    #[error("Image format error: {0}")]
    ImageFormat(String),

    /// Generic failure reported by restore for every decryption-stage error
    #[error("Decryption failed (wrong passphrase or corrupted image)")]
    DecryptionFailed,

    /// Invalid caller input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Encryption failure (randomness source or cipher setup)
    #[error("Encryption error: {0}")]
    Crypto(String),

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl From<image::ImageError> for StegVaultError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(source) => StegVaultError::Io { source },
            other => StegVaultError::ImageFormat(other.to_string()),
        }
    }
}
