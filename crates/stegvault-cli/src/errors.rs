//! CLI error types for structured error handling.
//!
//! Typed errors map to specific exit codes and JSON `error_type` values.
//! Errors coming out of the core library are classified by
//! [`classify`] so every command reports them the same way.

use std::fmt;

use stegvault_core::StegVaultError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (input image, secret file, passphrase file, config)
    NotFound { message: String, hint: String },

    /// Authentication failed (wrong passphrase, corrupted image)
    AuthFailed {
        message: String,
        hint: Option<String>,
    },

    /// Invalid user input
    InvalidInput(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::AuthFailed { message, hint } => {
                if let Some(h) = hint {
                    write!(f, "{}\n{}", message, h)
                } else {
                    write!(f, "{}", message)
                }
            }
            CliError::InvalidInput(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an AuthFailed error with message and hint.
    pub fn auth_failed_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            CliError::NotFound { .. } => "not_found",
            CliError::AuthFailed { .. } => "decryption_failed",
            CliError::InvalidInput(_) => "invalid_input",
        }
    }
}

/// Exit code and JSON error type for any error reaching `main`.
pub fn classify(err: &anyhow::Error) -> (i32, &'static str) {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return (cli_err.exit_code(), cli_err.error_type());
    }
    if let Some(core_err) = err.downcast_ref::<StegVaultError>() {
        return classify_core(core_err);
    }
    if let Some(io_err) = err.downcast_ref::<std::io::Error>() {
        if io_err.kind() == std::io::ErrorKind::NotFound {
            return (exit_codes::NOT_FOUND, "not_found");
        }
        return (exit_codes::GENERAL, "io");
    }
    (exit_codes::GENERAL, "error")
}

fn classify_core(err: &StegVaultError) -> (i32, &'static str) {
    match err {
        StegVaultError::DecryptionFailed | StegVaultError::Authentication => {
            (exit_codes::AUTH_FAILED, "decryption_failed")
        }
        StegVaultError::CapacityExceeded { .. } => {
            (exit_codes::CAPACITY_EXCEEDED, "capacity_exceeded")
        }
        StegVaultError::ImageFormat(_) => (exit_codes::INVALID_INPUT, "image_format"),
        StegVaultError::InvalidInput(_) | StegVaultError::MalformedPayload(_) => {
            (exit_codes::INVALID_INPUT, "invalid_input")
        }
        StegVaultError::KeyDerivation(_) => (exit_codes::INVALID_INPUT, "key_derivation"),
        StegVaultError::Io { source } if source.kind() == std::io::ErrorKind::NotFound => {
            (exit_codes::NOT_FOUND, "not_found")
        }
        StegVaultError::Io { .. } => (exit_codes::GENERAL, "io"),
        StegVaultError::Crypto(_) => (exit_codes::GENERAL, "crypto"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_exit_codes() {
        assert_eq!(CliError::not_found("x", "y").exit_code(), 3);
        assert_eq!(CliError::invalid_input("x").exit_code(), 4);
        assert_eq!(CliError::auth_failed_with_hint("x", "y").exit_code(), 5);
    }

    #[test]
    fn test_classify_core_errors() {
        let cases = [
            (anyhow::Error::new(StegVaultError::DecryptionFailed), 5, "decryption_failed"),
            (
                anyhow::Error::new(StegVaultError::CapacityExceeded {
                    needed: 100,
                    available: 10,
                }),
                6,
                "capacity_exceeded",
            ),
            (
                anyhow::Error::new(StegVaultError::ImageFormat("bad".into())),
                4,
                "image_format",
            ),
            (anyhow::anyhow!("something else"), 1, "error"),
        ];
        for (err, code, kind) in cases {
            assert_eq!(classify(&err), (code, kind));
        }
    }

    #[test]
    fn test_classify_survives_context() {
        let err = anyhow::Error::new(StegVaultError::DecryptionFailed).context("restoring");
        assert_eq!(classify(&err).0, exit_codes::AUTH_FAILED);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = anyhow::Error::new(StegVaultError::from(io));
        assert_eq!(classify(&err), (exit_codes::NOT_FOUND, "not_found"));
    }

    #[test]
    fn test_display_includes_hint() {
        let err = CliError::not_found("Secret file not found", "Hint: check the path");
        assert_eq!(err.to_string(), "Secret file not found\nHint: check the path");
    }
}
