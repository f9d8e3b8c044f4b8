//! Passphrase validation.
//!
//! `validate_passphrase` is a hard requirement; `check_strength` is advisory
//! and only drives a warning in the CLI.

use crate::error::{Result, StegVaultError};

/// Minimum passphrase length for the strength check.
pub const MIN_STRONG_PASSPHRASE_LENGTH: usize = 12;

/// Reject empty or whitespace-only passphrases.
///
/// # Examples
///
/// ```
/// use stegvault_core::crypto::validate_passphrase;
///
/// assert!(validate_passphrase("correct horse").is_ok());
/// assert!(validate_passphrase("   ").is_err());
/// ```
pub fn validate_passphrase(passphrase: &str) -> Result<()> {
    if passphrase.trim().is_empty() {
        return Err(StegVaultError::InvalidInput(
            "Passphrase cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Check a passphrase against the recommended strength rules.
///
/// Returns the first unmet rule as a human-readable message.
pub fn check_strength(passphrase: &str) -> std::result::Result<(), String> {
    let length = passphrase.chars().count();
    if length < MIN_STRONG_PASSPHRASE_LENGTH {
        return Err(format!(
            "Passphrase should be at least {} characters (got {})",
            MIN_STRONG_PASSPHRASE_LENGTH, length
        ));
    }
    if !passphrase.chars().any(char::is_uppercase) {
        return Err("Passphrase should contain an uppercase letter".to_string());
    }
    if !passphrase.chars().any(char::is_lowercase) {
        return Err("Passphrase should contain a lowercase letter".to_string());
    }
    if !passphrase.chars().any(|c| c.is_ascii_digit()) {
        return Err("Passphrase should contain a digit".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_passphrase() {
        assert!(validate_passphrase("my-secure-passphrase-123").is_ok());
        assert!(validate_passphrase("x").is_ok());
    }

    #[test]
    fn test_passphrase_empty() {
        assert!(validate_passphrase("").is_err());
        assert!(validate_passphrase("   ").is_err());
        assert!(validate_passphrase("\n\t").is_err());
    }

    #[test]
    fn test_strong_passphrase() {
        assert!(check_strength("MyStrong123Pass").is_ok());
    }

    #[test]
    fn test_short_passphrase() {
        let message = check_strength("Short1A").unwrap_err();
        assert!(message.contains("at least"));
    }

    #[test]
    fn test_missing_character_classes() {
        assert!(check_strength("nostrongpass123")
            .unwrap_err()
            .contains("uppercase"));
        assert!(check_strength("NOSTRONGPASS123")
            .unwrap_err()
            .contains("lowercase"));
        assert!(check_strength("NoStrongPassword")
            .unwrap_err()
            .contains("digit"));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 11 characters, more than 12 bytes
        let message = check_strength("Pässwörd1Ab").unwrap_err();
        assert!(message.contains("got 11"));
    }
}
