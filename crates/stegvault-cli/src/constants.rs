//! Constants used throughout the CLI.

/// Environment variable consulted for the passphrase.
pub const PASSPHRASE_ENV: &str = "STEGVAULT_PASSPHRASE";

/// Image capacity (bytes) below which `check` warns.
pub const SMALL_CAPACITY_WARN_BYTES: usize = 100;

/// Image capacity (bytes) below which `check` adds a note.
pub const SMALL_CAPACITY_NOTE_BYTES: usize = 500;

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (clap usage errors)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// General failure.
    pub const GENERAL: i32 = 1;

    /// Input file not found (cover, stego, secret or passphrase file, config).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input, arguments or image.
    pub const INVALID_INPUT: i32 = 4;

    /// Decryption failed (wrong passphrase or corrupted image).
    pub const AUTH_FAILED: i32 = 5;

    /// Secret does not fit into the cover image.
    pub const CAPACITY_EXCEEDED: i32 = 6;
}
