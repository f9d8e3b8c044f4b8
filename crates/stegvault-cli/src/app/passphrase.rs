//! Passphrase source resolution.
//!
//! Sources are tried in order: `--passphrase`, `--passphrase-file`,
//! `STEGVAULT_PASSPHRASE`, then an interactive prompt.

use std::path::Path;

use dialoguer::{Confirm, Password};
use secrecy::{ExposeSecret, SecretString};
use stegvault_core::crypto::check_strength;

use crate::cli::PassphraseArgs;
use crate::constants::PASSPHRASE_ENV;
use crate::errors::CliError;
use crate::ui::{warn, UiContext};

/// Why the passphrase is being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    /// New backup: prompt asks for confirmation
    Backup,
    Restore,
}

/// Resolve the passphrase from the first available source.
pub fn resolve_passphrase(
    args: &PassphraseArgs,
    purpose: Purpose,
    interactive: bool,
) -> anyhow::Result<SecretString> {
    let env_value = std::env::var(PASSPHRASE_ENV).ok();
    resolve_from(args, env_value, purpose, interactive)
}

fn resolve_from(
    args: &PassphraseArgs,
    env_value: Option<String>,
    purpose: Purpose,
    interactive: bool,
) -> anyhow::Result<SecretString> {
    if let Some(value) = &args.passphrase {
        return Ok(SecretString::from(value.clone()));
    }
    if let Some(path) = &args.passphrase_file {
        return read_passphrase_file(path);
    }
    if let Some(value) = env_value.filter(|v| !v.trim().is_empty()) {
        log::debug!("using passphrase from {}", PASSPHRASE_ENV);
        return Ok(SecretString::from(value));
    }
    if !interactive {
        return Err(CliError::invalid_input(format!(
            "No passphrase provided and no TTY available.\nHint: Use --passphrase-file or set {}.",
            PASSPHRASE_ENV
        ))
        .into());
    }
    prompt_passphrase(purpose)
}

/// Read a passphrase file, dropping the trailing newline.
pub fn read_passphrase_file(path: &Path) -> anyhow::Result<SecretString> {
    if !path.exists() {
        return Err(CliError::not_found(
            format!("Passphrase file not found: {}", path.display()),
            "Hint: Check the --passphrase-file path.",
        )
        .into());
    }
    let contents = std::fs::read_to_string(path).map_err(|e| {
        anyhow::anyhow!("Failed to read passphrase file {}: {}", path.display(), e)
    })?;
    let passphrase = contents.trim_end_matches(['\n', '\r']);
    if passphrase.is_empty() {
        return Err(CliError::invalid_input(format!(
            "Passphrase file is empty: {}",
            path.display()
        ))
        .into());
    }
    Ok(SecretString::from(passphrase.to_string()))
}

fn prompt_passphrase(purpose: Purpose) -> anyhow::Result<SecretString> {
    let prompt = Password::new().with_prompt("Passphrase");
    let prompt = match purpose {
        Purpose::Backup => {
            prompt.with_confirmation("Confirm passphrase", "Passphrases do not match")
        }
        Purpose::Restore => prompt,
    };
    let value = prompt
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read passphrase: {}", e))?;
    Ok(SecretString::from(value))
}

/// Warn about a weak passphrase and, when a TTY is available, ask to continue.
///
/// Returns an error if the user declines.
pub fn enforce_strength(
    ui: &UiContext,
    passphrase: &SecretString,
    interactive: bool,
) -> anyhow::Result<()> {
    let Err(reason) = check_strength(passphrase.expose_secret()) else {
        return Ok(());
    };
    warn(ui, &format!("Weak passphrase: {}", reason));
    if !interactive {
        return Ok(());
    }
    let proceed = Confirm::new()
        .with_prompt("Use this passphrase anyway?")
        .default(false)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read confirmation: {}", e))?;
    if proceed {
        Ok(())
    } else {
        Err(CliError::invalid_input(
            "Backup cancelled: passphrase too weak\nHint: Use a longer passphrase or pass --no-check-strength.",
        )
        .into())
    }
}
