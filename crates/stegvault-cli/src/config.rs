use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use stegvault_core::CryptoConfig;

use crate::errors::CliError;

/// Contents of `config.toml`. Every section and key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StegVaultConfig {
    pub crypto: CryptoConfig,
    pub cli: CliSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliSection {
    /// Warn about weak passphrases on backup
    pub check_strength: bool,
    /// Base directory for relative `-i/--input` paths; empty means the
    /// working directory
    pub default_image_dir: String,
    /// Enable info-level logging
    pub verbose: bool,
}

impl Default for CliSection {
    fn default() -> Self {
        Self {
            check_strength: true,
            default_image_dir: String::new(),
            verbose: false,
        }
    }
}

impl CliSection {
    /// Join a relative image path onto `default_image_dir` when one is set.
    pub fn resolve_image_path(&self, path: &Path) -> PathBuf {
        let base = self.default_image_dir.trim();
        if base.is_empty() || path.is_absolute() {
            return path.to_path_buf();
        }
        Path::new(base).join(path)
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

/// Load configuration from `explicit` or the default location.
///
/// A missing file at the default location yields the defaults; a missing
/// explicit path is an error.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<StegVaultConfig> {
    let config = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(CliError::not_found(
                    format!("Config file not found: {}", path.display()),
                    "Hint: Check the --config path or unset STEGVAULT_CONFIG.",
                )
                .into());
            }
            read_config(path)?
        }
        None => {
            let path = default_config_path()?;
            if path.exists() {
                read_config(&path)?
            } else {
                log::debug!("no config at {}, using defaults", path.display());
                StegVaultConfig::default()
            }
        }
    };
    config
        .crypto
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid [crypto] settings: {}", e))?;
    Ok(config)
}

pub fn read_config(path: &Path) -> anyhow::Result<StegVaultConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("stegvault"));
        }
    }
    Ok(home_dir()?.join(".config").join("stegvault"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
