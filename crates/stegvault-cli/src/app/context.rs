//! Application context for the StegVault CLI.
//!
//! Provides a unified context that combines CLI arguments with
//! lazily-loaded configuration.

use std::io::IsTerminal;

use once_cell::unsync::OnceCell;
use stegvault_core::StegVault;

use crate::cli::Cli;
use crate::config::{load_config, StegVaultConfig};
use crate::ui::UiContext;

/// Application context that bundles CLI args with configuration.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<StegVaultConfig>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    /// Get the configuration, loading it lazily if needed.
    pub fn config(&self) -> anyhow::Result<&StegVaultConfig> {
        self.config
            .get_or_try_init(|| load_config(self.cli.config.as_deref()))
    }

    /// Engine built from the configured cost settings.
    pub fn vault(&self) -> anyhow::Result<StegVault> {
        Ok(StegVault::with_config(self.config()?.crypto)?)
    }

    pub fn ui(&self) -> UiContext {
        UiContext::from_env(self.cli.json, self.cli.quiet)
    }

    /// Whether interactive prompts are possible.
    pub fn interactive(&self) -> bool {
        std::io::stdin().is_terminal() && std::io::stderr().is_terminal()
    }

    /// Verbose logging from the flag or the config file.
    pub fn verbose(&self) -> bool {
        self.cli.verbose || self.config().map(|c| c.cli.verbose).unwrap_or(false)
    }
}
