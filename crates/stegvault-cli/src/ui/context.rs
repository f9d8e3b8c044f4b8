//! UI context for environment detection and configuration.

use std::io::IsTerminal;

use super::mode::OutputMode;

/// Terminal and environment context for UI decisions.
#[derive(Debug, Clone)]
pub struct UiContext {
    /// Whether color output is enabled
    pub color: bool,
    /// Whether unicode symbols are enabled
    pub unicode: bool,
    /// Print only the essential value
    pub quiet: bool,
    /// Resolved output mode
    pub mode: OutputMode,
}

impl UiContext {
    /// Create context from environment and CLI flags.
    pub fn from_env(json_flag: bool, quiet_flag: bool) -> Self {
        let is_tty = std::io::stdout().is_terminal();
        let term_is_dumb = std::env::var("TERM").map(|v| v == "dumb").unwrap_or(false);
        let no_color_env = std::env::var("NO_COLOR").is_ok();

        Self {
            color: is_tty && !no_color_env && !term_is_dumb,
            unicode: !term_is_dumb,
            quiet: quiet_flag,
            mode: OutputMode::resolve(json_flag, is_tty, term_is_dumb),
        }
    }

    /// Check if animations (spinners) are allowed.
    ///
    /// The spinner draws on stderr, so stdout may still be piped.
    pub fn allows_animation(&self) -> bool {
        !self.quiet && !self.mode.is_json() && std::io::stderr().is_terminal()
    }

    /// Whether receipts and notes should be printed.
    pub fn is_verbose_output(&self) -> bool {
        !self.quiet && !self.mode.is_json()
    }
}
