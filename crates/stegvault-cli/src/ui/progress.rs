//! Progress indicators for long-running operations.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use super::context::UiContext;

const UNICODE_FRAMES: &[&str] = &[
    "\u{280B}", "\u{2819}", "\u{2839}", "\u{2838}", "\u{283C}", "\u{2834}", "\u{2826}", "\u{2827}",
    "\u{2807}", "\u{280F}", " ",
];
const ASCII_FRAMES: &[&str] = &["|", "/", "-", "\\", " "];

/// Spinner on stderr for indeterminate work such as key derivation.
///
/// Does nothing when animation is not allowed (JSON, quiet, or stderr not a TTY).
pub struct Spinner {
    bar: Option<ProgressBar>,
}

impl Spinner {
    pub fn start(ctx: &UiContext, message: &str) -> Self {
        if !ctx.allows_animation() {
            return Self { bar: None };
        }
        let frames = if ctx.unicode {
            UNICODE_FRAMES
        } else {
            ASCII_FRAMES
        };
        let style = ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(frames);
        let bar = ProgressBar::new_spinner();
        bar.set_style(style);
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar: Some(bar) }
    }

    /// Stop and erase the spinner.
    pub fn finish(self) {
        if let Some(bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::mode::OutputMode;

    #[test]
    fn test_spinner_is_inert_in_json_mode() {
        let ctx = UiContext {
            color: false,
            unicode: true,
            quiet: false,
            mode: OutputMode::Json,
        };
        let spinner = Spinner::start(&ctx, "Deriving key");
        assert!(spinner.bar.is_none());
        spinner.finish();
    }
}
