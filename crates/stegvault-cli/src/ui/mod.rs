//! UI primitives for the StegVault CLI.
//!
//! - **Context**: Environment detection (TTY, color, quiet)
//! - **Mode**: Output mode resolution (json, plain, pretty)
//! - **Theme**: Badge tokens and colors
//! - **Render**: Key-value lines, receipts, hints, errors
//! - **Progress**: Spinner shown while the key is derived

mod context;
mod mode;
pub mod progress;
pub mod render;
pub mod theme;

pub use context::UiContext;
pub use theme::Badge;

pub use render::{badge, hint, kv, print, print_error, receipt, warn};

pub use progress::Spinner;
