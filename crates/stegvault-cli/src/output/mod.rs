//! Output formatting helpers for the CLI.
//!
//! Every command answers `--json` with the same envelope.

mod json;

pub use json::{capacity_json, error_json, print_json, success_json};
