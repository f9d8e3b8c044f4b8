//! StegVault CLI - hide passphrase-encrypted secrets in lossless images
//!
//! This is the command-line interface for StegVault. It wraps the core
//! library's backup and restore engine with passphrase handling, config
//! loading, and human or JSON output.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod output;
mod ui;

use clap::Parser;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{backup, check, misc, restore};
use crate::output::{error_json, print_json};
use crate::ui::print_error;

fn main() {
    let cli = Cli::parse();
    let ctx = AppContext::new(&cli);
    init_logging(ctx.verbose());

    if let Err(e) = run(&ctx, &cli) {
        let ui_ctx = ctx.ui();
        let (code, error_type) = errors::classify(&e);
        let error_msg = format!("{}", e);

        if ui_ctx.mode.is_json() {
            let (message, _) = split_hint(&error_msg);
            let _ = print_json(&error_json(error_type, message));
        } else {
            let (message, explicit_hint) = split_hint(&error_msg);
            let hint = explicit_hint
                .map(str::to_string)
                .or_else(|| extract_error_hint(message));
            print_error(&ui_ctx, message, hint.as_deref());
        }
        std::process::exit(code);
    }
}

/// `warn` by default, `info` with `--verbose` or `verbose = true`; `RUST_LOG` overrides both.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_level),
    )
    .format_timestamp(None)
    .try_init();
}

/// Split an error message at an embedded "Hint:" line.
fn split_hint(error: &str) -> (&str, Option<&str>) {
    for marker in ["\nHint:", "\nhint:"] {
        if let Some(idx) = error.find(marker) {
            return (&error[..idx], Some(&error[idx + 1..]));
        }
    }
    (error, None)
}

/// Provide contextual hints for common error types.
fn extract_error_hint(error: &str) -> Option<String> {
    let error_lower = error.to_lowercase();

    if error_lower.contains("decryption failed") {
        return Some(
            "Hint: Check the passphrase and --payload-length. Set STEGVAULT_PASSPHRASE or use --passphrase-file for scripts."
                .to_string(),
        );
    }

    if error_lower.contains("exceeds image capacity") {
        return Some(
            "Hint: Run `stegvault check -i <image>` and pick a larger cover image.".to_string(),
        );
    }

    if error_lower.contains("image format error") {
        return Some(
            "Hint: Use an 8-bit RGB or RGBA PNG, BMP or TIFF. Lossy formats such as JPEG destroy hidden data."
                .to_string(),
        );
    }

    if error_lower.contains("failed to parse config") || error_lower.contains("invalid [crypto]") {
        return Some("Hint: Fix or remove the config file, or pass --config.".to_string());
    }

    if error_lower.contains("payload length must be at least") {
        return Some("Hint: Use the payload length printed by `stegvault backup`.".to_string());
    }

    None
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Backup(args) => backup::handle_backup(ctx, args),
        Commands::Restore(args) => restore::handle_restore(ctx, args),
        Commands::Check(args) => check::handle_check(ctx, args),
        Commands::Completions(args) => misc::handle_completions(args.shell),
    }
}
