use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use stegvault_core::VERSION;

/// StegVault - hide passphrase-encrypted secrets in lossless images
#[derive(Parser)]
#[command(name = "stegvault")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file
    #[arg(long, global = true, env = "STEGVAULT_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Quiet mode (print only the essential value)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Passphrase sources shared by `backup` and `restore`
#[derive(Args, Debug, Clone, Default)]
pub struct PassphraseArgs {
    /// Passphrase (visible in process listings; prefer --passphrase-file)
    #[arg(long, value_name = "PASSPHRASE")]
    pub passphrase: Option<String>,

    /// Read the passphrase from a file (trailing newline is ignored)
    #[arg(long, value_name = "FILE")]
    pub passphrase_file: Option<PathBuf>,
}

/// Arguments for the `backup` command
#[derive(Args)]
pub struct BackupArgs {
    /// Cover image (PNG, BMP or TIFF)
    #[arg(short, long, value_name = "IMAGE")]
    pub input: PathBuf,

    /// Where to write the stego PNG
    #[arg(short, long, value_name = "PNG")]
    pub output: PathBuf,

    /// Read the secret from a file instead of stdin or a prompt
    #[arg(long, value_name = "FILE")]
    pub secret_file: Option<PathBuf>,

    #[command(flatten)]
    pub passphrase: PassphraseArgs,

    /// Skip the passphrase strength warning
    #[arg(long)]
    pub no_check_strength: bool,
}

/// Arguments for the `restore` command
#[derive(Args)]
pub struct RestoreArgs {
    /// Stego image produced by `backup`
    #[arg(short, long, value_name = "IMAGE")]
    pub input: PathBuf,

    /// Payload length printed by `backup`
    #[arg(long, value_name = "BYTES")]
    pub payload_length: usize,

    /// Write the secret to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub passphrase: PassphraseArgs,
}

/// Arguments for the `check` command
#[derive(Args)]
pub struct CheckArgs {
    /// Image to inspect
    #[arg(short, long, value_name = "IMAGE")]
    pub input: PathBuf,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encrypt a secret and hide it in a cover image
    Backup(BackupArgs),

    /// Recover a secret from a stego image
    Restore(RestoreArgs),

    /// Show how much an image can hold
    Check(CheckArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
