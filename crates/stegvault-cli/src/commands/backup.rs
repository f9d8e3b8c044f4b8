use secrecy::ExposeSecret;
use serde_json::json;
use stegvault_core::payload::payload_len;
use stegvault_core::stego::save_stego;
use stegvault_core::StegVaultError;

use crate::app::passphrase::{enforce_strength, resolve_passphrase, Purpose};
use crate::app::secret::read_secret;
use crate::app::AppContext;
use crate::cli::BackupArgs;
use crate::output::{capacity_json, print_json, success_json};
use crate::ui::{hint, print, receipt, Spinner};

use super::load_image;

pub fn handle_backup(ctx: &AppContext, args: &BackupArgs) -> anyhow::Result<()> {
    let ui = ctx.ui();
    let interactive = ctx.interactive();
    let config = ctx.config()?;
    let vault = ctx.vault()?;

    let cover = load_image(ctx, &args.input)?;
    let capacity = vault.capacity_report(&cover);

    let secret = read_secret(args.secret_file.as_deref(), interactive)?;
    if !capacity.fits(secret.len()) {
        return Err(StegVaultError::CapacityExceeded {
            needed: payload_len(secret.len(), vault.sealer().tag_len()),
            available: capacity.capacity_bytes,
        }
        .into());
    }

    let passphrase = resolve_passphrase(&args.passphrase, Purpose::Backup, interactive)?;
    if config.cli.check_strength && !args.no_check_strength {
        enforce_strength(&ui, &passphrase, interactive)?;
    }

    let spinner = Spinner::start(&ui, "Deriving key and embedding secret");
    let result = vault.backup(&cover, &secret, passphrase.expose_secret());
    spinner.finish();
    let backup = result?;

    save_stego(&backup.stego, &args.output)?;
    log::info!(
        "hid {} secret bytes in {} ({} byte payload)",
        secret.len(),
        args.output.display(),
        backup.payload_length
    );

    if ui.mode.is_json() {
        return print_json(&success_json(json!({
            "output": args.output.display().to_string(),
            "secret_bytes": secret.len(),
            "payload_length": backup.payload_length,
            "capacity": capacity_json(&capacity),
        })));
    }
    if ui.quiet {
        println!("{}", backup.payload_length);
        return Ok(());
    }

    print(
        &ui,
        &receipt(
            &ui,
            "Secret hidden",
            &[
                ("Output", args.output.display().to_string()),
                ("Secret size", format!("{} bytes", secret.len())),
                ("Payload length", backup.payload_length.to_string()),
                (
                    "Capacity used",
                    format!("{}/{} bytes", backup.payload_length, capacity.capacity_bytes),
                ),
            ],
        ),
    );
    print(
        &ui,
        &hint(
            &ui,
            &format!(
                "Keep the payload length. Restore with `stegvault restore -i {} --payload-length {}`.",
                args.output.display(),
                backup.payload_length
            ),
        ),
    );
    Ok(())
}
