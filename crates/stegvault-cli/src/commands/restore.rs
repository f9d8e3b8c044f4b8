use std::io::{IsTerminal, Write};
use std::path::Path;

use secrecy::ExposeSecret;
use serde_json::json;
use stegvault_core::StegVaultError;

use crate::app::passphrase::{resolve_passphrase, Purpose};
use crate::app::AppContext;
use crate::cli::RestoreArgs;
use crate::errors::CliError;
use crate::output::{print_json, success_json};
use crate::ui::{print, receipt, Spinner};

use super::load_image;

pub fn handle_restore(ctx: &AppContext, args: &RestoreArgs) -> anyhow::Result<()> {
    let ui = ctx.ui();
    let interactive = ctx.interactive();
    let vault = ctx.vault()?;

    let image = load_image(ctx, &args.input)?;
    let passphrase = resolve_passphrase(&args.passphrase, Purpose::Restore, interactive)?;

    let spinner = Spinner::start(&ui, "Deriving key and extracting secret");
    let result = vault.restore(&image, args.payload_length, passphrase.expose_secret());
    spinner.finish();
    let secret = result.map_err(|err| match err {
        StegVaultError::DecryptionFailed => anyhow::Error::new(CliError::auth_failed_with_hint(
            err.to_string(),
            "Hint: Check the passphrase and --payload-length, and use the unmodified PNG written by backup.",
        )),
        other => other.into(),
    })?;
    log::info!("restored {} secret bytes", secret.len());

    if let Some(path) = &args.output {
        write_secret_file(path, &secret)?;
        if ui.mode.is_json() {
            return print_json(&success_json(json!({
                "output": path.display().to_string(),
                "secret_bytes": secret.len(),
            })));
        }
        print(
            &ui,
            &receipt(
                &ui,
                "Secret restored",
                &[
                    ("Output", path.display().to_string()),
                    ("Secret size", format!("{} bytes", secret.len())),
                ],
            ),
        );
        return Ok(());
    }

    if ui.mode.is_json() {
        let text = std::str::from_utf8(&secret).map_err(|_| {
            CliError::invalid_input(
                "Secret is not valid UTF-8\nHint: Use --output to write it to a file.",
            )
        })?;
        return print_json(&success_json(json!({
            "secret": text,
            "secret_bytes": secret.len(),
        })));
    }

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&secret)?;
    if stdout.is_terminal() && !secret.ends_with(b"\n") {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}

/// Write the secret readable by the owner only.
fn write_secret_file(path: &Path, secret: &[u8]) -> anyhow::Result<()> {
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options
        .open(path)
        .map_err(|e| anyhow::anyhow!("Failed to open {}: {}", path.display(), e))?;
    file.write_all(secret)?;
    set_file_permissions(path)?;
    Ok(())
}

fn set_file_permissions(path: &Path) -> anyhow::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(path)?.permissions();
        perms.set_mode(0o600);
        std::fs::set_permissions(path, perms)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_file_is_owner_only() {
        let path = std::env::temp_dir().join(format!("stegvault_restored_{}", std::process::id()));
        std::fs::write(&path, b"previous contents that are longer").unwrap();

        write_secret_file(&path, b"restored").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"restored");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
        let _ = std::fs::remove_file(path);
    }
}
