//! Reading the secret to back up.

use std::io::{IsTerminal, Read};
use std::path::Path;

use dialoguer::Password;
use zeroize::Zeroizing;

use crate::errors::CliError;

/// Read the secret from `--secret-file`, piped stdin, or a hidden prompt.
///
/// Bytes from a file or stdin are taken as-is.
pub fn read_secret(secret_file: Option<&Path>, interactive: bool) -> anyhow::Result<Zeroizing<Vec<u8>>> {
    let secret = match secret_file {
        Some(path) => read_secret_file(path)?,
        None if !std::io::stdin().is_terminal() => {
            let mut buffer = Zeroizing::new(Vec::new());
            std::io::stdin()
                .read_to_end(&mut buffer)
                .map_err(|e| anyhow::anyhow!("Failed to read secret from stdin: {}", e))?;
            buffer
        }
        None if interactive => prompt_secret()?,
        None => {
            return Err(CliError::invalid_input(
                "No secret provided\nHint: Use --secret-file or pipe the secret on stdin.",
            )
            .into())
        }
    };
    if secret.is_empty() {
        return Err(CliError::invalid_input("Secret is empty").into());
    }
    Ok(secret)
}

fn read_secret_file(path: &Path) -> anyhow::Result<Zeroizing<Vec<u8>>> {
    if !path.exists() {
        return Err(CliError::not_found(
            format!("Secret file not found: {}", path.display()),
            "Hint: Check the --secret-file path.",
        )
        .into());
    }
    let bytes = std::fs::read(path)
        .map_err(|e| anyhow::anyhow!("Failed to read secret file {}: {}", path.display(), e))?;
    Ok(Zeroizing::new(bytes))
}

fn prompt_secret() -> anyhow::Result<Zeroizing<Vec<u8>>> {
    let value = Password::new()
        .with_prompt("Secret to hide")
        .with_confirmation("Confirm secret", "Secrets do not match")
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read secret: {}", e))?;
    Ok(Zeroizing::new(value.into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_file_bytes_kept_verbatim() {
        let path = std::env::temp_dir().join(format!("stegvault_secret_{}", std::process::id()));
        std::fs::write(&path, b"seed words\n").unwrap();
        let secret = read_secret(Some(path.as_path()), false).unwrap();
        assert_eq!(secret.as_slice(), b"seed words\n");
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_missing_secret_file() {
        let err = read_secret(Some(Path::new("/nonexistent/secret.txt")), false).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::NotFound { .. })
        ));
    }

    #[test]
    fn test_empty_secret_file_rejected() {
        let path = std::env::temp_dir().join(format!("stegvault_empty_secret_{}", std::process::id()));
        std::fs::write(&path, b"").unwrap();
        assert!(read_secret(Some(path.as_path()), false).is_err());
        let _ = std::fs::remove_file(path);
    }
}
