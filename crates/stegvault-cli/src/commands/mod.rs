pub mod backup;
pub mod check;
pub mod misc;
pub mod restore;

use std::path::Path;

use stegvault_core::stego::load_cover;
use stegvault_core::PixelBuffer;

use crate::app::AppContext;
use crate::errors::CliError;

/// Decode an input image, reporting a missing file with a hint.
///
/// Relative paths are taken from `[cli] default_image_dir` when it is set.
pub(crate) fn load_image(ctx: &AppContext, path: &Path) -> anyhow::Result<PixelBuffer> {
    let path = ctx.config()?.cli.resolve_image_path(path);
    let path = path.as_path();
    if !path.exists() {
        return Err(CliError::not_found(
            format!("Image not found: {}", path.display()),
            "Hint: Check the -i/--input path.",
        )
        .into());
    }
    Ok(load_cover(path)?)
}
