use serde_json::json;

use crate::app::AppContext;
use crate::cli::CheckArgs;
use crate::constants::{SMALL_CAPACITY_NOTE_BYTES, SMALL_CAPACITY_WARN_BYTES};
use crate::output::{capacity_json, print_json, success_json};
use crate::ui::{badge, kv, print, warn, Badge};

use super::load_image;

pub fn handle_check(ctx: &AppContext, args: &CheckArgs) -> anyhow::Result<()> {
    let ui = ctx.ui();
    let vault = ctx.vault()?;
    let image = load_image(ctx, &args.input)?;
    let report = vault.capacity_report(&image);

    let warning = if report.capacity_bytes < SMALL_CAPACITY_WARN_BYTES {
        Some(format!(
            "Very small capacity: {} bytes. Use a larger image.",
            report.capacity_bytes
        ))
    } else {
        None
    };
    let note = if warning.is_none() && report.capacity_bytes < SMALL_CAPACITY_NOTE_BYTES {
        Some("Limited capacity: suitable for short secrets only.".to_string())
    } else {
        None
    };

    if ui.mode.is_json() {
        let mut data = capacity_json(&report);
        data["path"] = json!(args.input.display().to_string());
        data["warnings"] = json!(warning.iter().chain(note.iter()).collect::<Vec<_>>());
        return print_json(&success_json(data));
    }
    if ui.quiet {
        println!("{}", report.max_secret_bytes);
        return Ok(());
    }

    print(&ui, &kv(&ui, "Image", &args.input.display().to_string()));
    print(
        &ui,
        &kv(&ui, "Dimensions", &format!("{}x{}", report.width, report.height)),
    );
    print(&ui, &kv(&ui, "Channels", &report.channels.to_string()));
    print(
        &ui,
        &kv(&ui, "Capacity", &format!("{} bytes", report.capacity_bytes)),
    );
    print(
        &ui,
        &kv(&ui, "Max secret", &format!("{} bytes", report.max_secret_bytes)),
    );
    let warning_shown = warning.is_some();
    if let Some(message) = warning {
        warn(&ui, &message);
    }
    match note {
        Some(message) => print(&ui, &badge(&ui, Badge::Info, &message)),
        None if warning_shown => {}
        None => print(
            &ui,
            &badge(&ui, Badge::Ok, "Image has sufficient capacity for secret storage"),
        ),
    }
    Ok(())
}
