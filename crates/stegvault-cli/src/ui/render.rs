//! Rendering primitives for CLI output.

use super::context::UiContext;
use super::theme::{dim, Badge};

/// Render a badge with optional message.
pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let painted = kind.paint(ctx.unicode, ctx.color);
    if message.is_empty() {
        painted
    } else {
        format!("{} {}", painted, message)
    }
}

/// Render a key-value pair.
///
/// Pretty mode: "Key: value" with dim key
/// Plain mode: "key=value"
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if ctx.mode.is_pretty() {
        format!("{} {}", dim(&format!("{}:", key), ctx.color), value)
    } else {
        format!("{}={}", key.to_lowercase().replace(' ', "_"), value)
    }
}

/// Render a hint line.
///
/// Pretty mode: "Hint: text" with dim styling
/// Plain mode: "hint=text"
pub fn hint(ctx: &UiContext, text: &str) -> String {
    let text = text.strip_prefix("Hint: ").unwrap_or(text);
    if ctx.mode.is_pretty() {
        format!("{} {}", dim("Hint:", ctx.color), text)
    } else {
        format!("hint={}", text)
    }
}

/// Render a receipt (summary block after an action).
///
/// Pretty mode: Badge + indented key-value pairs
/// Plain mode: status=ok + key=value lines
pub fn receipt(ctx: &UiContext, title: &str, items: &[(&str, String)]) -> String {
    let mut lines = Vec::new();

    if ctx.mode.is_pretty() {
        lines.push(badge(ctx, Badge::Ok, title));
        for (key, value) in items {
            lines.push(format!("  {}", kv(ctx, key, value)));
        }
    } else {
        lines.push("status=ok".to_string());
        for (key, value) in items {
            lines.push(kv(ctx, key, value));
        }
    }

    lines.join("\n")
}

/// Print a message to stdout unless JSON or quiet output is active.
pub fn print(ctx: &UiContext, message: &str) {
    if ctx.is_verbose_output() {
        println!("{}", message);
    }
}

/// Print a warning to stderr. Shown in every mode except quiet.
pub fn warn(ctx: &UiContext, message: &str) {
    if ctx.quiet {
        return;
    }
    if ctx.mode.is_pretty() {
        eprintln!("{}", badge(ctx, Badge::Warn, message));
    } else {
        eprintln!("warning={}", message);
    }
}

/// Format an error message with optional hint.
///
/// Pretty mode: "[ERR] message" with optional "Hint: ..." on next line
/// Plain mode: "error=message" with optional "hint=suggestion"
pub fn error_message(ctx: &UiContext, message: &str, error_hint: Option<&str>) -> String {
    let mut lines = Vec::new();

    if ctx.mode.is_pretty() {
        lines.push(badge(ctx, Badge::Err, message));
    } else {
        lines.push(format!("error={}", message));
    }
    if let Some(h) = error_hint {
        lines.push(hint(ctx, h));
    }

    lines.join("\n")
}

/// Print an error message to stderr with optional hint.
pub fn print_error(ctx: &UiContext, message: &str, error_hint: Option<&str>) {
    eprintln!("{}", error_message(ctx, message, error_hint));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::mode::OutputMode;

    fn plain_ctx() -> UiContext {
        UiContext {
            color: false,
            unicode: false,
            quiet: false,
            mode: OutputMode::Plain,
        }
    }

    fn pretty_ctx() -> UiContext {
        UiContext {
            color: false,
            unicode: false,
            quiet: false,
            mode: OutputMode::Pretty,
        }
    }

    #[test]
    fn test_kv_plain_is_snake_case() {
        assert_eq!(kv(&plain_ctx(), "Payload length", "81"), "payload_length=81");
    }

    #[test]
    fn test_kv_pretty() {
        assert_eq!(kv(&pretty_ctx(), "Capacity", "3750 bytes"), "Capacity: 3750 bytes");
    }

    #[test]
    fn test_hint_strips_prefix() {
        assert_eq!(hint(&plain_ctx(), "Hint: try again"), "hint=try again");
        assert_eq!(hint(&pretty_ctx(), "try again"), "Hint: try again");
    }

    #[test]
    fn test_receipt_plain() {
        let out = receipt(
            &plain_ctx(),
            "Backup written",
            &[("Output", "out.png".to_string()), ("Payload length", "81".to_string())],
        );
        assert_eq!(out, "status=ok\noutput=out.png\npayload_length=81");
    }

    #[test]
    fn test_receipt_pretty() {
        let out = receipt(&pretty_ctx(), "Done", &[("Output", "out.png".to_string())]);
        assert_eq!(out, "[OK] Done\n  Output: out.png");
    }

    #[test]
    fn test_error_message_modes() {
        assert_eq!(
            error_message(&plain_ctx(), "boom", Some("Hint: fix it")),
            "error=boom\nhint=fix it"
        );
        assert_eq!(error_message(&pretty_ctx(), "boom", None), "[ERR] boom");
    }
}
