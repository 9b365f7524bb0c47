//! Shared CLI output helpers for consistent terminal output.
//!
//! Color scheme (respects NO_COLOR):
//! - Green: success, checkmarks
//! - Red: errors
//! - Yellow: warnings
//! - Cyan: stage arrows, secret names, hints
//! - Bold: important values
//! - Dimmed: secondary info

use console::style;
use std::fmt::Display;

/// Check if color output is disabled via NO_COLOR env var.
fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Print a success message with checkmark (green).
///
/// Example: `✓ deployed prometheus`
pub fn success(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("✓").green(), msg);
    } else {
        println!("✓ {}", msg);
    }
}

/// Print an error message to stderr (red).
///
/// Example: `✗ secrets file not found: secrets.env`
pub fn error(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("✗").red(), msg);
    } else {
        eprintln!("✗ {}", msg);
    }
}

/// Print a warning message (yellow).
///
/// Example: `⚠ TIMEZONE is bound but the secret does not exist`
pub fn warn(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("⚠").yellow(), msg);
    } else {
        println!("⚠ {}", msg);
    }
}

/// Print a hint message to stderr (cyan). Follows an error.
///
/// Example: `→ create secrets.env with IDENTIFIER=VALUE lines`
pub fn hint(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("→").cyan(), style(msg).cyan());
    } else {
        eprintln!("→ {}", msg);
    }
}

/// Print a pipeline stage header.
///
/// Example: `▸ Building container image`
pub fn step(label: &str) {
    if colors_enabled() {
        println!("{} {}", style("▸").cyan(), style(label).bold());
    } else {
        println!("▸ {}", label);
    }
}

/// Print a key-value pair (label dimmed, value bold).
///
/// Example: `  url:  https://prometheus-abc.a.run.app`
pub fn kv(label: &str, value: impl Display) {
    if colors_enabled() {
        println!("  {}  {}", style(label).dim(), style(value.to_string()).bold());
    } else {
        println!("  {}  {}", label, value);
    }
}

/// Print a list item with bullet and a dimmed note.
///
/// Example: `  • EMAIL_SENDER (created)`
pub fn list_item(item: &str, note: &str) {
    if colors_enabled() {
        println!("  • {} {}", style(item).cyan(), style(format!("({})", note)).dim());
    } else {
        println!("  • {} ({})", item, note);
    }
}

/// Print a dimmed/secondary message.
///
/// Example: `dry run: nothing will be changed`
pub fn dimmed(msg: &str) {
    if colors_enabled() {
        println!("{}", style(msg).dim());
    } else {
        println!("{}", msg);
    }
}
