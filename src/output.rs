//! Colored console reporting.
//!
//! Uses owo-colors for terminal colors. Informational only; the update
//! outcome is decided by return values, not by what gets printed.

use owo_colors::OwoColorize;

/// Print an action header (blue, bold)
/// Example: "==> Updating claude from 1.0.0 to 1.0.1"
pub fn action(message: &str) {
    println!("{} {}", "==>".blue().bold(), message.bold());
}

/// Print a detail line (dimmed prefix)
/// Example: "     fetching hash for x86_64-linux..."
pub fn detail(message: &str) {
    println!("     {}", message.dimmed());
}

/// Print an info message (cyan)
pub fn info(message: &str) {
    println!("{} {}", "::".cyan(), message);
}

/// Print a success message (green)
/// Example: "==> updated claude to version 1.0.1"
pub fn success(message: &str) {
    println!("{} {}", "==>".green().bold(), message.green());
}

/// Print a skip message (dimmed)
/// Example: "==> claude is already up to date"
pub fn skip(message: &str) {
    println!("{} {}", "==>".dimmed(), message.dimmed());
}

/// Print an error message (red)
pub fn error(message: &str) {
    eprintln!("{} {}", "error:".red().bold(), message.red());
}
