//! Colored terminal output
//!
//! Uses owo-colors for terminal colors. Detail lines can be silenced with
//! [`set_quiet`] or `FFBINARIES_QUIET=1`; warnings and errors always print.

use owo_colors::OwoColorize;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

static QUIET: AtomicBool = AtomicBool::new(false);

fn quiet_from_env() -> bool {
    static FROM_ENV: OnceLock<bool> = OnceLock::new();
    *FROM_ENV.get_or_init(|| {
        std::env::var("FFBINARIES_QUIET").is_ok_and(|v| !v.is_empty() && v != "0")
    })
}

/// Suppress action/detail lines and progress bars.
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed) || quiet_from_env()
}

/// Print an action header (blue, bold)
/// Example: "==> Fetching ffmpeg"
pub fn action(message: &str) {
    if !is_quiet() {
        println!("{} {}", "==>".blue().bold(), message.bold());
    }
}

/// Print a detail line (dimmed prefix)
/// Example: "     downloading https://..."
pub fn detail(message: &str) {
    if !is_quiet() {
        println!("     {}", message.dimmed());
    }
}

/// Print a success message (green)
pub fn success(message: &str) {
    if !is_quiet() {
        println!("{} {}", "==>".green().bold(), message.green());
    }
}

/// Print a warning message (yellow)
pub fn warning(message: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), message.yellow());
}

/// Print an error message (red)
pub fn error(message: &str) {
    eprintln!("{} {}", "error:".red().bold(), message.red());
}
