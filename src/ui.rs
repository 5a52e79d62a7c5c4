//! Shared terminal output helpers.

use console::{Emoji, style};

pub static CHECK: Emoji<'_, '_> = Emoji("✓ ", "");

/// Print a non-fatal warning to stderr.
pub fn warn(message: &str) {
    eprintln!("{} {message}", style("Warning:").yellow().bold());
}
