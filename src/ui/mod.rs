//! User interface module - formatted status output and plain values.
//!
//! Separates concerns:
//! - `formatter` - Human-oriented, styled output
//! - This module - Bare values for scripts consuming stdout

use std::io::{self, Write};

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_error, display_identity, display_identity_warning, display_status, display_success,
    format_identity,
};

/// Print a single value on its own line with no styling.
///
/// Used for `name` and `version` output so shell pipelines can capture it
/// directly.
pub fn print_value(value: impl std::fmt::Display) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", value)?;
    out.flush()
}
