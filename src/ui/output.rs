//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Progress messages go to stdout and respect the quiet flag. Warnings and
//! errors go to stderr so stdout stays usable when piping `flatten` output.

use std::fmt::Display;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - errors only
    Quiet,
    /// Normal mode - progress messages
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags. `quiet` wins over `debug`.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a debug message (only in debug mode).
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Print a success message (respects quiet mode).
pub fn success(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Format a list of items, one per line.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_beats_debug() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }

    #[test]
    fn format_list_prefixes_each_line() {
        assert_eq!(format_list(&["Shirts", "Hats"], "  - "), "  - Shirts\n  - Hats");
        assert_eq!(format_list::<&str>(&[], "- "), "");
    }
}
