//! Output formatting and styling for the `track` CLI.
//!
//! Status messages go to stderr and honour the global [`Verbosity`].
//! Reports are written to a caller-supplied writer so that commands can be
//! driven from tests.

use crate::diff::{ChangeKind, ChangeReport};
use colored::Colorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU8, Ordering};

/// Verbosity level for output messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Suppress informational messages, show only warnings and errors.
    Quiet = 0,
    /// Default verbosity level, show all standard messages.
    Normal = 1,
    /// Show verbose debug messages in addition to standard output.
    Verbose = 2,
}

/// Global verbosity setting (default: Normal).
static VERBOSITY: AtomicU8 = AtomicU8::new(1);

/// Sets the global verbosity level for all output functions.
pub fn set_verbosity(level: Verbosity) {
    VERBOSITY.store(level as u8, Ordering::Relaxed);
}

/// Gets the current global verbosity level.
pub fn get_verbosity() -> Verbosity {
    match VERBOSITY.load(Ordering::Relaxed) {
        0 => Verbosity::Quiet,
        2 => Verbosity::Verbose,
        _ => Verbosity::Normal,
    }
}

/// Prints a success message in green (respects quiet mode).
pub fn success(message: &str) {
    if get_verbosity() == Verbosity::Quiet {
        return;
    }
    eprintln!("{} {}", "✓".green().bold(), message.green());
}

/// Prints a warning message in bold yellow (always shown).
pub fn warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), message.yellow().bold());
}

/// Prints a verbose debug message (only in verbose mode).
pub fn verbose(message: &str) {
    if get_verbosity() != Verbosity::Verbose {
        return;
    }
    eprintln!("{}", message.dimmed());
}

/// Plain report lines, grouped by category in display order.
///
/// The long form prints a `--- Kind ---` header per non-empty category
/// followed by its entries and a blank line. The short form prints one
/// `<status> <entry>` line per entry.
#[must_use]
pub fn report_lines(report: &ChangeReport, short: bool) -> Vec<String> {
    let mut lines = Vec::with_capacity(report.len() + 15);

    for kind in ChangeKind::ALL {
        let entries = report.entries(kind);
        if entries.is_empty() {
            continue;
        }

        if short {
            lines.extend(
                entries
                    .iter()
                    .map(|entry| format!("{} {entry}", kind.status_char())),
            );
        } else {
            lines.push(format!("--- {kind} ---"));
            lines.extend(entries);
            lines.push(String::new());
        }
    }

    lines
}

/// Write a report, with bold category headers in the long form.
///
/// # Errors
///
/// Returns an error if writing fails
pub fn write_report<W: Write>(out: &mut W, report: &ChangeReport, short: bool) -> io::Result<()> {
    for line in report_lines(report, short) {
        if line.starts_with("--- ") {
            writeln!(out, "{}", line.bold())?;
        } else {
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}
