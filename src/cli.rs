//! Command-line interface definitions for track.
//!
//! This module contains all CLI argument parsing structures using clap's derive macros.
//! The CLI definitions are shared between the main binary and build tools (like xtask)
//! for man page generation.
//!
//! Note: Field-level documentation is provided via clap attributes,
//! so we allow missing_docs for this module to avoid redundant documentation.

#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Main CLI structure for track.
#[derive(Parser)]
#[command(
    name = "track",
    version = crate::VERSION,
    about = "Snapshot directories and report what changed",
    long_about = "Records snapshots of directory trees and reports added, deleted, modified, \
                  moved and renamed files by comparing file identities"
)]
pub struct Cli {
    /// Subcommand to execute (interactive menu when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Show verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress informational messages
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// All available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Record a directory as a new baseline
    Record {
        /// Directory to snapshot
        path: String,
    },

    /// List recorded baselines
    #[command(alias = "ls")]
    List,

    /// Report changes since a baseline and optionally update it
    Check {
        /// Baseline number from `track list`, or a directory path (latest baseline)
        baseline: Option<String>,

        /// Update the baseline without asking
        #[arg(short, long, conflicts_with = "no_update")]
        yes: bool,

        /// Never update the baseline
        #[arg(short = 'n', long)]
        no_update: bool,

        /// One line per change with a status letter
        #[arg(short, long)]
        short: bool,
    },

    /// Remove a recorded baseline
    #[command(alias = "rm")]
    Remove {
        /// Baseline number from `track list`, or a directory path (latest baseline)
        baseline: Option<String>,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Interactive menu (default when no command is given)
    Menu,

    /// Get and set configuration options
    Config {
        /// Configuration key (section.key)
        key: Option<String>,

        /// Configuration value to set
        value: Option<String>,

        /// Reset the configuration key to its default
        #[arg(long, conflicts_with = "value")]
        unset: bool,

        /// List all configuration values
        #[arg(short, long)]
        list: bool,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_menu() {
        let cli = Cli::try_parse_from(["track"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_check_flags() {
        let cli = Cli::try_parse_from(["track", "check", "2", "--short", "-n"]).unwrap();
        let Some(Commands::Check {
            baseline,
            yes,
            no_update,
            short,
        }) = cli.command
        else {
            panic!("expected check");
        };
        assert_eq!(baseline.as_deref(), Some("2"));
        assert!(!yes && no_update && short);
    }

    #[test]
    fn test_yes_conflicts_with_no_update() {
        assert!(Cli::try_parse_from(["track", "check", "--yes", "--no-update"]).is_err());
    }
}
