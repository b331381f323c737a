#![warn(missing_docs)]
// Allow pedantic strict lints that create false positives in this codebase
#![allow(clippy::arithmetic_side_effects)] // Simple counters cannot overflow
#![allow(clippy::indexing_slicing)] // Bounds checked by logic

//! # dirtrack - Directory Snapshot Tracker
//!
//! dirtrack records point-in-time snapshots of a directory tree and later
//! reports what changed: which files were added, deleted, modified, moved to
//! another directory or renamed. Files are matched across snapshots by their
//! filesystem identity (device and inode), so a renamed file is reported as a
//! rename rather than as a deletion plus an addition.
//!
//! ## Architecture
//!
//! - [`snapshot`]: snapshot data model and the directory walker that builds it
//! - [`diff`]: identity-keyed comparison of two snapshots
//! - [`storage`]: the [`SnapshotStore`](storage::SnapshotStore) contract with
//!   on-disk and in-memory implementations
//! - [`workflow`]: check a baseline and optionally replace it
//! - [`commands`]: the `track` command implementations
//! - [`config`]: configuration parsing and validation
//! - [`output`]: output formatting and verbosity
//!
//! ## Example Usage
//!
//! ```no_run
//! use dirtrack::snapshot::SnapshotBuilder;
//! use dirtrack::storage::{MemoryStore, SnapshotStore};
//! use dirtrack::workflow;
//! use std::path::Path;
//!
//! # fn main() -> dirtrack::error::Result<()> {
//! let builder = SnapshotBuilder::default();
//! let mut store = MemoryStore::new();
//!
//! let baseline = store.record(&builder, Path::new("/srv/project"))?;
//!
//! // ... files change ...
//!
//! let pending = workflow::check_for_changes(&store, &builder, &baseline)?;
//! if pending.has_changes() {
//!     println!("{} change(s)", pending.report().len());
//!     pending.apply(&mut store)?;
//! }
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions (argument parsing structures).
pub mod cli;

/// Commands module containing all CLI command implementations.
pub mod commands;

/// Configuration parsing, validation, and management.
pub mod config;

/// Snapshot comparison and change reports.
pub mod diff;

/// Error types for the core modules.
pub mod error;

/// Exclusive locking of an on-disk store.
pub mod lock;

/// Output formatting and verbosity control.
pub mod output;

/// Snapshot data model and builder.
pub mod snapshot;

/// Snapshot persistence.
pub mod storage;

/// Utility functions and helpers.
pub mod utils;

/// Baseline check and update workflow.
pub mod workflow;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Current version of the track binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable overriding the configuration file path.
pub const CONFIG_PATH_ENV: &str = "DIRTRACK_CONFIG_PATH";

/// Environment variable overriding `core.store_path`.
pub const STORE_PATH_ENV: &str = "DIRTRACK_STORE_PATH";

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "DIRTRACK_LOG";

/// Name of the registry file inside a store.
pub const REGISTRY_FILE: &str = "registry.bin";

/// Directory name for compressed snapshot files.
pub const SNAPSHOTS_DIR: &str = "snapshots";

/// Directory name for lock files.
pub const LOCKS_DIR: &str = "locks";

/// Name of the store lock file inside [`LOCKS_DIR`].
pub const STORE_LOCK_FILE: &str = "store.lock";

/// Central context for all `track` commands.
///
/// Holds the configuration and the resolved store location. The store itself
/// is opened per command (see
/// [`CommandContext::open_store`](commands::context::CommandContext::open_store))
/// so that its lock is held only while the command runs.
///
/// # Examples
///
/// ```no_run
/// use dirtrack::TrackerContext;
///
/// # fn main() -> anyhow::Result<()> {
/// // Create context with default paths
/// let ctx = TrackerContext::new()?;
///
/// // Create context with custom paths (for testing)
/// let ctx = TrackerContext::new_explicit(
///     "/tmp/test_store".into(),
///     "/tmp/test_config.toml".into()
/// )?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TrackerContext {
    /// Directory of the snapshot store.
    pub store_path: PathBuf,

    /// Path to the configuration file.
    pub config_path: PathBuf,

    /// Loaded configuration settings.
    pub config: config::Config,
}

impl TrackerContext {
    /// Creates a new `TrackerContext` from the default or environment paths.
    ///
    /// `DIRTRACK_CONFIG_PATH` replaces the configuration file location and
    /// `DIRTRACK_STORE_PATH` replaces `core.store_path`.
    ///
    /// # Errors
    /// Returns an error if the configuration file cannot be read or created.
    pub fn new() -> Result<Self> {
        let config_path = std::env::var_os(CONFIG_PATH_ENV)
            .map_or_else(config::default_config_path, PathBuf::from);

        let config = config::Config::load(&config_path).with_context(|| {
            format!("Failed to load configuration from {}", config_path.display())
        })?;

        let store_path = match std::env::var_os(STORE_PATH_ENV) {
            Some(path) => utils::expand_tilde(Path::new(&path))?,
            None => config.core.store_path.clone(),
        };

        Ok(Self {
            store_path,
            config_path,
            config,
        })
    }

    /// Creates a new `TrackerContext` with explicit paths.
    ///
    /// A missing configuration file is created with `store_path` as its
    /// `core.store_path`.
    ///
    /// # Errors
    /// Returns an error if the configuration cannot be loaded or created.
    pub fn new_explicit(store_path: PathBuf, config_path: PathBuf) -> Result<Self> {
        let config = if config_path.exists() {
            config::Config::load(&config_path)?
        } else {
            let mut config = config::Config::default();
            config.core.store_path.clone_from(&store_path);
            config.save(&config_path)?;
            config
        };

        Ok(Self {
            store_path,
            config_path,
            config,
        })
    }
}
