//! Directory walker that produces a [`Snapshot`].
//!
//! The builder enumerates every non-directory entry under a root, reads its
//! metadata with the platform default `stat` (symbolic links are followed),
//! and records identity, location and modification time. The walk aborts on
//! the first error; there are no partial snapshots.

use super::{FileIdentity, FileRecord, Snapshot};
use crate::config::TrackingConfig;
use crate::error::{Result, TrackError};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{Level, debug, span};
use walkdir::WalkDir;

/// Builds snapshots of directory trees
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotBuilder {
    /// Whether to descend into symlinked directories
    follow_symlinks: bool,
}

impl SnapshotBuilder {
    /// Create a new builder
    ///
    /// # Arguments
    ///
    /// * `follow_symlinks` - Descend into directories reached through symbolic links
    #[must_use]
    pub const fn new(follow_symlinks: bool) -> Self {
        Self { follow_symlinks }
    }

    /// Create a builder from the tracking section of the configuration
    #[must_use]
    pub const fn from_config(config: &TrackingConfig) -> Self {
        Self::new(config.follow_symlinks)
    }

    /// Snapshot every file under `root`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `root` does not exist or is not a directory ([`TrackError::Precondition`])
    /// - An entry cannot be read during the walk ([`TrackError::Io`])
    /// - Two entries report the same identity ([`TrackError::IdentityCollision`])
    /// - The platform has no file identity ([`TrackError::IdentityUnsupported`])
    pub fn build(&self, root: &Path) -> Result<Snapshot> {
        let span = span!(Level::DEBUG, "build_snapshot", root = %root.display());
        let _guard = span.enter();

        check_root(root)?;

        let started = Instant::now();
        let mut snapshot = Snapshot::new(root, Utc::now());

        for entry in WalkDir::new(root).follow_links(self.follow_symlinks) {
            let entry = entry.map_err(|err| {
                let path = err.path().unwrap_or(root).to_path_buf();
                TrackError::Io {
                    path,
                    source: err.into(),
                }
            })?;

            if entry.file_type().is_dir() {
                continue;
            }

            let path = entry.path();
            let metadata = fs::metadata(path).map_err(|source| TrackError::Io {
                path: path.to_path_buf(),
                source,
            })?;

            // Symlink to a directory: listed, but neither recorded nor descended
            if metadata.is_dir() {
                continue;
            }

            snapshot.insert(record_for(path, &metadata)?)?;
        }

        debug!(
            files = snapshot.len(),
            elapsed_ms = started.elapsed().as_millis(),
            "Snapshot built"
        );

        Ok(snapshot)
    }
}

/// Verify that `root` exists and is a directory
fn check_root(root: &Path) -> Result<()> {
    if !root.exists() {
        return Err(TrackError::Precondition {
            path: root.to_path_buf(),
            reason: "path does not exist",
        });
    }
    if !root.is_dir() {
        return Err(TrackError::Precondition {
            path: root.to_path_buf(),
            reason: "path is not a directory",
        });
    }
    Ok(())
}

/// Build the record for a single file from its metadata
fn record_for(path: &Path, metadata: &fs::Metadata) -> Result<FileRecord> {
    let identity = FileIdentity::from_metadata(path, metadata)?;
    let mtime: DateTime<Utc> = metadata
        .modified()
        .map_err(|source| TrackError::Io {
            path: path.to_path_buf(),
            source,
        })?
        .into();

    let dir = path.parent().unwrap_or(path).to_path_buf();
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(FileRecord {
        identity,
        dir,
        filename,
        mtime,
    })
}
