//! Error taxonomy for snapshot building, storage and comparison.
//!
//! Core APIs return [`Result`] with a [`TrackError`]; the command layer wraps
//! these in `anyhow` with additional context before they reach the user.

use crate::snapshot::FileIdentity;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the core modules.
pub type Result<T, E = TrackError> = std::result::Result<T, E>;

/// Boxed error type carried by [`TrackError::Storage`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised by the snapshot builder, the stores and the update workflow.
#[derive(Debug, Error)]
pub enum TrackError {
    /// Target path is missing or is not a directory.
    #[error("cannot snapshot {}: {reason}", .path.display())]
    Precondition {
        /// Path that failed the check
        path: PathBuf,
        /// Human readable reason
        reason: &'static str,
    },

    /// Metadata for an entry could not be read during a walk.
    #[error("failed to read metadata for {}", .path.display())]
    Io {
        /// Entry being read when the failure happened
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// No persisted snapshot matches the requested handle.
    #[error("no snapshot of {} recorded at {}", .root.display(), .taken_at.to_rfc3339())]
    NotFound {
        /// Root path of the requested snapshot
        root: PathBuf,
        /// Timestamp of the requested snapshot
        taken_at: DateTime<Utc>,
    },

    /// Two files in one walk reported the same identity.
    #[error(
        "{} and {} share file identity {identity}",
        .first.display(),
        .second.display()
    )]
    IdentityCollision {
        /// The duplicated identity
        identity: FileIdentity,
        /// Path recorded first
        first: PathBuf,
        /// Path that collided with it
        second: PathBuf,
    },

    /// The platform offers no file identity for this entry.
    #[error("file identity is not supported on this platform ({})", .path.display())]
    IdentityUnsupported {
        /// Entry whose identity was requested
        path: PathBuf,
    },

    /// A snapshot with the same root and timestamp is already persisted.
    #[error("a snapshot of {} taken at {} is already recorded", .root.display(), .taken_at.to_rfc3339())]
    DuplicateSnapshot {
        /// Root path of the duplicate
        root: PathBuf,
        /// Timestamp of the duplicate
        taken_at: DateTime<Utc>,
    },

    /// Another process holds the store lock.
    #[error("the snapshot store is in use by another process (lock: {})", .lock_path.display())]
    StoreLocked {
        /// Lock file that could not be acquired
        lock_path: PathBuf,
    },

    /// Persistent storage failed (files, encoding).
    #[error("{message}")]
    Storage {
        /// What the store was doing
        message: String,
        /// Underlying failure
        #[source]
        source: BoxError,
    },
}

impl TrackError {
    /// Builds a [`TrackError::Storage`] from any error convertible into [`BoxError`].
    pub fn storage(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Storage {
            message: message.into(),
            source: source.into(),
        }
    }

    /// Returns true for [`TrackError::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
