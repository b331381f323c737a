//! Snapshot data model.
//!
//! A [`Snapshot`] is the complete set of files found under a root directory at
//! one instant, keyed by [`FileIdentity`] so that a file keeps its key across
//! renames and moves. Snapshots are produced in one pass by the
//! [`SnapshotBuilder`] and are never mutated afterwards.

/// Directory walker producing snapshots
pub mod builder;
/// Platform file identity
pub mod identity;

pub use builder::SnapshotBuilder;
pub use identity::FileIdentity;

use crate::error::{Result, TrackError};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::path::{Path, PathBuf};

/// Display format for snapshot timestamps (local time).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One file as seen by a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Filesystem identity of the file
    pub identity: FileIdentity,
    /// Directory containing the file
    pub dir: PathBuf,
    /// File name within `dir`
    pub filename: String,
    /// Last modification time, nanosecond precision
    pub mtime: DateTime<Utc>,
}

impl FileRecord {
    /// Creates a record from its parts.
    #[must_use]
    pub fn new(
        identity: impl Into<FileIdentity>,
        dir: impl Into<PathBuf>,
        filename: impl Into<String>,
        mtime: DateTime<Utc>,
    ) -> Self {
        Self {
            identity: identity.into(),
            dir: dir.into(),
            filename: filename.into(),
            mtime,
        }
    }

    /// Full path of the file (`dir/filename`).
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.filename)
    }
}

/// Key of a persisted snapshot: its root and the instant it was taken.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SnapshotHandle {
    /// Root directory of the snapshot
    pub root_path: PathBuf,
    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,
}

impl SnapshotHandle {
    #[must_use]
    pub fn new(root_path: impl Into<PathBuf>, taken_at: DateTime<Utc>) -> Self {
        Self {
            root_path: root_path.into(),
            taken_at,
        }
    }

    /// Returns true if this handle names `(root, taken_at)`.
    #[must_use]
    pub fn matches(&self, root: &Path, taken_at: DateTime<Utc>) -> bool {
        self.root_path == root && self.taken_at == taken_at
    }
}

impl fmt::Display for SnapshotHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({})",
            self.root_path.display(),
            self.taken_at.with_timezone(&Local).format(TIMESTAMP_FORMAT)
        )
    }
}

/// All files under `root_path` at `taken_at`, keyed by identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    root_path: PathBuf,
    taken_at: DateTime<Utc>,
    records: HashMap<FileIdentity, FileRecord>,
}

impl Snapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new(root_path: impl Into<PathBuf>, taken_at: DateTime<Utc>) -> Self {
        Self {
            root_path: root_path.into(),
            taken_at,
            records: HashMap::new(),
        }
    }

    /// Creates a snapshot from a set of records.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::IdentityCollision`] if two records share an identity.
    pub fn from_records<I>(
        root_path: impl Into<PathBuf>,
        taken_at: DateTime<Utc>,
        records: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = FileRecord>,
    {
        let mut snapshot = Self::new(root_path, taken_at);
        for record in records {
            snapshot.insert(record)?;
        }
        Ok(snapshot)
    }

    /// Adds a record, keeping identities unique.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::IdentityCollision`] if the identity is already present.
    pub fn insert(&mut self, record: FileRecord) -> Result<()> {
        match self.records.entry(record.identity) {
            Entry::Occupied(existing) => Err(TrackError::IdentityCollision {
                identity: record.identity,
                first: existing.get().path(),
                second: record.path(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }

    #[must_use]
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    #[must_use]
    pub const fn taken_at(&self) -> DateTime<Utc> {
        self.taken_at
    }

    /// Handle under which this snapshot would be persisted.
    #[must_use]
    pub fn handle(&self) -> SnapshotHandle {
        SnapshotHandle::new(self.root_path.clone(), self.taken_at)
    }

    #[must_use]
    pub fn get(&self, identity: &FileIdentity) -> Option<&FileRecord> {
        self.records.get(identity)
    }

    #[must_use]
    pub fn contains(&self, identity: &FileIdentity) -> bool {
        self.records.contains_key(identity)
    }

    /// Iterates over all records in unspecified order.
    pub fn records(&self) -> impl Iterator<Item = &FileRecord> {
        self.records.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
