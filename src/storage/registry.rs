use crate::error::{Result, TrackError};
use crate::snapshot::SnapshotHandle;
use crate::utils::serialization;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Format version written to new registries.
pub const REGISTRY_VERSION: u32 = 1;

/// One persisted snapshot: its file id and key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// Numeric id, names the snapshot file
    pub id: u64,
    /// Key of the snapshot
    pub handle: SnapshotHandle,
}

/// Index of every snapshot in a [`DiskStore`](super::DiskStore), in recording order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    version: u32,
    next_id: u64,
    entries: Vec<RegistryEntry>,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            version: REGISTRY_VERSION,
            next_id: 1,
            entries: Vec::new(),
        }
    }
}

impl Registry {
    /// Read the registry at `path`, or an empty one if the file does not exist
    ///
    /// # Errors
    ///
    /// Returns a storage error if the file cannot be read or decoded, or was
    /// written by an unknown format version
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let bytes = fs::read(path).map_err(|e| {
            TrackError::storage(format!("failed to read registry {}", path.display()), e)
        })?;
        let registry: Self = serialization::deserialize(&bytes).map_err(|e| {
            TrackError::storage(format!("failed to decode registry {}", path.display()), e)
        })?;

        if registry.version != REGISTRY_VERSION {
            return Err(TrackError::storage(
                format!("unsupported registry {}", path.display()),
                format!("format version {} (expected {REGISTRY_VERSION})", registry.version),
            ));
        }

        Ok(registry)
    }

    /// Write the registry to `path` atomically
    ///
    /// The new contents are written to a temporary file in the same
    /// directory and renamed over `path`.
    ///
    /// # Errors
    ///
    /// Returns a storage error if encoding, writing or renaming fails
    pub fn save(&self, path: &Path) -> Result<()> {
        let write_err = |e: std::io::Error| {
            TrackError::storage(format!("failed to write registry {}", path.display()), e)
        };

        let bytes = serialization::serialize(self)
            .map_err(|e| TrackError::storage("failed to encode registry", e))?;

        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
        temp.write_all(&bytes).map_err(write_err)?;
        temp.as_file().sync_all().map_err(write_err)?;
        temp.persist(path).map_err(|e| write_err(e.error))?;
        Ok(())
    }

    #[must_use]
    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// Entry recorded under `handle`
    #[must_use]
    pub fn find(&self, handle: &SnapshotHandle) -> Option<&RegistryEntry> {
        self.entries.iter().find(|entry| entry.handle == *handle)
    }

    /// Append an entry under a fresh id and return that id
    pub fn insert(&mut self, handle: SnapshotHandle) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(RegistryEntry { id, handle });
        id
    }

    /// Remove and return the entry recorded under `handle`
    pub fn remove(&mut self, handle: &SnapshotHandle) -> Option<RegistryEntry> {
        let index = self.entries.iter().position(|e| e.handle == *handle)?;
        Some(self.entries.remove(index))
    }
}
