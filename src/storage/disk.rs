use super::SnapshotStore;
use super::registry::Registry;
use crate::error::{Result, TrackError};
use crate::lock::StoreLock;
use crate::snapshot::{Snapshot, SnapshotHandle};
use crate::utils::serialization;
use crate::{REGISTRY_FILE, SNAPSHOTS_DIR};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{Level, debug, info, span, warn};

/// Store that keeps baselines in a directory across runs
///
/// The store lock is acquired on [`open`](Self::open) and released when the
/// store is dropped.
#[derive(Debug)]
pub struct DiskStore {
    store_path: PathBuf,
    compression_level: i32,
    registry: Registry,
    _lock: StoreLock,
}

impl DiskStore {
    /// Open (creating if needed) the store at `store_path`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The store directories cannot be created
    /// - Another process holds the store lock ([`TrackError::StoreLocked`])
    /// - The registry cannot be read
    pub fn open(store_path: &Path, compression_level: i32) -> Result<Self> {
        let snapshots_dir = store_path.join(SNAPSHOTS_DIR);
        fs::create_dir_all(&snapshots_dir).map_err(|e| {
            TrackError::storage(
                format!("failed to create store at {}", store_path.display()),
                e,
            )
        })?;

        let lock = StoreLock::acquire(store_path)?;
        let registry = Registry::load(&store_path.join(REGISTRY_FILE))?;

        debug!(
            store = %store_path.display(),
            snapshots = registry.entries().len(),
            "Opened snapshot store"
        );

        Ok(Self {
            store_path: store_path.to_path_buf(),
            compression_level,
            registry,
            _lock: lock,
        })
    }

    fn registry_path(&self) -> PathBuf {
        self.store_path.join(REGISTRY_FILE)
    }

    fn snapshot_path(&self, id: u64) -> PathBuf {
        self.store_path.join(SNAPSHOTS_DIR).join(format!("{id}.zst"))
    }

    fn write_snapshot(&self, path: &Path, snapshot: &Snapshot) -> Result<()> {
        let write_err = |e: std::io::Error| {
            TrackError::storage(format!("failed to write snapshot {}", path.display()), e)
        };

        let compressed = serialization::serialize_compressed(snapshot, self.compression_level)
            .map_err(|e| TrackError::storage("failed to encode snapshot", e))?;

        let dir = path.parent().unwrap_or(&self.store_path);
        let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
        temp.write_all(&compressed).map_err(write_err)?;
        temp.persist(path).map_err(|e| write_err(e.error))?;
        Ok(())
    }
}

fn not_found(handle: &SnapshotHandle) -> TrackError {
    TrackError::NotFound {
        root: handle.root_path.clone(),
        taken_at: handle.taken_at,
    }
}

impl SnapshotStore for DiskStore {
    fn persist(&mut self, snapshot: &Snapshot) -> Result<SnapshotHandle> {
        let handle = snapshot.handle();
        let span = span!(Level::DEBUG, "persist", snapshot = %handle);
        let _guard = span.enter();

        if self.registry.find(&handle).is_some() {
            return Err(TrackError::DuplicateSnapshot {
                root: handle.root_path,
                taken_at: handle.taken_at,
            });
        }

        // Snapshot file first so the registry never names a missing file
        let mut updated = self.registry.clone();
        let id = updated.insert(handle.clone());
        let file = self.snapshot_path(id);
        self.write_snapshot(&file, snapshot)?;

        if let Err(e) = updated.save(&self.registry_path()) {
            if let Err(cleanup) = fs::remove_file(&file) {
                warn!(file = %file.display(), error = %cleanup, "Failed to remove orphaned snapshot file");
            }
            return Err(e);
        }
        self.registry = updated;

        info!(id, files = snapshot.len(), "Snapshot persisted");
        Ok(handle)
    }

    fn erase(&mut self, handle: &SnapshotHandle) -> Result<()> {
        let span = span!(Level::DEBUG, "erase", snapshot = %handle);
        let _guard = span.enter();

        let mut updated = self.registry.clone();
        let entry = updated.remove(handle).ok_or_else(|| not_found(handle))?;
        updated.save(&self.registry_path())?;
        self.registry = updated;

        // Already unreachable through the registry; a leftover file is harmless
        let file = self.snapshot_path(entry.id);
        if let Err(e) = fs::remove_file(&file)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            warn!(file = %file.display(), error = %e, "Failed to remove snapshot file");
        }

        info!(id = entry.id, "Snapshot erased");
        Ok(())
    }

    fn list_recorded(&self) -> Result<Vec<SnapshotHandle>> {
        Ok(self
            .registry
            .entries()
            .iter()
            .map(|entry| entry.handle.clone())
            .collect())
    }

    fn load(&self, handle: &SnapshotHandle) -> Result<Snapshot> {
        let entry = self.registry.find(handle).ok_or_else(|| not_found(handle))?;
        let file = self.snapshot_path(entry.id);

        let compressed = fs::read(&file).map_err(|e| {
            TrackError::storage(format!("failed to read snapshot {}", file.display()), e)
        })?;
        let snapshot: Snapshot = serialization::deserialize_compressed(&compressed)
            .map_err(|e| {
                TrackError::storage(format!("failed to decode snapshot {}", file.display()), e)
            })?;

        if snapshot.handle() != *handle {
            return Err(TrackError::storage(
                format!("snapshot file {} does not match its registry entry", file.display()),
                format!("expected {handle}, found {}", snapshot.handle()),
            ));
        }

        debug!(id = entry.id, files = snapshot.len(), "Snapshot loaded");
        Ok(snapshot)
    }
}
