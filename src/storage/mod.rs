//! Snapshot persistence.
//!
//! [`SnapshotStore`] is the contract the update workflow needs: persist a
//! built snapshot, enumerate baselines, materialize one for a diff and erase
//! it. [`DiskStore`] keeps baselines across runs; [`MemoryStore`] is the
//! in-process implementation used by tests and benchmarks.

/// On-disk store with a lock held for its lifetime
pub mod disk;
/// In-memory store
pub mod memory;
/// Registry of persisted snapshots
pub mod registry;

pub use disk::DiskStore;
pub use memory::MemoryStore;

use crate::error::{Result, TrackError};
use crate::snapshot::{Snapshot, SnapshotBuilder, SnapshotHandle};
use chrono::{DateTime, Utc};
use std::path::Path;

/// Persists snapshots keyed by `(root_path, taken_at)`.
///
/// At most one snapshot is stored per key.
pub trait SnapshotStore {
    /// Store a fully built snapshot as a baseline
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::DuplicateSnapshot`] if the key is already
    /// recorded, or a storage error if it cannot be written
    fn persist(&mut self, snapshot: &Snapshot) -> Result<SnapshotHandle>;

    /// Delete a baseline
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::NotFound`] if no snapshot has this handle
    fn erase(&mut self, handle: &SnapshotHandle) -> Result<()>;

    /// All baselines, in recording order
    ///
    /// # Errors
    ///
    /// Returns a storage error if the store cannot be read
    fn list_recorded(&self) -> Result<Vec<SnapshotHandle>>;

    /// Materialize a baseline
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::NotFound`] if no snapshot has this handle, or a
    /// storage error if it cannot be decoded
    fn load(&self, handle: &SnapshotHandle) -> Result<Snapshot>;

    /// Build a snapshot of `root` and persist it
    ///
    /// # Errors
    ///
    /// Returns any builder error unchanged; nothing is stored in that case
    fn record(&mut self, builder: &SnapshotBuilder, root: &Path) -> Result<SnapshotHandle> {
        let snapshot = builder.build(root)?;
        self.persist(&snapshot)
    }

    /// Resolve the handle of a stored baseline for a diff
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::NotFound`] if nothing is recorded under the key
    fn retrieve_for_diff(&self, root: &Path, taken_at: DateTime<Utc>) -> Result<SnapshotHandle> {
        self.list_recorded()?
            .into_iter()
            .find(|handle| handle.matches(root, taken_at))
            .ok_or_else(|| TrackError::NotFound {
                root: root.to_path_buf(),
                taken_at,
            })
    }

    /// Most recent baseline of `root`, if any
    ///
    /// # Errors
    ///
    /// Returns a storage error if the store cannot be read
    fn latest_for(&self, root: &Path) -> Result<Option<SnapshotHandle>> {
        Ok(self
            .list_recorded()?
            .into_iter()
            .filter(|handle| handle.root_path == root)
            .max_by_key(|handle| handle.taken_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use std::fs;
    use tempfile::TempDir;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    /// Behaviour every store must share
    fn exercise_contract<S: SnapshotStore>(store: &mut S) {
        assert!(store.list_recorded().unwrap().is_empty());

        let first = Snapshot::new("/r", at(10));
        let second = Snapshot::new("/r", at(20));
        let other = Snapshot::new("/q", at(10));

        let h1 = store.persist(&first).unwrap();
        let h2 = store.persist(&second).unwrap();
        let h3 = store.persist(&other).unwrap();
        assert_eq!(store.list_recorded().unwrap(), vec![h1.clone(), h2.clone(), h3]);

        let duplicate = store.persist(&first);
        assert!(matches!(duplicate, Err(TrackError::DuplicateSnapshot { .. })));

        assert_eq!(store.retrieve_for_diff(Path::new("/r"), at(20)).unwrap(), h2);
        assert!(
            store
                .retrieve_for_diff(Path::new("/r"), at(30))
                .unwrap_err()
                .is_not_found()
        );
        assert_eq!(store.latest_for(Path::new("/r")).unwrap(), Some(h2.clone()));
        assert_eq!(store.latest_for(Path::new("/none")).unwrap(), None);

        assert_eq!(store.load(&h1).unwrap(), first);

        store.erase(&h1).unwrap();
        assert!(store.erase(&h1).unwrap_err().is_not_found());
        assert!(store.load(&h1).unwrap_err().is_not_found());
        assert_eq!(store.list_recorded().unwrap().len(), 2);

        // The key becomes free again once erased
        store.persist(&first).unwrap();
    }

    #[test]
    fn test_memory_store_contract() {
        exercise_contract(&mut MemoryStore::new());
    }

    #[test]
    fn test_disk_store_contract() {
        let temp = TempDir::new().unwrap();
        exercise_contract(&mut DiskStore::open(temp.path(), 3).unwrap());
    }

    #[test]
    fn test_record_builds_and_persists() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("tree");
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::write(root.join("a.txt"), "a").unwrap();
        fs::write(root.join("sub/b.txt"), "b").unwrap();

        let mut store = MemoryStore::new();
        let handle = store.record(&SnapshotBuilder::default(), &root).unwrap();

        assert_eq!(handle.root_path, root);
        assert_eq!(store.load(&handle).unwrap().len(), 2);
    }

    #[test]
    fn test_record_failure_stores_nothing() {
        let temp = TempDir::new().unwrap();
        let mut store = MemoryStore::new();

        let result = store.record(&SnapshotBuilder::default(), &temp.path().join("missing"));

        assert!(matches!(result, Err(TrackError::Precondition { .. })));
        assert!(store.list_recorded().unwrap().is_empty());
    }

    #[test]
    fn test_latest_for_uses_timestamp_not_order() {
        let mut store = MemoryStore::new();
        let base = at(1_000);
        store.persist(&Snapshot::new("/r", base + TimeDelta::seconds(5))).unwrap();
        store.persist(&Snapshot::new("/r", base)).unwrap();

        let latest = store.latest_for(Path::new("/r")).unwrap().unwrap();
        assert_eq!(latest.taken_at, base + TimeDelta::seconds(5));
    }
}
