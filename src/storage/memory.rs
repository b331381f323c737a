use super::SnapshotStore;
use crate::error::{Result, TrackError};
use crate::snapshot::{Snapshot, SnapshotHandle};

/// Store that keeps every snapshot in memory, in insertion order.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    snapshots: Vec<Snapshot>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, handle: &SnapshotHandle) -> Option<usize> {
        self.snapshots
            .iter()
            .position(|s| handle.matches(s.root_path(), s.taken_at()))
    }
}

fn not_found(handle: &SnapshotHandle) -> TrackError {
    TrackError::NotFound {
        root: handle.root_path.clone(),
        taken_at: handle.taken_at,
    }
}

impl SnapshotStore for MemoryStore {
    fn persist(&mut self, snapshot: &Snapshot) -> Result<SnapshotHandle> {
        let handle = snapshot.handle();
        if self.position(&handle).is_some() {
            return Err(TrackError::DuplicateSnapshot {
                root: handle.root_path,
                taken_at: handle.taken_at,
            });
        }
        self.snapshots.push(snapshot.clone());
        Ok(handle)
    }

    fn erase(&mut self, handle: &SnapshotHandle) -> Result<()> {
        let index = self.position(handle).ok_or_else(|| not_found(handle))?;
        self.snapshots.remove(index);
        Ok(())
    }

    fn list_recorded(&self) -> Result<Vec<SnapshotHandle>> {
        Ok(self.snapshots.iter().map(Snapshot::handle).collect())
    }

    fn load(&self, handle: &SnapshotHandle) -> Result<Snapshot> {
        self.position(handle)
            .map(|index| self.snapshots[index].clone())
            .ok_or_else(|| not_found(handle))
    }
}
