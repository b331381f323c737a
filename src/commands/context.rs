use anyhow::{Context, Result};

use crate::TrackerContext;
use crate::snapshot::SnapshotBuilder;
use crate::storage::DiskStore;

/// Trait providing common operations for command modules
pub trait CommandContext {
    /// Opens the configured snapshot store, holding its lock until dropped
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be created, is locked by another
    /// process, or its registry cannot be read
    fn open_store(&self) -> Result<DiskStore>;

    /// Creates a `SnapshotBuilder` with the current configuration
    fn snapshot_builder(&self) -> SnapshotBuilder;
}

impl CommandContext for TrackerContext {
    fn open_store(&self) -> Result<DiskStore> {
        DiskStore::open(&self.store_path, self.config.core.compression_level).with_context(|| {
            format!("Failed to open snapshot store at {}", self.store_path.display())
        })
    }

    fn snapshot_builder(&self) -> SnapshotBuilder {
        SnapshotBuilder::from_config(&self.config.tracking)
    }
}
