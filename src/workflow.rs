//! Check a baseline for changes and optionally replace it.
//!
//! [`check_for_changes`] resolves the baseline once, builds a fresh snapshot
//! of the same root and diffs the two. The resulting [`PendingUpdate`] owns
//! the fresh snapshot and the resolved handle until the caller either
//! [applies](PendingUpdate::apply) or [discards](PendingUpdate::discard) it.
//! The fresh snapshot is never written to the store unless applied.

use crate::diff::{self, ChangeReport};
use crate::error::Result;
use crate::snapshot::{Snapshot, SnapshotBuilder, SnapshotHandle};
use crate::storage::SnapshotStore;
use tracing::{Level, info, span};

/// Outcome of a check, waiting for the caller's decision.
#[derive(Debug)]
#[must_use = "a pending update does nothing unless applied or discarded"]
pub struct PendingUpdate {
    baseline: SnapshotHandle,
    current: Snapshot,
    report: ChangeReport,
}

/// Diff the baseline `(baseline.root_path, baseline.taken_at)` against the
/// tree as it is now
///
/// # Errors
///
/// Returns an error if:
/// - The baseline is not recorded ([`TrackError::NotFound`])
/// - The baseline cannot be loaded
/// - The fresh snapshot cannot be built
///
/// Nothing in the store changes in any of these cases.
///
/// [`TrackError::NotFound`]: crate::error::TrackError::NotFound
pub fn check_for_changes<S: SnapshotStore + ?Sized>(
    store: &S,
    builder: &SnapshotBuilder,
    baseline: &SnapshotHandle,
) -> Result<PendingUpdate> {
    let span = span!(Level::DEBUG, "check_for_changes", baseline = %baseline);
    let _guard = span.enter();

    let baseline = store.retrieve_for_diff(&baseline.root_path, baseline.taken_at)?;
    let old = store.load(&baseline)?;
    let current = builder.build(&baseline.root_path)?;
    let report = diff::diff(&old, &current);

    Ok(PendingUpdate {
        baseline,
        current,
        report,
    })
}

impl PendingUpdate {
    /// The baseline that was diffed
    #[must_use]
    pub const fn baseline(&self) -> &SnapshotHandle {
        &self.baseline
    }

    /// The freshly built snapshot
    #[must_use]
    pub const fn current(&self) -> &Snapshot {
        &self.current
    }

    #[must_use]
    pub const fn report(&self) -> &ChangeReport {
        &self.report
    }

    /// False when the tree is unchanged since the baseline
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.report.is_empty()
    }

    /// Make the fresh snapshot the new baseline
    ///
    /// The fresh snapshot is persisted first, then the exact baseline that
    /// was diffed is erased. If persisting fails the old baseline is kept.
    ///
    /// # Errors
    ///
    /// Returns any store error from persisting or erasing
    pub fn apply<S: SnapshotStore + ?Sized>(self, store: &mut S) -> Result<SnapshotHandle> {
        let span = span!(Level::DEBUG, "apply_update", baseline = %self.baseline);
        let _guard = span.enter();

        let handle = store.persist(&self.current)?;
        store.erase(&self.baseline)?;

        info!(old = %self.baseline, new = %handle, "Baseline replaced");
        Ok(handle)
    }

    /// Drop the fresh snapshot and keep the baseline
    pub fn discard(self) -> SnapshotHandle {
        self.baseline
    }
}
