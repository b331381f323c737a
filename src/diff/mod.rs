//! Snapshot comparison.
//!
//! Two snapshots of the same root are joined on [`FileIdentity`] and every
//! identity is tested against five independent predicates:
//!
//! | Category | Predicate |
//! |---|---|
//! | added    | only in the new snapshot |
//! | deleted  | only in the old snapshot |
//! | modified | in both, mtime differs |
//! | moved    | in both, directory differs |
//! | renamed  | in both, file name differs |
//!
//! The categories overlap on purpose: a file that was moved, renamed and
//! touched shows up in three lists at once.
//!
//! [`FileIdentity`]: crate::snapshot::FileIdentity

/// Five-category change report and its rendering
pub mod report;

pub use report::{ChangeKind, ChangeReport, Relocation};

use crate::snapshot::{FileRecord, Snapshot};
use tracing::{Level, debug, span};

/// Which of the per-file predicates hold for an identity present in both snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChangeFlags {
    /// Modification time differs
    pub modified: bool,
    /// Containing directory differs
    pub moved: bool,
    /// File name differs
    pub renamed: bool,
}

impl ChangeFlags {
    /// Evaluate the predicates for one identity.
    #[must_use]
    pub fn between(old: &FileRecord, new: &FileRecord) -> Self {
        Self {
            modified: old.mtime != new.mtime,
            moved: old.dir != new.dir,
            renamed: old.filename != new.filename,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !(self.modified || self.moved || self.renamed)
    }
}

/// Per-identity outcome of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileChange<'a> {
    /// Identity only present in the new snapshot
    Added(&'a FileRecord),
    /// Identity only present in the old snapshot
    Deleted(&'a FileRecord),
    /// Identity present in both with at least one flag set
    Changed {
        /// Record in the old snapshot
        old: &'a FileRecord,
        /// Record in the new snapshot
        new: &'a FileRecord,
        /// Predicates that hold
        flags: ChangeFlags,
    },
}

/// Join two snapshots on identity and return every identity that changed.
///
/// Unchanged identities are omitted. Order is unspecified.
#[must_use]
pub fn compare<'a>(old: &'a Snapshot, new: &'a Snapshot) -> Vec<FileChange<'a>> {
    let mut changes = Vec::new();

    for old_record in old.records() {
        match new.get(&old_record.identity) {
            None => changes.push(FileChange::Deleted(old_record)),
            Some(new_record) => {
                let flags = ChangeFlags::between(old_record, new_record);
                if !flags.is_empty() {
                    changes.push(FileChange::Changed {
                        old: old_record,
                        new: new_record,
                        flags,
                    });
                }
            }
        }
    }

    changes.extend(
        new.records()
            .filter(|record| !old.contains(&record.identity))
            .map(FileChange::Added),
    );

    changes
}

/// Compare two snapshots of the same root.
///
/// Both snapshots are only borrowed. The caller is responsible for passing
/// snapshots of the same root; the comparison itself cannot fail.
#[must_use]
pub fn diff(old: &Snapshot, new: &Snapshot) -> ChangeReport {
    let span = span!(
        Level::DEBUG,
        "diff",
        root = %old.root_path().display(),
        old = old.len(),
        new = new.len()
    );
    let _guard = span.enter();

    let report = ChangeReport::from_changes(compare(old, new));

    debug!(
        added = report.added.len(),
        deleted = report.deleted.len(),
        modified = report.modified.len(),
        moved = report.moved.len(),
        renamed = report.renamed.len(),
        "Snapshots compared"
    );

    report
}
