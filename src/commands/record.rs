use super::context::CommandContext;
use crate::TrackerContext;
use crate::snapshot::{SnapshotBuilder, SnapshotHandle};
use crate::storage::SnapshotStore;
use crate::utils::{normalize_root, plural};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Execute record command: snapshot a directory as a new baseline
///
/// # Errors
///
/// Returns an error if:
/// - The path is empty, missing, or not a directory
/// - The tree cannot be walked
/// - The store cannot be opened or written
pub fn execute<W: Write>(ctx: &TrackerContext, path: &str, out: &mut W) -> Result<SnapshotHandle> {
    let root = normalize_root(path)?;
    let mut store = ctx.open_store()?;
    record_into(&mut store, &ctx.snapshot_builder(), &root, out)
}

/// Record `root` into an already open store
///
/// # Errors
///
/// Returns an error if the tree cannot be walked or the store cannot be written
pub fn record_into<S, W>(
    store: &mut S,
    builder: &SnapshotBuilder,
    root: &Path,
    out: &mut W,
) -> Result<SnapshotHandle>
where
    S: SnapshotStore + ?Sized,
    W: Write,
{
    let snapshot = builder
        .build(root)
        .with_context(|| format!("Failed to record {}", root.display()))?;
    let handle = store.persist(&snapshot)?;

    writeln!(
        out,
        "Recorded {} ({} file{})",
        handle.root_path.display(),
        snapshot.len(),
        plural(snapshot.len())
    )?;
    Ok(handle)
}
