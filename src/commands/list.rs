use super::context::CommandContext;
use crate::TrackerContext;
use crate::storage::SnapshotStore;
use anyhow::Result;
use std::io::Write;

/// Execute list command: print recorded baselines, numbered from 1
///
/// # Errors
///
/// Returns an error if the store cannot be opened or read
pub fn execute<W: Write>(ctx: &TrackerContext, out: &mut W) -> Result<()> {
    let store = ctx.open_store()?;
    write_list(&store, out)
}

fn write_list<S: SnapshotStore + ?Sized, W: Write>(store: &S, out: &mut W) -> Result<()> {
    let recorded = store.list_recorded()?;
    if recorded.is_empty() {
        writeln!(out, "No directory is recorded")?;
        return Ok(());
    }

    for (i, handle) in recorded.iter().enumerate() {
        writeln!(out, "{}) {handle}", i + 1)?;
    }
    Ok(())
}
