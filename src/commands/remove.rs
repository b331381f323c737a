use super::context::CommandContext;
use super::{Terminal, select};
use crate::TrackerContext;
use crate::snapshot::SnapshotHandle;
use crate::storage::SnapshotStore;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// Execute remove command: erase a baseline
///
/// Asks for confirmation when the baseline came from a selector and `yes`
/// is not set; picking from the menu is already an explicit choice.
///
/// # Errors
///
/// Returns an error if the selector does not name a recorded baseline or the
/// store cannot be updated
pub fn execute<R: BufRead, W: Write>(
    ctx: &TrackerContext,
    term: &mut Terminal<R, W>,
    selector: Option<&str>,
    yes: bool,
) -> Result<Option<SnapshotHandle>> {
    let mut store = ctx.open_store()?;
    run(&mut store, term, selector, yes)
}

/// Erase a baseline from `store`
///
/// # Errors
///
/// See [`execute`]
pub fn run<S, R, W>(
    store: &mut S,
    term: &mut Terminal<R, W>,
    selector: Option<&str>,
    yes: bool,
) -> Result<Option<SnapshotHandle>>
where
    S: SnapshotStore + ?Sized,
    R: BufRead,
    W: Write,
{
    let Some(handle) = select::select(term, &*store, selector)? else {
        return Ok(None);
    };

    if selector.is_some() && !yes && !term.confirm(&format!("Remove {handle}?"))? {
        writeln!(term.out(), "Nothing removed")?;
        return Ok(None);
    }

    store
        .erase(&handle)
        .with_context(|| format!("Failed to remove {handle}"))?;
    writeln!(term.out(), "Removed {handle}")?;
    Ok(Some(handle))
}
