use super::Terminal;
use crate::snapshot::SnapshotHandle;
use crate::storage::SnapshotStore;
use crate::utils::normalize_root;
use anyhow::{Context, Result, bail};
use std::io::{BufRead, Write};

/// Resolve a baseline selector to a handle
///
/// A selector is either a 1-based number as printed by `track list`, or a
/// directory path naming the most recent baseline of that root. Numbers win
/// over relative paths that look like numbers.
///
/// # Errors
///
/// Returns an error if the number is out of range or nothing is recorded
/// for the path
pub fn resolve<S: SnapshotStore + ?Sized>(store: &S, selector: &str) -> Result<SnapshotHandle> {
    let selector = selector.trim();

    if let Ok(number) = selector.parse::<usize>() {
        let recorded = store.list_recorded()?;
        return number
            .checked_sub(1)
            .and_then(|index| recorded.get(index).cloned())
            .with_context(|| {
                format!(
                    "No baseline number {number} ({} recorded)",
                    recorded.len()
                )
            });
    }

    let root = normalize_root(selector)?;
    match store.latest_for(&root)? {
        Some(handle) => Ok(handle),
        None => bail!("No baseline recorded for {}", root.display()),
    }
}

/// Let the user pick a baseline from a numbered menu
///
/// Returns `None` if nothing is recorded, the user picks `Quit`, or input
/// ends.
///
/// # Errors
///
/// Returns an error if the store cannot be read or the terminal fails
pub fn pick<S, R, W>(term: &mut Terminal<R, W>, store: &S) -> Result<Option<SnapshotHandle>>
where
    S: SnapshotStore + ?Sized,
    R: BufRead,
    W: Write,
{
    let mut recorded = store.list_recorded()?;
    if recorded.is_empty() {
        writeln!(term.out(), "No directory is recorded")?;
        return Ok(None);
    }

    let mut options: Vec<String> = recorded.iter().map(ToString::to_string).collect();
    options.push("Quit".to_string());

    match term.choose("Select a recorded directory", &options)? {
        Some(index) if index < recorded.len() => Ok(Some(recorded.swap_remove(index))),
        _ => Ok(None),
    }
}

/// [`resolve`] the selector if given, otherwise [`pick`] interactively
///
/// # Errors
///
/// Returns an error from either path
pub fn select<S, R, W>(
    term: &mut Terminal<R, W>,
    store: &S,
    selector: Option<&str>,
) -> Result<Option<SnapshotHandle>>
where
    S: SnapshotStore + ?Sized,
    R: BufRead,
    W: Write,
{
    match selector {
        Some(selector) => resolve(store, selector).map(Some),
        None => pick(term, store),
    }
}
