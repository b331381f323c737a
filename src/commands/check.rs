use super::context::CommandContext;
use super::{Terminal, UpdateMode, select};
use crate::TrackerContext;
use crate::output;
use crate::snapshot::{SnapshotBuilder, SnapshotHandle};
use crate::storage::SnapshotStore;
use crate::workflow;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// Options for a check run
#[derive(Debug, Clone, Copy)]
pub struct CheckOptions {
    /// Whether to replace the baseline afterwards
    pub update: UpdateMode,
    /// One line per entry instead of grouped sections
    pub short: bool,
    /// Print paths relative to the baseline root
    pub relative: bool,
}

/// What a check run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// No baseline was selected
    Cancelled,
    /// The tree matches the baseline
    Unchanged(SnapshotHandle),
    /// Changes were reported and the baseline kept
    Kept(SnapshotHandle),
    /// Changes were reported and the baseline replaced by this handle
    Updated(SnapshotHandle),
}

/// Execute check command: report changes since a baseline
///
/// # Errors
///
/// Returns an error if:
/// - The selector does not name a recorded baseline
/// - The baseline cannot be loaded or the tree cannot be walked
/// - Replacing the baseline fails
pub fn execute<R: BufRead, W: Write>(
    ctx: &TrackerContext,
    term: &mut Terminal<R, W>,
    selector: Option<&str>,
    update: UpdateMode,
    short: bool,
) -> Result<CheckOutcome> {
    let mut store = ctx.open_store()?;
    let options = CheckOptions {
        update,
        short,
        relative: ctx.config.output.relative_paths,
    };
    run(&mut store, &ctx.snapshot_builder(), term, selector, options)
}

/// Check a baseline in `store`
///
/// # Errors
///
/// See [`execute`]
pub fn run<S, R, W>(
    store: &mut S,
    builder: &SnapshotBuilder,
    term: &mut Terminal<R, W>,
    selector: Option<&str>,
    options: CheckOptions,
) -> Result<CheckOutcome>
where
    S: SnapshotStore + ?Sized,
    R: BufRead,
    W: Write,
{
    let Some(baseline) = select::select(term, &*store, selector)? else {
        return Ok(CheckOutcome::Cancelled);
    };

    let pending = workflow::check_for_changes(&*store, builder, &baseline)
        .with_context(|| format!("Failed to check {baseline}"))?;

    if !pending.has_changes() {
        writeln!(term.out(), "No changes since {baseline}")?;
        return Ok(CheckOutcome::Unchanged(pending.discard()));
    }

    let report = if options.relative {
        pending.report().relative_to(&baseline.root_path)
    } else {
        pending.report().clone()
    };
    output::write_report(term.out(), &report, options.short)?;

    let apply = match options.update {
        UpdateMode::Always => true,
        UpdateMode::Never => false,
        UpdateMode::Ask => term.confirm("Update baseline?")?,
    };

    if !apply {
        return Ok(CheckOutcome::Kept(pending.discard()));
    }

    let handle = pending
        .apply(store)
        .with_context(|| format!("Failed to update {baseline}"))?;
    writeln!(term.out(), "Updated baseline: {handle}")?;
    Ok(CheckOutcome::Updated(handle))
}
