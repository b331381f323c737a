use super::check::{self, CheckOptions};
use super::context::CommandContext;
use super::{Terminal, UpdateMode, record, remove};
use crate::TrackerContext;
use crate::snapshot::SnapshotBuilder;
use crate::storage::SnapshotStore;
use crate::utils::normalize_root;
use anyhow::Result;
use std::io::{BufRead, Write};

const MAIN_OPTIONS: [&str; 4] = [
    "Record a directory",
    "Check for changes",
    "Remove a recorded directory",
    "Quit",
];

/// Execute menu command: the interactive record/check/remove loop
///
/// The store is opened for each action and closed again before the next
/// prompt, so other `track` processes can run between actions.
///
/// # Errors
///
/// Returns an error only if the terminal fails; action errors are printed
/// and the loop continues
pub fn execute<R: BufRead, W: Write>(ctx: &TrackerContext, term: &mut Terminal<R, W>) -> Result<()> {
    run(
        || ctx.open_store(),
        &ctx.snapshot_builder(),
        term,
        ctx.config.output.relative_paths,
    )
}

/// Menu loop over stores produced by `open_store`
///
/// # Errors
///
/// See [`execute`]
pub fn run<F, S, R, W>(
    mut open_store: F,
    builder: &SnapshotBuilder,
    term: &mut Terminal<R, W>,
    relative: bool,
) -> Result<()>
where
    F: FnMut() -> Result<S>,
    S: SnapshotStore,
    R: BufRead,
    W: Write,
{
    loop {
        let Some(choice) = term.choose("Tracker", &MAIN_OPTIONS)? else {
            return Ok(());
        };

        let result = match choice {
            0 => record_prompt(&mut open_store, builder, term),
            1 => open_store().and_then(|mut store| {
                let options = CheckOptions {
                    update: UpdateMode::Ask,
                    short: false,
                    relative,
                };
                check::run(&mut store, builder, term, None, options).map(drop)
            }),
            2 => open_store()
                .and_then(|mut store| remove::run(&mut store, term, None, false).map(drop)),
            _ => return Ok(()),
        };

        if let Err(e) = result {
            writeln!(term.out(), "Error: {e:#}")?;
        }
    }
}

fn record_prompt<F, S, R, W>(
    open_store: &mut F,
    builder: &SnapshotBuilder,
    term: &mut Terminal<R, W>,
) -> Result<()>
where
    F: FnMut() -> Result<S>,
    S: SnapshotStore,
    R: BufRead,
    W: Write,
{
    let Some(input) = term.read_line("Enter full path of directory: ")? else {
        return Ok(());
    };
    let root = normalize_root(&input)?;
    let mut store = open_store()?;
    record::record_into(&mut store, builder, &root, term.out()).map(drop)
}
