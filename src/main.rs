use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{Generator, generate};
use colored::Colorize;
use dirtrack::cli::{Cli, Commands};
use dirtrack::commands::{self, Terminal, UpdateMode};
use dirtrack::output::{self, Verbosity};
use dirtrack::{LOG_ENV, TrackerContext};
use std::io;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e:#}", "Error:".red().bold());
        process::exit(1);
    }
}

/// Install the stderr log subscriber
///
/// `DIRTRACK_LOG` takes any `EnvFilter` directive; `-v` defaults to debug.
fn init_tracing(verbose: bool) {
    let default = if verbose { "dirtrack=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .try_init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);
    output::set_verbosity(if cli.quiet {
        Verbosity::Quiet
    } else if cli.verbose {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    });

    let command = cli.command.unwrap_or(Commands::Menu);

    if let Commands::Completion { shell } = command {
        print_completions(shell, &mut Cli::command());
        return Ok(());
    }

    let mut ctx = TrackerContext::new()?;
    output::verbose(&format!("Using store at {}", ctx.store_path.display()));

    let mut term = Terminal::stdio();

    match command {
        Commands::Record { path } => {
            commands::record::execute(&ctx, &path, term.out())?;
        }
        Commands::List => commands::list::execute(&ctx, term.out())?,
        Commands::Check {
            baseline,
            yes,
            no_update,
            short,
        } => {
            let update = if yes {
                UpdateMode::Always
            } else if no_update {
                UpdateMode::Never
            } else {
                UpdateMode::Ask
            };
            commands::check::execute(&ctx, &mut term, baseline.as_deref(), update, short)?;
        }
        Commands::Remove { baseline, yes } => {
            commands::remove::execute(&ctx, &mut term, baseline.as_deref(), yes)?;
        }
        Commands::Menu => commands::menu::execute(&ctx, &mut term)?,
        Commands::Config {
            key,
            value,
            unset,
            list,
        } => commands::config::execute(
            &mut ctx,
            key.as_deref(),
            value.as_deref(),
            unset,
            list,
            term.out(),
        )?,
        Commands::Completion { .. } => {}
    }

    Ok(())
}

fn print_completions<G: Generator>(g: G, cmd: &mut clap::Command) {
    generate(g, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
