//! fsmi - Finite State Machine Interpreter
//!
//! Loads a tabular FSM description and runs one line of input through it.

mod config;
mod input;

use clap::Parser;
use colored::Colorize;
use config::Config;
use fsmi_core::{execute, load_table, symbols, CoreError, LoadOptions, Table};
use input::InputSource;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fsmi")]
#[command(about = "Run input through a finite state machine description")]
#[command(version)]
struct Cli {
    /// FSM description file
    description: PathBuf,

    /// Input file (reads one line interactively when omitted)
    input: Option<PathBuf>,

    /// Reject dangling destinations and reopened states
    #[arg(long)]
    strict: bool,

    /// YAML configuration file
    #[arg(short, long, env = "FSMI_CONFIG")]
    config: Option<PathBuf>,

    /// Print the loaded table as JSON and exit
    #[arg(long)]
    dump: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}: {}", "Error".red(), e);
            std::process::exit(1);
        }
    };
    if cli.strict {
        config.load.strict = true;
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log.filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let table = match load_description(&cli.description, config.load_options()) {
        Ok(table) => table,
        Err(e) => {
            let stdout = std::io::stdout();
            report_load_error(e, &mut stdout.lock())?;
            return Ok(());
        }
    };

    if cli.dump {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    let line = match InputSource::from_arg(cli.input).read_line() {
        Ok(line) => line,
        Err(e) => {
            eprintln!("{}: {}", "Error".red(), e);
            return Ok(());
        }
    };

    let stdout = std::io::stdout();
    interpret(&table, &line, &mut stdout.lock())?;
    Ok(())
}

/// Loads the description, degrading to an empty table when the file is
/// missing.
fn load_description(path: &Path, options: LoadOptions) -> Result<Table, CoreError> {
    let table = match load_table(path, options) {
        Ok(table) => table,
        Err(CoreError::SourceNotFound { path, source }) => {
            eprintln!(
                "{}: {}: {}",
                "File not found".red(),
                path.display(),
                source
            );
            return Ok(Table::default());
        }
        Err(e) => return Err(e),
    };

    for state_no in table.duplicate_state_nos() {
        tracing::info!(
            "state {} is described by more than one group; only the first is reachable",
            state_no
        );
    }
    for (index, transition) in table.dangling_transitions() {
        tracing::info!(
            "state {} (entry {}) has a transition on '{}' to missing state {}",
            table.states()[index].state_no,
            index,
            transition.input,
            transition.next
        );
    }

    Ok(table)
}

/// Writes the notice for an unusable description. Errors other than a
/// malformed description are handed back to the caller.
fn report_load_error<W: Write>(err: CoreError, out: &mut W) -> Result<(), CoreError> {
    if !err.is_bad_description() {
        return Err(err);
    }

    tracing::debug!("{}: {}", err.error_code(), err);
    writeln!(out, "Bad description")?;
    out.flush()?;
    Ok(())
}

/// Runs `line` through `table`, writing outputs and the rejection notice.
fn interpret<W: Write>(table: &Table, line: &str, out: &mut W) -> Result<(), CoreError> {
    let result = execute(table, symbols(line), |output| out.write_all(output.as_bytes()));

    match result {
        Ok(summary) => {
            tracing::debug!(
                "accepted {} symbols, ended in state {}",
                summary.consumed,
                summary.final_state_no
            );
        }
        Err(e) if e.is_rejection() => {
            tracing::debug!("{}: {}", e.error_code(), e);
            writeln!(out, "Bad input")?;
        }
        Err(e) => return Err(e),
    }

    out.flush()?;
    Ok(())
}
