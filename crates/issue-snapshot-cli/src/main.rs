// crates/issue-snapshot-cli/src/main.rs
// ============================================================================
// Module: Issue Snapshot CLI Entry Point
// Description: Command dispatcher for the snapshot refresh job.
// Purpose: Select a source, run one refresh, report the outcome.
// Dependencies: clap, env_logger, issue-snapshot-cli
// ============================================================================

//! ## Overview
//! `issue-snapshot jira` and `issue-snapshot jsm` each run one full refresh
//! for their source system. Success prints a one-line completion summary
//! with the record count; any fatal condition is written to stderr and the
//! process exits non-zero with no partial commit.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use clap::Subcommand;
use issue_snapshot_cli::RefreshError;
use issue_snapshot_cli::Source;
use issue_snapshot_cli::run_refresh;
use issue_snapshot_config::EnvSource;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "issue-snapshot", version, about = "Ticketing snapshot refresh job")]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Refresh the `jira_open_issues` snapshot.
    Jira,
    /// Refresh the `jsm_open_issues` snapshot.
    Jsm,
}

impl Commands {
    /// Maps the subcommand onto its pipeline source.
    const fn source(&self) -> Source {
        match self {
            Self::Jira => Source::Jira,
            Self::Jsm => Source::Jsm,
        }
    }
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = write_stderr_line(&format!("issue-snapshot: {err}"));
            ExitCode::FAILURE
        }
    }
}

/// Executes the selected refresh and prints the completion summary.
fn run() -> Result<(), RefreshError> {
    let cli = Cli::parse();
    let source = cli.command.source();
    let env = EnvSource::process();
    let count = run_refresh(source, &env)?;
    let _ = write_stdout_line(&format!("{} refresh complete: {count} issues", source.label()));
    Ok(())
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes one line to locked stdout.
fn write_stdout_line(line: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    out.write_all(line.as_bytes())?;
    out.write_all(b"\n")?;
    out.flush()
}

/// Writes one line to locked stderr.
fn write_stderr_line(line: &str) -> io::Result<()> {
    let mut err = io::stderr().lock();
    err.write_all(line.as_bytes())?;
    err.write_all(b"\n")?;
    err.flush()
}
