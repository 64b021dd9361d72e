use std::path::PathBuf;

use cadence_core::JournalKind;
use clap::{Args as ClapArgs, Parser, Subcommand};

/// Command-line front end for the cadence task scheduling engine
///
/// Cadence keeps a plan for every submitted task, runs once tasks until
/// they succeed and periodic tasks on their interval, and persists its
/// state between invocations. Use `serve` to run the scheduler loop, or the
/// other commands to submit, sweep and inspect tasks one step at a time.
#[derive(Parser)]
#[command(version, about, name = "cadence")]
pub struct Args {
    /// Directory for task snapshots and the journal. Defaults to
    /// $XDG_DATA_HOME/cadence
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Configuration file. Defaults to $XDG_CONFIG_HOME/cadence/cadence.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the cadence CLI
///
/// Without a command, `report` is shown.
#[derive(Subcommand)]
pub enum Commands {
    /// Submit assignments from a JSON file, or `-` for stdin
    Submit(SubmitArgs),
    /// Run every due task once, then save
    Sweep,
    /// Show completed, pending and failed tasks
    Report(ReportArgs),
    /// List every task with its schedule
    #[command(alias = "ls")]
    List,
    /// Remove a completed once task
    #[command(alias = "rm")]
    Remove(RemoveArgs),
    /// Show recent journal entries
    History(HistoryArgs),
    /// Run the scheduler, reading assignment batches from stdin
    Serve,
}

/// Submit a batch of assignments.
///
/// The payload is a JSON array of assignments or a `{"tasks": [...]}`
/// object.
#[derive(ClapArgs)]
pub struct SubmitArgs {
    /// Path to the payload, or `-` to read stdin
    pub file: PathBuf,
}

#[derive(ClapArgs, Default)]
pub struct ReportArgs {
    /// Write the markdown report to a file instead of the terminal
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long, conflicts_with = "output")]
    pub json: bool,
}

#[derive(ClapArgs)]
pub struct RemoveArgs {
    /// ID of the completed once task
    pub id: String,
}

#[derive(ClapArgs)]
pub struct HistoryArgs {
    /// Number of entries to show
    #[arg(short = 'n', long, default_value_t = 20)]
    pub limit: usize,

    /// Only show entries of this kind (e.g. task_failed)
    #[arg(long)]
    pub kind: Option<JournalKind>,
}
