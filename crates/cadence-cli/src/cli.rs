//! Handlers for the one-shot CLI commands.
//!
//! Each handler works on a planner that `main` has already loaded from the
//! data directory, renders markdown from the core display types and saves
//! whenever it changed the store.

use std::{
    fs,
    io::{self, Read},
    path::Path,
    sync::Arc,
};

use anyhow::{bail, Context, Result};
use cadence_core::{
    display::{JournalEntries, OperationStatus, Plans, ReportMarkdown},
    models::parse_assignments,
    write_report, Executor, Planner,
};

use crate::{
    args::{HistoryArgs, RemoveArgs, ReportArgs, SubmitArgs},
    renderer::TerminalRenderer,
};

/// Command handlers sharing one planner and renderer.
pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer) -> Self {
        Self { planner, renderer }
    }

    /// Give up the handlers and keep the planner, for `serve`.
    pub fn into_planner(self) -> Planner {
        self.planner
    }

    pub async fn submit(&self, args: SubmitArgs) -> Result<()> {
        let payload = read_payload(&args.file)?;
        let assignments = parse_assignments(&payload)
            .with_context(|| format!("Invalid assignment payload in {}", args.file.display()))?;

        let created = self.planner.submit(&assignments);
        self.planner
            .save_tasks()
            .await
            .context("Failed to save tasks")?;

        let status = OperationStatus::success(format!(
            "Accepted {created} of {} assignments",
            assignments.len()
        ));
        self.renderer.render(&status.to_string())
    }

    pub async fn sweep<E>(&self, executor: Arc<E>) -> Result<()>
    where
        E: Executor + 'static,
    {
        let cycle = self
            .planner
            .run_cycle(executor)
            .await
            .context("Sweep failed")?;

        let sweep = cycle.sweep;
        let status = if sweep.failed == 0 {
            OperationStatus::success(format!(
                "Ran {} tasks: {} succeeded",
                sweep.dispatched, sweep.succeeded
            ))
        } else {
            OperationStatus::failure(format!(
                "Ran {} tasks: {} succeeded, {} failed",
                sweep.dispatched, sweep.succeeded, sweep.failed
            ))
        };
        self.renderer.render(&status.to_string())
    }

    pub fn report(&self, args: ReportArgs) -> Result<()> {
        let report = self.planner.report();

        if args.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        match args.output {
            Some(path) => {
                write_report(&report, &path)
                    .with_context(|| format!("Failed to write report to {}", path.display()))?;
                let status =
                    OperationStatus::success(format!("Report written to {}", path.display()));
                self.renderer.render(&status.to_string())
            }
            None => self.renderer.render(&ReportMarkdown(&report).to_string()),
        }
    }

    pub fn list(&self) -> Result<()> {
        let plans = Plans(self.planner.all_plans());
        self.renderer.render(&format!("# Tasks\n\n{plans}"))
    }

    pub async fn remove(&self, args: RemoveArgs) -> Result<()> {
        if !self.planner.remove_completed_task(&args.id) {
            bail!("Task {} is not a completed once task", args.id);
        }
        self.planner
            .save_tasks()
            .await
            .context("Failed to save tasks")?;

        let status = OperationStatus::success(format!("Removed task {}", args.id));
        self.renderer.render(&status.to_string())
    }

    pub fn history(&self, args: HistoryArgs) -> Result<()> {
        let Some(journal) = self.planner.journal() else {
            bail!("No journal available without a data directory");
        };

        let entries = match args.kind {
            Some(kind) => journal.read_by_kind(kind, args.limit),
            None => journal.read_recent(args.limit),
        }
        .context("Failed to read journal")?;

        let title = match args.kind {
            Some(kind) => format!("# History: {kind}"),
            None => "# History".to_string(),
        };
        self.renderer
            .render(&format!("{title}\n\n{}", JournalEntries(entries)))
    }
}

/// Read a payload from `path`, or stdin when `path` is `-`.
fn read_payload(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut payload = String::new();
        io::stdin()
            .read_to_string(&mut payload)
            .context("Failed to read assignments from stdin")?;
        return Ok(payload);
    }

    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
