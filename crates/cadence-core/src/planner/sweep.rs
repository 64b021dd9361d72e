//! Sweeps and scheduler cycles for the Planner.
//!
//! A sweep takes the store lock twice per task at most: once to hand out
//! every eligible task and once per task to record its outcome. The executor
//! itself runs on the blocking pool with no lock held, bounded by the
//! planner's executor timeout.

use std::sync::Arc;

use jiff::Timestamp;
use log::{debug, info, warn};
use tokio::{task, time};

use super::Planner;
use crate::{
    error::{ExecutionError, Result},
    executor::Executor,
    journal::{JournalEntry, JournalKind},
    models::{TaskKind, TaskPlan, TaskStatus},
    store::{Dispatch, SweepSummary},
};

/// Outcome of one scheduler tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleSummary {
    pub sweep: SweepSummary,
    /// Changes drained from the log, zero unless the log was significant
    pub drained_changes: usize,
}

impl Planner {
    /// Run one sweep, calling the executor outside the store lock.
    ///
    /// Concurrent calls are serialized. A failing, panicking or timed-out
    /// executor call marks only its own task failed.
    pub async fn run_sweep<E>(&self, executor: Arc<E>) -> Result<SweepSummary>
    where
        E: Executor + ?Sized + 'static,
    {
        let _sweep = self.sweep_lock.lock().await;

        let dispatches = self.store().begin_sweep(Timestamp::now());
        let mut summary = SweepSummary {
            dispatched: dispatches.len(),
            ..SweepSummary::default()
        };
        if dispatches.is_empty() {
            debug!("Sweep found nothing to run");
            return Ok(summary);
        }

        for dispatch in &dispatches {
            let outcome = self.invoke(Arc::clone(&executor), dispatch).await;
            summary.count(outcome.is_ok());

            let finished = self.store().finish_dispatch(dispatch, outcome).cloned();
            if let Some(plan) = finished {
                self.journal_outcome(&plan);
            }
        }

        info!(
            "Sweep ran {} tasks: {} succeeded, {} failed",
            summary.dispatched, summary.succeeded, summary.failed
        );
        Ok(summary)
    }

    async fn invoke<E>(
        &self,
        executor: Arc<E>,
        dispatch: &Dispatch,
    ) -> std::result::Result<String, ExecutionError>
    where
        E: Executor + ?Sized + 'static,
    {
        debug!("Executing {} task {}", dispatch.kind, dispatch.id);
        let command = dispatch.command.clone();
        let handle = task::spawn_blocking(move || executor.execute(&command));

        match time::timeout(self.executor_timeout.unsigned_abs(), handle).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(join_error)) => {
                warn!("Executor for task {} did not finish: {join_error}", dispatch.id);
                Err(ExecutionError::new(format!("executor panicked: {join_error}")))
            }
            Err(_) => {
                // The blocking thread cannot be cancelled and finishes on its own.
                warn!(
                    "Task {} exceeded the {:#} executor timeout",
                    dispatch.id, self.executor_timeout
                );
                Err(ExecutionError::timed_out(self.executor_timeout))
            }
        }
    }

    fn journal_outcome(&self, plan: &TaskPlan) {
        self.journal_record(|| match (plan.kind, plan.status) {
            (TaskKind::Once, TaskStatus::Completed) => JournalEntry::new(
                JournalKind::TaskCompleted,
                Some(&plan.id),
                plan.result.clone().unwrap_or_default(),
            ),
            (TaskKind::Once, _) => JournalEntry::new(
                JournalKind::TaskFailed,
                Some(&plan.id),
                plan.error.clone().unwrap_or_default(),
            ),
            (TaskKind::Periodic, status) => JournalEntry::new(
                JournalKind::TaskExecuted,
                Some(&plan.id),
                format!("Periodic task run #{} {status}", plan.exec_count),
            )
            .with_data(serde_json::json!({
                "status": status,
                "exec_count": plan.exec_count,
                "next_run": plan.next_run,
                "error": plan.error,
            })),
        });
    }

    /// One scheduler tick: sweep, save, then drain a significant change log.
    ///
    /// A save failure is returned only after the drain, so in-memory state
    /// and the journal stay current even when the disk does not.
    pub async fn run_cycle<E>(&self, executor: Arc<E>) -> Result<CycleSummary>
    where
        E: Executor + ?Sized + 'static,
    {
        let sweep = self.run_sweep(executor).await?;
        let saved = self.save_tasks().await;
        if let Err(e) = &saved {
            warn!("Failed to save tasks: {e}");
        }

        let drained_changes = self.drain_significant_changes();
        saved?;

        Ok(CycleSummary {
            sweep,
            drained_changes,
        })
    }

    /// Run one cycle if anything is waiting from a previous session.
    ///
    /// Returns `None` when there was nothing to resume.
    pub async fn resume<E>(&self, executor: Arc<E>) -> Result<Option<CycleSummary>>
    where
        E: Executor + ?Sized + 'static,
    {
        let resumable = self.resumable_tasks();
        if resumable.is_empty() {
            return Ok(None);
        }

        info!("Resuming {} tasks from previous session", resumable.len());
        self.run_cycle(executor).await.map(Some)
    }

    fn drain_significant_changes(&self) -> usize {
        if !self.changes.has_significant_changes() {
            return 0;
        }

        let changes = self.changes.get_and_clear_changes();
        info!("Significant changes detected ({})", changes.len());
        for change in &changes {
            debug!("{change}");
            self.journal_record(|| {
                let entry = JournalEntry::new(
                    JournalKind::TaskChange,
                    Some(&change.task_id),
                    change.to_string(),
                );
                match serde_json::to_value(change) {
                    Ok(data) => entry.with_data(data),
                    Err(_) => entry,
                }
            });
        }
        changes.len()
    }
}
