//! Intake, removal and queries for the Planner.

use jiff::Timestamp;
use log::info;

use super::Planner;
use crate::{
    journal::{JournalEntry, JournalKind},
    models::{Assignment, Report, TaskPlan},
};

impl Planner {
    /// Accept a batch of assignments.
    ///
    /// Unseen IDs become pending plans; IDs already present in their kind's
    /// collection are ignored. Returns the number of plans created.
    pub fn submit(&self, assignments: &[Assignment]) -> usize {
        self.submit_at(assignments, Timestamp::now())
    }

    /// Like [`Planner::submit`], with an explicit creation time.
    pub fn submit_at(&self, assignments: &[Assignment], now: Timestamp) -> usize {
        let created = self.store().intake_at(assignments, now);
        if !created.is_empty() {
            info!(
                "Accepted {} of {} assignments",
                created.len(),
                assignments.len()
            );
        }

        for plan in &created {
            self.journal_record(|| {
                let metadata = assignments
                    .iter()
                    .find(|a| a.id == plan.id && a.kind == plan.kind)
                    .map(|a| a.metadata.clone())
                    .unwrap_or_default();
                JournalEntry::new(
                    JournalKind::TaskAssigned,
                    Some(&plan.id),
                    format!("{} task assigned: {}", plan.kind, plan.command),
                )
                .with_data(serde_json::json!({
                    "kind": plan.kind,
                    "interval": plan.interval,
                    "metadata": metadata,
                }))
            });
        }

        created.len()
    }

    /// Remove a once task iff it exists and has completed.
    pub fn remove_completed_task(&self, id: &str) -> bool {
        let Some(removed) = self.store().take_completed_task(id) else {
            return false;
        };

        info!("Removed completed task {id}");
        self.journal_record(|| {
            JournalEntry::new(
                JournalKind::TaskRemoved,
                Some(&removed.id),
                format!("Completed task removed: {}", removed.command),
            )
        });
        true
    }

    /// Consistent snapshot of both collections.
    pub fn report(&self) -> Report {
        self.store().report()
    }

    /// Every plan, periodic first, each collection ordered by ID.
    pub fn all_plans(&self) -> Vec<TaskPlan> {
        self.store().all_plans()
    }

    /// Pending or failed plans of either kind.
    pub fn pending_tasks(&self) -> Vec<TaskPlan> {
        self.store().pending_tasks()
    }

    /// Plans the next sweep would pick up if it ran now.
    pub fn resumable_tasks(&self) -> Vec<TaskPlan> {
        self.store().resumable_tasks(Timestamp::now())
    }

    /// Change in plan count caused by the latest intake or load.
    pub fn task_delta(&self) -> isize {
        self.store().task_delta()
    }

    /// Total number of plans.
    pub fn len(&self) -> usize {
        self.store().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store().is_empty()
    }
}
