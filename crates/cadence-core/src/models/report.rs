//! Status report aggregated from the plan store.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{TaskKind, TaskPlan, TaskStatus};

/// Outcome line for a completed or failed task.
///
/// For failed tasks `result` carries the error message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskResult {
    pub id: String,
    pub command: String,
    pub result: String,
}

/// Plan counts per kind.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct KindTotals {
    pub periodic: usize,
    pub once: usize,
}

/// Plan counts per status.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusTotals {
    pub pending: usize,
    pub running: usize,
    pub completed: usize,
    pub failed: usize,
}

/// Aggregate counts across both collections.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Totals {
    pub total: usize,
    pub by_kind: KindTotals,
    pub by_status: StatusTotals,
}

impl Totals {
    /// Count one plan.
    pub(crate) fn add(&mut self, plan: &TaskPlan) {
        self.total += 1;
        match plan.kind {
            TaskKind::Periodic => self.by_kind.periodic += 1,
            TaskKind::Once => self.by_kind.once += 1,
        }
        match plan.status {
            TaskStatus::Pending => self.by_status.pending += 1,
            TaskStatus::Running => self.by_status.running += 1,
            TaskStatus::Completed => self.by_status.completed += 1,
            TaskStatus::Failed => self.by_status.failed += 1,
        }
    }
}

/// Consistent snapshot of the store, sorted by task ID within each list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Report {
    pub completed: Vec<TaskResult>,
    pub failed: Vec<TaskResult>,
    pub pending: Vec<String>,
    pub totals: Totals,
    pub generated_at: Timestamp,
}

impl Report {
    /// Build a report from plans, in the order given.
    pub fn from_plans<'a>(
        plans: impl IntoIterator<Item = &'a TaskPlan>,
        generated_at: Timestamp,
    ) -> Self {
        let mut report = Self {
            completed: Vec::new(),
            failed: Vec::new(),
            pending: Vec::new(),
            totals: Totals::default(),
            generated_at,
        };

        for plan in plans {
            report.totals.add(plan);
            match plan.status {
                TaskStatus::Completed => report.completed.push(TaskResult {
                    id: plan.id.clone(),
                    command: plan.command.clone(),
                    result: plan.result.clone().unwrap_or_default(),
                }),
                TaskStatus::Failed => report.failed.push(TaskResult {
                    id: plan.id.clone(),
                    command: plan.command.clone(),
                    result: plan.error.clone().unwrap_or_default(),
                }),
                TaskStatus::Pending => report.pending.push(plan.id.clone()),
                TaskStatus::Running => {}
            }
        }

        report.completed.sort_by(|a, b| a.id.cmp(&b.id));
        report.failed.sort_by(|a, b| a.id.cmp(&b.id));
        report.pending.sort();
        report
    }
}
