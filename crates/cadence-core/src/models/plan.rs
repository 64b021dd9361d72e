//! Task plan model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{TaskKind, TaskStatus};

/// Engine-owned record tracking one task's schedule and latest outcome.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskPlan {
    /// Assignment ID this plan was created from
    pub id: String,

    /// Periodic or once
    pub kind: TaskKind,

    /// Opaque command forwarded to the executor
    pub command: String,

    /// Duration literal; never empty for a periodic plan
    #[serde(default)]
    pub interval: String,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Earliest moment the next execution may start
    pub next_run: Timestamp,

    /// Start of the latest execution attempt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run: Option<Timestamp>,

    /// Number of executions (periodic: attempts, once: successes)
    #[serde(default)]
    pub exec_count: u64,

    /// Current lifecycle status
    #[serde(default)]
    pub status: TaskStatus,

    /// Output of the latest successful execution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,

    /// Message of the latest failed execution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TaskPlan {
    /// Create a pending plan that becomes due at `next_run`.
    pub(crate) fn pending(
        id: &str,
        kind: TaskKind,
        command: &str,
        interval: String,
        created_at: Timestamp,
        next_run: Timestamp,
    ) -> Self {
        Self {
            id: id.to_string(),
            kind,
            command: command.to_string(),
            interval,
            created_at,
            next_run,
            last_run: None,
            exec_count: 0,
            status: TaskStatus::Pending,
            result: None,
            error: None,
        }
    }

    /// Whether a periodic plan is due at `now`.
    pub fn is_due(&self, now: Timestamp) -> bool {
        self.next_run <= now
    }

    /// Record a successful outcome, clearing any previous error.
    pub(crate) fn succeed(&mut self, output: String) {
        self.status = TaskStatus::Completed;
        self.result = Some(output);
        self.error = None;
    }

    /// Record a failed outcome, clearing any previous result.
    pub(crate) fn fail(&mut self, message: String) {
        self.status = TaskStatus::Failed;
        self.error = Some(message);
        self.result = None;
    }
}
