//! Kind and status enumerations for task plans.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of task kinds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    /// Recurring task, re-run every fixed interval
    Periodic,

    /// Single-shot task, retried on every sweep until it succeeds
    Once,
}

impl FromStr for TaskKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "periodic" => Ok(TaskKind::Periodic),
            "once" => Ok(TaskKind::Once),
            _ => Err(format!("Invalid task kind: {s}")),
        }
    }
}

impl TaskKind {
    /// Convert to the persisted string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Periodic => "periodic",
            TaskKind::Once => "once",
        }
    }
}

/// Type-safe enumeration of task statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Waiting for its next execution
    #[default]
    Pending,

    /// Handed to the executor
    Running,

    /// Last execution succeeded
    Completed,

    /// Last execution failed
    Failed,
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "running" => Ok(TaskStatus::Running),
            "completed" => Ok(TaskStatus::Completed),
            "failed" => Ok(TaskStatus::Failed),
            _ => Err(format!("Invalid task status: {s}")),
        }
    }
}

impl TaskStatus {
    /// Convert to the persisted string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Running => "running",
            TaskStatus::Completed => "completed",
            TaskStatus::Failed => "failed",
        }
    }

    /// Whether a once task in this status is picked up by the next sweep.
    ///
    /// Failed tasks are retried exactly like pending ones.
    pub fn is_runnable(&self) -> bool {
        matches!(self, TaskStatus::Pending | TaskStatus::Failed)
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cadence_core::models::TaskStatus;
    ///
    /// assert_eq!(TaskStatus::Completed.with_icon(), "✓ Completed");
    /// assert_eq!(TaskStatus::Failed.with_icon(), "✗ Failed");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "○ Pending",
            TaskStatus::Running => "➤ Running",
            TaskStatus::Completed => "✓ Completed",
            TaskStatus::Failed => "✗ Failed",
        }
    }
}
