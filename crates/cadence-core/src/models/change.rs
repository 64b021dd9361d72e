//! Change events emitted on every plan store mutation.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::TaskStatus;

/// What happened to a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// A new plan was created from an assignment
    Added,
    /// A once task succeeded
    Completed,
    /// A once task failed
    Failed,
    /// A periodic task ran, whatever the outcome
    Updated,
}

impl ChangeKind {
    /// Convert to the serialized string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Added => "added",
            ChangeKind::Completed => "completed",
            ChangeKind::Failed => "failed",
            ChangeKind::Updated => "updated",
        }
    }
}

/// A single state transition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    pub task_id: String,
    pub timestamp: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_status: Option<TaskStatus>,
    pub new_status: TaskStatus,
}
