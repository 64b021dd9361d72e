//! Display implementations for domain models.
//!
//! Plans render as a markdown section with a metadata list; kinds and
//! statuses render as their serialized names.

use std::fmt;

use super::datetime::{LocalDateTime, MaybeDateTime};
use crate::{
    journal::JournalEntry,
    models::{ChangeEvent, ChangeKind, TaskKind, TaskPlan, TaskStatus},
};

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for TaskPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {} ({})", self.id, self.status.with_icon())?;
        writeln!(f)?;

        writeln!(f, "- **Kind**: {}", self.kind)?;
        writeln!(f, "- **Command**: `{}`", self.command)?;
        if self.kind == TaskKind::Periodic {
            writeln!(f, "- **Interval**: {}", self.interval)?;
            writeln!(f, "- **Next run**: {}", LocalDateTime(&self.next_run))?;
        }
        writeln!(f, "- **Last run**: {}", MaybeDateTime(self.last_run.as_ref()))?;
        writeln!(f, "- **Executions**: {}", self.exec_count)?;

        match (&self.result, &self.error) {
            (Some(result), _) if !result.is_empty() => writeln!(f, "- **Result**: {result}")?,
            (_, Some(error)) => writeln!(f, "- **Error**: {error}")?,
            _ => {}
        }

        writeln!(f)
    }
}

impl fmt::Display for ChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.old_status {
            Some(old) => write!(
                f,
                "Task {} {}: {} -> {}",
                self.task_id, self.kind, old, self.new_status
            ),
            None => write!(f, "Task {} {}: {}", self.task_id, self.kind, self.new_status),
        }
    }
}

impl fmt::Display for JournalEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- {} **{}**", LocalDateTime(&self.timestamp), self.kind)?;
        if let Some(task_id) = &self.task_id {
            write!(f, " `{task_id}`")?;
        }
        writeln!(f, ": {}", self.content)
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;

    fn plan(kind: TaskKind) -> TaskPlan {
        TaskPlan::pending(
            "nightly",
            kind,
            "make backup",
            if kind == TaskKind::Periodic {
                "1h".to_string()
            } else {
                String::new()
            },
            Timestamp::UNIX_EPOCH,
            Timestamp::UNIX_EPOCH,
        )
    }

    #[test]
    fn test_periodic_plan_shows_schedule() {
        let output = plan(TaskKind::Periodic).to_string();
        assert!(output.contains("### nightly (○ Pending)"));
        assert!(output.contains("- **Interval**: 1h"));
        assert!(output.contains("- **Last run**: never"));
    }

    #[test]
    fn test_once_plan_shows_error() {
        let mut once = plan(TaskKind::Once);
        once.fail("exit status 2".to_string());

        let output = once.to_string();
        assert!(!output.contains("Interval"));
        assert!(output.contains("- **Error**: exit status 2"));
    }

    #[test]
    fn test_change_event_display() {
        let event = ChangeEvent {
            kind: ChangeKind::Completed,
            task_id: "o1".to_string(),
            timestamp: Timestamp::UNIX_EPOCH,
            old_status: Some(TaskStatus::Running),
            new_status: TaskStatus::Completed,
        };
        assert_eq!(event.to_string(), "Task o1 completed: running -> completed");
    }
}
