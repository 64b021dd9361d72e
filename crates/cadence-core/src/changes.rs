//! Append-only change log with a significance threshold.
//!
//! The recorder has its own lock, separate from the plan store's, so changes
//! can be appended from code that already holds the store.

use std::sync::{Mutex, MutexGuard};

use jiff::Timestamp;

use crate::models::{ChangeEvent, ChangeKind, TaskStatus};

/// Number of buffered changes above which a drain is worth reporting.
const SIGNIFICANCE_THRESHOLD: usize = 1;

/// Records every state transition until the log is drained.
///
/// The log is unbounded: if nobody calls [`ChangeRecorder::get_and_clear_changes`]
/// it keeps growing.
#[derive(Debug, Default)]
pub struct ChangeRecorder {
    changes: Mutex<Vec<ChangeEvent>>,
}

impl ChangeRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ChangeEvent>> {
        // A panic while pushing cannot leave the Vec half-written.
        self.changes
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Append a change stamped with the current time.
    pub fn record(
        &self,
        kind: ChangeKind,
        task_id: &str,
        old_status: Option<TaskStatus>,
        new_status: TaskStatus,
    ) {
        self.lock().push(ChangeEvent {
            kind,
            task_id: task_id.to_string(),
            timestamp: Timestamp::now(),
            old_status,
            new_status,
        });
    }

    /// True when more than one change is buffered.
    pub fn has_significant_changes(&self) -> bool {
        self.lock().len() > SIGNIFICANCE_THRESHOLD
    }

    /// Return every buffered change in insertion order and empty the log.
    pub fn get_and_clear_changes(&self) -> Vec<ChangeEvent> {
        std::mem::take(&mut *self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
