//! High-level engine API shared by the intake path and the sweep loop.
//!
//! [`Planner`] wraps a [`PlanStore`] in a mutex and adds everything that
//! touches the outside world: the executor, snapshots and the journal.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    plan_ops     │    │      sweep      │    │   persist_ops   │
//! │ (submit, remove,│───▶│ (run_sweep,     │───▶│ (save_tasks,    │
//! │  report, list)  │    │  run_cycle)     │    │  load_tasks)    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!       Intake            Execution driver        Snapshots on disk
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Planner`] instances with configuration
//! - [`plan_ops`]: Intake, removal and read-only queries
//! - [`sweep`]: Sweeps with the executor called outside the store lock
//! - [`persist_ops`]: Snapshot save and load on the blocking pool
//!
//! ## Locking
//!
//! The store sits behind a `std::sync::Mutex` that is only held for
//! bookkeeping, never across an executor call or an `.await`. A separate
//! async lock serializes sweeps so two overlapping ticks cannot dispatch the
//! same task twice, and another serializes snapshot saves. Intake and saves
//! proceed while a sweep waits on the executor.
//!
//! # Usage Examples
//!
//! ```rust
//! use cadence_core::{models::Assignment, ExecutionError, PlannerBuilder};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new().build()?;
//!
//! planner.submit(&[
//!     Assignment::periodic("heartbeat", "1m", "uptime"),
//!     Assignment::once("backup", "tar czf /tmp/b.tgz /etc"),
//! ]);
//!
//! let executor = Arc::new(|command: &str| -> Result<String, ExecutionError> {
//!     Ok(format!("ran {command}"))
//! });
//! let summary = planner.run_sweep(executor).await?;
//! assert_eq!(summary.dispatched, 1);
//!
//! let report = planner.report();
//! assert_eq!(report.completed[0].id, "backup");
//! # Ok(())
//! # }
//! ```

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use jiff::SignedDuration;

use crate::{changes::ChangeRecorder, journal::Journal, store::PlanStore};

pub mod builder;
pub mod persist_ops;
pub mod plan_ops;
pub mod sweep;


pub use builder::PlannerBuilder;
pub use sweep::CycleSummary;

/// Default hard limit on a single executor call.
pub const DEFAULT_EXECUTOR_TIMEOUT: SignedDuration = SignedDuration::from_secs(5 * 60);

/// The scheduling engine. Share it as `Arc<Planner>`.
#[derive(Debug)]
pub struct Planner {
    store: Mutex<PlanStore>,
    changes: Arc<ChangeRecorder>,
    data_dir: Option<PathBuf>,
    journal: Option<Journal>,
    executor_timeout: SignedDuration,
    sweep_lock: tokio::sync::Mutex<()>,
    save_lock: tokio::sync::Mutex<()>,
}

impl Planner {
    pub(crate) fn new(
        data_dir: Option<PathBuf>,
        journal: Option<Journal>,
        executor_timeout: SignedDuration,
    ) -> Self {
        let changes = Arc::new(ChangeRecorder::new());
        Self {
            store: Mutex::new(PlanStore::new(Arc::clone(&changes))),
            changes,
            data_dir,
            journal,
            executor_timeout,
            sweep_lock: tokio::sync::Mutex::new(()),
            save_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Lock the store. Every transition completes before the guard is
    /// released, so a poisoned lock still holds consistent data.
    pub(crate) fn store(&self) -> MutexGuard<'_, PlanStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Change log shared with the store.
    pub fn changes(&self) -> &ChangeRecorder {
        &self.changes
    }

    /// Directory holding snapshots and the journal, if persistence is enabled.
    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    pub fn journal(&self) -> Option<&Journal> {
        self.journal.as_ref()
    }

    pub fn executor_timeout(&self) -> SignedDuration {
        self.executor_timeout
    }

    pub(crate) fn journal_record(&self, entry: impl FnOnce() -> crate::journal::JournalEntry) {
        if let Some(journal) = &self.journal {
            journal.record(entry());
        }
    }
}
