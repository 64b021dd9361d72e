//! Core library for the Cadence task scheduling engine.
//!
//! An external assigner submits task descriptors; the engine keeps one plan
//! per task, decides when each should run, hands the command to an opaque
//! [`Executor`], records the outcome and persists its state for crash
//! recovery.
//!
//! # Layers
//!
//! - **Plan store** ([`store`]): the state machine. Synchronous, no I/O.
//! - **Planner** ([`planner`]): the shared engine instance. Locks the store,
//!   drives sweeps with executor timeouts, saves snapshots, writes the
//!   journal.
//! - **Support**: interval parsing ([`schedule`]), the change log
//!   ([`changes`]), snapshot files ([`persistence`]), the activity journal
//!   ([`journal`]), configuration ([`config`]) and markdown rendering
//!   ([`display`]).
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use cadence_core::{models::Assignment, ExecutionError, PlannerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_data_dir(Some("/tmp/cadence-example"))
//!     .build()?;
//! planner.load_tasks().await?;
//!
//! planner.submit(&[Assignment::periodic("disk", "10m", "df -h")]);
//!
//! let executor = Arc::new(|command: &str| -> Result<String, ExecutionError> {
//!     Ok(format!("would run {command}"))
//! });
//! let cycle = planner.run_cycle(executor).await?;
//! println!("{} tasks ran", cycle.sweep.dispatched);
//! # Ok(())
//! # }
//! ```

pub mod changes;
pub mod config;
pub mod display;
pub mod error;
pub mod executor;
pub mod journal;
pub mod models;
pub mod persistence;
pub mod planner;
pub mod schedule;
pub mod store;

// Re-export commonly used types
pub use changes::ChangeRecorder;
pub use config::EngineConfig;
pub use display::{
    write_report, JournalEntries, LocalDateTime, OperationStatus, Plans, ReportMarkdown,
};
pub use error::{ExecutionError, PlannerError, Result};
pub use executor::Executor;
pub use journal::{Journal, JournalEntry, JournalKind, JournalStats};
pub use models::{
    Assignment, ChangeEvent, ChangeKind, Report, TaskKind, TaskPlan, TaskResult, TaskStatus,
};
pub use planner::{CycleSummary, Planner, PlannerBuilder};
pub use store::{Dispatch, PlanStore, SweepSummary};
