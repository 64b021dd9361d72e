//! Data models for assignments, task plans, change events and reports.
//!
//! Display implementations for these models live in [`crate::display`] so the
//! data structures stay free of presentation logic.
//!
//! # Examples
//!
//! ```rust
//! use cadence_core::models::{Assignment, TaskKind};
//!
//! let assignment = Assignment::periodic("disk-check", "1h", "df -h");
//! assert_eq!(assignment.kind, TaskKind::Periodic);
//! assert_eq!(assignment.interval.as_deref(), Some("1h"));
//! ```

pub mod assignment;
pub mod change;
pub mod plan;
pub mod report;
pub mod status;


pub use assignment::{parse_assignments, Assignment, AssignmentBatch};
pub use change::{ChangeEvent, ChangeKind};
pub use plan::TaskPlan;
pub use report::{KindTotals, Report, StatusTotals, TaskResult, Totals};
pub use status::{TaskKind, TaskStatus};
