//! Display formatting for plans, reports and journal entries.
//!
//! Models stay free of presentation logic; this module provides their
//! `Display` implementations plus newtype wrappers for collections and
//! reports. Everything renders as markdown so the CLI can pass it through a
//! terminal skin or print it verbatim.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │    Wrappers     │    │    Markdown     │
//! │ (TaskPlan,      │───▶│ (Plans,         │───▶│  (terminal or   │
//! │  Report, ...)   │    │  ReportMarkdown)│    │   report file)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrappers (Plans, JournalEntries)
//! - [`report`]: Report rendering and [`write_report`]
//! - [`status`]: Operation feedback messages (OperationStatus)
//! - [`datetime`]: Timestamp formatting in the system time zone
//! - [`models`]: Display implementations for domain models
//!
//! ## Usage Examples
//!
//! ```rust
//! use cadence_core::display::OperationStatus;
//!
//! let removed = OperationStatus::success("Removed task backup");
//! assert!(removed.to_string().starts_with("Success:"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod report;
pub mod status;

pub use collections::{JournalEntries, Plans};
pub use datetime::LocalDateTime;
pub use report::{write_report, ReportMarkdown};
pub use status::OperationStatus;
