//! Collection wrapper types for displaying groups of domain objects.

use std::fmt;

use crate::{
    journal::JournalEntry,
    models::{TaskKind, TaskPlan},
};

/// Newtype wrapper for displaying a list of plans grouped by kind.
///
/// # Examples
///
/// ```rust
/// use cadence_core::{display::Plans, models::Assignment, PlannerBuilder};
///
/// let planner = PlannerBuilder::new().build().unwrap();
/// planner.submit(&[Assignment::once("backup", "tar czf b.tgz /etc")]);
///
/// let output = Plans(planner.all_plans()).to_string();
/// assert!(output.contains("## Once tasks"));
/// assert!(output.contains("### backup"));
/// ```
pub struct Plans(pub Vec<TaskPlan>);

impl Plans {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TaskPlan> {
        self.0.iter()
    }

    fn fmt_group(&self, f: &mut fmt::Formatter<'_>, kind: TaskKind, title: &str) -> fmt::Result {
        let mut plans = self.0.iter().filter(|plan| plan.kind == kind).peekable();
        if plans.peek().is_none() {
            return Ok(());
        }

        writeln!(f, "## {title}")?;
        writeln!(f)?;
        for plan in plans {
            write!(f, "{plan}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Plans {
    type Item = &'a TaskPlan;
    type IntoIter = std::slice::Iter<'a, TaskPlan>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Plans {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No tasks found.");
        }
        self.fmt_group(f, TaskKind::Periodic, "Periodic tasks")?;
        self.fmt_group(f, TaskKind::Once, "Once tasks")
    }
}

/// Newtype wrapper for displaying journal entries as a markdown list.
pub struct JournalEntries(pub Vec<JournalEntry>);

impl JournalEntries {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for JournalEntries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No journal entries.");
        }
        for entry in &self.0 {
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}
