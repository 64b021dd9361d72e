//! Markdown rendering of the status report.

use std::{fmt, fs, path::Path};

use super::datetime::LocalDateTime;
use crate::{
    error::{PersistenceResultExt, Result},
    models::{Report, TaskResult},
};

/// Renders a [`Report`] as a markdown document.
///
/// # Examples
///
/// ```rust
/// use cadence_core::{display::ReportMarkdown, models::Assignment, PlannerBuilder};
///
/// let planner = PlannerBuilder::new().build().unwrap();
/// planner.submit(&[Assignment::once("backup", "tar czf b.tgz /etc")]);
///
/// let output = ReportMarkdown(&planner.report()).to_string();
/// assert!(output.contains("# Task Report"));
/// assert!(output.contains("- backup"));
/// ```
pub struct ReportMarkdown<'a>(pub &'a Report);

impl ReportMarkdown<'_> {
    fn fmt_results(f: &mut fmt::Formatter<'_>, title: &str, results: &[TaskResult]) -> fmt::Result {
        writeln!(f, "## {title} ({})", results.len())?;
        writeln!(f)?;
        if results.is_empty() {
            writeln!(f, "None.")?;
        }
        for result in results {
            if result.result.is_empty() {
                writeln!(f, "- **{}** `{}`", result.id, result.command)?;
            } else {
                writeln!(f, "- **{}** `{}`: {}", result.id, result.command, result.result)?;
            }
        }
        writeln!(f)
    }
}

impl fmt::Display for ReportMarkdown<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let totals = &report.totals;

        writeln!(f, "# Task Report")?;
        writeln!(f)?;
        writeln!(f, "Generated {}", LocalDateTime(&report.generated_at))?;
        writeln!(f)?;

        writeln!(f, "## Summary")?;
        writeln!(f)?;
        writeln!(
            f,
            "- **Total**: {} ({} periodic, {} once)",
            totals.total, totals.by_kind.periodic, totals.by_kind.once
        )?;
        writeln!(f, "- **Pending**: {}", totals.by_status.pending)?;
        writeln!(f, "- **Running**: {}", totals.by_status.running)?;
        writeln!(f, "- **Completed**: {}", totals.by_status.completed)?;
        writeln!(f, "- **Failed**: {}", totals.by_status.failed)?;
        writeln!(f)?;

        Self::fmt_results(f, "Completed", &report.completed)?;

        writeln!(f, "## Pending ({})", report.pending.len())?;
        writeln!(f)?;
        if report.pending.is_empty() {
            writeln!(f, "None.")?;
        }
        for id in &report.pending {
            writeln!(f, "- {id}")?;
        }
        writeln!(f)?;

        Self::fmt_results(f, "Failed", &report.failed)
    }
}

/// Write the markdown rendering of `report` to `path`.
pub fn write_report(report: &Report, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).persist_context(parent)?;
    }
    fs::write(path, ReportMarkdown(report).to_string()).persist_context(path)
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use tempfile::TempDir;

    use super::*;
    use crate::models::{TaskKind, TaskPlan};

    fn sample_report() -> Report {
        let mut done = TaskPlan::pending(
            "a",
            TaskKind::Once,
            "echo a",
            String::new(),
            Timestamp::UNIX_EPOCH,
            Timestamp::UNIX_EPOCH,
        );
        done.succeed("a".to_string());
        let mut broken = done.clone();
        broken.id = "b".to_string();
        broken.fail("exit status 1".to_string());

        Report::from_plans([&done, &broken], Timestamp::UNIX_EPOCH)
    }

    #[test]
    fn test_report_sections() {
        let output = ReportMarkdown(&sample_report()).to_string();

        assert!(output.contains("- **Total**: 2 (0 periodic, 2 once)"));
        assert!(output.contains("## Completed (1)"));
        assert!(output.contains("- **a** `echo a`: a"));
        assert!(output.contains("## Pending (0)"));
        assert!(output.contains("- **b** `echo a`: exit status 1"));
    }

    #[test]
    fn test_write_report_creates_parent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("reports").join("status.md");

        write_report(&sample_report(), &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# Task Report"));
    }
}
