mod common;

use cadence_core::{
    display::{JournalEntries, Plans, ReportMarkdown},
    models::parse_assignments,
    Assignment, JournalKind, TaskKind, TaskStatus,
};
use common::{create_test_planner, open_planner, scripted_executor};

#[tokio::test]
async fn test_complete_task_workflow() {
    let (temp_dir, planner) = create_test_planner();

    let assignments = parse_assignments(
        r#"{"tasks": [
            {"id": "heartbeat", "type": "periodic", "interval": "1h", "command": "uptime"},
            {"id": "backup", "kind": "once", "command": "tar czf b.tgz /etc"},
            {"id": "migrate", "kind": "once", "command": "fail migrate"}
        ]}"#,
    )
    .expect("Failed to parse assignments");
    assert_eq!(planner.submit(&assignments), 3);

    let cycle = planner
        .run_cycle(scripted_executor())
        .await
        .expect("Failed to run cycle");
    assert_eq!(cycle.sweep.dispatched, 2);
    assert_eq!(cycle.sweep.succeeded, 1);
    assert_eq!(cycle.sweep.failed, 1);

    let report = planner.report();
    assert_eq!(report.completed[0].id, "backup");
    assert_eq!(report.failed[0].id, "migrate");
    assert_eq!(report.failed[0].result, "fail migrate: exit status 1");
    assert_eq!(report.pending, vec!["heartbeat".to_string()]);
    assert_eq!(report.totals.by_status.completed, 1);

    let markdown = ReportMarkdown(&report).to_string();
    assert!(markdown.contains("## Failed (1)"));

    // The failed task is retried and the completed one is left alone.
    let retry = planner
        .run_sweep(scripted_executor())
        .await
        .expect("Failed to run sweep");
    assert_eq!(retry.dispatched, 1);

    assert!(planner.remove_completed_task("backup"));
    assert!(!planner.remove_completed_task("heartbeat"));
    planner.save_tasks().await.expect("Failed to save tasks");

    let reopened = open_planner(&temp_dir);
    reopened.load_tasks().await.expect("Failed to load tasks");
    let listing = Plans(reopened.all_plans()).to_string();
    assert!(listing.contains("### heartbeat"));
    assert!(listing.contains("### migrate"));
    assert!(!listing.contains("### backup"));
}

#[tokio::test]
async fn test_resubmission_keeps_existing_plan() {
    let (_temp_dir, planner) = create_test_planner();
    planner.submit(&[Assignment::once("o1", "first")]);
    planner
        .run_sweep(scripted_executor())
        .await
        .expect("Failed to run sweep");

    assert_eq!(planner.submit(&[Assignment::once("o1", "second")]), 0);
    assert_eq!(planner.task_delta(), 0);

    let plans = planner.all_plans();
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0].command, "first");
    assert_eq!(plans[0].status, TaskStatus::Completed);
}

#[tokio::test]
async fn test_journal_history_across_cycles() {
    let (_temp_dir, planner) = create_test_planner();
    planner.submit(&[
        Assignment::once("a", "work a"),
        Assignment::once("b", "fail b"),
    ]);
    planner
        .run_cycle(scripted_executor())
        .await
        .expect("Failed to run cycle");

    let journal = planner.journal().expect("journal enabled");
    let failed = journal
        .read_by_kind(JournalKind::TaskFailed, 10)
        .expect("Failed to read journal");
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].content, "fail b: exit status 1");

    let recent = journal.read_recent(3).expect("Failed to read journal");
    assert_eq!(recent.len(), 3);
    assert!(recent.iter().all(|e| e.kind == JournalKind::TaskChange));
    assert!(JournalEntries(recent).to_string().contains("task_change"));
}

#[tokio::test]
async fn test_pending_tasks_include_failed() {
    let (_temp_dir, planner) = create_test_planner();
    planner.submit(&[
        Assignment::once("ok", "work"),
        Assignment::once("bad", "fail"),
        Assignment::periodic("later", "1h", "tick"),
    ]);
    planner
        .run_sweep(scripted_executor())
        .await
        .expect("Failed to run sweep");

    let pending: Vec<_> = planner
        .pending_tasks()
        .into_iter()
        .map(|plan| (plan.kind, plan.id))
        .collect();
    assert_eq!(
        pending,
        vec![
            (TaskKind::Periodic, "later".to_string()),
            (TaskKind::Once, "bad".to_string()),
        ]
    );
}
