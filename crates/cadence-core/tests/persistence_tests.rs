mod common;

use std::fs;

use cadence_core::{
    persistence::{ONCE_SNAPSHOT, PERIODIC_SNAPSHOT},
    schedule::DEFAULT_INTERVAL,
    Assignment, PlannerError, TaskKind, TaskStatus,
};
use common::{create_test_planner, open_planner, scripted_executor};

#[tokio::test]
async fn test_round_trip_preserves_every_field() {
    let (temp_dir, planner) = create_test_planner();
    planner.submit(&[
        Assignment::periodic("p1", "1m", "tick"),
        Assignment::once("o1", "work"),
        Assignment::once("o2", "fail again"),
    ]);
    planner
        .run_sweep(scripted_executor())
        .await
        .expect("Failed to run sweep");
    planner.save_tasks().await.expect("Failed to save tasks");

    let reloaded = open_planner(&temp_dir);
    assert_eq!(reloaded.load_tasks().await.expect("Failed to load tasks"), 3);
    assert_eq!(reloaded.all_plans(), planner.all_plans());
    assert_eq!(reloaded.task_delta(), 0);
}

#[tokio::test]
async fn test_live_entries_win_on_load() {
    let (temp_dir, planner) = create_test_planner();
    planner.submit(&[Assignment::once("shared", "from disk"), Assignment::once("disk-only", "x")]);
    planner
        .run_sweep(scripted_executor())
        .await
        .expect("Failed to run sweep");
    planner.save_tasks().await.expect("Failed to save tasks");

    let live = open_planner(&temp_dir);
    live.submit(&[Assignment::once("shared", "live")]);
    assert_eq!(live.load_tasks().await.expect("Failed to load tasks"), 1);

    let plans = live.all_plans();
    let shared = plans.iter().find(|p| p.id == "shared").expect("shared plan");
    assert_eq!(shared.command, "live");
    assert_eq!(shared.status, TaskStatus::Pending);
    assert!(plans.iter().any(|p| p.id == "disk-only"));
}

#[tokio::test]
async fn test_load_repairs_intervals_and_running_tasks() {
    let (temp_dir, planner) = create_test_planner();
    fs::write(
        temp_dir.path().join(PERIODIC_SNAPSHOT),
        r#"{
            "broken": {
                "id": "broken",
                "kind": "periodic",
                "command": "tick",
                "interval": "sometimes",
                "created_at": "2024-01-01T00:00:00Z",
                "next_run": "2024-01-01T00:00:00Z",
                "status": "running"
            }
        }"#,
    )
    .expect("Failed to write snapshot");

    assert_eq!(planner.load_tasks().await.expect("Failed to load tasks"), 1);

    let plan = &planner.all_plans()[0];
    assert_eq!(plan.kind, TaskKind::Periodic);
    assert_eq!(plan.interval, DEFAULT_INTERVAL);
    assert_eq!(plan.status, TaskStatus::Pending);

    // Overdue after the restart, so the next sweep picks it up.
    assert_eq!(planner.resumable_tasks().len(), 1);
}

#[tokio::test]
async fn test_missing_snapshots_load_empty() {
    let (_temp_dir, planner) = create_test_planner();
    assert_eq!(planner.load_tasks().await.expect("Failed to load tasks"), 0);
    assert!(planner.is_empty());
}

#[tokio::test]
async fn test_malformed_snapshot_keeps_live_state() {
    let (temp_dir, planner) = create_test_planner();
    planner.submit(&[Assignment::once("live", "work")]);
    fs::write(temp_dir.path().join(ONCE_SNAPSHOT), "[1, 2").expect("Failed to write snapshot");

    let err = planner.load_tasks().await.unwrap_err();
    assert!(matches!(err, PlannerError::Serialization { .. }));
    assert_eq!(planner.len(), 1);
}

#[tokio::test]
async fn test_failed_save_keeps_memory_state() {
    let (temp_dir, _planner) = create_test_planner();
    let blocked = temp_dir.path().join("blocked");
    fs::write(&blocked, "not a directory").expect("Failed to write file");

    let planner = cadence_core::PlannerBuilder::new()
        .with_data_dir(Some(&blocked))
        .with_journal(false)
        .build()
        .expect("Failed to create planner");
    planner.submit(&[Assignment::once("o1", "work")]);

    let err = planner
        .run_cycle(scripted_executor())
        .await
        .unwrap_err();
    assert!(err.is_persistence());
    assert_eq!(planner.report().completed.len(), 1);
}
