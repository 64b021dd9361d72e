//! Plan store and task state machine.
//!
//! [`PlanStore`] owns the periodic and once collections and performs every
//! status transition. It is synchronous and knows nothing about locking;
//! [`crate::Planner`] wraps it in a mutex and drives it from async code.
//!
//! A sweep is split in two halves so the executor can be called without
//! holding the store:
//!
//! ```text
//! begin_sweep(now) ──▶ Vec<Dispatch> ──▶ executor ──▶ finish_dispatch(d, outcome)
//!  (pending/failed/due → running)                      (running → completed/failed)
//! ```
//!
//! [`PlanStore::execute_tasks_at`] runs both halves inline for callers that
//! do not need that separation.

use std::{collections::BTreeMap, sync::Arc};

use jiff::Timestamp;
use log::{debug, warn};

use crate::{
    changes::ChangeRecorder,
    error::ExecutionError,
    executor::Executor,
    models::{Assignment, ChangeKind, Report, TaskKind, TaskPlan, TaskStatus},
    schedule,
};

/// A task handed out by [`PlanStore::begin_sweep`], waiting for its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub id: String,
    pub kind: TaskKind,
    pub command: String,
    /// Status before the sweep moved the task to running
    pub previous_status: TaskStatus,
}

/// Counts produced by one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepSummary {
    pub dispatched: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl SweepSummary {
    pub(crate) fn count(&mut self, succeeded: bool) {
        if succeeded {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }
}

/// Keyed collections of periodic and once plans.
///
/// IDs are unique within a collection only; the same ID may exist in both.
#[derive(Debug)]
pub struct PlanStore {
    periodic: BTreeMap<String, TaskPlan>,
    once: BTreeMap<String, TaskPlan>,
    changes: Arc<ChangeRecorder>,
    task_count: usize,
    last_task_count: usize,
}

impl PlanStore {
    /// Create an empty store that records transitions into `changes`.
    pub fn new(changes: Arc<ChangeRecorder>) -> Self {
        Self {
            periodic: BTreeMap::new(),
            once: BTreeMap::new(),
            changes,
            task_count: 0,
            last_task_count: 0,
        }
    }

    /// The change recorder shared with this store.
    pub fn changes(&self) -> &Arc<ChangeRecorder> {
        &self.changes
    }

    fn collection(&self, kind: TaskKind) -> &BTreeMap<String, TaskPlan> {
        match kind {
            TaskKind::Periodic => &self.periodic,
            TaskKind::Once => &self.once,
        }
    }

    fn collection_mut(&mut self, kind: TaskKind) -> &mut BTreeMap<String, TaskPlan> {
        match kind {
            TaskKind::Periodic => &mut self.periodic,
            TaskKind::Once => &mut self.once,
        }
    }

    fn recount(&mut self) {
        self.task_count = self.periodic.len() + self.once.len();
    }

    /// Every plan of one kind, keyed by ID.
    pub fn plans(&self, kind: TaskKind) -> &BTreeMap<String, TaskPlan> {
        self.collection(kind)
    }

    /// Look up a plan by kind and ID.
    pub fn get(&self, kind: TaskKind, id: &str) -> Option<&TaskPlan> {
        self.collection(kind).get(id)
    }

    /// Total number of plans across both collections.
    pub fn len(&self) -> usize {
        self.periodic.len() + self.once.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periodic.is_empty() && self.once.is_empty()
    }

    /// Change in plan count caused by the latest intake or load.
    pub fn task_delta(&self) -> isize {
        self.task_count as isize - self.last_task_count as isize
    }

    // ------------------------------------------------------------------
    // Intake
    // ------------------------------------------------------------------

    /// Create plans for unseen assignments, timestamped with the current time.
    ///
    /// Returns the number of plans created.
    pub fn generate_plan(&mut self, assignments: &[Assignment]) -> usize {
        self.generate_plan_at(assignments, Timestamp::now())
    }

    /// Create plans for unseen assignments as of `now`.
    pub fn generate_plan_at(&mut self, assignments: &[Assignment], now: Timestamp) -> usize {
        self.intake_at(assignments, now).len()
    }

    /// Create plans for unseen assignments and return copies of the new plans.
    ///
    /// Assignments whose ID already exists in their kind's collection are
    /// skipped without touching the existing plan.
    pub fn intake_at(&mut self, assignments: &[Assignment], now: Timestamp) -> Vec<TaskPlan> {
        self.last_task_count = self.task_count;
        let mut created = Vec::new();

        for assignment in assignments {
            if self.collection(assignment.kind).contains_key(&assignment.id) {
                debug!(
                    "Skipping {} task {}: already planned",
                    assignment.kind.as_str(),
                    assignment.id
                );
                continue;
            }

            let plan = match assignment.kind {
                TaskKind::Periodic => {
                    let interval = schedule::canonicalize_interval(
                        &assignment.id,
                        assignment.interval.as_deref(),
                    );
                    let next_run = schedule::next_run(&interval, now);
                    TaskPlan::pending(
                        &assignment.id,
                        TaskKind::Periodic,
                        &assignment.command,
                        interval,
                        now,
                        next_run,
                    )
                }
                TaskKind::Once => TaskPlan::pending(
                    &assignment.id,
                    TaskKind::Once,
                    &assignment.command,
                    String::new(),
                    now,
                    now,
                ),
            };

            self.changes
                .record(ChangeKind::Added, &plan.id, None, TaskStatus::Pending);
            created.push(plan.clone());
            self.collection_mut(assignment.kind)
                .insert(plan.id.clone(), plan);
        }

        self.recount();
        created
    }

    // ------------------------------------------------------------------
    // Sweep
    // ------------------------------------------------------------------

    /// Move every eligible plan to running and return what must be executed.
    ///
    /// Once plans are eligible when pending or failed. Periodic plans are
    /// eligible when `next_run <= now`; their execution count is bumped and
    /// `next_run` is rescheduled from `now`. Periodic plans that are not due
    /// are reset to pending.
    pub fn begin_sweep(&mut self, now: Timestamp) -> Vec<Dispatch> {
        let mut dispatches = Vec::new();

        for plan in self.once.values_mut() {
            if !plan.status.is_runnable() {
                continue;
            }
            dispatches.push(Dispatch {
                id: plan.id.clone(),
                kind: TaskKind::Once,
                command: plan.command.clone(),
                previous_status: plan.status,
            });
            plan.status = TaskStatus::Running;
            plan.last_run = Some(now);
        }

        for plan in self.periodic.values_mut() {
            if !plan.is_due(now) {
                plan.status = TaskStatus::Pending;
                continue;
            }
            if schedule::parse_interval(&plan.interval).is_none() {
                plan.interval = schedule::canonicalize_interval(&plan.id, Some(&plan.interval));
            }
            dispatches.push(Dispatch {
                id: plan.id.clone(),
                kind: TaskKind::Periodic,
                command: plan.command.clone(),
                previous_status: plan.status,
            });
            plan.status = TaskStatus::Running;
            plan.last_run = Some(now);
            plan.exec_count += 1;
            plan.next_run = schedule::next_run(&plan.interval, now);
        }

        dispatches
    }

    /// Apply an executor outcome to a dispatched plan.
    ///
    /// Returns the updated plan, or `None` if it disappeared in the meantime.
    pub fn finish_dispatch(
        &mut self,
        dispatch: &Dispatch,
        outcome: Result<String, ExecutionError>,
    ) -> Option<&TaskPlan> {
        let changes = Arc::clone(&self.changes);
        let Some(plan) = self.collection_mut(dispatch.kind).get_mut(&dispatch.id) else {
            warn!(
                "Dispatched {} task {} vanished before its outcome was recorded",
                dispatch.kind.as_str(),
                dispatch.id
            );
            return None;
        };

        let succeeded = outcome.is_ok();
        match outcome {
            Ok(output) => plan.succeed(output),
            Err(err) => plan.fail(err.message),
        }

        let change = match (dispatch.kind, succeeded) {
            (TaskKind::Once, true) => {
                plan.exec_count += 1;
                ChangeKind::Completed
            }
            (TaskKind::Once, false) => ChangeKind::Failed,
            (TaskKind::Periodic, _) => ChangeKind::Updated,
        };
        changes.record(change, &plan.id, Some(dispatch.previous_status), plan.status);

        Some(plan)
    }

    /// Run one full sweep with the executor called inline.
    pub fn execute_tasks<E: Executor + ?Sized>(&mut self, executor: &E) -> SweepSummary {
        self.execute_tasks_at(Timestamp::now(), executor)
    }

    /// Run one full sweep as of `now` with the executor called inline.
    ///
    /// A failing command never stops the sweep; every other eligible task
    /// still runs.
    pub fn execute_tasks_at<E: Executor + ?Sized>(
        &mut self,
        now: Timestamp,
        executor: &E,
    ) -> SweepSummary {
        let dispatches = self.begin_sweep(now);
        let mut summary = SweepSummary {
            dispatched: dispatches.len(),
            ..SweepSummary::default()
        };

        for dispatch in &dispatches {
            let outcome = executor.execute(&dispatch.command);
            summary.count(outcome.is_ok());
            self.finish_dispatch(dispatch, outcome);
        }

        summary
    }

    // ------------------------------------------------------------------
    // Removal and queries
    // ------------------------------------------------------------------

    /// Remove a once plan iff it exists and is completed.
    pub fn remove_completed_task(&mut self, id: &str) -> bool {
        self.take_completed_task(id).is_some()
    }

    /// Remove and return a completed once plan. Periodic plans are never touched.
    pub fn take_completed_task(&mut self, id: &str) -> Option<TaskPlan> {
        let completed = self
            .once
            .get(id)
            .is_some_and(|plan| plan.status == TaskStatus::Completed);
        if !completed {
            return None;
        }

        let removed = self.once.remove(id);
        self.recount();
        removed
    }

    /// Build a report of both collections.
    pub fn report(&self) -> Report {
        self.report_at(Timestamp::now())
    }

    /// Build a report stamped with `generated_at`.
    pub fn report_at(&self, generated_at: Timestamp) -> Report {
        Report::from_plans(self.once.values().chain(self.periodic.values()), generated_at)
    }

    /// Every plan, periodic first, each collection ordered by ID.
    pub fn all_plans(&self) -> Vec<TaskPlan> {
        self.periodic
            .values()
            .chain(self.once.values())
            .cloned()
            .collect()
    }

    /// Plans of either kind that are pending or failed.
    pub fn pending_tasks(&self) -> Vec<TaskPlan> {
        self.periodic
            .values()
            .chain(self.once.values())
            .filter(|plan| plan.status.is_runnable())
            .cloned()
            .collect()
    }

    /// Plans a sweep right after startup should pick up.
    ///
    /// Periodic plans that are failed, pending or due, plus once plans that
    /// are pending or failed.
    pub fn resumable_tasks(&self, now: Timestamp) -> Vec<TaskPlan> {
        let periodic = self
            .periodic
            .values()
            .filter(|plan| plan.status.is_runnable() || plan.is_due(now));
        let once = self.once.values().filter(|plan| plan.status.is_runnable());

        periodic.chain(once).cloned().collect()
    }

    // ------------------------------------------------------------------
    // Snapshot merge
    // ------------------------------------------------------------------

    /// Merge a loaded snapshot of one kind into the live collection.
    ///
    /// Live entries win. Loaded periodic plans with an invalid interval are
    /// repaired to the default, and plans caught mid-execution are reset to
    /// pending. Returns the number of plans adopted from the snapshot.
    pub fn merge_snapshot(&mut self, kind: TaskKind, loaded: BTreeMap<String, TaskPlan>) -> usize {
        let mut adopted = 0;

        for (id, mut plan) in loaded {
            if self.collection(kind).contains_key(&id) {
                debug!("Keeping live {} task {id} over its snapshot copy", kind.as_str());
                continue;
            }

            plan.id = id.clone();
            plan.kind = kind;
            if kind == TaskKind::Periodic && schedule::parse_interval(&plan.interval).is_none() {
                plan.interval = schedule::canonicalize_interval(&id, Some(&plan.interval));
            }
            if plan.status == TaskStatus::Running {
                warn!("Task {id} was running when last saved, resetting to pending");
                plan.status = TaskStatus::Pending;
            }

            self.collection_mut(kind).insert(id, plan);
            adopted += 1;
        }

        self.recount();
        self.last_task_count = self.task_count;
        adopted
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use jiff::SignedDuration;

    use super::*;

    fn store() -> PlanStore {
        PlanStore::new(Arc::new(ChangeRecorder::new()))
    }

    fn at(secs: i64) -> Timestamp {
        Timestamp::from_second(1_700_000_000 + secs).unwrap()
    }

    fn ok_executor(command: &str) -> Result<String, ExecutionError> {
        Ok(format!("ran {command}"))
    }

    fn failing_executor(_command: &str) -> Result<String, ExecutionError> {
        Err(ExecutionError::new("executor unavailable"))
    }

    #[test]
    fn test_generate_plan_is_idempotent() {
        let mut store = store();
        let batch = vec![Assignment::once("o1", "echo one")];

        assert_eq!(store.generate_plan_at(&batch, at(0)), 1);
        assert_eq!(store.generate_plan_at(&batch, at(5)), 0);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(TaskKind::Once, "o1").unwrap().created_at, at(0));
    }

    #[test]
    fn test_duplicate_does_not_update_fields() {
        let mut store = store();
        store.generate_plan_at(&[Assignment::periodic("p1", "1h", "old")], at(0));
        store.generate_plan_at(&[Assignment::periodic("p1", "5m", "new")], at(0));

        let plan = store.get(TaskKind::Periodic, "p1").unwrap();
        assert_eq!(plan.command, "old");
        assert_eq!(plan.interval, "1h");
    }

    #[test]
    fn test_same_id_across_kinds_is_not_deduplicated() {
        let mut store = store();
        let created = store.generate_plan_at(
            &[Assignment::periodic("x", "1m", "a"), Assignment::once("x", "b")],
            at(0),
        );
        assert_eq!(created, 2);
        assert!(store.get(TaskKind::Periodic, "x").is_some());
        assert!(store.get(TaskKind::Once, "x").is_some());
    }

    #[test]
    fn test_periodic_interval_is_repaired() {
        let mut store = store();
        let mut missing = Assignment::periodic("missing", "", "cmd");
        missing.interval = None;
        store.generate_plan_at(
            &[missing, Assignment::periodic("garbage", "whenever", "cmd")],
            at(0),
        );

        for id in ["missing", "garbage"] {
            let plan = store.get(TaskKind::Periodic, id).unwrap();
            assert_eq!(plan.interval, schedule::DEFAULT_INTERVAL);
            assert!(schedule::parse_interval(&plan.interval).is_some());
            assert_eq!(plan.next_run, at(30));
        }
    }

    #[test]
    fn test_once_plan_is_due_immediately() {
        let mut store = store();
        store.generate_plan_at(&[Assignment::once("o1", "cmd")], at(10));

        let plan = store.get(TaskKind::Once, "o1").unwrap();
        assert_eq!(plan.next_run, at(10));
        assert_eq!(plan.status, TaskStatus::Pending);
        assert!(plan.interval.is_empty());
    }

    #[test]
    fn test_once_success_and_failure() {
        let mut store = store();
        store.generate_plan_at(
            &[Assignment::once("good", "ok"), Assignment::once("bad", "fail")],
            at(0),
        );

        let executor = |command: &str| -> Result<String, ExecutionError> {
            if command == "fail" {
                Err(ExecutionError::new("exit status 1"))
            } else {
                Ok("done".to_string())
            }
        };
        let summary = store.execute_tasks_at(at(1), &executor);

        assert_eq!(summary.dispatched, 2);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 1);

        let good = store.get(TaskKind::Once, "good").unwrap();
        assert_eq!(good.status, TaskStatus::Completed);
        assert_eq!(good.result.as_deref(), Some("done"));
        assert_eq!(good.exec_count, 1);
        assert_eq!(good.last_run, Some(at(1)));

        let bad = store.get(TaskKind::Once, "bad").unwrap();
        assert_eq!(bad.status, TaskStatus::Failed);
        assert_eq!(bad.error.as_deref(), Some("exit status 1"));
        assert_eq!(bad.exec_count, 0);
    }

    #[test]
    fn test_completed_once_task_is_not_rerun() {
        let mut store = store();
        store.generate_plan_at(&[Assignment::once("o1", "cmd")], at(0));
        store.execute_tasks_at(at(1), &ok_executor);

        let summary = store.execute_tasks_at(at(2), &ok_executor);
        assert_eq!(summary.dispatched, 0);
        assert_eq!(store.get(TaskKind::Once, "o1").unwrap().exec_count, 1);
    }

    #[test]
    fn test_failed_once_task_is_retried_next_sweep() {
        let mut store = store();
        store.generate_plan_at(&[Assignment::once("o1", "cmd")], at(0));
        store.execute_tasks_at(at(1), &failing_executor);
        assert_eq!(store.get(TaskKind::Once, "o1").unwrap().status, TaskStatus::Failed);
        store.changes().get_and_clear_changes();

        let summary = store.execute_tasks_at(at(2), &ok_executor);
        assert_eq!(summary.dispatched, 1);

        let plan = store.get(TaskKind::Once, "o1").unwrap();
        assert_eq!(plan.status, TaskStatus::Completed);
        assert!(plan.error.is_none());

        let changes = store.changes().get_and_clear_changes();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].kind, ChangeKind::Completed);
        assert_eq!(changes[0].old_status, Some(TaskStatus::Failed));
    }

    #[test]
    fn test_periodic_not_due_is_skipped_and_reset() {
        let mut store = store();
        store.generate_plan_at(&[Assignment::periodic("p1", "1m", "cmd")], at(0));

        let summary = store.execute_tasks_at(at(30), &ok_executor);
        assert_eq!(summary.dispatched, 0);
        assert_eq!(store.get(TaskKind::Periodic, "p1").unwrap().status, TaskStatus::Pending);
    }

    #[test]
    fn test_periodic_skip_ahead_after_delay() {
        let mut store = store();
        store.generate_plan_at(&[Assignment::periodic("p1", "1m", "cmd")], at(0));
        store.execute_tasks_at(at(60), &ok_executor);

        let calls = AtomicUsize::new(0);
        let counting = |_: &str| -> Result<String, ExecutionError> {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok("ok".to_string())
        };

        // Five intervals late: exactly one run, rescheduled from now.
        let late = at(60) + SignedDuration::from_mins(5);
        store.execute_tasks_at(late, &counting);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let plan = store.get(TaskKind::Periodic, "p1").unwrap();
        assert_eq!(plan.exec_count, 2);
        assert_eq!(plan.next_run, late + SignedDuration::from_mins(1));
    }

    #[test]
    fn test_periodic_failure_records_update_and_reschedules() {
        let mut store = store();
        store.generate_plan_at(&[Assignment::periodic("p1", "1m", "cmd")], at(0));
        store.changes().get_and_clear_changes();

        store.execute_tasks_at(at(61), &failing_executor);

        let plan = store.get(TaskKind::Periodic, "p1").unwrap();
        assert_eq!(plan.status, TaskStatus::Failed);
        assert_eq!(plan.exec_count, 1);
        assert_eq!(plan.next_run, at(121));

        let changes = store.changes().get_and_clear_changes();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].kind, ChangeKind::Updated);
        assert_eq!(changes[0].new_status, TaskStatus::Failed);
    }

    #[test]
    fn test_begin_sweep_marks_running() {
        let mut store = store();
        store.generate_plan_at(&[Assignment::once("o1", "cmd")], at(0));

        let dispatches = store.begin_sweep(at(1));
        assert_eq!(dispatches.len(), 1);
        assert_eq!(dispatches[0].previous_status, TaskStatus::Pending);
        assert_eq!(store.get(TaskKind::Once, "o1").unwrap().status, TaskStatus::Running);

        // A running task is not handed out twice.
        assert!(store.begin_sweep(at(2)).is_empty());
    }

    #[test]
    fn test_remove_completed_task_guard() {
        let mut store = store();
        store.generate_plan_at(
            &[
                Assignment::once("done", "ok"),
                Assignment::once("waiting", "ok"),
                Assignment::periodic("loop", "1m", "ok"),
            ],
            at(0),
        );
        store.begin_sweep(at(1));
        let dispatch = Dispatch {
            id: "done".to_string(),
            kind: TaskKind::Once,
            command: "ok".to_string(),
            previous_status: TaskStatus::Pending,
        };
        store.finish_dispatch(&dispatch, Ok("ok".to_string()));

        assert!(!store.remove_completed_task("waiting"));
        assert!(!store.remove_completed_task("loop"));
        assert!(!store.remove_completed_task("unknown"));
        assert_eq!(store.len(), 3);

        assert!(store.remove_completed_task("done"));
        assert_eq!(store.len(), 2);
        assert!(!store.remove_completed_task("done"));
    }

    #[test]
    fn test_report_includes_both_collections() {
        let mut store = store();
        store.generate_plan_at(
            &[Assignment::once("o1", "ok"), Assignment::periodic("p1", "1m", "ok")],
            at(0),
        );
        store.execute_tasks_at(at(1), &failing_executor);

        let report = store.report_at(at(2));
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].result, "executor unavailable");
        assert_eq!(report.pending, vec!["p1".to_string()]);
        assert_eq!(report.totals.total, 2);
        assert_eq!(report.totals.by_kind.periodic, 1);
    }

    #[test]
    fn test_resumable_tasks() {
        let mut store = store();
        store.generate_plan_at(
            &[
                Assignment::once("o-pending", "ok"),
                Assignment::once("o-done", "ok"),
                Assignment::periodic("p-later", "1h", "ok"),
            ],
            at(0),
        );
        store.begin_sweep(at(0));
        let done = Dispatch {
            id: "o-done".to_string(),
            kind: TaskKind::Once,
            command: "ok".to_string(),
            previous_status: TaskStatus::Pending,
        };
        store.finish_dispatch(&done, Ok("ok".to_string()));
        let pending = Dispatch {
            id: "o-pending".to_string(),
            ..done
        };
        store.finish_dispatch(&pending, Err(ExecutionError::new("nope")));

        let ids: Vec<_> = store
            .resumable_tasks(at(10))
            .into_iter()
            .map(|plan| plan.id)
            .collect();
        // p-later is pending (not yet due), o-pending failed, o-done is finished.
        assert_eq!(ids, vec!["p-later", "o-pending"]);
    }

    #[test]
    fn test_task_delta_tracks_latest_intake() {
        let mut store = store();
        store.generate_plan_at(
            &[Assignment::once("a", "x"), Assignment::once("b", "x")],
            at(0),
        );
        assert_eq!(store.task_delta(), 2);

        store.generate_plan_at(&[Assignment::once("a", "x")], at(0));
        assert_eq!(store.task_delta(), 0);
    }

    #[test]
    fn test_merge_snapshot_prefers_live_entries() {
        let mut store = store();
        store.generate_plan_at(&[Assignment::once("x", "live")], at(0));

        let mut loaded = BTreeMap::new();
        let mut stale =
            TaskPlan::pending("x", TaskKind::Once, "stale", String::new(), at(0), at(0));
        stale.status = TaskStatus::Completed;
        loaded.insert("x".to_string(), stale);
        loaded.insert(
            "y".to_string(),
            TaskPlan::pending("y", TaskKind::Once, "fresh", String::new(), at(0), at(0)),
        );

        assert_eq!(store.merge_snapshot(TaskKind::Once, loaded), 1);
        let live = store.get(TaskKind::Once, "x").unwrap();
        assert_eq!(live.command, "live");
        assert_eq!(live.status, TaskStatus::Pending);
        assert!(store.get(TaskKind::Once, "y").is_some());
    }

    #[test]
    fn test_merge_snapshot_repairs_loaded_plans() {
        let mut store = store();
        let mut broken =
            TaskPlan::pending("p", TaskKind::Periodic, "cmd", String::new(), at(0), at(0));
        broken.status = TaskStatus::Running;

        store.merge_snapshot(TaskKind::Periodic, BTreeMap::from([("p".to_string(), broken)]));

        let plan = store.get(TaskKind::Periodic, "p").unwrap();
        assert_eq!(plan.interval, schedule::DEFAULT_INTERVAL);
        assert_eq!(plan.status, TaskStatus::Pending);
    }
}
