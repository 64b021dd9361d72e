//! Long-running scheduler loop behind `cadence serve`.
//!
//! Sweeps run in their own task: on startup any task left over from the
//! previous session is resumed, then a cycle runs every `sweep_interval`.
//! The foreground loop reads assignment batches from stdin as
//! newline-delimited JSON (one array or `{"tasks": [...]}` object per line)
//! and waits for SIGINT or SIGTERM. A slow command therefore never delays
//! intake or shutdown.
//!
//! On a signal the sweep task is cancelled, abandoning any cycle in flight,
//! and the store is saved. Plans caught mid-execution are saved as running
//! and reset to pending on the next load. Closing stdin only stops intake.

use std::sync::Arc;

use anyhow::{Context, Result};
use cadence_core::{models::parse_assignments, Executor, Planner};
use jiff::SignedDuration;
use log::{debug, info, warn};
use tokio::{
    io::{self, AsyncBufReadExt, BufReader},
    signal::unix::{signal, SignalKind},
    time::{self, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

/// Run the scheduler until a shutdown signal arrives.
pub async fn serve<E>(
    planner: Arc<Planner>,
    executor: Arc<E>,
    sweep_interval: SignedDuration,
) -> Result<()>
where
    E: Executor + 'static,
{
    // Set up signal handlers before any work so a signal is never lost
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    info!("Starting cadence service, sweeping every {sweep_interval:#}");

    let cancel = CancellationToken::new();
    let sweeper = tokio::spawn(sweep_loop(
        Arc::clone(&planner),
        executor,
        sweep_interval,
        cancel.child_token(),
    ));

    let mut lines = BufReader::new(io::stdin()).lines();
    let mut intake_open = true;

    loop {
        tokio::select! {
            line = lines.next_line(), if intake_open => {
                match line {
                    Ok(Some(line)) => intake(&planner, &line).await,
                    Ok(None) => {
                        info!("stdin closed, no further assignments will be read");
                        intake_open = false;
                    }
                    Err(e) => {
                        warn!("Failed to read stdin: {e}");
                        intake_open = false;
                    }
                }
            }
            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down gracefully...");
                break;
            }
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down gracefully...");
                break;
            }
        }
    }

    cancel.cancel();
    if let Err(e) = sweeper.await {
        warn!("Sweep task ended abnormally: {e}");
    }

    planner
        .save_tasks()
        .await
        .context("Failed to save tasks on shutdown")?;
    info!("Cadence service shutdown complete");
    Ok(())
}

/// Resume, then run a cycle on every tick until cancelled.
async fn sweep_loop<E>(
    planner: Arc<Planner>,
    executor: Arc<E>,
    sweep_interval: SignedDuration,
    cancel: CancellationToken,
) where
    E: Executor + 'static,
{
    tokio::select! {
        resumed = planner.resume(Arc::clone(&executor)) => match resumed {
            Ok(Some(cycle)) => info!("Resumed session: {} tasks ran", cycle.sweep.dispatched),
            Ok(None) => debug!("Nothing to resume"),
            Err(e) => warn!("Resume cycle failed: {e}"),
        },
        _ = cancel.cancelled() => return,
    }

    let mut ticker = time::interval(sweep_interval.unsigned_abs());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick completes immediately; the resume above stands in for it.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = cancel.cancelled() => return,
        }

        tokio::select! {
            cycle = planner.run_cycle(Arc::clone(&executor)) => match cycle {
                Ok(cycle) => debug!(
                    "Cycle ran {} tasks, drained {} changes",
                    cycle.sweep.dispatched, cycle.drained_changes
                ),
                Err(e) => warn!("Cycle failed: {e}"),
            },
            _ = cancel.cancelled() => {
                info!("Abandoning the cycle in progress");
                return;
            }
        }
    }
}

/// Accept one line of assignments. Bad lines are logged and skipped.
async fn intake(planner: &Planner, line: &str) {
    let line = line.trim();
    if line.is_empty() {
        return;
    }

    let assignments = match parse_assignments(line) {
        Ok(assignments) => assignments,
        Err(e) => {
            warn!("Ignoring malformed assignment batch: {e}");
            return;
        }
    };

    if planner.submit(&assignments) > 0 {
        if let Err(e) = planner.save_tasks().await {
            warn!("Failed to save tasks after intake: {e}");
        }
    }
}
