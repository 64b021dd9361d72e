//! Executor that runs task commands through a shell.

use std::process::Stdio;

use cadence_core::{ExecutionError, Executor};
use jiff::SignedDuration;
use log::{debug, warn};
use tokio::{process::Command, runtime, time};

/// Runs each command as `<shell> -c <command>`.
///
/// Exit status 0 yields trimmed stdout. Any other status yields trimmed
/// stderr, or the exit status when stderr is empty. With a timeout set, a
/// command still running at the deadline is killed and reported as timed
/// out.
///
/// `execute` blocks the calling thread on a private single-threaded runtime,
/// so call it from the blocking pool (as the planner does) or from plain
/// synchronous code, never from inside an async task.
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    shell: String,
    timeout: Option<SignedDuration>,
}

impl ShellExecutor {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
            timeout: None,
        }
    }

    /// Kill commands that run longer than `timeout`.
    pub fn with_timeout(mut self, timeout: SignedDuration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    async fn run(&self, command: &str) -> Result<String, ExecutionError> {
        debug!("{} -c {command}", self.shell);
        let child = Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ExecutionError::new(format!("failed to start {}: {e}", self.shell)))?;

        // Dropping the child on timeout kills it.
        let output = child.wait_with_output();
        let output = match self.timeout {
            Some(limit) => match time::timeout(limit.unsigned_abs(), output).await {
                Ok(output) => output,
                Err(_) => {
                    warn!("Killing `{command}` after {limit:#}");
                    return Err(ExecutionError::timed_out(limit));
                }
            },
            None => output.await,
        }
        .map_err(|e| ExecutionError::new(format!("failed to wait for {}: {e}", self.shell)))?;

        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).trim().to_string());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if stderr.is_empty() {
            Err(ExecutionError::new(format!("command failed with {}", output.status)))
        } else {
            Err(ExecutionError::new(stderr))
        }
    }
}

impl Executor for ShellExecutor {
    fn execute(&self, command: &str) -> Result<String, ExecutionError> {
        // A private runtime keeps the kill deadline alive even while the
        // caller's runtime is shutting down.
        let runtime = runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ExecutionError::new(format!("failed to start runtime: {e}")))?;
        runtime.block_on(self.run(command))
    }
}
