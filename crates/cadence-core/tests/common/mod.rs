use std::sync::Arc;

use cadence_core::{ExecutionError, Executor, Planner, PlannerBuilder};
use tempfile::TempDir;

/// Helper function to create a test planner backed by a temporary data directory
pub fn create_test_planner() -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let planner = open_planner(&temp_dir);
    (temp_dir, planner)
}

/// Open another planner on the same data directory
pub fn open_planner(temp_dir: &TempDir) -> Planner {
    PlannerBuilder::new()
        .with_data_dir(Some(temp_dir.path()))
        .build()
        .expect("Failed to create planner")
}

/// Executor that succeeds with the command text, except for commands
/// starting with `fail`
pub fn scripted_executor() -> Arc<impl Executor> {
    Arc::new(|command: &str| -> Result<String, ExecutionError> {
        if command.starts_with("fail") {
            Err(ExecutionError::new(format!("{command}: exit status 1")))
        } else {
            Ok(command.to_string())
        }
    })
}
