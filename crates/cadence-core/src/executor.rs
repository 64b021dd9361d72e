//! The executor contract.
//!
//! The engine never interprets a command: it hands the string to an
//! [`Executor`] and records whatever comes back.

use crate::error::ExecutionError;

/// Runs one opaque command synchronously.
pub trait Executor: Send + Sync {
    /// Execute `command`, returning its output or a failure message.
    fn execute(&self, command: &str) -> Result<String, ExecutionError>;
}

impl<F> Executor for F
where
    F: Fn(&str) -> Result<String, ExecutionError> + Send + Sync,
{
    fn execute(&self, command: &str) -> Result<String, ExecutionError> {
        self(command)
    }
}
