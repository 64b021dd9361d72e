//! Builder for creating and configuring Planner instances.

use std::path::{Path, PathBuf};

use jiff::SignedDuration;
use log::debug;

use super::{Planner, DEFAULT_EXECUTOR_TIMEOUT};
use crate::{
    config::EngineConfig,
    error::{PlannerError, Result},
    journal::{Journal, DEFAULT_MAX_BYTES},
};

/// Builder for creating and configuring Planner instances.
#[derive(Debug, Clone)]
pub struct PlannerBuilder {
    data_dir: Option<PathBuf>,
    executor_timeout: SignedDuration,
    journal: bool,
    journal_max_bytes: u64,
}

impl PlannerBuilder {
    /// Creates a new builder with default settings.
    ///
    /// Without a data directory the planner is purely in-memory: saving and
    /// loading are no-ops and nothing is journaled.
    pub fn new() -> Self {
        Self {
            data_dir: None,
            executor_timeout: DEFAULT_EXECUTOR_TIMEOUT,
            journal: true,
            journal_max_bytes: DEFAULT_MAX_BYTES,
        }
    }

    /// Seed the builder from a loaded configuration.
    ///
    /// The data directory falls back to `$XDG_DATA_HOME/cadence`.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        Ok(Self::new()
            .with_data_dir(Some(config.resolved_data_dir()?))
            .with_executor_timeout(config.executor_timeout()?)
            .with_journal_max_bytes(config.journal_max_bytes))
    }

    /// Sets the directory used for snapshots and the journal.
    pub fn with_data_dir<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.data_dir = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the hard limit on a single executor call.
    pub fn with_executor_timeout(mut self, timeout: SignedDuration) -> Self {
        self.executor_timeout = timeout;
        self
    }

    /// Enables or disables the activity journal.
    pub fn with_journal(mut self, enabled: bool) -> Self {
        self.journal = enabled;
        self
    }

    pub fn with_journal_max_bytes(mut self, max_bytes: u64) -> Self {
        self.journal_max_bytes = max_bytes;
        self
    }

    /// Builds the configured planner instance.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` if the executor timeout is not positive
    /// Returns `PlannerError::Persistence` if the journal directory cannot be created
    pub fn build(self) -> Result<Planner> {
        if !self.executor_timeout.is_positive() {
            return Err(PlannerError::invalid_input("executor_timeout")
                .with_reason("must be a positive duration"));
        }

        let journal = match (&self.data_dir, self.journal) {
            (Some(dir), true) => {
                Some(Journal::open(dir)?.with_max_bytes(self.journal_max_bytes))
            }
            _ => None,
        };

        match &self.data_dir {
            Some(dir) => debug!("Planner data directory: {}", dir.display()),
            None => debug!("Planner running without persistence"),
        }

        Ok(Planner::new(self.data_dir, journal, self.executor_timeout))
    }
}

impl Default for PlannerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
