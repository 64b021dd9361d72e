//! Engine configuration loaded from TOML.
//!
//! Every field has a default, so an empty or partial file is valid:
//!
//! ```toml
//! data_dir = "/var/lib/cadence"
//! sweep_interval = "30s"
//! executor_timeout = "5m"
//! shell = "sh"
//! journal_max_bytes = 10485760
//! ```
//!
//! Without an explicit path the file is looked up at
//! `$XDG_CONFIG_HOME/cadence/cadence.toml`; without `data_dir` snapshots
//! live in `$XDG_DATA_HOME/cadence/`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use jiff::SignedDuration;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ConfigResultExt, PersistenceResultExt, PlannerError, Result},
    journal::DEFAULT_MAX_BYTES,
    persistence::PERIODIC_SNAPSHOT,
    schedule,
};

/// Prefix used for XDG config and data directories.
pub const APP_NAME: &str = "cadence";

/// Name of the configuration file.
pub const CONFIG_FILE: &str = "cadence.toml";

/// Tunables for the engine and the `serve` loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Directory holding snapshots and the journal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Time between sweeps in `serve`
    pub sweep_interval: String,
    /// Hard limit on a single executor call
    pub executor_timeout: String,
    /// Shell used by the command executor
    pub shell: String,
    /// Journal size that triggers rotation
    pub journal_max_bytes: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            sweep_interval: "30s".to_string(),
            executor_timeout: "5m".to_string(),
            shell: "sh".to_string(),
            journal_max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

impl EngineConfig {
    /// Parse a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).config_context("Invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Load the configuration from `path`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).persist_context(path)?;
        debug!("Loaded configuration from {}", path.display());
        Self::from_toml(&content)
    }

    /// Load `path` if given, else the XDG config file if present, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_config_path() {
                Some(path) => Self::from_file(&path),
                None => Ok(Self::default()),
            },
        }
    }

    /// The XDG config file, if one exists.
    pub fn default_config_path() -> Option<PathBuf> {
        xdg::BaseDirectories::with_prefix(APP_NAME).find_config_file(CONFIG_FILE)
    }

    /// Default data directory following the XDG Base Directory specification:
    /// `$XDG_DATA_HOME/cadence` or `~/.local/share/cadence`.
    pub fn default_data_dir() -> Result<PathBuf> {
        let snapshot = xdg::BaseDirectories::with_prefix(APP_NAME)
            .place_data_file(PERIODIC_SNAPSHOT)
            .map_err(|e| PlannerError::XdgDirectory(e.to_string()))?;
        snapshot
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| PlannerError::XdgDirectory("data directory has no parent".to_string()))
    }

    /// Configured data directory, or the XDG default.
    pub fn resolved_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Self::default_data_dir(),
        }
    }

    pub fn sweep_interval(&self) -> Result<SignedDuration> {
        parse_duration("sweep_interval", &self.sweep_interval)
    }

    pub fn executor_timeout(&self) -> Result<SignedDuration> {
        parse_duration("executor_timeout", &self.executor_timeout)
    }

    fn validate(&self) -> Result<()> {
        self.sweep_interval()?;
        self.executor_timeout()?;
        if self.shell.trim().is_empty() {
            return Err(PlannerError::invalid_input("shell").with_reason("must not be empty"));
        }
        Ok(())
    }
}

fn parse_duration(field: &str, literal: &str) -> Result<SignedDuration> {
    schedule::parse_interval(literal).ok_or_else(|| {
        PlannerError::invalid_input(field)
            .with_reason(format!("'{literal}' is not a positive duration"))
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = EngineConfig::from_toml("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.sweep_interval().unwrap(), SignedDuration::from_secs(30));
        assert_eq!(config.executor_timeout().unwrap(), SignedDuration::from_mins(5));
    }

    #[test]
    fn test_partial_document() {
        let config = EngineConfig::from_toml(
            r#"
            data_dir = "/srv/cadence"
            sweep_interval = "10s"
            "#,
        )
        .unwrap();

        assert_eq!(config.data_dir, Some(PathBuf::from("/srv/cadence")));
        assert_eq!(config.sweep_interval().unwrap(), SignedDuration::from_secs(10));
        assert_eq!(config.shell, "sh");
        assert_eq!(config.resolved_data_dir().unwrap(), PathBuf::from("/srv/cadence"));
    }

    #[test]
    fn test_invalid_duration_is_rejected() {
        let err = EngineConfig::from_toml(r#"executor_timeout = "forever""#).unwrap_err();
        assert!(err.to_string().contains("executor_timeout"));
    }

    #[test]
    fn test_malformed_toml_is_configuration_error() {
        let err = EngineConfig::from_toml("sweep_interval = ").unwrap_err();
        assert!(matches!(err, PlannerError::Configuration { .. }));
    }

    #[test]
    fn test_load_explicit_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&path, "shell = \"bash\"\njournal_max_bytes = 1024\n").unwrap();

        let config = EngineConfig::load(Some(&path)).unwrap();
        assert_eq!(config.shell, "bash");
        assert_eq!(config.journal_max_bytes, 1024);
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let err = EngineConfig::load(Some(&temp_dir.path().join("absent.toml"))).unwrap_err();
        assert!(err.is_persistence());
    }
}
