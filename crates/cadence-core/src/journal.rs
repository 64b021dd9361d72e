//! Append-only JSON-lines activity journal.
//!
//! Every intake, execution, removal and drained change can be written to
//! `<data_dir>/cadence_journal.jsonl`, one [`JournalEntry`] per line. The
//! journal is a side channel: callers log failures with `warn!` and carry on.

use std::{
    collections::BTreeMap,
    fmt,
    fs::{self, OpenOptions},
    io::{BufRead, BufReader, ErrorKind, Write},
    path::{Path, PathBuf},
    str::FromStr,
    sync::{Mutex, MutexGuard, PoisonError},
};

use jiff::Timestamp;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{PersistenceResultExt, Result, SerializationResultExt};

/// File name of the journal inside the data directory.
pub const JOURNAL_FILE: &str = "cadence_journal.jsonl";

/// Size above which the journal is rotated before the next append.
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Category of a journal entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum JournalKind {
    TaskAssigned,
    TaskCompleted,
    TaskFailed,
    TaskExecuted,
    TaskRemoved,
    TaskChange,
}

impl JournalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            JournalKind::TaskAssigned => "task_assigned",
            JournalKind::TaskCompleted => "task_completed",
            JournalKind::TaskFailed => "task_failed",
            JournalKind::TaskExecuted => "task_executed",
            JournalKind::TaskRemoved => "task_removed",
            JournalKind::TaskChange => "task_change",
        }
    }
}

impl fmt::Display for JournalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JournalKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "task_assigned" => Ok(JournalKind::TaskAssigned),
            "task_completed" => Ok(JournalKind::TaskCompleted),
            "task_failed" => Ok(JournalKind::TaskFailed),
            "task_executed" => Ok(JournalKind::TaskExecuted),
            "task_removed" => Ok(JournalKind::TaskRemoved),
            "task_change" => Ok(JournalKind::TaskChange),
            _ => Err(format!("Invalid journal kind: {s}")),
        }
    }
}

/// One line of the journal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JournalEntry {
    pub timestamp: Timestamp,
    pub kind: JournalKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JournalEntry {
    /// Entry stamped with the current time.
    pub fn new(kind: JournalKind, task_id: Option<&str>, content: impl Into<String>) -> Self {
        Self {
            timestamp: Timestamp::now(),
            kind,
            task_id: task_id.map(str::to_string),
            content: content.into(),
            data: None,
        }
    }

    /// Attach structured data to the entry.
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// Size and per-kind counts of the journal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JournalStats {
    pub total_entries: usize,
    pub by_kind: BTreeMap<JournalKind, usize>,
    pub file_size: u64,
}

/// Handle on a journal file.
#[derive(Debug)]
pub struct Journal {
    path: PathBuf,
    max_bytes: u64,
    write_lock: Mutex<()>,
}

impl Journal {
    /// Open the journal in `data_dir`, creating the directory if needed.
    pub fn open(data_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir).persist_context(data_dir)?;
        Ok(Self {
            path: data_dir.join(JOURNAL_FILE),
            max_bytes: DEFAULT_MAX_BYTES,
            write_lock: Mutex::new(()),
        })
    }

    /// Override the rotation threshold.
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append one entry, rotating the file first if it is too large.
    pub fn append(&self, entry: &JournalEntry) -> Result<()> {
        let _guard = self.lock();
        self.rotate_if_needed()?;

        let mut line = serde_json::to_string(entry).serde_context(&self.path)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .persist_context(&self.path)?;
        file.write_all(line.as_bytes()).persist_context(&self.path)?;
        Ok(())
    }

    /// Append an entry and log instead of failing.
    pub fn record(&self, entry: JournalEntry) {
        if let Err(e) = self.append(&entry) {
            warn!("Failed to write {} journal entry: {e}", entry.kind);
        }
    }

    fn rotate_if_needed(&self) -> Result<()> {
        let size = match fs::metadata(&self.path) {
            Ok(metadata) => metadata.len(),
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e).persist_context(&self.path),
        };
        if size < self.max_bytes {
            return Ok(());
        }

        let stamp = Timestamp::now().strftime("%Y%m%d_%H%M%S");
        let mut backup = self.path.clone().into_os_string();
        backup.push(format!(".{stamp}.bak"));
        let backup = PathBuf::from(backup);

        fs::rename(&self.path, &backup).persist_context(&backup)?;
        info!("Rotated journal ({size} bytes) to {}", backup.display());
        Ok(())
    }

    /// Every readable entry in file order. Malformed lines are skipped.
    pub fn read_all(&self) -> Result<Vec<JournalEntry>> {
        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e).persist_context(&self.path),
        };

        let mut entries = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.persist_context(&self.path)?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(&line) {
                Ok(entry) => entries.push(entry),
                Err(e) => debug!("Skipping malformed journal line {}: {e}", index + 1),
            }
        }
        Ok(entries)
    }

    /// The last `limit` entries in file order.
    pub fn read_recent(&self, limit: usize) -> Result<Vec<JournalEntry>> {
        let mut entries = self.read_all()?;
        let skip = entries.len().saturating_sub(limit);
        entries.drain(..skip);
        Ok(entries)
    }

    /// The last `limit` entries of one kind; `limit == 0` returns them all.
    pub fn read_by_kind(&self, kind: JournalKind, limit: usize) -> Result<Vec<JournalEntry>> {
        let mut entries: Vec<_> = self
            .read_all()?
            .into_iter()
            .filter(|entry| entry.kind == kind)
            .collect();
        if limit > 0 {
            let skip = entries.len().saturating_sub(limit);
            entries.drain(..skip);
        }
        Ok(entries)
    }

    pub fn stats(&self) -> Result<JournalStats> {
        let entries = self.read_all()?;
        let mut stats = JournalStats {
            total_entries: entries.len(),
            ..JournalStats::default()
        };
        for entry in &entries {
            *stats.by_kind.entry(entry.kind).or_default() += 1;
        }
        stats.file_size = match fs::metadata(&self.path) {
            Ok(metadata) => metadata.len(),
            Err(e) if e.kind() == ErrorKind::NotFound => 0,
            Err(e) => return Err(e).persist_context(&self.path),
        };
        Ok(stats)
    }
}
