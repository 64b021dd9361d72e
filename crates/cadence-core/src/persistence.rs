//! JSON snapshots of the plan store.
//!
//! Each collection is written to its own pretty-printed JSON object keyed by
//! task ID:
//!
//! - `<data_dir>/periodic_tasks.json`
//! - `<data_dir>/once_tasks.json`
//!
//! Saving overwrites both files; loading merges them into the live store with
//! live entries taking precedence.

use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use log::debug;

use crate::{
    error::{PersistenceResultExt, Result, SerializationResultExt},
    models::{TaskKind, TaskPlan},
    store::PlanStore,
};

/// File name of the periodic collection snapshot.
pub const PERIODIC_SNAPSHOT: &str = "periodic_tasks.json";

/// File name of the once collection snapshot.
pub const ONCE_SNAPSHOT: &str = "once_tasks.json";

/// Serialized form of one collection.
pub type Snapshot = BTreeMap<String, TaskPlan>;

/// Location of the snapshot for `kind` under `data_dir`.
pub fn snapshot_path(data_dir: &Path, kind: TaskKind) -> PathBuf {
    match kind {
        TaskKind::Periodic => data_dir.join(PERIODIC_SNAPSHOT),
        TaskKind::Once => data_dir.join(ONCE_SNAPSHOT),
    }
}

/// Write one collection to `path`, replacing any previous content.
pub fn write_snapshot(path: &Path, plans: &Snapshot) -> Result<()> {
    let json = serde_json::to_string_pretty(plans).serde_context(path)?;
    fs::write(path, json).persist_context(path)?;
    debug!("Wrote {} plans to {}", plans.len(), path.display());
    Ok(())
}

/// Read one collection from `path`.
///
/// A missing file is an empty collection, not an error.
pub fn read_snapshot(path: &Path) -> Result<Snapshot> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No snapshot at {}", path.display());
            return Ok(Snapshot::new());
        }
        Err(e) => return Err(e).persist_context(path),
    };

    serde_json::from_str(&json).serde_context(path)
}

/// Save both collections under `data_dir`.
///
/// The directory is created when missing. The periodic snapshot is written
/// first; if the once snapshot then fails, the periodic file stays updated.
pub fn save_snapshots(data_dir: &Path, periodic: &Snapshot, once: &Snapshot) -> Result<()> {
    fs::create_dir_all(data_dir).persist_context(data_dir)?;
    write_snapshot(&snapshot_path(data_dir, TaskKind::Periodic), periodic)?;
    write_snapshot(&snapshot_path(data_dir, TaskKind::Once), once)
}

/// Save both collections of `store` under `data_dir`.
pub fn save_store(data_dir: &Path, store: &PlanStore) -> Result<()> {
    save_snapshots(
        data_dir,
        store.plans(TaskKind::Periodic),
        store.plans(TaskKind::Once),
    )
}

/// Read both snapshots under `data_dir` without touching any store.
///
/// Both files are parsed before anything is merged, so a malformed once
/// snapshot leaves the store exactly as it was.
pub fn read_store(data_dir: &Path) -> Result<(Snapshot, Snapshot)> {
    let periodic = read_snapshot(&snapshot_path(data_dir, TaskKind::Periodic))?;
    let once = read_snapshot(&snapshot_path(data_dir, TaskKind::Once))?;
    Ok((periodic, once))
}

/// Load both snapshots under `data_dir` into `store`.
///
/// Returns the number of plans adopted from disk.
pub fn load_store(data_dir: &Path, store: &mut PlanStore) -> Result<usize> {
    let (periodic, once) = read_store(data_dir)?;
    Ok(merge_into(store, periodic, once))
}

/// Merge already-read snapshots into `store`.
pub fn merge_into(store: &mut PlanStore, periodic: Snapshot, once: Snapshot) -> usize {
    store.merge_snapshot(TaskKind::Periodic, periodic) + store.merge_snapshot(TaskKind::Once, once)
}
