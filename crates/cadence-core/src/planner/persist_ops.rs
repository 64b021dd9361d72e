//! Snapshot save and load for the Planner.
//!
//! Collections are copied under the store lock and written on the blocking
//! pool, so a slow disk never stalls intake or sweeps. Saves are serialized,
//! and each one copies the store only after the previous write finished. Loading reads and
//! parses both files first and merges them in one short critical section.

use log::{debug, info};
use tokio::task;

use super::Planner;
use crate::{
    error::Result,
    models::TaskKind,
    persistence::{self, Snapshot},
};

impl Planner {
    /// Write both collections to the data directory.
    ///
    /// A no-op without a data directory. On failure the in-memory state is
    /// left as it is.
    pub async fn save_tasks(&self) -> Result<()> {
        let Some(data_dir) = self.data_dir.clone() else {
            debug!("No data directory configured, skipping save");
            return Ok(());
        };

        let _save = self.save_lock.lock().await;
        let (periodic, once): (Snapshot, Snapshot) = {
            let store = self.store();
            (
                store.plans(TaskKind::Periodic).clone(),
                store.plans(TaskKind::Once).clone(),
            )
        };

        task::spawn_blocking(move || persistence::save_snapshots(&data_dir, &periodic, &once))
            .await??;
        Ok(())
    }

    /// Merge both snapshots from the data directory into the live store.
    ///
    /// Live entries win over their snapshot copies. Returns the number of
    /// plans adopted from disk; zero without a data directory.
    pub async fn load_tasks(&self) -> Result<usize> {
        let Some(data_dir) = self.data_dir.clone() else {
            debug!("No data directory configured, skipping load");
            return Ok(0);
        };

        let (periodic, once) =
            task::spawn_blocking(move || persistence::read_store(&data_dir)).await??;

        let adopted = persistence::merge_into(&mut self.store(), periodic, once);
        if adopted > 0 {
            info!("Loaded {adopted} tasks from disk");
        }
        Ok(adopted)
    }
}
