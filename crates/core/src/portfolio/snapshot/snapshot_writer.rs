use log::{debug, info};
use std::sync::Arc;

use super::{BalanceSheet, BalanceSnapshot, SnapshotRepositoryTrait};
use crate::errors::Result;
use crate::utils::now_timestamp;

/// Source of the snapshot timestamp, in Unix seconds.
pub type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

/// Persists computed balance sheets as timestamped snapshots.
///
/// Every row of one snapshot carries the same timestamp, captured once per
/// write, and the rows land in a single transaction.
pub struct SnapshotWriter {
    repository: Arc<dyn SnapshotRepositoryTrait>,
    clock: Clock,
}

impl SnapshotWriter {
    pub fn new(repository: Arc<dyn SnapshotRepositoryTrait>) -> Self {
        Self {
            repository,
            clock: Arc::new(now_timestamp),
        }
    }

    /// Replaces the wall clock, e.g. for deterministic tests.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Writes `sheet` and returns the snapshot exactly as persisted.
    pub fn write(&self, sheet: &BalanceSheet) -> Result<BalanceSnapshot> {
        sheet.validate()?;

        let time = (self.clock)();
        let snapshot = BalanceSnapshot::from_sheet(time, sheet);
        debug!(
            "Writing snapshot at {}: {} balances, {} locations",
            time,
            snapshot.balances.len(),
            snapshot.locations.len()
        );

        self.repository.save_snapshot(&snapshot)?;
        info!("Saved balance snapshot at {}", time);
        Ok(snapshot)
    }
}
