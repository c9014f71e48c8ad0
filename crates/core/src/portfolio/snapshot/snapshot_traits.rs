//! Repository traits for balance snapshots.

use rust_decimal::Decimal;

use super::{BalanceEntry, BalanceSnapshot, LocationEntry, NetWorthEntry, TimeRange};
use crate::errors::Result;

/// Repository trait for the three snapshot tables.
///
/// Rows are append-only: there is no update path, and the only delete is
/// [`purge_balance_history`](Self::purge_balance_history).
pub trait SnapshotRepositoryTrait: Send + Sync {
    /// Writes balances, locations and net worth of one snapshot in a single
    /// transaction. On any failure nothing of the snapshot is visible.
    fn save_snapshot(&self, snapshot: &BalanceSnapshot) -> Result<()>;

    /// Appends balance rows. No uniqueness is enforced.
    fn add_multiple_balances(&self, entries: &[BalanceEntry]) -> Result<()>;

    /// Appends location rows. No uniqueness is enforced.
    fn add_multiple_location_data(&self, entries: &[LocationEntry]) -> Result<()>;

    /// Appends one net worth row.
    fn add_timed_unique_data(&self, time: i64, net_usd: Decimal) -> Result<()>;

    /// Balance rows within `range`, ordered by time then currency.
    fn get_timed_balances(&self, range: TimeRange) -> Result<Vec<BalanceEntry>>;

    /// Location rows within `range`, ordered by time then location.
    fn get_location_data(&self, range: TimeRange) -> Result<Vec<LocationEntry>>;

    /// Net worth rows within `range`, ordered by time.
    fn get_net_worth_history(&self, range: TimeRange) -> Result<Vec<NetWorthEntry>>;

    /// The snapshot recorded at `time`, if a net worth row exists for it.
    fn get_snapshot(&self, time: i64) -> Result<Option<BalanceSnapshot>>;

    /// Time of the most recent net worth row.
    fn latest_snapshot_time(&self) -> Result<Option<i64>>;

    /// Drops all snapshot history and recreates the empty tables.
    fn purge_balance_history(&self) -> Result<()>;
}
