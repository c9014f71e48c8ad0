use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::model::{TimedBalanceDB, TimedLocationDB, TimedUniqueDB};
use crate::db::{self, get_connection, DbPool};
use crate::errors::StorageError;
use crate::schema::{timed_balances, timed_location_data, timed_unique_data};
use crate::utils::chunk_rows_for_sqlite;
use hodlvault_core::constants::{MAX_CURRENCY_LEN, MAX_NAME_LEN};
use hodlvault_core::errors::Result;
use hodlvault_core::portfolio::snapshot::{
    BalanceEntry, BalanceSnapshot, LocationEntry, NetWorthEntry, SnapshotRepositoryTrait,
    TimeRange,
};
use hodlvault_core::utils::validate_identifier;

pub struct SnapshotRepository {
    pool: Arc<DbPool>,
}

impl SnapshotRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

fn validate_balances(entries: &[BalanceEntry]) -> Result<()> {
    entries
        .iter()
        .try_for_each(|e| validate_identifier("currency", &e.currency, MAX_CURRENCY_LEN))
}

fn validate_locations(entries: &[LocationEntry]) -> Result<()> {
    entries
        .iter()
        .try_for_each(|e| validate_identifier("location", &e.location, MAX_NAME_LEN))
}

fn insert_balances(
    conn: &mut SqliteConnection,
    entries: &[BalanceEntry],
) -> std::result::Result<usize, StorageError> {
    let rows: Vec<TimedBalanceDB> = entries.iter().map(TimedBalanceDB::from).collect();
    let mut inserted = 0;
    for chunk in chunk_rows_for_sqlite(&rows, 4) {
        inserted += diesel::insert_into(timed_balances::table)
            .values(chunk)
            .execute(conn)?;
    }
    Ok(inserted)
}

fn insert_locations(
    conn: &mut SqliteConnection,
    entries: &[LocationEntry],
) -> std::result::Result<usize, StorageError> {
    let rows: Vec<TimedLocationDB> = entries.iter().map(TimedLocationDB::from).collect();
    let mut inserted = 0;
    for chunk in chunk_rows_for_sqlite(&rows, 3) {
        inserted += diesel::insert_into(timed_location_data::table)
            .values(chunk)
            .execute(conn)?;
    }
    Ok(inserted)
}

fn insert_net_worth(
    conn: &mut SqliteConnection,
    entry: &NetWorthEntry,
) -> std::result::Result<usize, StorageError> {
    Ok(diesel::insert_into(timed_unique_data::table)
        .values(&TimedUniqueDB::from(entry))
        .execute(conn)?)
}

fn snapshot_exists(
    conn: &mut SqliteConnection,
    at: i64,
) -> std::result::Result<bool, StorageError> {
    use crate::schema::timed_unique_data::dsl::*;

    let exists = diesel::select(diesel::dsl::exists(timed_unique_data.filter(time.eq(at))))
        .get_result(conn)?;
    Ok(exists)
}

fn load_balances(
    conn: &mut SqliteConnection,
    range: TimeRange,
) -> std::result::Result<Vec<BalanceEntry>, StorageError> {
    use crate::schema::timed_balances::dsl::*;

    let mut query = timed_balances.into_boxed();
    if let Some(from) = range.from {
        query = query.filter(time.ge(from));
    }
    if let Some(to) = range.to {
        query = query.filter(time.le(to));
    }
    query
        .order((time.asc(), currency.asc()))
        .load::<TimedBalanceDB>(conn)?
        .into_iter()
        .map(BalanceEntry::try_from)
        .collect()
}

fn load_locations(
    conn: &mut SqliteConnection,
    range: TimeRange,
) -> std::result::Result<Vec<LocationEntry>, StorageError> {
    use crate::schema::timed_location_data::dsl::*;

    let mut query = timed_location_data.into_boxed();
    if let Some(from) = range.from {
        query = query.filter(time.ge(from));
    }
    if let Some(to) = range.to {
        query = query.filter(time.le(to));
    }
    query
        .order((time.asc(), location.asc()))
        .load::<TimedLocationDB>(conn)?
        .into_iter()
        .map(LocationEntry::try_from)
        .collect()
}

fn load_net_worth(
    conn: &mut SqliteConnection,
    range: TimeRange,
) -> std::result::Result<Vec<NetWorthEntry>, StorageError> {
    use crate::schema::timed_unique_data::dsl::*;

    let mut query = timed_unique_data.into_boxed();
    if let Some(from) = range.from {
        query = query.filter(time.ge(from));
    }
    if let Some(to) = range.to {
        query = query.filter(time.le(to));
    }
    query
        .order(time.asc())
        .load::<TimedUniqueDB>(conn)?
        .into_iter()
        .map(NetWorthEntry::try_from)
        .collect()
}

impl SnapshotRepositoryTrait for SnapshotRepository {
    fn save_snapshot(&self, snapshot: &BalanceSnapshot) -> Result<()> {
        validate_balances(&snapshot.balances)?;
        validate_locations(&snapshot.locations)?;

        let mut conn = get_connection(&self.pool)?;
        conn.immediate_transaction::<_, StorageError, _>(|conn| {
            // One net-worth row per timestamp, or get_snapshot would mix writes.
            if snapshot_exists(conn, snapshot.time)? {
                return Err(StorageError::DuplicateSnapshot(snapshot.time));
            }
            let balances = insert_balances(conn, &snapshot.balances)?;
            let locations = insert_locations(conn, &snapshot.locations)?;
            insert_net_worth(conn, &snapshot.net_worth)?;
            debug!(
                "Snapshot {}: inserted {} balances and {} locations",
                snapshot.time, balances, locations
            );
            Ok(())
        })?;
        Ok(())
    }

    fn add_multiple_balances(&self, entries: &[BalanceEntry]) -> Result<()> {
        validate_balances(entries)?;
        let mut conn = get_connection(&self.pool)?;
        conn.immediate_transaction::<_, StorageError, _>(|conn| insert_balances(conn, entries))?;
        Ok(())
    }

    fn add_multiple_location_data(&self, entries: &[LocationEntry]) -> Result<()> {
        validate_locations(entries)?;
        let mut conn = get_connection(&self.pool)?;
        conn.immediate_transaction::<_, StorageError, _>(|conn| insert_locations(conn, entries))?;
        Ok(())
    }

    fn add_timed_unique_data(&self, time: i64, net_usd: Decimal) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;
        insert_net_worth(&mut conn, &NetWorthEntry { time, net_usd })?;
        Ok(())
    }

    fn get_timed_balances(&self, range: TimeRange) -> Result<Vec<BalanceEntry>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(load_balances(&mut conn, range)?)
    }

    fn get_location_data(&self, range: TimeRange) -> Result<Vec<LocationEntry>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(load_locations(&mut conn, range)?)
    }

    fn get_net_worth_history(&self, range: TimeRange) -> Result<Vec<NetWorthEntry>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(load_net_worth(&mut conn, range)?)
    }

    fn get_snapshot(&self, at: i64) -> Result<Option<BalanceSnapshot>> {
        let mut conn = get_connection(&self.pool)?;
        let snapshot = conn.transaction::<_, StorageError, _>(|conn| {
            let range = TimeRange::at(at);
            let Some(net_worth) = load_net_worth(conn, range)?.into_iter().next() else {
                return Ok(None);
            };
            Ok(Some(BalanceSnapshot {
                time: at,
                balances: load_balances(conn, range)?,
                locations: load_locations(conn, range)?,
                net_worth,
            }))
        })?;
        Ok(snapshot)
    }

    fn latest_snapshot_time(&self) -> Result<Option<i64>> {
        use crate::schema::timed_unique_data::dsl::*;

        let mut conn = get_connection(&self.pool)?;
        let latest = timed_unique_data
            .select(diesel::dsl::max(time))
            .first::<Option<i64>>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(latest)
    }

    fn purge_balance_history(&self) -> Result<()> {
        db::recreate_snapshot_tables(&self.pool)
    }
}
