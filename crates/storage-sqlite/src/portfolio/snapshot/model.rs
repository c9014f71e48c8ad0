//! Database models for the three snapshot tables.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::StorageError;
use crate::utils::parse_decimal;
use hodlvault_core::portfolio::snapshot::{BalanceEntry, LocationEntry, NetWorthEntry};

#[derive(Debug, Clone, Queryable, Insertable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::timed_balances)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TimedBalanceDB {
    pub time: i64,
    pub currency: String,
    pub amount: String,
    pub usd_value: String,
}

#[derive(Debug, Clone, Queryable, Insertable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::timed_location_data)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TimedLocationDB {
    pub time: i64,
    pub location: String,
    pub usd_value: String,
}

#[derive(Debug, Clone, Queryable, Insertable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::timed_unique_data)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TimedUniqueDB {
    pub time: i64,
    pub net_usd: String,
}

impl From<&BalanceEntry> for TimedBalanceDB {
    fn from(entry: &BalanceEntry) -> Self {
        Self {
            time: entry.time,
            currency: entry.currency.clone(),
            amount: entry.amount.to_string(),
            usd_value: entry.usd_value.to_string(),
        }
    }
}

impl TryFrom<TimedBalanceDB> for BalanceEntry {
    type Error = StorageError;

    fn try_from(db: TimedBalanceDB) -> Result<Self, Self::Error> {
        Ok(Self {
            time: db.time,
            amount: parse_decimal("timed_balances.amount", &db.amount)?,
            usd_value: parse_decimal("timed_balances.usd_value", &db.usd_value)?,
            currency: db.currency,
        })
    }
}

impl From<&LocationEntry> for TimedLocationDB {
    fn from(entry: &LocationEntry) -> Self {
        Self {
            time: entry.time,
            location: entry.location.clone(),
            usd_value: entry.usd_value.to_string(),
        }
    }
}

impl TryFrom<TimedLocationDB> for LocationEntry {
    type Error = StorageError;

    fn try_from(db: TimedLocationDB) -> Result<Self, Self::Error> {
        Ok(Self {
            time: db.time,
            usd_value: parse_decimal("timed_location_data.usd_value", &db.usd_value)?,
            location: db.location,
        })
    }
}

impl From<&NetWorthEntry> for TimedUniqueDB {
    fn from(entry: &NetWorthEntry) -> Self {
        Self {
            time: entry.time,
            net_usd: entry.net_usd.to_string(),
        }
    }
}

impl TryFrom<TimedUniqueDB> for NetWorthEntry {
    type Error = StorageError;

    fn try_from(db: TimedUniqueDB) -> Result<Self, Self::Error> {
        Ok(Self {
            time: db.time,
            net_usd: parse_decimal("timed_unique_data.net_usd", &db.net_usd)?,
        })
    }
}
