//! Portfolio snapshot domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::{MAX_CURRENCY_LEN, MAX_NAME_LEN};
use crate::utils::validate_identifier;
use crate::Result;

/// Amount and USD value of one asset in a balance sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetBalance {
    pub amount: Decimal,
    pub usd_value: Decimal,
}

/// USD value held at one location (exchange, blockchain, "total").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationBalance {
    pub usd_value: Decimal,
}

/// A computed balance sheet, as handed over by the accounting process.
///
/// Holdings, locations and the net worth total are separate fields, so an
/// asset can be named anything (including "location" or "net_usd").
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheet {
    pub holdings: BTreeMap<String, AssetBalance>,
    pub locations: BTreeMap<String, LocationBalance>,
    pub net_usd: Decimal,
}

impl BalanceSheet {
    pub fn new(net_usd: Decimal) -> Self {
        Self {
            net_usd,
            ..Default::default()
        }
    }

    pub fn with_holding(
        mut self,
        asset: impl Into<String>,
        amount: Decimal,
        usd_value: Decimal,
    ) -> Self {
        self.holdings
            .insert(asset.into(), AssetBalance { amount, usd_value });
        self
    }

    pub fn with_location(mut self, location: impl Into<String>, usd_value: Decimal) -> Self {
        self.locations
            .insert(location.into(), LocationBalance { usd_value });
        self
    }

    /// Checks every identifier against its column contract.
    pub fn validate(&self) -> Result<()> {
        for asset in self.holdings.keys() {
            validate_identifier("currency", asset, MAX_CURRENCY_LEN)?;
        }
        for location in self.locations.keys() {
            validate_identifier("location", location, MAX_NAME_LEN)?;
        }
        Ok(())
    }
}

/// One row of `timed_balances`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceEntry {
    pub time: i64,
    pub currency: String,
    pub amount: Decimal,
    pub usd_value: Decimal,
}

/// One row of `timed_location_data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationEntry {
    pub time: i64,
    pub location: String,
    pub usd_value: Decimal,
}

/// One row of `timed_unique_data`; the primary record of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetWorthEntry {
    pub time: i64,
    pub net_usd: Decimal,
}

/// Everything one snapshot writes, all sharing a single timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSnapshot {
    pub time: i64,
    pub balances: Vec<BalanceEntry>,
    pub locations: Vec<LocationEntry>,
    pub net_worth: NetWorthEntry,
}

impl BalanceSnapshot {
    /// Flattens a balance sheet into rows stamped with `time`.
    pub fn from_sheet(time: i64, sheet: &BalanceSheet) -> Self {
        let balances = sheet
            .holdings
            .iter()
            .map(|(asset, balance)| BalanceEntry {
                time,
                currency: asset.clone(),
                amount: balance.amount,
                usd_value: balance.usd_value,
            })
            .collect();

        let locations = sheet
            .locations
            .iter()
            .map(|(location, balance)| LocationEntry {
                time,
                location: location.clone(),
                usd_value: balance.usd_value,
            })
            .collect();

        Self {
            time,
            balances,
            locations,
            net_worth: NetWorthEntry {
                time,
                net_usd: sheet.net_usd,
            },
        }
    }
}

/// Inclusive time window for history queries; `None` leaves a side open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeRange {
    pub from: Option<i64>,
    pub to: Option<i64>,
}

impl TimeRange {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn between(from: i64, to: i64) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn at(time: i64) -> Self {
        Self::between(time, time)
    }

    pub fn contains(&self, time: i64) -> bool {
        self.from.map_or(true, |from| time >= from) && self.to.map_or(true, |to| time <= to)
    }
}
