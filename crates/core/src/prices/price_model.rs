use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use hodlvault_market_data::PriceQuery;

use crate::config::AppConfig;
use crate::constants::DEFAULT_PRICE_TIMEOUT_MS;
use crate::errors::Result;
use crate::utils::parse_history_start;

/// Settings for one [`PriceHistorian`](super::PriceHistorian).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistorianConfig {
    /// Unix time before which no price is resolved.
    pub history_start: i64,
    /// Bound on one remote resolution.
    pub fetch_timeout: Duration,
}

impl HistorianConfig {
    /// Builds a config from a `DD/MM/YYYY` history start and the default timeout.
    pub fn from_start_date(history_start: &str) -> Result<Self> {
        Ok(Self {
            history_start: parse_history_start(history_start)?,
            fetch_timeout: Duration::from_millis(DEFAULT_PRICE_TIMEOUT_MS),
        })
    }

    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            history_start: config.history_start,
            fetch_timeout: config.price_timeout,
        }
    }

    pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }
}

/// Preloaded `{from: {to: {timestamp: price}}}` table used in mocked mode.
///
/// Lookups are exact on all three keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MockedPrices {
    prices: HashMap<String, HashMap<String, HashMap<i64, Decimal>>>,
}

impl MockedPrices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a table from JSON. Timestamps are object keys, prices numbers.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn insert(
        &mut self,
        from_asset: impl Into<String>,
        to_asset: impl Into<String>,
        timestamp: i64,
        price: Decimal,
    ) -> &mut Self {
        self.prices
            .entry(from_asset.into())
            .or_default()
            .entry(to_asset.into())
            .or_default()
            .insert(timestamp, price);
        self
    }

    pub fn get(&self, query: &PriceQuery) -> Option<Decimal> {
        self.prices
            .get(&query.from_asset)?
            .get(&query.to_asset)?
            .get(&query.timestamp)
            .copied()
    }

    /// Number of (from, to, timestamp) entries.
    pub fn len(&self) -> usize {
        self.prices
            .values()
            .flat_map(|to_map| to_map.values())
            .map(|by_time| by_time.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
