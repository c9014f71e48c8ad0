//! Price lookup request and result types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::types::{AssetId, SourceId, Timestamp};

/// One historical price lookup: the value of `from_asset` expressed in
/// `to_asset` at `timestamp`.
///
/// Doubles as the cache key for resolved prices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuery {
    pub from_asset: AssetId,
    pub to_asset: AssetId,
    pub timestamp: Timestamp,
}

impl PriceQuery {
    pub fn new(
        from_asset: impl Into<AssetId>,
        to_asset: impl Into<AssetId>,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            from_asset: from_asset.into(),
            to_asset: to_asset.into(),
            timestamp,
        }
    }

    /// True when both sides name the same asset; such a query is always worth 1.
    pub fn is_identity(&self) -> bool {
        self.from_asset == self.to_asset
    }
}

impl fmt::Display for PriceQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.from_asset, self.to_asset, self.timestamp)
    }
}

/// A price resolved by a source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalPrice {
    pub query: PriceQuery,
    pub price: Decimal,
    pub source: SourceId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_query() {
        assert!(PriceQuery::new("BTC", "BTC", 1_500_000_000).is_identity());
        assert!(!PriceQuery::new("BTC", "USD", 1_500_000_000).is_identity());
    }

    #[test]
    fn test_display_names_the_triple() {
        let query = PriceQuery::new("ETH", "EUR", 1_451_606_400);
        assert_eq!(query.to_string(), "ETH/EUR@1451606400");
    }
}
