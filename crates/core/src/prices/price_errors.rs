use thiserror::Error;

use hodlvault_market_data::{MarketDataError, PriceQuery};

/// Errors raised while resolving a historical price.
///
/// Cloneable so one settled fetch can be handed to every caller that was
/// waiting on it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    #[error("Could not find a price for {from} in {to} at {timestamp}")]
    PriceNotFound {
        from: String,
        to: String,
        timestamp: i64,
    },

    #[error("No mocked price found from {from} to {to} at {timestamp}")]
    MockPriceMiss {
        from: String,
        to: String,
        timestamp: i64,
    },

    #[error("Timestamp {timestamp} is before the start of price history ({history_start})")]
    BeforeHistoryStart { timestamp: i64, history_start: i64 },

    #[error("Price lookup for {query} timed out after {after_ms}ms")]
    Timeout { query: PriceQuery, after_ms: u64 },

    #[error("Price lookup for {0} was cancelled")]
    Cancelled(PriceQuery),

    #[error("Price source failed: {0}")]
    Source(#[from] MarketDataError),

    #[error("Price historian is not initialized")]
    NotInitialized,

    #[error("Price historian is already initialized")]
    AlreadyInitialized,
}

impl PriceError {
    pub(crate) fn not_found(query: &PriceQuery) -> Self {
        PriceError::PriceNotFound {
            from: query.from_asset.clone(),
            to: query.to_asset.clone(),
            timestamp: query.timestamp,
        }
    }

    pub(crate) fn mock_miss(query: &PriceQuery) -> Self {
        PriceError::MockPriceMiss {
            from: query.from_asset.clone(),
            to: query.to_asset.clone(),
            timestamp: query.timestamp,
        }
    }
}
