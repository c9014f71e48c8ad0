//! Historical price source trait definition.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::MarketDataError;
use crate::models::PriceQuery;

/// Trait for historical price sources.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use hodlvault_market_data::{HistoricalPriceSource, MarketDataError, PriceQuery};
///
/// struct CryptoCompare { client: reqwest::Client }
///
/// #[async_trait]
/// impl HistoricalPriceSource for CryptoCompare {
///     fn id(&self) -> &'static str {
///         "CRYPTOCOMPARE"
///     }
///
///     async fn fetch(&self, query: &PriceQuery) -> Result<Option<Decimal>, MarketDataError> {
///         // call the histohour endpoint around query.timestamp ...
///     }
/// }
/// ```
#[async_trait]
pub trait HistoricalPriceSource: Send + Sync {
    /// Unique identifier for this source, used for logging and ordering ties.
    fn id(&self) -> &'static str;

    /// Source priority for ordering.
    ///
    /// Lower values = higher priority. Default is 10.
    fn priority(&self) -> u8 {
        10
    }

    /// Resolve the price of `query.from_asset` in `query.to_asset` at or near
    /// `query.timestamp`.
    ///
    /// Returns `Ok(None)` when the source simply has no quote for the triple
    /// (a miss), and `Err` when the source failed to answer at all.
    async fn fetch(&self, query: &PriceQuery) -> Result<Option<Decimal>, MarketDataError>;
}
