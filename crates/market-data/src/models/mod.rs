//! Market data models
//!
//! - `types` - Type aliases for common identifiers (SourceId, AssetId, Timestamp)
//! - `price` - Price lookup request and result (PriceQuery, HistoricalPrice)

mod price;
mod types;

pub use price::{HistoricalPrice, PriceQuery};
pub use types::{AssetId, SourceId, Timestamp};
