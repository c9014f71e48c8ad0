//! hodlvault Market Data Crate
//!
//! This crate defines the contract a historical price source must satisfy and
//! the registry that orchestrates several of them. It does not ship a network
//! transport; concrete sources live with whoever wires the application up.
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |   PriceQuery     |  (from, to, timestamp)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |  SourceRegistry  |  (priority order, fall-through on miss)
//! +------------------+
//!          |
//!          v
//! +-----------------------+
//! | HistoricalPriceSource |  (CryptoCompare, exchange API, ...)
//! +-----------------------+
//!          |
//!          v
//! +------------------+
//! | HistoricalPrice  |
//! +------------------+
//! ```

pub mod errors;
pub mod models;
pub mod provider;
pub mod registry;

pub use errors::{MarketDataError, RetryClass};
pub use models::{AssetId, HistoricalPrice, PriceQuery, SourceId, Timestamp};
pub use provider::HistoricalPriceSource;
pub use registry::SourceRegistry;
