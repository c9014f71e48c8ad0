//! Historical price source abstraction.
//!
//! The core system never talks to a price API directly. Anything that can
//! answer "what was X worth in Y at time T" implements
//! [`HistoricalPriceSource`] and is handed to a [`SourceRegistry`](crate::SourceRegistry).

mod traits;

pub use traits::HistoricalPriceSource;
