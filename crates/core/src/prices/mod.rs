//! Historical price resolution.
//!
//! [`PriceHistorian`] answers "what was X worth in Y at time T" for the
//! valuation side of the app. It runs either against a live
//! [`SourceRegistry`](hodlvault_market_data::SourceRegistry) or against a
//! fixed table of [`MockedPrices`] for reproducible runs.

mod historian_handle;
mod price_errors;
mod price_historian;
mod price_model;

#[cfg(test)]
mod price_historian_tests;

pub use historian_handle::PriceHistorianHandle;
pub use price_errors::PriceError;
pub use price_historian::{PriceHistorian, PriceSourceMode};
pub use price_model::{HistorianConfig, MockedPrices};
