//! Error types and retry classification for the market data crate.
//!
//! This module provides:
//! - [`MarketDataError`]: The main error enum for all price source operations
//! - [`RetryClass`]: Classification for determining fall-through behavior

mod retry;

pub use retry::RetryClass;

use thiserror::Error;

/// Errors that can occur while querying historical price sources.
///
/// Each variant is classified into a [`RetryClass`] via the
/// [`retry_class`](Self::retry_class) method.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketDataError {
    /// The asset pair is not something this source can ever price.
    #[error("Unsupported asset pair: {from}/{to}")]
    UnsupportedPair { from: String, to: String },

    /// The query is malformed (empty asset, negative timestamp).
    /// Terminal - no source can answer it.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// The source rate limited the request.
    #[error("Rate limited: {source_id}")]
    RateLimited { source_id: String },

    /// A source-specific failure (HTTP error, malformed payload, outage).
    #[error("Source error: {source_id} - {message}")]
    SourceError { source_id: String, message: String },

    /// No sources are registered.
    #[error("No price sources available")]
    NoSourcesAvailable,
}

impl MarketDataError {
    /// Returns the fall-through classification for this error.
    pub fn retry_class(&self) -> RetryClass {
        match self {
            Self::InvalidQuery(_) | Self::NoSourcesAvailable => RetryClass::Never,
            Self::UnsupportedPair { .. } | Self::RateLimited { .. } | Self::SourceError { .. } => {
                RetryClass::NextSource
            }
        }
    }
}
