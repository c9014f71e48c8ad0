//! Source registry module.
//!
//! Orchestrates several [`HistoricalPriceSource`](crate::HistoricalPriceSource)s:
//! priority ordering and fall-through on misses or recoverable failures.

mod source_registry;

pub use source_registry::SourceRegistry;
