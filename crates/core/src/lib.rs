//! hodlvault Core - Domain entities, services, and traits.
//!
//! This crate contains the storage-agnostic core of hodlvault: the models
//! persisted in the encrypted ledger, the repository traits implemented by
//! the `storage-sqlite` crate, the snapshot writer and the historical price
//! resolver.

pub mod accounts;
pub mod balances;
pub mod config;
pub mod constants;
pub mod errors;
pub mod exchanges;
pub mod portfolio;
pub mod prices;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
