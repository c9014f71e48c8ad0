//! SQLCipher storage implementation for hodlvault.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! over an encrypted SQLite file. It implements the repository traits defined
//! in `hodlvault-core` and contains:
//! - The single-connection encrypted pool and wrong-password detection
//! - Idempotent schema creation for the seven ledger tables
//! - Repository implementations for all persisted entities
//! - Database-specific model types (with Diesel derives)
//! - [`EncryptedStore`], the per-user facade over all of the above
//!
//! # Architecture
//!
//! ```text
//!      core (domain, traits)
//!                  │
//!                  ▼
//!          storage-sqlite (this crate)
//!                  │
//!                  ▼
//!         SQLCipher database file
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod store;
pub mod utils;

// Repository implementations
pub mod accounts;
pub mod balances;
pub mod exchanges;
pub mod portfolio;

// Re-export database utilities
pub use db::{create_pool, get_connection, DbConnection, DbPool};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use store::EncryptedStore;

// Re-export from hodlvault-core for convenience
pub use hodlvault_core::errors::{DatabaseError, Error, Result};
