//! SQLite storage implementation for portfolio history.

pub mod snapshot;
