//! SQLite storage implementation for balance snapshots.

mod model;
mod repository;

pub use model::{TimedBalanceDB, TimedLocationDB, TimedUniqueDB};
pub use repository::SnapshotRepository;

// Re-export trait from core for convenience
pub use hodlvault_core::portfolio::snapshot::SnapshotRepositoryTrait;
