//! SQLite storage implementation for tracked blockchain accounts and tokens.

mod model;
mod repository;

pub use model::{BlockchainAccountDB, OwnedTokenDB};
pub use repository::{BlockchainAccountRepository, OwnedTokenRepository};
