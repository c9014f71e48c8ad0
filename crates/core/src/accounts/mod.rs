//! Accounts module - tracked blockchain addresses and owned tokens.

mod accounts_model;
mod accounts_traits;


// Re-export the public interface
pub use accounts_model::{group_by_blockchain, BlockchainAccount, BlockchainAccounts, OwnedToken};
pub use accounts_traits::{BlockchainAccountRepositoryTrait, OwnedTokenRepositoryTrait};
