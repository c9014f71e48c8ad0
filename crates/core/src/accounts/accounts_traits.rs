//! Blockchain account and owned token repository traits.
//!
//! These traits define the contract for address bookkeeping without any
//! database-specific types.

use std::collections::BTreeSet;

use super::accounts_model::{BlockchainAccount, BlockchainAccounts, OwnedToken};
use crate::errors::Result;

/// Trait defining the contract for tracked blockchain addresses.
pub trait BlockchainAccountRepositoryTrait: Send + Sync {
    /// Starts tracking `account` on its blockchain.
    ///
    /// Fails with a unique violation if the pair is already tracked.
    fn add_blockchain_account(&self, account: &BlockchainAccount) -> Result<()>;

    /// Stops tracking the pair. Returns the number of removed rows (0 or 1).
    fn remove_blockchain_account(&self, account: &BlockchainAccount) -> Result<usize>;

    /// All tracked accounts grouped by blockchain, in insertion order per chain.
    fn get_blockchain_accounts(&self) -> Result<BlockchainAccounts>;
}

/// Trait defining the contract for the owned token membership set.
pub trait OwnedTokenRepositoryTrait: Send + Sync {
    /// Adds tokens to the set. Tokens already present are left as they are.
    fn write_owned_tokens(&self, tokens: &[OwnedToken]) -> Result<()>;

    /// Removes one token. Returns the number of removed rows (0 or 1).
    fn remove_owned_token(&self, token: &OwnedToken) -> Result<usize>;

    fn get_owned_tokens(&self) -> Result<BTreeSet<OwnedToken>>;
}
