//! Blockchain account and owned token domain models.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::MAX_NAME_LEN;
use crate::errors::ValidationError;
use crate::utils::validate_identifier;
use crate::Result;

/// Accounts grouped by blockchain, each group in insertion order.
pub type BlockchainAccounts = BTreeMap<String, Vec<String>>;

/// An address tracked on one blockchain.
///
/// Identity is the `(blockchain, account)` pair: the same address may be
/// tracked on several chains.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockchainAccount {
    pub blockchain: String,
    pub account: String,
}

impl BlockchainAccount {
    pub fn new(blockchain: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            blockchain: blockchain.into(),
            account: account.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_identifier("blockchain", &self.blockchain, MAX_NAME_LEN)?;
        if self.account.trim().is_empty() {
            return Err(ValidationError::InvalidInput(
                "Account address cannot be empty".to_string(),
            )
            .into());
        }
        Ok(())
    }
}

/// A token symbol whose balances should be tracked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OwnedToken(pub String);

impl OwnedToken {
    pub fn validate(&self) -> Result<()> {
        validate_identifier("token", &self.0, MAX_NAME_LEN)
    }
}

impl From<&str> for OwnedToken {
    fn from(value: &str) -> Self {
        OwnedToken(value.to_string())
    }
}

impl From<String> for OwnedToken {
    fn from(value: String) -> Self {
        OwnedToken(value)
    }
}

/// Groups accounts by chain, keeping the order in which they are given.
pub fn group_by_blockchain(
    accounts: impl IntoIterator<Item = BlockchainAccount>,
) -> BlockchainAccounts {
    let mut grouped = BlockchainAccounts::new();
    for entry in accounts {
        grouped.entry(entry.blockchain).or_default().push(entry.account);
    }
    grouped
}
