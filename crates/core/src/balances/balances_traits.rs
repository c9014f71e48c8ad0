use super::balances_model::{FiatBalance, FiatBalances};
use crate::errors::Result;

/// Trait defining the contract for fiat balance storage.
pub trait FiatBalanceRepositoryTrait: Send + Sync {
    /// Inserts the balance or replaces the amount already stored for the asset.
    fn add_fiat_balance(&self, balance: &FiatBalance) -> Result<()>;

    /// Returns the number of removed rows (0 or 1).
    fn remove_fiat_balance(&self, asset: &str) -> Result<usize>;

    fn get_fiat_balances(&self) -> Result<FiatBalances>;
}
