//! Balances module - manually maintained fiat balances.

mod balances_model;
mod balances_traits;

pub use balances_model::{FiatBalance, FiatBalances};
pub use balances_traits::FiatBalanceRepositoryTrait;
