use diesel::prelude::*;
use log::debug;
use std::sync::Arc;

use super::model::CurrentBalanceDB;
use crate::db::{get_connection, DbPool};
use crate::errors::{IntoCore, StorageError};
use crate::schema::current_balances;
use crate::utils::parse_decimal;
use hodlvault_core::balances::{FiatBalance, FiatBalanceRepositoryTrait, FiatBalances};
use hodlvault_core::errors::Result;

pub struct FiatBalanceRepository {
    pool: Arc<DbPool>,
}

impl FiatBalanceRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl FiatBalanceRepositoryTrait for FiatBalanceRepository {
    fn add_fiat_balance(&self, balance: &FiatBalance) -> Result<()> {
        balance.validate()?;
        let mut conn = get_connection(&self.pool)?;
        diesel::replace_into(current_balances::table)
            .values(&CurrentBalanceDB::from(balance))
            .execute(&mut conn)
            .into_core()?;
        debug!("Set fiat balance for {}", balance.asset);
        Ok(())
    }

    fn remove_fiat_balance(&self, asset: &str) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        let removed = diesel::delete(current_balances::table.find(asset))
            .execute(&mut conn)
            .into_core()?;
        Ok(removed)
    }

    fn get_fiat_balances(&self) -> Result<FiatBalances> {
        let mut conn = get_connection(&self.pool)?;
        let rows = current_balances::table
            .load::<CurrentBalanceDB>(&mut conn)
            .map_err(StorageError::from)?;
        let balances = rows
            .into_iter()
            .map(|row| {
                let amount = parse_decimal("current_balances.amount", &row.amount)?;
                Ok((row.asset, amount))
            })
            .collect::<std::result::Result<FiatBalances, StorageError>>()?;
        Ok(balances)
    }
}
