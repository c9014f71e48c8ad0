use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use hodlvault_core::balances::FiatBalance;

#[derive(Debug, Clone, Queryable, Insertable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::current_balances)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CurrentBalanceDB {
    pub asset: String,
    pub amount: String,
}

impl From<&FiatBalance> for CurrentBalanceDB {
    fn from(balance: &FiatBalance) -> Self {
        Self {
            asset: balance.asset.clone(),
            amount: balance.amount.to_string(),
        }
    }
}
