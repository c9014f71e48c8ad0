//! Database models for blockchain accounts and owned tokens.

use diesel::prelude::*;
use diesel::sql_types::Text;
use serde::{Deserialize, Serialize};

use hodlvault_core::accounts::{BlockchainAccount, OwnedToken};

#[derive(
    Queryable, QueryableByName, Insertable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::blockchain_accounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BlockchainAccountDB {
    #[diesel(sql_type = Text)]
    pub blockchain: String,
    #[diesel(sql_type = Text)]
    pub account: String,
}

impl From<&BlockchainAccount> for BlockchainAccountDB {
    fn from(domain: &BlockchainAccount) -> Self {
        Self {
            blockchain: domain.blockchain.clone(),
            account: domain.account.clone(),
        }
    }
}

impl From<BlockchainAccountDB> for BlockchainAccount {
    fn from(db: BlockchainAccountDB) -> Self {
        BlockchainAccount::new(db.blockchain, db.account)
    }
}

#[derive(Queryable, Insertable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::eth_tokens)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OwnedTokenDB {
    pub token: String,
}

impl From<&OwnedToken> for OwnedTokenDB {
    fn from(domain: &OwnedToken) -> Self {
        Self {
            token: domain.0.clone(),
        }
    }
}

impl From<OwnedTokenDB> for OwnedToken {
    fn from(db: OwnedTokenDB) -> Self {
        OwnedToken(db.token)
    }
}
