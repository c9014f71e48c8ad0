use diesel::prelude::*;
use log::debug;
use std::collections::BTreeSet;
use std::sync::Arc;

use super::model::{BlockchainAccountDB, OwnedTokenDB};
use crate::db::{get_connection, DbPool};
use crate::errors::{IntoCore, StorageError};
use crate::schema::{blockchain_accounts, eth_tokens};
use crate::utils::chunk_rows_for_sqlite;
use hodlvault_core::accounts::{
    group_by_blockchain, BlockchainAccount, BlockchainAccountRepositoryTrait, BlockchainAccounts,
    OwnedToken, OwnedTokenRepositoryTrait,
};
use hodlvault_core::errors::Result;

/// Repository for tracked blockchain addresses.
pub struct BlockchainAccountRepository {
    pool: Arc<DbPool>,
}

impl BlockchainAccountRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl BlockchainAccountRepositoryTrait for BlockchainAccountRepository {
    fn add_blockchain_account(&self, account: &BlockchainAccount) -> Result<()> {
        account.validate()?;
        let mut conn = get_connection(&self.pool)?;
        diesel::insert_into(blockchain_accounts::table)
            .values(&BlockchainAccountDB::from(account))
            .execute(&mut conn)
            .into_core()?;
        debug!("Tracking {} account {}", account.blockchain, account.account);
        Ok(())
    }

    fn remove_blockchain_account(&self, account: &BlockchainAccount) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        let removed = diesel::delete(
            blockchain_accounts::table
                .filter(blockchain_accounts::blockchain.eq(&account.blockchain))
                .filter(blockchain_accounts::account.eq(&account.account)),
        )
        .execute(&mut conn)
        .into_core()?;
        Ok(removed)
    }

    fn get_blockchain_accounts(&self) -> Result<BlockchainAccounts> {
        let mut conn = get_connection(&self.pool)?;
        // rowid follows insertion order
        let rows: Vec<BlockchainAccountDB> = diesel::sql_query(
            "SELECT blockchain, account FROM blockchain_accounts ORDER BY rowid",
        )
        .load(&mut conn)
        .map_err(StorageError::from)?;
        Ok(group_by_blockchain(rows.into_iter().map(BlockchainAccount::from)))
    }
}

/// Repository for the set of tokens whose balances are tracked.
pub struct OwnedTokenRepository {
    pool: Arc<DbPool>,
}

impl OwnedTokenRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl OwnedTokenRepositoryTrait for OwnedTokenRepository {
    fn write_owned_tokens(&self, tokens: &[OwnedToken]) -> Result<()> {
        tokens.iter().try_for_each(OwnedToken::validate)?;

        let rows: Vec<OwnedTokenDB> = tokens.iter().map(OwnedTokenDB::from).collect();
        let mut conn = get_connection(&self.pool)?;
        let inserted = conn.immediate_transaction::<_, StorageError, _>(|conn| {
            let mut inserted = 0;
            for chunk in chunk_rows_for_sqlite(&rows, 1) {
                inserted += diesel::insert_or_ignore_into(eth_tokens::table)
                    .values(chunk)
                    .execute(conn)?;
            }
            Ok(inserted)
        })?;
        debug!("Stored {} new owned token(s)", inserted);
        Ok(())
    }

    fn remove_owned_token(&self, token: &OwnedToken) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        let removed = diesel::delete(eth_tokens::table.find(&token.0))
            .execute(&mut conn)
            .into_core()?;
        Ok(removed)
    }

    fn get_owned_tokens(&self) -> Result<BTreeSet<OwnedToken>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = eth_tokens::table
            .load::<OwnedTokenDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(OwnedToken::from).collect())
    }
}
