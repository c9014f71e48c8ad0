use diesel::prelude::*;
use log::{debug, info};
use std::sync::Arc;

use super::model::ExchangeCredentialDB;
use crate::db::{get_connection, DbPool};
use crate::errors::{IntoCore, StorageError};
use crate::schema::exchange_credentials;
use hodlvault_core::errors::{Error, Result, ValidationError};
use hodlvault_core::exchanges::{
    ExchangeCredential, ExchangeCredentialRepositoryTrait, ExchangeSecrets,
};

pub struct ExchangeCredentialRepository {
    pool: Arc<DbPool>,
}

impl ExchangeCredentialRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

/// Outcome of the duplicate check run inside the insert transaction.
enum AddOutcome {
    Added,
    AlreadyStored,
}

impl ExchangeCredentialRepositoryTrait for ExchangeCredentialRepository {
    fn add_exchange(&self, credential: &ExchangeCredential) -> Result<()> {
        credential.validate()?;

        let row = ExchangeCredentialDB::from(credential);
        let mut conn = get_connection(&self.pool)?;
        let outcome = conn.immediate_transaction::<_, StorageError, _>(|conn| {
            let existing: i64 = exchange_credentials::table
                .filter(exchange_credentials::name.eq(&row.name))
                .count()
                .get_result(conn)?;
            if existing > 0 {
                return Ok(AddOutcome::AlreadyStored);
            }
            diesel::insert_into(exchange_credentials::table)
                .values(&row)
                .execute(conn)?;
            Ok(AddOutcome::Added)
        })?;

        match outcome {
            AddOutcome::Added => {
                info!("Stored credentials for exchange {}", credential.name);
                Ok(())
            }
            AddOutcome::AlreadyStored => Err(Error::Validation(
                ValidationError::DuplicateExchange(credential.name.clone()),
            )),
        }
    }

    fn remove_exchange(&self, name: &str) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        let removed = diesel::delete(
            exchange_credentials::table.filter(exchange_credentials::name.eq(name)),
        )
        .execute(&mut conn)
        .into_core()?;
        debug!("Removed {} credential row(s) for exchange {}", removed, name);
        Ok(removed)
    }

    fn get_exchange_secrets(&self) -> Result<ExchangeSecrets> {
        let mut conn = get_connection(&self.pool)?;
        let rows = exchange_credentials::table
            .load::<ExchangeCredentialDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows
            .into_iter()
            .map(ExchangeCredentialDB::into_secret_entry)
            .collect())
    }
}
