use diesel::prelude::*;

use hodlvault_core::exchanges::{ApiCredentials, ExchangeCredential};

#[derive(Clone, Queryable, Insertable)]
#[diesel(table_name = crate::schema::exchange_credentials)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ExchangeCredentialDB {
    pub name: String,
    pub api_key: String,
    pub api_secret: String,
}

impl From<&ExchangeCredential> for ExchangeCredentialDB {
    fn from(credential: &ExchangeCredential) -> Self {
        Self {
            name: credential.name.clone(),
            api_key: credential.credentials.api_key.clone(),
            api_secret: credential.credentials.api_secret.clone(),
        }
    }
}

impl ExchangeCredentialDB {
    /// Splits the row into the `(name, credentials)` pair used by `ExchangeSecrets`.
    pub fn into_secret_entry(self) -> (String, ApiCredentials) {
        (
            self.name,
            ApiCredentials {
                api_key: self.api_key,
                api_secret: self.api_secret,
            },
        )
    }
}
