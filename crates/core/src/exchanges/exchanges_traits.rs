use super::exchanges_model::{ExchangeCredential, ExchangeSecrets};
use crate::errors::Result;

/// Trait defining the contract for exchange credential storage.
pub trait ExchangeCredentialRepositoryTrait: Send + Sync {
    /// Stores a credential.
    ///
    /// Fails with `ValidationError::UnsupportedExchange` for names outside the
    /// allow-list and `ValidationError::DuplicateExchange` if the exchange
    /// already has credentials. Nothing is written on failure.
    fn add_exchange(&self, credential: &ExchangeCredential) -> Result<()>;

    /// Removes the credentials of an exchange. Returns the number of removed rows.
    fn remove_exchange(&self, name: &str) -> Result<usize>;

    fn get_exchange_secrets(&self) -> Result<ExchangeSecrets>;
}
