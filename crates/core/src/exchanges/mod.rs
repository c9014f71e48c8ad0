//! Exchanges module - stored API credentials for supported exchanges.

mod exchanges_model;
mod exchanges_traits;

pub use exchanges_model::{
    is_supported_exchange, ApiCredentials, ExchangeCredential, ExchangeSecrets,
};
pub use exchanges_traits::ExchangeCredentialRepositoryTrait;
