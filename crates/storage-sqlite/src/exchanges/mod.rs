//! SQLite storage implementation for exchange credentials.

mod model;
mod repository;

pub use model::ExchangeCredentialDB;
pub use repository::ExchangeCredentialRepository;
