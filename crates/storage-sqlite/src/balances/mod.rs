//! SQLite storage implementation for manually tracked fiat balances.

mod model;
mod repository;

pub use model::CurrentBalanceDB;
pub use repository::FiatBalanceRepository;
