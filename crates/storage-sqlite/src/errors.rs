//! Storage-specific error types for SQLCipher operations.
//!
//! This module provides error types that wrap Diesel-specific errors and convert
//! them to the database-agnostic error types defined in `hodlvault_core`.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;
use hodlvault_core::errors::{DatabaseError, Error};

/// What SQLite reports when the key does not decrypt the file.
const NOT_A_DATABASE: &str = "file is not a database";

/// Storage-specific errors that wrap Diesel and r2d2 types.
///
/// These errors are internal to the storage layer and are converted to
/// `hodlvault_core::Error` before being returned to callers.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Connection pool error: {0}")]
    PoolError(#[from] r2d2::Error),

    #[error("Query execution failed: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("Stored value is corrupt: {0}")]
    CorruptValue(String),

    #[error("A snapshot already exists at {0}")]
    DuplicateSnapshot(i64),

    #[error("Core error: {0}")]
    CoreError(String),
}

/// Convert core Error to StorageError (for transaction closures)
impl From<Error> for StorageError {
    fn from(err: Error) -> Self {
        StorageError::CoreError(err.to_string())
    }
}

impl StorageError {
    /// True when SQLCipher could not decrypt the file with the supplied key.
    pub fn is_wrong_key(&self) -> bool {
        match self {
            StorageError::QueryFailed(DieselError::DatabaseError(_, info)) => {
                info.message().contains(NOT_A_DATABASE)
            }
            StorageError::PoolError(e) => e.to_string().contains(NOT_A_DATABASE),
            _ => false,
        }
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        if err.is_wrong_key() {
            return Error::Authentication(
                "Wrong password or the file is not an encrypted ledger".to_string(),
            );
        }

        match err {
            StorageError::PoolError(e) => {
                Error::Database(DatabaseError::ConnectionFailed(e.to_string()))
            }
            StorageError::QueryFailed(DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                info,
            )) => Error::Database(DatabaseError::UniqueViolation(info.message().to_string())),
            StorageError::QueryFailed(DieselError::DatabaseError(
                DatabaseErrorKind::ForeignKeyViolation,
                info,
            )) => Error::Database(DatabaseError::ForeignKeyViolation(
                info.message().to_string(),
            )),
            StorageError::QueryFailed(DieselError::RollbackTransaction) => Error::Database(
                DatabaseError::TransactionFailed("transaction rolled back".to_string()),
            ),
            StorageError::QueryFailed(e) => {
                Error::Database(DatabaseError::QueryFailed(e.to_string()))
            }
            StorageError::CorruptValue(e) => Error::Database(DatabaseError::Internal(e)),
            StorageError::DuplicateSnapshot(time) => Error::Database(
                DatabaseError::UniqueViolation(format!("A snapshot already exists at {}", time)),
            ),
            StorageError::CoreError(e) => Error::Database(DatabaseError::Internal(e)),
        }
    }
}

/// Extension trait for easily converting Diesel Results to core Results.
///
/// This provides a `.into_core()` method on any `Result<T, diesel::result::Error>`
/// which handles the conversion through StorageError.
pub trait IntoCore<T> {
    fn into_core(self) -> hodlvault_core::Result<T>;
}

impl<T> IntoCore<T> for std::result::Result<T, DieselError> {
    fn into_core(self) -> hodlvault_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

impl<T> IntoCore<T> for std::result::Result<T, r2d2::Error> {
    fn into_core(self) -> hodlvault_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}
