//! Core error types for hodlvault.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLCipher, etc.) are converted to these types by the storage layer.

use chrono::ParseError as ChronoParseError;
use thiserror::Error;

use crate::prices::PriceError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for hodlvault.
#[derive(Error, Debug)]
pub enum Error {
    /// The ledger could not be decrypted with the supplied password.
    /// Never retried; the user must re-enter the password.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Price resolution failed: {0}")]
    Price(#[from] PriceError),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),
}

impl Error {
    /// True for the wrong-password case on store open.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Error::Authentication(_))
    }
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// A unique constraint was violated (e.g., duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A foreign key constraint was violated.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// A database transaction failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Validation errors for caller-supplied values. Raised before any mutation.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Unsupported exchange {0}")]
    UnsupportedExchange(String),

    #[error("Credentials for exchange {0} are already stored")]
    DuplicateExchange(String),

    #[error("Invalid {kind} '{value}': {reason}")]
    InvalidIdentifier {
        kind: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] ChronoParseError),
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_is_distinct_from_database() {
        let auth = Error::Authentication("Wrong password while decrypting the database".into());
        let db = Error::Database(DatabaseError::QueryFailed("disk I/O error".into()));
        assert!(auth.is_authentication());
        assert!(!db.is_authentication());
    }

    #[test]
    fn test_error_display() {
        let err: Error = ValidationError::UnsupportedExchange("mtgox".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Input validation failed: Unsupported exchange mtgox"
        );

        let err = ValidationError::InvalidIdentifier {
            kind: "currency",
            value: String::new(),
            reason: "must not be empty".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid currency '': must not be empty");
    }
}
