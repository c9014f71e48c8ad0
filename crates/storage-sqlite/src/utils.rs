//! Helpers for batching and decoding rows.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::errors::StorageError;

/// Bound on bound parameters per statement.
///
/// SQLite builds default `SQLITE_MAX_VARIABLE_NUMBER` to 999 on older
/// versions; we stay under it.
pub const SQLITE_MAX_PARAMS: usize = 900;

/// Splits rows so one multi-row INSERT of `columns` columns stays under
/// [`SQLITE_MAX_PARAMS`].
pub fn chunk_rows_for_sqlite<T>(rows: &[T], columns: usize) -> impl Iterator<Item = &[T]> {
    rows.chunks((SQLITE_MAX_PARAMS / columns.max(1)).max(1))
}

/// Parses a decimal string read back from a TEXT column.
pub fn parse_decimal(column: &str, value: &str) -> Result<Decimal, StorageError> {
    Decimal::from_str(value).map_err(|e| {
        StorageError::CorruptValue(format!("{} holds '{}': {}", column, value, e))
    })
}
