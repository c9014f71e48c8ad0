//! Encrypted connection pool and schema lifecycle.

use log::{debug, error, info};
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{self, ConnectionManager, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel::RunQueryDsl;

use crate::errors::{IntoCore, StorageError};
use hodlvault_core::constants::KDF_ITERATIONS;
use hodlvault_core::errors::{DatabaseError, Error, Result};

pub mod schema_sql;

pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Opens the pool for an encrypted ledger file.
///
/// The pool holds exactly one connection, so every table operation on one
/// store is serialized.
pub fn create_pool(db_path: &Path, password: &str) -> Result<Arc<DbPool>> {
    if let Some(db_dir) = db_path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        if !db_dir.exists() {
            fs::create_dir_all(db_dir).map_err(|e| {
                error!("Failed to create data directory {}: {}", db_dir.display(), e);
                Error::Database(DatabaseError::ConnectionFailed(e.to_string()))
            })?;
        }
    }

    let manager = ConnectionManager::<SqliteConnection>::new(db_path.to_string_lossy());
    let pool = Pool::builder()
        .max_size(1)
        .connection_timeout(Duration::from_secs(5))
        // the key check below must be the first statement reading the file
        .test_on_check_out(false)
        .connection_customizer(Box::new(EncryptionCustomizer::new(password)))
        .build(manager)
        .map_err(StorageError::from)?;
    Ok(Arc::new(pool))
}

pub fn get_connection(pool: &DbPool) -> Result<DbConnection> {
    pool.get().into_core()
}

/// Reads the schema table once. Against a file keyed with another password
/// this is the first statement that touches ciphertext, and it fails.
pub fn verify_key(pool: &DbPool) -> Result<()> {
    let mut conn = get_connection(pool)?;
    conn.batch_execute("SELECT count(*) FROM sqlite_master;")
        .map_err(StorageError::from)?;
    Ok(())
}

/// Creates any missing table. Existing tables and rows are left untouched.
pub fn create_schema_if_absent(pool: &DbPool) -> Result<()> {
    let mut conn = get_connection(pool)?;
    conn.immediate_transaction::<_, StorageError, _>(|conn| {
        for (table, ddl) in schema_sql::ALL_TABLES {
            debug!("Ensuring table {}", table);
            conn.batch_execute(ddl)?;
        }
        Ok(())
    })?;
    Ok(())
}

/// Drops and recreates the snapshot tables in one transaction.
pub fn recreate_snapshot_tables(pool: &DbPool) -> Result<()> {
    let mut conn = get_connection(pool)?;
    conn.immediate_transaction::<_, StorageError, _>(|conn| {
        for (table, ddl) in schema_sql::SNAPSHOT_TABLES {
            diesel::sql_query(format!("DROP TABLE IF EXISTS {}", table)).execute(conn)?;
            conn.batch_execute(ddl)?;
        }
        Ok(())
    })?;
    info!("Balance history purged");
    Ok(())
}

/// Keys every pooled connection before it is handed out.
struct EncryptionCustomizer {
    key_pragma: String,
}

impl EncryptionCustomizer {
    fn new(password: &str) -> Self {
        Self {
            key_pragma: format!(
                "PRAGMA key = '{}'; PRAGMA kdf_iter = {}; PRAGMA foreign_keys = ON;",
                password.replace('\'', "''"),
                KDF_ITERATIONS
            ),
        }
    }
}

impl fmt::Debug for EncryptionCustomizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptionCustomizer")
            .field("key_pragma", &"<redacted>")
            .finish()
    }
}

impl r2d2::CustomizeConnection<SqliteConnection, r2d2::Error> for EncryptionCustomizer {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> std::result::Result<(), r2d2::Error> {
        conn.batch_execute(&self.key_pragma)
            .map_err(r2d2::Error::QueryError)
    }
}
