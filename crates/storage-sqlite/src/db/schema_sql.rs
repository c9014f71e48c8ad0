//! DDL for the seven ledger tables. Every statement is idempotent.

pub const CREATE_TIMED_BALANCES: &str = "
    CREATE TABLE IF NOT EXISTS timed_balances (
        time INTEGER NOT NULL,
        currency VARCHAR(12) NOT NULL,
        amount TEXT NOT NULL,
        usd_value TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_timed_balances_time ON timed_balances (time);
";

pub const CREATE_TIMED_LOCATION_DATA: &str = "
    CREATE TABLE IF NOT EXISTS timed_location_data (
        time INTEGER NOT NULL,
        location VARCHAR(24) NOT NULL,
        usd_value TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_timed_location_data_time ON timed_location_data (time);
";

pub const CREATE_TIMED_UNIQUE_DATA: &str = "
    CREATE TABLE IF NOT EXISTS timed_unique_data (
        time INTEGER NOT NULL,
        net_usd TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_timed_unique_data_time ON timed_unique_data (time);
";

pub const CREATE_EXCHANGE_CREDENTIALS: &str = "
    CREATE TABLE IF NOT EXISTS exchange_credentials (
        name VARCHAR(24) NOT NULL PRIMARY KEY,
        api_key TEXT NOT NULL,
        api_secret TEXT NOT NULL
    );
";

pub const CREATE_BLOCKCHAIN_ACCOUNTS: &str = "
    CREATE TABLE IF NOT EXISTS blockchain_accounts (
        blockchain VARCHAR(24) NOT NULL,
        account TEXT NOT NULL,
        PRIMARY KEY (blockchain, account)
    );
";

pub const CREATE_ETH_TOKENS: &str = "
    CREATE TABLE IF NOT EXISTS eth_tokens (
        token VARCHAR(24) NOT NULL PRIMARY KEY
    );
";

pub const CREATE_CURRENT_BALANCES: &str = "
    CREATE TABLE IF NOT EXISTS current_balances (
        asset VARCHAR(24) NOT NULL PRIMARY KEY,
        amount TEXT NOT NULL
    );
";

/// Tables holding balance history, in creation order.
pub const SNAPSHOT_TABLES: [(&str, &str); 3] = [
    ("timed_balances", CREATE_TIMED_BALANCES),
    ("timed_location_data", CREATE_TIMED_LOCATION_DATA),
    ("timed_unique_data", CREATE_TIMED_UNIQUE_DATA),
];

/// Every table, in creation order.
pub const ALL_TABLES: [(&str, &str); 7] = [
    SNAPSHOT_TABLES[0],
    SNAPSHOT_TABLES[1],
    SNAPSHOT_TABLES[2],
    ("exchange_credentials", CREATE_EXCHANGE_CREDENTIALS),
    ("blockchain_accounts", CREATE_BLOCKCHAIN_ACCOUNTS),
    ("eth_tokens", CREATE_ETH_TOKENS),
    ("current_balances", CREATE_CURRENT_BALANCES),
];
