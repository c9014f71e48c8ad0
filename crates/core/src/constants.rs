/// Exchanges whose credentials may be stored.
pub const SUPPORTED_EXCHANGES: &[&str] = &["kraken", "poloniex", "bittrex", "bitmex", "binance"];

/// SQLCipher key-derivation iteration count for the ledger file.
pub const KDF_ITERATIONS: u32 = 64_000;

/// File name of the per-user encrypted ledger.
pub const DB_FILE_NAME: &str = "hodlvault.db";

/// Maximum length of a currency identifier in a balance snapshot.
pub const MAX_CURRENCY_LEN: usize = 12;

/// Maximum length of location, exchange, blockchain, token and fiat asset names.
pub const MAX_NAME_LEN: usize = 24;

/// Default start of price history (DD/MM/YYYY).
pub const DEFAULT_HISTORY_START: &str = "01/01/2015";

/// Default bound on one remote price resolution, in milliseconds.
pub const DEFAULT_PRICE_TIMEOUT_MS: u64 = 30_000;
