//! The encrypted ledger of one user profile.

use log::{error, info};
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::accounts::{BlockchainAccountRepository, OwnedTokenRepository};
use crate::balances::FiatBalanceRepository;
use crate::db::{self, DbPool};
use crate::exchanges::ExchangeCredentialRepository;
use crate::portfolio::snapshot::SnapshotRepository;
use hodlvault_core::accounts::{
    BlockchainAccount, BlockchainAccountRepositoryTrait, BlockchainAccounts, OwnedToken,
    OwnedTokenRepositoryTrait,
};
use hodlvault_core::balances::{FiatBalance, FiatBalanceRepositoryTrait, FiatBalances};
use hodlvault_core::config::AppConfig;
use hodlvault_core::errors::Result;
use hodlvault_core::exchanges::{
    ExchangeCredential, ExchangeCredentialRepositoryTrait, ExchangeSecrets,
};
use hodlvault_core::portfolio::snapshot::{
    BalanceEntry, BalanceSnapshot, LocationEntry, NetWorthEntry, SnapshotRepositoryTrait,
    SnapshotWriter, TimeRange,
};

/// One SQLCipher-encrypted database file and every table operation on it.
///
/// All operations are synchronous and never retried. The underlying pool
/// holds a single connection, so concurrent callers are serialized.
pub struct EncryptedStore {
    path: PathBuf,
    pool: Arc<DbPool>,
    snapshots: Arc<SnapshotRepository>,
    exchanges: ExchangeCredentialRepository,
    blockchain_accounts: BlockchainAccountRepository,
    tokens: OwnedTokenRepository,
    fiat_balances: FiatBalanceRepository,
}

impl EncryptedStore {
    /// Opens (or creates) the ledger at `path`, keyed with `password`.
    ///
    /// Fails with `Error::Authentication` when `password` does not decrypt an
    /// existing file; every other failure is an `Error::Database`.
    pub fn open(path: impl AsRef<Path>, password: &str) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        info!("Opening encrypted ledger at {}", path.display());

        let pool = db::create_pool(&path, password).map_err(|e| {
            if !e.is_authentication() {
                error!("Failed to open ledger {}: {}", path.display(), e);
            }
            e
        })?;
        db::verify_key(&pool)?;

        let store = Self {
            snapshots: Arc::new(SnapshotRepository::new(pool.clone())),
            exchanges: ExchangeCredentialRepository::new(pool.clone()),
            blockchain_accounts: BlockchainAccountRepository::new(pool.clone()),
            tokens: OwnedTokenRepository::new(pool.clone()),
            fiat_balances: FiatBalanceRepository::new(pool.clone()),
            pool,
            path,
        };
        store.create_schema_if_absent()?;
        Ok(store)
    }

    /// Opens `<data_dir>/<username>/hodlvault.db`.
    pub fn open_for_user(config: &AppConfig, username: &str, password: &str) -> Result<Self> {
        Self::open(config.user_db_path(username)?, password)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates any of the seven tables that are missing. Safe on every open.
    pub fn create_schema_if_absent(&self) -> Result<()> {
        db::create_schema_if_absent(&self.pool)
    }

    /// A writer persisting balance sheets into this store.
    pub fn snapshot_writer(&self) -> SnapshotWriter {
        SnapshotWriter::new(self.snapshots.clone())
    }

    // --- Balance history ---

    pub fn save_snapshot(&self, snapshot: &BalanceSnapshot) -> Result<()> {
        self.snapshots.save_snapshot(snapshot)
    }

    pub fn add_multiple_balances(&self, entries: &[BalanceEntry]) -> Result<()> {
        self.snapshots.add_multiple_balances(entries)
    }

    pub fn add_multiple_location_data(&self, entries: &[LocationEntry]) -> Result<()> {
        self.snapshots.add_multiple_location_data(entries)
    }

    pub fn add_timed_unique_data(&self, time: i64, net_usd: Decimal) -> Result<()> {
        self.snapshots.add_timed_unique_data(time, net_usd)
    }

    pub fn get_timed_balances(&self, range: TimeRange) -> Result<Vec<BalanceEntry>> {
        self.snapshots.get_timed_balances(range)
    }

    pub fn get_location_data(&self, range: TimeRange) -> Result<Vec<LocationEntry>> {
        self.snapshots.get_location_data(range)
    }

    pub fn get_net_worth_history(&self, range: TimeRange) -> Result<Vec<NetWorthEntry>> {
        self.snapshots.get_net_worth_history(range)
    }

    pub fn get_snapshot(&self, time: i64) -> Result<Option<BalanceSnapshot>> {
        self.snapshots.get_snapshot(time)
    }

    pub fn latest_snapshot_time(&self) -> Result<Option<i64>> {
        self.snapshots.latest_snapshot_time()
    }

    /// Deletes all balance history. Credentials, accounts, tokens and fiat
    /// balances are kept.
    pub fn purge_balance_history(&self) -> Result<()> {
        self.snapshots.purge_balance_history()
    }

    // --- Owned tokens ---

    pub fn write_owned_tokens(&self, tokens: &[OwnedToken]) -> Result<()> {
        self.tokens.write_owned_tokens(tokens)
    }

    pub fn remove_owned_token(&self, token: &OwnedToken) -> Result<usize> {
        self.tokens.remove_owned_token(token)
    }

    pub fn get_owned_tokens(&self) -> Result<BTreeSet<OwnedToken>> {
        self.tokens.get_owned_tokens()
    }

    // --- Blockchain accounts ---

    pub fn add_blockchain_account(&self, blockchain: &str, account: &str) -> Result<()> {
        self.blockchain_accounts
            .add_blockchain_account(&BlockchainAccount::new(blockchain, account))
    }

    pub fn remove_blockchain_account(&self, blockchain: &str, account: &str) -> Result<usize> {
        self.blockchain_accounts
            .remove_blockchain_account(&BlockchainAccount::new(blockchain, account))
    }

    pub fn get_blockchain_accounts(&self) -> Result<BlockchainAccounts> {
        self.blockchain_accounts.get_blockchain_accounts()
    }

    // --- Fiat balances ---

    /// Sets the amount held in `asset`, replacing any previous value.
    pub fn add_fiat_balance(&self, asset: &str, amount: Decimal) -> Result<()> {
        self.fiat_balances
            .add_fiat_balance(&FiatBalance::new(asset, amount))
    }

    pub fn remove_fiat_balance(&self, asset: &str) -> Result<usize> {
        self.fiat_balances.remove_fiat_balance(asset)
    }

    pub fn get_fiat_balances(&self) -> Result<FiatBalances> {
        self.fiat_balances.get_fiat_balances()
    }

    // --- Exchange credentials ---

    /// Stores credentials for a supported exchange. One entry per exchange.
    pub fn add_exchange(&self, name: &str, api_key: &str, api_secret: &str) -> Result<()> {
        self.exchanges
            .add_exchange(&ExchangeCredential::new(name, api_key, api_secret))
    }

    pub fn remove_exchange(&self, name: &str) -> Result<usize> {
        self.exchanges.remove_exchange(name)
    }

    pub fn get_exchange_secrets(&self) -> Result<ExchangeSecrets> {
        self.exchanges.get_exchange_secrets()
    }
}
