//! Application configuration loaded from the environment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    DB_FILE_NAME, DEFAULT_HISTORY_START, DEFAULT_PRICE_TIMEOUT_MS, MAX_NAME_LEN,
};
use crate::errors::{Error, Result, ValidationError};
use crate::utils::{parse_history_start, validate_identifier};

pub const ENV_DATA_DIR: &str = "HODLVAULT_DATA_DIR";
pub const ENV_HISTORY_START: &str = "HODLVAULT_HISTORY_START";
pub const ENV_PRICE_TIMEOUT_MS: &str = "HODLVAULT_PRICE_TIMEOUT_MS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    /// Start of price history as Unix seconds (UTC midnight).
    pub history_start: i64,
    pub price_timeout: Duration,
}

impl AppConfig {
    /// Reads `HODLVAULT_*` variables, after loading a `.env` file if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup(ENV_DATA_DIR)
            .filter(|dir| !dir.trim().is_empty())
            .unwrap_or_else(|| "./data".to_string());

        let history_start_raw =
            lookup(ENV_HISTORY_START).unwrap_or_else(|| DEFAULT_HISTORY_START.to_string());
        let history_start = parse_history_start(&history_start_raw).map_err(|_| {
            Error::InvalidConfigValue(format!(
                "{} must be DD/MM/YYYY, got '{}'",
                ENV_HISTORY_START, history_start_raw
            ))
        })?;

        let timeout_ms = match lookup(ENV_PRICE_TIMEOUT_MS) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                Error::InvalidConfigValue(format!(
                    "{} must be a number of milliseconds, got '{}'",
                    ENV_PRICE_TIMEOUT_MS, raw
                ))
            })?,
            None => DEFAULT_PRICE_TIMEOUT_MS,
        };
        if timeout_ms == 0 {
            return Err(Error::InvalidConfigValue(format!(
                "{} must be greater than zero",
                ENV_PRICE_TIMEOUT_MS
            )));
        }

        Ok(Self {
            data_dir: PathBuf::from(data_dir),
            history_start,
            price_timeout: Duration::from_millis(timeout_ms),
        })
    }

    /// Directory holding one user's files.
    pub fn user_dir(&self, username: &str) -> Result<PathBuf> {
        validate_username(username)?;
        Ok(self.data_dir.join(username))
    }

    /// Location of one user's encrypted ledger.
    pub fn user_db_path(&self, username: &str) -> Result<PathBuf> {
        Ok(self.user_dir(username)?.join(DB_FILE_NAME))
    }
}

/// Usernames become directory names, so no separators or dot segments.
pub fn validate_username(username: &str) -> Result<()> {
    validate_identifier("username", username, MAX_NAME_LEN)?;
    let path = Path::new(username);
    if username.contains(['/', '\\']) || username == "." || username == ".." || path.is_absolute() {
        return Err(ValidationError::InvalidIdentifier {
            kind: "username",
            value: username.to_string(),
            reason: "must be a plain directory name".to_string(),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.history_start, 1_420_070_400);
        assert_eq!(config.price_timeout, Duration::from_millis(30_000));
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (ENV_DATA_DIR, "/var/lib/hodlvault"),
            (ENV_HISTORY_START, "01/01/2016"),
            (ENV_PRICE_TIMEOUT_MS, "1500"),
        ]))
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/hodlvault"));
        assert_eq!(config.history_start, 1_451_606_400);
        assert_eq!(config.price_timeout, Duration::from_millis(1500));
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        let err = AppConfig::from_lookup(lookup_from(&[(ENV_HISTORY_START, "2015-01-01")]))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue(_)));

        let err = AppConfig::from_lookup(lookup_from(&[(ENV_PRICE_TIMEOUT_MS, "soon")]))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue(_)));

        let err =
            AppConfig::from_lookup(lookup_from(&[(ENV_PRICE_TIMEOUT_MS, "0")])).unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue(_)));
    }

    #[test]
    fn test_user_db_path() {
        let config = AppConfig::from_lookup(lookup_from(&[(ENV_DATA_DIR, "/data")])).unwrap();
        assert_eq!(
            config.user_db_path("alice").unwrap(),
            PathBuf::from("/data/alice/hodlvault.db")
        );
        assert!(config.user_db_path("../bob").is_err());
        assert!(config.user_db_path("").is_err());
        assert!(config.user_db_path("..").is_err());
    }

    #[test]
    fn test_historian_config_follows_app_config() {
        let config = AppConfig::from_lookup(lookup_from(&[(ENV_PRICE_TIMEOUT_MS, "250")])).unwrap();
        let historian = crate::prices::HistorianConfig::from_app_config(&config);
        assert_eq!(historian.history_start, config.history_start);
        assert_eq!(historian.fetch_timeout, Duration::from_millis(250));
    }
}
