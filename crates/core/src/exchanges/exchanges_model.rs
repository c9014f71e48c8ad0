//! Exchange credential domain models.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::constants::SUPPORTED_EXCHANGES;
use crate::errors::{Result, ValidationError};

/// Credentials keyed by exchange name.
pub type ExchangeSecrets = HashMap<String, ApiCredentials>;

pub fn is_supported_exchange(name: &str) -> bool {
    SUPPORTED_EXCHANGES.contains(&name)
}

/// API key and secret for one exchange.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCredentials {
    pub api_key: String,
    pub api_secret: String,
}

// Secrets stay out of logs and panic messages.
impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &"<redacted>")
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// A credential row to be stored for a supported exchange.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeCredential {
    pub name: String,
    #[serde(flatten)]
    pub credentials: ApiCredentials,
}

impl ExchangeCredential {
    pub fn new(
        name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            credentials: ApiCredentials {
                api_key: api_key.into(),
                api_secret: api_secret.into(),
            },
        }
    }

    /// Checks the exchange name against the allow-list.
    pub fn validate(&self) -> Result<()> {
        if !is_supported_exchange(&self.name) {
            return Err(ValidationError::UnsupportedExchange(self.name.clone()).into());
        }
        if self.credentials.api_key.is_empty() || self.credentials.api_secret.is_empty() {
            return Err(ValidationError::InvalidInput(format!(
                "API key and secret for {} cannot be empty",
                self.name
            ))
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;

    #[test]
    fn test_supported_exchange_passes() {
        for name in SUPPORTED_EXCHANGES {
            assert!(ExchangeCredential::new(*name, "key", "secret").validate().is_ok());
        }
    }

    #[test]
    fn test_unsupported_exchange_rejected() {
        let err = ExchangeCredential::new("mtgox", "key", "secret")
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::UnsupportedExchange(ref name)) if name == "mtgox"
        ));
    }

    #[test]
    fn test_allow_list_is_case_sensitive() {
        assert!(!is_supported_exchange("Kraken"));
        assert!(is_supported_exchange("kraken"));
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(ExchangeCredential::new("kraken", "key", "").validate().is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let cred = ExchangeCredential::new("kraken", "my-key", "my-secret");
        let printed = format!("{:?}", cred);
        assert!(!printed.contains("my-key"));
        assert!(!printed.contains("my-secret"));
    }
}
