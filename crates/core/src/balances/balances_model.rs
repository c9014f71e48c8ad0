use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::constants::MAX_NAME_LEN;
use crate::utils::validate_identifier;
use crate::Result;

/// Current fiat holdings keyed by asset.
pub type FiatBalances = HashMap<String, Decimal>;

/// A fiat amount held outside any tracked exchange or chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiatBalance {
    pub asset: String,
    pub amount: Decimal,
}

impl FiatBalance {
    pub fn new(asset: impl Into<String>, amount: Decimal) -> Self {
        Self {
            asset: asset.into(),
            amount,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_identifier("fiat asset", &self.asset, MAX_NAME_LEN)
    }
}
