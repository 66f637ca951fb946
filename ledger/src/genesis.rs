//! Genesis: the initial configuration of a token ledger.

use cinder_types::{Address, TOKEN_DECIMALS};
use serde::{Deserialize, Serialize};

/// Descriptive token metadata, fixed at genesis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Configuration for creating a new ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenGenesis {
    pub metadata: TokenMetadata,
    /// Initial administrator.
    pub owner: Address,
    /// The ledger's own account: credited by mints, debited by treasury sends.
    pub treasury: Address,
    /// Raw units credited to the owner at creation.
    pub initial_supply: u128,
}

impl TokenGenesis {
    /// Label the default treasury address is derived from.
    pub const TREASURY_LABEL: &'static str = "cinder:treasury";

    /// A genesis with 18 decimals, the default treasury and no initial supply.
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, owner: Address) -> Self {
        Self {
            metadata: TokenMetadata {
                name: name.into(),
                symbol: symbol.into(),
                decimals: TOKEN_DECIMALS,
            },
            owner,
            treasury: Address::from_label(Self::TREASURY_LABEL),
            initial_supply: 0,
        }
    }

    pub fn with_initial_supply(mut self, raw: u128) -> Self {
        self.initial_supply = raw;
        self
    }

    pub fn with_treasury(mut self, treasury: Address) -> Self {
        self.treasury = treasury;
        self
    }

    /// Structural checks that do not depend on parameters.
    pub fn validate(&self) -> Result<(), String> {
        if self.owner.is_zero() {
            return Err("owner must not be the zero address".into());
        }
        if self.treasury.is_zero() {
            return Err("treasury must not be the zero address".into());
        }
        if self.treasury == self.owner {
            return Err("treasury must differ from the owner".into());
        }
        if self.metadata.symbol.trim().is_empty() {
            return Err("symbol must not be empty".into());
        }
        Ok(())
    }
}
