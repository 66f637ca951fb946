//! Read-only summary of the ledger.

use cinder_types::{Address, BurnRate, Timestamp};
use serde::Serialize;

/// Everything a caller needs to know about the token at one instant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TokenInfo {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub owner: Address,
    pub treasury: Address,
    pub total_supply: u128,
    pub max_supply: u128,
    pub treasury_balance: u128,
    pub paused: bool,

    /// Committed burn rate applied to transfers.
    pub burn_rate: BurnRate,
    pub transfer_with_burn: bool,
    pub pending_burn_rate: Option<BurnRate>,
    pub pending_effective_at: Option<Timestamp>,
    pub time_until_burn_rate_update: u64,

    pub last_mint_at: Timestamp,
    pub next_mint_at: Timestamp,
}
