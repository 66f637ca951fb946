//! Ledger parameters: the timelock, ceilings, and mint limits.

use crate::amount::whole_tokens;
use serde::{Deserialize, Serialize};

/// Delay between proposing and committing a burn rate: 2 days.
pub const BURN_RATE_TIMELOCK_SECS: u64 = 2 * 24 * 60 * 60;

/// Highest rate (thousandths) a proposal may carry: 10%.
pub const MAX_PROPOSED_RATE: u16 = 100;

/// Highest committed or pending rate (thousandths) under which
/// burn-on-transfer may be switched on.
pub const MAX_ENABLE_RATE: u16 = 100;

/// Minimum spacing between two mints: 30 days.
pub const MINT_COOLDOWN_SECS: u64 = 30 * 24 * 60 * 60;

/// Supply ceiling in whole tokens.
pub const MAX_SUPPLY_TOKENS: u64 = 50_000_000_000;

/// All tunable ledger parameters.
///
/// Defaults are the production constants. Missing fields in a TOML
/// `[params]` table fall back to them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerParams {
    /// Seconds between `propose` and the earliest `execute`.
    pub burn_rate_timelock_secs: u64,

    /// Proposal ceiling, in thousandths.
    pub max_proposed_rate: u16,

    /// Enable-safety ceiling, in thousandths.
    pub max_enable_rate: u16,

    /// Seconds that must pass between two successful mints.
    pub mint_cooldown_secs: u64,

    /// Supply ceiling in whole tokens.
    pub max_supply_tokens: u64,
}

impl LedgerParams {
    /// Short timelock and cooldown for local experimentation.
    pub fn dev_defaults() -> Self {
        Self {
            burn_rate_timelock_secs: 120,
            mint_cooldown_secs: 300,
            ..Self::default()
        }
    }

    /// Supply ceiling in raw units.
    pub fn max_supply(&self) -> u128 {
        // u64 whole tokens * 10^18 always fits in u128.
        whole_tokens(self.max_supply_tokens as u128).unwrap_or(u128::MAX)
    }
}

impl Default for LedgerParams {
    fn default() -> Self {
        Self {
            burn_rate_timelock_secs: BURN_RATE_TIMELOCK_SECS,
            max_proposed_rate: MAX_PROPOSED_RATE,
            max_enable_rate: MAX_ENABLE_RATE,
            mint_cooldown_secs: MINT_COOLDOWN_SECS,
            max_supply_tokens: MAX_SUPPLY_TOKENS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TOKEN_UNIT;

    #[test]
    fn defaults_match_constants() {
        let p = LedgerParams::default();
        assert_eq!(p.burn_rate_timelock_secs, 172_800);
        assert_eq!(p.mint_cooldown_secs, 2_592_000);
        assert_eq!(p.max_proposed_rate, 100);
        assert_eq!(p.max_enable_rate, 100);
        assert_eq!(p.max_supply(), 50_000_000_000 * TOKEN_UNIT);
    }

    #[test]
    fn dev_defaults_keep_ceilings() {
        let p = LedgerParams::dev_defaults();
        assert_eq!(p.burn_rate_timelock_secs, 120);
        assert_eq!(p.mint_cooldown_secs, 300);
        assert_eq!(p.max_proposed_rate, MAX_PROPOSED_RATE);
        assert_eq!(p.max_supply_tokens, MAX_SUPPLY_TOKENS);
    }
}
