//! The governor's slice of the ledger parameters.

use cinder_types::LedgerParams;
use serde::{Deserialize, Serialize};

/// Timelock and ceilings the governor enforces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernorParams {
    /// Seconds between a proposal and its earliest execution.
    pub timelock_secs: u64,
    /// Highest rate (thousandths) a proposal may carry.
    pub max_proposed_rate: u16,
    /// Highest committed or pending rate under which the feature may be enabled.
    pub max_enable_rate: u16,
}

impl From<&LedgerParams> for GovernorParams {
    fn from(p: &LedgerParams) -> Self {
        Self {
            timelock_secs: p.burn_rate_timelock_secs,
            max_proposed_rate: p.max_proposed_rate,
            max_enable_rate: p.max_enable_rate,
        }
    }
}

impl Default for GovernorParams {
    fn default() -> Self {
        Self::from(&LedgerParams::default())
    }
}
