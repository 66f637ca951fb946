//! Burn policy state and the pending proposal.

use cinder_types::{BurnRate, Timestamp};
use serde::{Deserialize, Serialize};

/// The two states of the governor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GovernorPhase {
    /// No rate change is waiting.
    NoProposal,
    /// A rate change is waiting out its timelock.
    Proposed,
}

/// A rate change awaiting its timelock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingProposal {
    /// The rate that will be committed on execution.
    pub proposed_rate: BurnRate,
    /// Earliest moment `execute` succeeds (proposal time + timelock).
    pub effective_at: Timestamp,
}

impl PendingProposal {
    pub fn is_executable(&self, now: Timestamp) -> bool {
        now >= self.effective_at
    }
}

/// The ledger's single burn policy record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurnPolicy {
    /// Rate applied to every taxed transfer.
    pub committed_rate: BurnRate,
    /// Whether burn-on-transfer is active at all.
    pub feature_enabled: bool,
    /// At most one outstanding proposal.
    pub pending: Option<PendingProposal>,
}

impl BurnPolicy {
    pub fn phase(&self) -> GovernorPhase {
        match self.pending {
            Some(_) => GovernorPhase::Proposed,
            None => GovernorPhase::NoProposal,
        }
    }
}
