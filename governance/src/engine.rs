//! Core governor: drives the burn policy through its timelocked lifecycle.
//!
//! Every transition validates all preconditions before touching state, so a
//! rejected call leaves the policy exactly as it was. Time is always passed
//! in by the caller.

use crate::access::AdminCapability;
use crate::error::GovernanceError;
use crate::params::GovernorParams;
use crate::policy::{BurnPolicy, GovernorPhase, PendingProposal};
use cinder_types::{Address, BurnRate, Timestamp};
use serde::{Deserialize, Serialize};

/// Owns the burn policy and the parameters it is governed by.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurnRateGovernor {
    policy: BurnPolicy,
    params: GovernorParams,
}

impl BurnRateGovernor {
    /// A fresh governor: rate zero, feature off, nothing pending.
    pub fn new(params: GovernorParams) -> Self {
        Self {
            policy: BurnPolicy::default(),
            params,
        }
    }

    /// Resume from a previously persisted policy.
    pub fn from_policy(policy: BurnPolicy, params: GovernorParams) -> Self {
        Self { policy, params }
    }

    pub fn policy(&self) -> &BurnPolicy {
        &self.policy
    }

    pub fn params(&self) -> &GovernorParams {
        &self.params
    }

    pub fn phase(&self) -> GovernorPhase {
        self.policy.phase()
    }

    pub fn committed_rate(&self) -> BurnRate {
        self.policy.committed_rate
    }

    pub fn feature_enabled(&self) -> bool {
        self.policy.feature_enabled
    }

    pub fn pending(&self) -> Option<&PendingProposal> {
        self.policy.pending.as_ref()
    }

    /// Propose a new committed rate, effective after the timelock.
    ///
    /// Overwrites any existing proposal and restarts its timelock.
    pub fn propose(
        &mut self,
        admin: &dyn AdminCapability,
        caller: &Address,
        new_rate: u16,
        now: Timestamp,
    ) -> Result<PendingProposal, GovernanceError> {
        require_admin(admin, caller)?;
        if new_rate > self.params.max_proposed_rate {
            return Err(GovernanceError::InvalidRateValue {
                rate: new_rate,
                reason: "exceeds the proposal ceiling",
            });
        }
        if new_rate == self.policy.committed_rate.thousandths() {
            return Err(GovernanceError::InvalidRateValue {
                rate: new_rate,
                reason: "equals the committed rate",
            });
        }
        let proposed_rate = BurnRate::new(new_rate).map_err(|_| GovernanceError::InvalidRateValue {
            rate: new_rate,
            reason: "exceeds the rate denominator",
        })?;
        let effective_at = now
            .checked_add_secs(self.params.timelock_secs)
            .ok_or(GovernanceError::Overflow)?;

        let proposal = PendingProposal {
            proposed_rate,
            effective_at,
        };
        if let Some(previous) = self.policy.pending.replace(proposal) {
            tracing::debug!(
                replaced = previous.proposed_rate.thousandths(),
                "overwriting pending burn rate proposal"
            );
        }
        tracing::info!(
            rate = new_rate,
            effective_at = %effective_at,
            "burn rate proposed"
        );
        Ok(proposal)
    }

    /// Commit the pending rate once its timelock has elapsed. Open to anyone.
    pub fn execute(&mut self, now: Timestamp) -> Result<BurnRate, GovernanceError> {
        let pending = self.policy.pending.ok_or(GovernanceError::NoProposalPending)?;
        if !pending.is_executable(now) {
            return Err(GovernanceError::TimelockNotElapsed {
                effective_at: pending.effective_at,
                remaining_secs: pending.effective_at.secs_until(now),
            });
        }

        self.policy.committed_rate = pending.proposed_rate;
        self.policy.pending = None;
        tracing::info!(rate = pending.proposed_rate.thousandths(), "burn rate committed");
        Ok(pending.proposed_rate)
    }

    /// Discard the pending proposal, leaving the committed rate untouched.
    pub fn cancel(
        &mut self,
        admin: &dyn AdminCapability,
        caller: &Address,
    ) -> Result<PendingProposal, GovernanceError> {
        require_admin(admin, caller)?;
        let discarded = self
            .policy
            .pending
            .take()
            .ok_or(GovernanceError::NoProposalPending)?;
        tracing::info!(
            discarded = discarded.proposed_rate.thousandths(),
            committed = self.policy.committed_rate.thousandths(),
            "burn rate proposal cancelled"
        );
        Ok(discarded)
    }

    /// Seconds until the pending proposal can be executed; zero when there is
    /// none or it is already executable.
    pub fn time_until_executable(&self, now: Timestamp) -> u64 {
        self.policy
            .pending
            .map_or(0, |p| p.effective_at.secs_until(now))
    }

    /// Switch burn-on-transfer on or off.
    ///
    /// Enabling is refused while the committed rate, or a rate about to
    /// land, is above the enable ceiling. Disabling always succeeds.
    pub fn set_feature_enabled(
        &mut self,
        admin: &dyn AdminCapability,
        caller: &Address,
        enabled: bool,
    ) -> Result<(), GovernanceError> {
        require_admin(admin, caller)?;
        if enabled {
            let ceiling = self.params.max_enable_rate;
            let committed = self.policy.committed_rate.thousandths();
            let pending = self.policy.pending.map(|p| p.proposed_rate.thousandths());
            if committed > ceiling || pending.is_some_and(|r| r > ceiling) {
                return Err(GovernanceError::FeatureEnableRejected {
                    committed,
                    pending,
                    ceiling,
                });
            }
        }
        self.policy.feature_enabled = enabled;
        tracing::info!(enabled, "transfer with burn toggled");
        Ok(())
    }
}

fn require_admin(admin: &dyn AdminCapability, caller: &Address) -> Result<(), GovernanceError> {
    if admin.is_admin(caller) {
        Ok(())
    } else {
        tracing::warn!(%caller, "rejected non-admin governance call");
        Err(GovernanceError::Unauthorized(*caller))
    }
}
