use cinder_types::{Address, Timestamp};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GovernanceError {
    #[error("{0} is not authorized to administer the burn rate")]
    Unauthorized(Address),

    #[error("invalid burn rate {rate}: {reason}")]
    InvalidRateValue { rate: u16, reason: &'static str },

    #[error("no burn rate proposal is pending")]
    NoProposalPending,

    #[error("timelock not elapsed: executable at {effective_at}, {remaining_secs}s remaining")]
    TimelockNotElapsed {
        effective_at: Timestamp,
        remaining_secs: u64,
    },

    #[error("cannot enable burn on transfer: committed rate {committed}, pending rate {pending:?}, ceiling {ceiling}")]
    FeatureEnableRejected {
        committed: u16,
        pending: Option<u16>,
        ceiling: u16,
    },

    #[error("timestamp overflow computing the effective time")]
    Overflow,
}
