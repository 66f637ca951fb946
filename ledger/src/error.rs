use cinder_types::{Address, Timestamp};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("{0} is not authorized to administer the ledger")]
    Unauthorized(Address),

    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("{0} must not be the zero address")]
    ZeroAddress(&'static str),

    #[error("insufficient balance in {account}: need {needed}, have {available}")]
    InsufficientBalance {
        account: Address,
        needed: u128,
        available: u128,
    },

    #[error("insufficient allowance for {spender} over {owner}: need {needed}, have {available}")]
    InsufficientAllowance {
        owner: Address,
        spender: Address,
        needed: u128,
        available: u128,
    },

    #[error("mint cooldown active until {next_mint_at} ({remaining_secs}s remaining)")]
    CooldownActive {
        next_mint_at: Timestamp,
        remaining_secs: u64,
    },

    #[error("minting {requested} would exceed the supply ceiling {ceiling} (current supply {total_supply})")]
    SupplyCeilingExceeded {
        requested: u128,
        total_supply: u128,
        ceiling: u128,
    },

    #[error("ledger is paused")]
    SystemPaused,

    #[error("ledger is already paused")]
    AlreadyPaused,

    #[error("ledger is not paused")]
    NotPaused,

    #[error("invalid genesis: {0}")]
    Genesis(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),

    #[error("arithmetic overflow in {0}")]
    Overflow(&'static str),

    #[error("governance error: {0}")]
    Governance(#[from] cinder_governance::GovernanceError),

    #[error("burn error: {0}")]
    Burn(#[from] cinder_burn::BurnError),

    #[error("store error: {0}")]
    Store(#[from] cinder_store::StoreError),
}
