use cinder_types::Address;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("insufficient funds in {account}: need {needed}, have {available}")]
    InsufficientFunds {
        account: Address,
        needed: u128,
        available: u128,
    },

    #[error("arithmetic overflow updating {0}")]
    Overflow(&'static str),

    #[error("storage backend error: {0}")]
    Backend(String),
}
