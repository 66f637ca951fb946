//! Splitter errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BurnError {
    #[error("amount {amount} too small to burn: burn of {burn} would consume the whole transfer")]
    AmountTooSmallForBurn { amount: u128, burn: u128 },
}
