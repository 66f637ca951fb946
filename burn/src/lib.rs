//! Transfer splitting: how much of a transfer is burned versus delivered.
//!
//! `burn = floor(amount × rate / 1000)`, raised to a floor of one raw unit
//! whenever the tax is active, so every taxed transfer destroys something.
//! Transfers the floor would consume entirely are rejected.
//!
//! The split is a pure calculation. Moving the delivered amount and
//! destroying the burned amount is the ledger's job.

pub mod error;
pub mod split;

pub use error::BurnError;
pub use split::{split, BurnSplit, MIN_BURN};
