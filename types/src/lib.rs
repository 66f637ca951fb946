//! Fundamental types for the Cinder ledger.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! addresses, amounts, burn rates, timestamps and clocks, and ledger parameters.

pub mod address;
pub mod amount;
pub mod params;
pub mod rate;
pub mod time;

pub use address::{Address, AddressParseError};
pub use amount::{format_amount, parse_amount, whole_tokens, TOKEN_DECIMALS, TOKEN_UNIT};
pub use params::LedgerParams;
pub use rate::{BurnRate, InvalidBurnRate, RATE_DENOMINATOR};
pub use time::{Clock, FixedClock, SystemClock, Timestamp};
