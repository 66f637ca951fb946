//! Raw token storage for the Cinder ledger.
//!
//! The ledger applies every policy (pause, burn tax, allowances, caps) and
//! then calls into a [`TokenStore`] to move units. Store primitives apply no
//! policy of their own beyond refusing to go negative or overflow.

pub mod error;
pub mod memory;
pub mod token;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use token::TokenStore;
