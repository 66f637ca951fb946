//! The Cinder token ledger.
//!
//! [`Ledger`] is the single entry surface: every state-changing call takes
//! `&mut self`, validates all of its preconditions, applies the change
//! through the raw [`TokenStore`](cinder_store::TokenStore) primitives and
//! only then dispatches the events it produced. A rejected call mutates
//! nothing and emits nothing. Listeners receive events by shared reference
//! after the call has committed, so nothing observes or re-enters a
//! half-applied call.

pub mod error;
pub mod event;
pub mod genesis;
pub mod info;
pub mod ledger;
pub mod snapshot;
pub mod throttle;

pub use error::LedgerError;
pub use event::{EventBus, LedgerEvent};
pub use genesis::{TokenGenesis, TokenMetadata};
pub use info::TokenInfo;
pub use ledger::Ledger;
pub use snapshot::{LedgerSnapshot, LedgerState};
pub use throttle::MintThrottle;
