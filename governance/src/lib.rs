//! Burn-rate governance for the Cinder ledger.
//!
//! Two states over the pending slot: `NoProposal` → `Proposed` via
//! `propose`, back to `NoProposal` via `execute` (after the timelock) or
//! `cancel`. Transfers only ever see the committed rate.
//!
//! Key principle: the delay is the protection. `propose`, `cancel` and the
//! feature toggle need an admin capability; `execute` is open to anyone once
//! the timelock has elapsed.

pub mod access;
pub mod engine;
pub mod error;
pub mod params;
pub mod policy;

pub use access::{AdminCapability, Ownership};
pub use engine::BurnRateGovernor;
pub use error::GovernanceError;
pub use params::GovernorParams;
pub use policy::{BurnPolicy, GovernorPhase, PendingProposal};
