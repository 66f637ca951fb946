//! Events emitted by ledger calls for subscribers.

use cinder_types::{Address, BurnRate, Timestamp};
use serde::Serialize;

/// Observable facts produced by a committed ledger call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// Units moved between accounts (the delivered amount, after burn).
    Transfer {
        from: Address,
        to: Address,
        amount: u128,
    },
    /// An allowance was set.
    Approval {
        owner: Address,
        spender: Address,
        amount: u128,
    },
    /// Units were destroyed from an account, reducing total supply.
    Burn { from: Address, amount: u128 },
    /// New units were created.
    Mint { to: Address, amount: u128 },
    /// A burn rate change was proposed.
    BurnRateProposed {
        rate: BurnRate,
        effective_at: Timestamp,
    },
    /// The committed burn rate changed.
    BurnRateUpdated { rate: BurnRate },
    /// A pending proposal was discarded; the committed rate is unchanged.
    BurnRateProposalCancelled {
        proposed_rate: BurnRate,
        committed_rate: BurnRate,
    },
    /// Burn-on-transfer was switched on or off.
    TransferWithBurnToggled { enabled: bool },
    Paused { by: Address },
    Unpaused { by: Address },
    OwnershipTransferred { previous: Address, new: Address },
}

/// Synchronous fan-out event bus for ledger events.
///
/// Listeners are invoked inline after the emitting call has committed; keep
/// handlers fast.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&LedgerEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&LedgerEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &LedgerEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
