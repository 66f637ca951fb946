//! Mint throttle: minimum spacing between mints.

use crate::error::LedgerError;
use cinder_types::Timestamp;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintThrottle {
    last_mint_at: Timestamp,
    cooldown_secs: u64,
}

impl MintThrottle {
    /// Start the throttle as if a mint happened at `created_at`.
    pub fn new(created_at: Timestamp, cooldown_secs: u64) -> Self {
        Self {
            last_mint_at: created_at,
            cooldown_secs,
        }
    }

    pub fn last_mint_at(&self) -> Timestamp {
        self.last_mint_at
    }

    pub fn cooldown_secs(&self) -> u64 {
        self.cooldown_secs
    }

    /// Earliest time the next mint is allowed.
    pub fn next_mint_at(&self) -> Timestamp {
        Timestamp::new(self.last_mint_at.as_secs().saturating_add(self.cooldown_secs))
    }

    pub fn remaining(&self, now: Timestamp) -> u64 {
        self.next_mint_at().secs_until(now)
    }

    pub fn check(&self, now: Timestamp) -> Result<(), LedgerError> {
        if self.last_mint_at.has_expired(self.cooldown_secs, now) {
            Ok(())
        } else {
            Err(LedgerError::CooldownActive {
                next_mint_at: self.next_mint_at(),
                remaining_secs: self.remaining(now),
            })
        }
    }

    /// Record a successful mint. Call only after [`check`](Self::check) passed
    /// and the mint itself succeeded.
    pub fn record(&mut self, now: Timestamp) {
        self.last_mint_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: u64 = 86_400;

    #[test]
    fn cooldown_is_inclusive_of_boundary() {
        let throttle = MintThrottle::new(Timestamp::new(1_000), 30 * DAY);
        assert!(throttle.check(Timestamp::new(1_000)).is_err());
        assert_eq!(
            throttle.check(Timestamp::new(1_000 + 30 * DAY - 1)),
            Err(LedgerError::CooldownActive {
                next_mint_at: Timestamp::new(1_000 + 30 * DAY),
                remaining_secs: 1,
            })
        );
        assert!(throttle.check(Timestamp::new(1_000 + 30 * DAY)).is_ok());
    }

    #[test]
    fn record_restarts_cooldown() {
        let mut throttle = MintThrottle::new(Timestamp::new(0), 10);
        throttle.record(Timestamp::new(50));
        assert_eq!(throttle.last_mint_at(), Timestamp::new(50));
        assert_eq!(throttle.next_mint_at(), Timestamp::new(60));
        assert_eq!(throttle.remaining(Timestamp::new(55)), 5);
    }
}
