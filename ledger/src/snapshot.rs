//! Ledger snapshots: the full state of an in-memory ledger at a point in
//! time.
//!
//! A snapshot carries a Blake2b-256 hash of its bincode-encoded state so a
//! corrupted or hand-edited state file is detected before it is loaded.
//! The hash covers the state and the version, not the capture time.

use serde::{Deserialize, Serialize};

use cinder_governance::{BurnRateGovernor, Ownership};
use cinder_store::MemoryStore;
use cinder_types::{Address, Clock, LedgerParams, Timestamp};

use crate::error::LedgerError;
use crate::event::EventBus;
use crate::genesis::TokenMetadata;
use crate::ledger::Ledger;
use crate::throttle::MintThrottle;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Everything a [`Ledger`] over a [`MemoryStore`] holds, minus its clock and
/// listeners.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerState {
    pub metadata: TokenMetadata,
    pub ownership: Ownership,
    pub treasury: Address,
    pub governor: BurnRateGovernor,
    pub throttle: MintThrottle,
    pub paused: bool,
    pub params: LedgerParams,
    pub store: MemoryStore,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Blake2b-256 of the encoded state and version.
    pub hash: [u8; 32],
    pub version: u32,
    /// When the snapshot was taken.
    pub taken_at: Timestamp,
    pub state: LedgerState,
}

impl LedgerSnapshot {
    pub fn capture(state: LedgerState, taken_at: Timestamp) -> Result<Self, LedgerError> {
        let mut snap = Self {
            hash: [0u8; 32],
            version: SNAPSHOT_VERSION,
            taken_at,
            state,
        };
        snap.hash = snap.compute_hash()?;
        Ok(snap)
    }

    fn compute_hash(&self) -> Result<[u8; 32], LedgerError> {
        use blake2::digest::consts::U32;
        use blake2::{Blake2b, Digest};

        let encoded = bincode::serialize(&self.state)
            .map_err(|e| LedgerError::Snapshot(e.to_string()))?;

        let mut hasher = Blake2b::<U32>::new();
        hasher.update(self.version.to_le_bytes());
        hasher.update(&encoded);

        let result = hasher.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&result);
        Ok(out)
    }

    /// Whether the stored hash matches the state.
    pub fn verify(&self) -> bool {
        matches!(self.compute_hash(), Ok(hash) if hash == self.hash)
    }

    pub fn hash_hex(&self) -> String {
        hex::encode(self.hash)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, LedgerError> {
        bincode::serialize(self).map_err(|e| LedgerError::Snapshot(e.to_string()))
    }

    /// Decode and verify a snapshot.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LedgerError> {
        let snap: Self =
            bincode::deserialize(bytes).map_err(|e| LedgerError::Snapshot(e.to_string()))?;
        if snap.version != SNAPSHOT_VERSION {
            return Err(LedgerError::Snapshot(format!(
                "unsupported snapshot version {}",
                snap.version
            )));
        }
        if !snap.verify() {
            return Err(LedgerError::Snapshot("hash mismatch".into()));
        }
        Ok(snap)
    }
}

impl<C: Clock> Ledger<MemoryStore, C> {
    pub fn state(&self) -> LedgerState {
        LedgerState {
            metadata: self.metadata.clone(),
            ownership: self.ownership,
            treasury: self.treasury,
            governor: self.governor.clone(),
            throttle: self.throttle,
            paused: self.paused,
            params: self.params.clone(),
            store: self.store.clone(),
        }
    }

    pub fn snapshot(&self) -> Result<LedgerSnapshot, LedgerError> {
        LedgerSnapshot::capture(self.state(), self.clock.now())
    }

    /// Rebuild a ledger from a verified snapshot. Listeners are not part of
    /// a snapshot and start empty.
    pub fn restore(snapshot: LedgerSnapshot, clock: C) -> Result<Self, LedgerError> {
        if !snapshot.verify() {
            return Err(LedgerError::Snapshot("hash mismatch".into()));
        }
        let state = snapshot.state;
        tracing::debug!(
            taken_at = %snapshot.taken_at,
            holders = state.store.holder_count(),
            "ledger restored from snapshot"
        );
        Ok(Self {
            metadata: state.metadata,
            ownership: state.ownership,
            treasury: state.treasury,
            governor: state.governor,
            throttle: state.throttle,
            paused: state.paused,
            params: state.params,
            store: state.store,
            clock,
            events: EventBus::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genesis::TokenGenesis;
    use cinder_types::{FixedClock, TOKEN_UNIT};

    fn owner() -> Address {
        Address::from_label("owner")
    }

    fn sample_ledger() -> Ledger<MemoryStore, FixedClock> {
        let genesis =
            TokenGenesis::new("Cinder", "CDR", owner()).with_initial_supply(100 * TOKEN_UNIT);
        let mut ledger = Ledger::new(
            genesis,
            LedgerParams::default(),
            MemoryStore::new(),
            FixedClock(Timestamp::new(500)),
        )
        .unwrap();
        ledger
            .transfer(&owner(), &Address::from_label("bob"), 7 * TOKEN_UNIT)
            .unwrap();
        ledger.propose_burn_rate(&owner(), 25).unwrap();
        ledger
    }

    #[test]
    fn capture_restore_preserves_state() {
        let ledger = sample_ledger();
        let snap = ledger.snapshot().unwrap();
        assert!(snap.verify());
        assert_eq!(snap.taken_at, Timestamp::new(500));

        let bytes = snap.to_bytes().unwrap();
        let decoded = LedgerSnapshot::from_bytes(&bytes).unwrap();
        let restored = Ledger::restore(decoded, FixedClock(Timestamp::new(600))).unwrap();

        assert_eq!(restored.state(), ledger.state());
        assert_eq!(restored.now(), Timestamp::new(600));
    }

    #[test]
    fn tampered_state_fails_verify() {
        let mut snap = sample_ledger().snapshot().unwrap();
        snap.state.paused = true;
        assert!(!snap.verify());

        let bytes = snap.to_bytes().unwrap();
        assert_eq!(
            LedgerSnapshot::from_bytes(&bytes).unwrap_err(),
            LedgerError::Snapshot("hash mismatch".into())
        );
        assert!(Ledger::restore(snap, FixedClock(Timestamp::new(0))).is_err());
    }

    #[test]
    fn hash_ignores_capture_time() {
        let state = sample_ledger().state();
        let a = LedgerSnapshot::capture(state.clone(), Timestamp::new(1)).unwrap();
        let b = LedgerSnapshot::capture(state, Timestamp::new(2)).unwrap();
        assert_eq!(a.hash, b.hash);
        assert_eq!(a.hash_hex().len(), 64);
    }

    #[test]
    fn garbage_bytes_rejected() {
        assert!(matches!(
            LedgerSnapshot::from_bytes(&[1, 2, 3]),
            Err(LedgerError::Snapshot(_))
        ));
    }
}
