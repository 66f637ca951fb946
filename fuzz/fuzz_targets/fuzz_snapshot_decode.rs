#![no_main]

use libfuzzer_sys::fuzz_target;

use cinder_ledger::{LedgerSnapshot, LedgerState};

// Decoding arbitrary bytes as a ledger snapshot must never panic; anything
// that decodes must also verify.
fuzz_target!(|data: &[u8]| {
    if let Ok(snapshot) = LedgerSnapshot::from_bytes(data) {
        assert!(snapshot.verify());
    }
    let _ = bincode::deserialize::<LedgerState>(data);
});
