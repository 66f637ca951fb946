#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use cinder_governance::{BurnRateGovernor, GovernorParams, Ownership};
use cinder_types::{Address, Timestamp};

#[derive(Debug, Arbitrary)]
enum Op {
    Propose { rate: u16, as_admin: bool },
    Execute,
    Cancel { as_admin: bool },
    Toggle { enabled: bool },
    Advance { secs: u32 },
}

// Drive the governor with arbitrary call sequences. A rejected call must
// leave the governor exactly as it was.
fuzz_target!(|ops: Vec<Op>| {
    let admin = Address::new([1; 20]);
    let stranger = Address::new([2; 20]);
    let ownership = Ownership::new(admin);
    let mut governor = BurnRateGovernor::new(GovernorParams::default());
    let mut now = Timestamp::new(0);

    for op in ops {
        let before = governor.clone();
        let rejected = match op {
            Op::Propose { rate, as_admin } => {
                let caller = if as_admin { admin } else { stranger };
                governor.propose(&ownership, &caller, rate, now).is_err()
            }
            Op::Execute => governor.execute(now).is_err(),
            Op::Cancel { as_admin } => {
                let caller = if as_admin { admin } else { stranger };
                governor.cancel(&ownership, &caller).is_err()
            }
            Op::Toggle { enabled } => governor
                .set_feature_enabled(&ownership, &admin, enabled)
                .is_err(),
            Op::Advance { secs } => {
                now = now.checked_add_secs(u64::from(secs)).unwrap_or(now);
                false
            }
        };
        if rejected {
            assert_eq!(governor, before);
        }
        assert!(governor.committed_rate().thousandths() <= 100);
    }
});
