#![no_main]

use libfuzzer_sys::fuzz_target;

use cinder_burn::{split, MIN_BURN};
use cinder_types::BurnRate;

// Split arbitrary amounts at arbitrary rates. Must never panic, and every
// accepted split must conserve the amount.
fuzz_target!(|input: (u128, bool, u16)| {
    let (amount, enabled, raw_rate) = input;
    let Ok(rate) = BurnRate::new(raw_rate % 1001) else {
        return;
    };

    if let Ok(parts) = split(amount, enabled, rate) {
        assert_eq!(parts.burn.checked_add(parts.deliver), Some(amount));
        if enabled && !rate.is_zero() {
            assert!(parts.burn >= MIN_BURN);
            assert!(parts.deliver > 0);
        } else {
            assert_eq!(parts.burn, 0);
        }
    }
});
