use proptest::prelude::*;

use cinder_types::{format_amount, parse_amount, Address, BurnRate, Timestamp, RATE_DENOMINATOR};

proptest! {
    /// Rendering an amount and parsing it back yields the same raw value.
    #[test]
    fn amount_text_is_lossless(raw in any::<u128>()) {
        prop_assert_eq!(parse_amount(&format_amount(raw)), Some(raw));
    }

    /// BurnRate accepts exactly the 0..=1000 range.
    #[test]
    fn burn_rate_range(value in any::<u16>()) {
        prop_assert_eq!(BurnRate::new(value).is_ok(), value <= RATE_DENOMINATOR);
    }

    /// Address hex form always parses back to the same bytes.
    #[test]
    fn address_text_is_lossless(bytes in prop::array::uniform20(0u8..)) {
        let addr = Address::new(bytes);
        let parsed: Address = addr.to_string().parse().unwrap();
        prop_assert_eq!(parsed, addr);
        prop_assert_eq!(addr.is_zero(), bytes == [0u8; 20]);
    }

    /// secs_until and elapsed_since never both exceed zero.
    #[test]
    fn secs_until_and_elapsed_are_exclusive(a in any::<u64>(), b in any::<u64>()) {
        let t = Timestamp::new(a);
        let now = Timestamp::new(b);
        prop_assert!(t.secs_until(now) == 0 || t.elapsed_since(now) == 0);
    }
}
