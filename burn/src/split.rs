//! The burn/deliver split of a single transfer.

use crate::error::BurnError;
use cinder_types::{BurnRate, RATE_DENOMINATOR};
use serde::{Deserialize, Serialize};

/// Smallest burn applied to a taxed transfer (one raw unit).
pub const MIN_BURN: u128 = 1;

/// Outcome of splitting a transfer: `burn + deliver` equals the requested amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurnSplit {
    /// Raw units destroyed from the sender.
    pub burn: u128,
    /// Raw units credited to the recipient.
    pub deliver: u128,
}

impl BurnSplit {
    /// A split that burns nothing.
    pub fn untaxed(amount: u128) -> Self {
        Self {
            burn: 0,
            deliver: amount,
        }
    }

    pub fn is_taxed(&self) -> bool {
        self.burn > 0
    }

    pub fn total(&self) -> u128 {
        self.burn + self.deliver
    }
}

/// Split `amount` into burned and delivered parts under the committed rate.
///
/// With the feature off or a zero rate nothing is burned. Otherwise the
/// proportional burn is clamped up to [`MIN_BURN`] before checking that
/// something is left to deliver.
pub fn split(amount: u128, feature_enabled: bool, rate: BurnRate) -> Result<BurnSplit, BurnError> {
    if !feature_enabled || rate.is_zero() {
        return Ok(BurnSplit::untaxed(amount));
    }

    let mut burn = proportional_burn(amount, rate);
    if burn == 0 && amount > 0 {
        burn = MIN_BURN;
    }
    if burn >= amount {
        return Err(BurnError::AmountTooSmallForBurn { amount, burn });
    }

    Ok(BurnSplit {
        burn,
        deliver: amount - burn,
    })
}

/// `floor(amount × rate / 1000)` without forming the full product.
///
/// With `amount = 1000q + r`, the floor is `q × rate + floor(r × rate / 1000)`;
/// neither term can overflow since `rate <= 1000`.
fn proportional_burn(amount: u128, rate: BurnRate) -> u128 {
    let denom = RATE_DENOMINATOR as u128;
    let rate = rate.thousandths() as u128;
    (amount / denom) * rate + (amount % denom) * rate / denom
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinder_types::TOKEN_UNIT;

    fn rate(t: u16) -> BurnRate {
        BurnRate::new(t).unwrap()
    }

    #[test]
    fn disabled_feature_burns_nothing() {
        let s = split(1_000, false, rate(50)).unwrap();
        assert_eq!(s, BurnSplit::untaxed(1_000));
        assert!(!s.is_taxed());
    }

    #[test]
    fn zero_rate_burns_nothing() {
        assert_eq!(split(1, true, BurnRate::ZERO).unwrap(), BurnSplit::untaxed(1));
    }

    #[test]
    fn five_percent_of_fifty_tokens() {
        let s = split(50 * TOKEN_UNIT, true, rate(50)).unwrap();
        assert_eq!(s.burn, 25 * TOKEN_UNIT / 10);
        assert_eq!(s.deliver, 475 * TOKEN_UNIT / 10);
    }

    #[test]
    fn tenth_of_a_percent_of_half_a_token() {
        let s = split(TOKEN_UNIT / 2, true, rate(1)).unwrap();
        assert_eq!(s.burn, 5 * TOKEN_UNIT / 10_000);
        assert_eq!(s.deliver, 4_995 * TOKEN_UNIT / 10_000);
    }

    #[test]
    fn small_amount_is_clamped_to_minimum_burn() {
        // 999 * 1 / 1000 floors to zero
        let s = split(999, true, rate(1)).unwrap();
        assert_eq!(s.burn, MIN_BURN);
        assert_eq!(s.deliver, 998);
    }

    #[test]
    fn one_unit_transfer_is_rejected_when_taxed() {
        let err = split(1, true, rate(1)).unwrap_err();
        assert_eq!(err, BurnError::AmountTooSmallForBurn { amount: 1, burn: 1 });
    }

    #[test]
    fn one_unit_transfer_passes_when_untaxed() {
        assert_eq!(split(1, false, rate(100)).unwrap(), BurnSplit::untaxed(1));
    }

    #[test]
    fn two_units_at_ten_percent_deliver_one() {
        let s = split(2, true, rate(100)).unwrap();
        assert_eq!(s, BurnSplit { burn: 1, deliver: 1 });
    }

    #[test]
    fn full_rate_is_rejected() {
        // 100% would consume the whole transfer
        assert!(split(1_000, true, BurnRate::MAX).is_err());
    }

    #[test]
    fn zero_amount_with_active_tax_is_rejected() {
        assert_eq!(
            split(0, true, rate(50)),
            Err(BurnError::AmountTooSmallForBurn { amount: 0, burn: 0 })
        );
    }

    #[test]
    fn huge_amounts_do_not_overflow() {
        let s = split(u128::MAX, true, rate(999)).unwrap();
        assert_eq!(s.total(), u128::MAX);
        assert!(s.burn > s.deliver);
    }
}
