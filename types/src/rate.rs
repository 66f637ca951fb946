//! Burn rate expressed in thousandths.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Denominator of a burn rate: 1000 thousandths = 100%.
pub const RATE_DENOMINATOR: u16 = 1000;

/// A proportional burn rate in thousandths (`50` = 5%).
///
/// Always within `0..=1000`; construction and deserialization both enforce it.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u16", into = "u16")]
pub struct BurnRate(u16);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("burn rate {0} exceeds {max} thousandths", max = RATE_DENOMINATOR)]
pub struct InvalidBurnRate(pub u16);

impl BurnRate {
    pub const ZERO: Self = Self(0);
    pub const MAX: Self = Self(RATE_DENOMINATOR);

    pub fn new(thousandths: u16) -> Result<Self, InvalidBurnRate> {
        if thousandths > RATE_DENOMINATOR {
            return Err(InvalidBurnRate(thousandths));
        }
        Ok(Self(thousandths))
    }

    pub fn thousandths(self) -> u16 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl TryFrom<u16> for BurnRate {
    type Error = InvalidBurnRate;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BurnRate> for u16 {
    fn from(rate: BurnRate) -> u16 {
        rate.0
    }
}

impl fmt::Display for BurnRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}%", self.0 / 10, self.0 % 10)
    }
}
