//! Integer money type in minor currency units.
//!
//! Balances and payment amounts are whole numbers of the smallest currency
//! unit (cents, dirams), so arithmetic is exact and the wire representation
//! is plain base-10.

use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

/// An amount of money in minor currency units.
///
/// Wraps an `i64` so amounts cannot be mixed up with other integers such as
/// account IDs. The string form is the plain base-10 integer, which is also
/// the wire form used by the bulk and dump codecs.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use wallet_ledger::Money;
///
/// let amount = Money::from_str("10500").unwrap();
/// assert_eq!(amount.to_string(), "10500");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Money(i64);

impl Money {
    /// Zero value.
    pub const ZERO: Self = Money(0);

    /// Creates a new `Money` from an amount of minor units.
    pub const fn new(minor_units: i64) -> Self {
        Money(minor_units)
    }

    /// Returns the amount as a raw number of minor units.
    pub const fn minor_units(self) -> i64 {
        self.0
    }

    /// Returns `true` if this amount is greater than zero.
    pub fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl FromStr for Money {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        i64::from_str(s.trim()).map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}
