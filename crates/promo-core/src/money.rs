//! # Money
//!
//! Fixed-point money for the pricing engine.
//! Amounts are held as integer cents, so every value the engine produces is
//! already rounded to two decimal places and repeated stages cannot drift.

use crate::cart::CartItem;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

/// Round a raw amount to the nearest cent, half-up on `amount * 100`.
pub fn round2(amount: f64) -> f64 {
    (amount * 100.0 + 0.5).floor() / 100.0
}

/// Sum `unit_price × quantity` over all items.
pub fn subtotal_of(items: &[CartItem]) -> Money {
    items.iter().map(CartItem::line_total).sum()
}

/// A monetary amount in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Create from cents (the smallest unit)
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Create from a whole number of major units
    pub const fn from_major(major: i64) -> Self {
        Money(major.saturating_mul(100))
    }

    /// Create from a decimal major-unit amount, rounding half-up at the cent
    pub fn from_major_f64(amount: f64) -> Self {
        Money((amount * 100.0 + 0.5).floor() as i64)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Amount in major units (e.g. `157.5`)
    pub fn as_major_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// `percent`% of this amount, rounded to the cent.
    ///
    /// The arithmetic is exact in decimal; only the final value is rounded
    /// (half away from zero). Overflow saturates in the direction of the sign.
    pub fn percent_of(&self, percent: Decimal) -> Money {
        Decimal::from(self.0)
            .checked_mul(percent)
            .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
            .map(|d| d.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|d| d.to_i64())
            .map(Money)
            .unwrap_or_else(|| {
                let negative = self.0.is_negative() != percent.is_sign_negative();
                if negative {
                    Money(i64::MIN)
                } else {
                    Money(i64::MAX)
                }
            })
    }

    /// Fixed two-decimal rendering for receipts (e.g. "2382.50")
    pub fn display(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        format!("{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

/// Compact rendering used in generated labels: `50`, `157.5`, `0.05`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let (major, minor) = (abs / 100, abs % 100);
        if minor == 0 {
            write!(f, "{}{}", sign, major)
        } else if minor % 10 == 0 {
            write!(f, "{}{}.{}", sign, major, minor / 10)
        } else {
            write!(f, "{}{}.{:02}", sign, major, minor)
        }
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, rhs: u32) -> Money {
        Money(self.0.saturating_mul(i64::from(rhs)))
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, rhs: i64) -> Money {
        Money(self.0.saturating_mul(rhs))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

// Wire format is a plain number in major units.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_major_f64())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Ok(Money::from_major_f64(amount))
    }
}
