//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues that plague monetary calculations. The storefront sells
//! in US dollars only.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};

/// A US dollar amount, stored in cents.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money {
    /// Amount in cents.
    pub amount_cents: i64,
}

impl Money {
    /// Create a new Money value from cents.
    pub const fn from_cents(amount_cents: i64) -> Self {
        Self { amount_cents }
    }

    /// Create a Money value from a decimal dollar amount, rounding to the
    /// nearest cent.
    ///
    /// ```
    /// use octodeco_commerce::Money;
    /// let price = Money::from_decimal(4.99);
    /// assert_eq!(price.amount_cents, 499);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        Self::from_cents((amount * 100.0).round() as i64)
    }

    /// Zero dollars.
    pub const fn zero() -> Self {
        Self::from_cents(0)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount_cents > 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / 100.0
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}${}", sign, self.abs_amount())
    }

    /// Format as a display string without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}", sign, self.abs_amount())
    }

    fn abs_amount(&self) -> String {
        let cents = self.amount_cents.unsigned_abs();
        format!("{}.{:02}", cents / 100, cents % 100)
    }

    /// Multiply by a quantity, saturating instead of overflowing.
    pub fn saturating_mul(&self, factor: i64) -> Money {
        Money::from_cents(self.amount_cents.saturating_mul(factor))
    }

    /// Subtract, never going below zero.
    pub fn saturating_sub_floor_zero(&self, other: Money) -> Money {
        Money::from_cents(self.amount_cents.saturating_sub(other.amount_cents).max(0))
    }

    /// Calculate a whole-number percentage of this amount, rounded to the
    /// nearest cent with halves rounded up.
    ///
    /// ```
    /// use octodeco_commerce::Money;
    /// // 10% of $4.99 is 49.9 cents
    /// assert_eq!(Money::from_cents(499).percentage(10), Money::from_cents(50));
    /// ```
    pub fn percentage(&self, percent: u8) -> Money {
        let scaled = i128::from(self.amount_cents) * i128::from(percent);
        let rounded = (scaled + 50).div_euclid(100);
        Money::from_cents(rounded.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::from_cents(self.amount_cents.saturating_add(other.amount_cents))
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money::from_cents(self.amount_cents.saturating_sub(other.amount_cents))
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, factor: i64) -> Money {
        self.saturating_mul(factor)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
