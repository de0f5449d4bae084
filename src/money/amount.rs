//! Amount type for representing currency values
//!
//! Internally stores amounts in cents (i64) so that arithmetic never drifts.
//! Externally an amount is a decimal number with at most two fractional
//! digits, which is also how it is serialized for the data store.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use super::input::MoneyInput;
use super::parse::{cents_from_f64, cents_from_input, round_to_i64};

/// A monetary amount stored as cents (hundredths of the currency unit)
///
/// Amounts are immutable values; every operation returns a new one.
/// Addition and subtraction saturate at the `i64` bounds instead of panicking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Create an amount from cents
    ///
    /// # Examples
    /// ```
    /// use caixa::money::Amount;
    /// let amount = Amount::from_cents(1050); // 10.50
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a zero amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Normalize any raw input into an amount
    ///
    /// Never fails: empty, missing or malformed input yields zero.
    ///
    /// # Examples
    /// ```
    /// use caixa::money::Amount;
    /// assert_eq!(Amount::parse("12,5").cents(), 1250);
    /// assert_eq!(Amount::parse(0.1 + 0.2).cents(), 30);
    /// assert_eq!(Amount::parse("abc"), Amount::zero());
    /// ```
    pub fn parse<'a>(input: impl Into<MoneyInput<'a>>) -> Self {
        Self(cents_from_input(input.into()))
    }

    /// Round a value in currency units to the nearest cent
    ///
    /// Non-finite values become zero.
    pub fn from_f64(value: f64) -> Self {
        Self(cents_from_f64(value).unwrap_or(0))
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the amount in currency units
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Multiply by a unitless rate, rounding once at cent granularity
    ///
    /// A non-finite rate yields zero.
    pub fn mul_rate(self, rate: f64) -> Self {
        Self(round_to_i64(self.0 as f64 * rate).unwrap_or(0))
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Format with a currency symbol ("R$ 10.50", "-R$ 3.00")
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{} {}", symbol, self.abs())
        } else {
            format!("{} {}", symbol, self)
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Amount {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |acc, a| acc + a)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

/// Shapes the data store hands back for a monetary column
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredAmount {
    Number(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let stored = Option::<StoredAmount>::deserialize(deserializer)?;
        Ok(match stored {
            Some(StoredAmount::Number(value)) => Amount::parse(value),
            Some(StoredAmount::Text(text)) => Amount::parse(text.as_str()),
            None => Amount::zero(),
        })
    }
}
