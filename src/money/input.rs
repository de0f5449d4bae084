//! Raw monetary input
//!
//! Values reach the engine from form fields, the data store and the CLI in
//! several shapes: free text with either decimal separator, plain numbers,
//! or nothing at all. `MoneyInput` names those shapes so every operation can
//! accept any of them.

use super::amount::Amount;

/// A loosely-typed monetary value as supplied by a caller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoneyInput<'a> {
    /// Text as typed by a user or stored by the data store ("12,50", "7.1")
    Text(&'a str),
    /// A numeric value in currency units
    Number(f64),
    /// An already-normalized amount
    Exact(Amount),
    /// Absent value (empty field, null column)
    Missing,
}

impl MoneyInput<'_> {
    /// Check if this input carries no value
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl<'a> From<&'a str> for MoneyInput<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl<'a, 'b> From<&'b &'a str> for MoneyInput<'a> {
    fn from(value: &'b &'a str) -> Self {
        Self::Text(value)
    }
}

impl<'a> From<&'a String> for MoneyInput<'a> {
    fn from(value: &'a String) -> Self {
        Self::Text(value.as_str())
    }
}

impl From<f64> for MoneyInput<'_> {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&f64> for MoneyInput<'_> {
    fn from(value: &f64) -> Self {
        Self::Number(*value)
    }
}

impl From<i64> for MoneyInput<'_> {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i32> for MoneyInput<'_> {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<Amount> for MoneyInput<'_> {
    fn from(value: Amount) -> Self {
        Self::Exact(value)
    }
}

impl From<&Amount> for MoneyInput<'_> {
    fn from(value: &Amount) -> Self {
        Self::Exact(*value)
    }
}

impl<'a, T> From<Option<T>> for MoneyInput<'a>
where
    T: Into<MoneyInput<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}
