//! Decimal-safe money engine
//!
//! Every monetary value in caixa passes through this module. Input arrives
//! as text (with `.` or `,` as the decimal separator), as a number, or not at
//! all; it is normalized to an integer count of cents, arithmetic runs on
//! those integers, and results come back as two-decimal numbers or strings.
//! Summing `49.99` and `0.01` gives exactly `50.00`.
//!
//! The engine is a set of pure functions with no shared state. It is
//! deliberately fail-soft: malformed input never produces an error. Parsing
//! degrades to zero and validation answers `false`, so a half-typed form
//! field such as `"12."` cannot break the caller. Use
//! [`validate_monetary_value`] when input must be rejected.
//!
//! # Example
//!
//! ```rust
//! use caixa::money::{format_decimal, multiply_value, parse_decimal, sum_values};
//!
//! assert_eq!(parse_decimal("50,00"), 50.0);
//! assert_eq!(sum_values(["12.34", "0.66", "87.00"]), 100.0);
//! assert_eq!(multiply_value("49.99", 1.1), 54.99);
//! assert_eq!(format_decimal(100.0), "100.00");
//! ```

mod amount;
mod arith;
mod format;
mod input;
mod parse;
mod validate;

pub use amount::Amount;
pub use arith::{multiply_value, subtract_values, sum_values};
pub use format::{format_decimal, round_two_places};
pub use input::MoneyInput;
pub use validate::validate_monetary_value;

/// Normalize a raw value to a number with at most two decimal places
///
/// Numbers are rounded to the nearest cent. Text is trimmed, `,` is read as
/// `.`, and anything that is not a plain decimal literal (signs, letters,
/// several separators) gives `0`, as do empty and missing values.
///
/// Values too large for [`Amount`] (about 92 quadrillion) keep their
/// magnitude here, while [`Amount::parse`] and the arithmetic helpers read
/// them as `0`.
pub fn parse_decimal<'a>(value: impl Into<MoneyInput<'a>>) -> f64 {
    parse::value_from_input(value.into())
}
