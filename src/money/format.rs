//! Canonical display strings

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::amount::Amount;
use super::input::MoneyInput;
use super::parse::cents_from_f64;
use super::parse_decimal;

/// Render a number as a fixed two-decimal string
///
/// The value is rounded half away from zero to the nearest cent first. `NaN`
/// and infinities render as `"0.00"`. Finite values too large for [`Amount`]
/// are rendered through an exact decimal; beyond roughly `7.9e28` even that
/// runs out and they also render as `"0.00"`. The output always matches
/// `-?\d+\.\d{2}`.
///
/// # Examples
/// ```
/// use caixa::money::format_decimal;
/// assert_eq!(format_decimal(50.0), "50.00");
/// assert_eq!(format_decimal(1e17), "100000000000000000.00");
/// assert_eq!(format_decimal(f64::NAN), "0.00");
/// ```
pub fn format_decimal(value: f64) -> String {
    match cents_from_f64(value) {
        Some(cents) => Amount::from_cents(cents).to_string(),
        None if value.is_finite() => Decimal::from_f64(value)
            .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
            .map(|d| format!("{:.2}", d))
            .unwrap_or_else(|| "0.00".to_string()),
        None => "0.00".to_string(),
    }
}

/// Normalize any raw value and render its canonical two-decimal form
pub fn round_two_places<'a>(value: impl Into<MoneyInput<'a>>) -> String {
    format_decimal(parse_decimal(value))
}
