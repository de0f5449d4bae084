//! Normalization of raw input into whole cents
//!
//! Text is read as an exact decimal literal and rounded half away from zero
//! at the second fractional digit. Numbers follow `round(value * 100)`.
//! Nothing here fails: anything unreadable becomes zero cents.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::input::MoneyInput;

/// Convert any raw input into a count of cents
pub(crate) fn cents_from_input(input: MoneyInput<'_>) -> i64 {
    match input {
        MoneyInput::Text(text) => cents_from_text(text),
        MoneyInput::Number(value) => cents_from_f64(value).unwrap_or(0),
        MoneyInput::Exact(amount) => amount.cents(),
        MoneyInput::Missing => 0,
    }
}

/// Round a value in currency units to whole cents
///
/// Returns `None` for `NaN`, infinities and values whose cent count does not
/// fit in an `i64`.
pub(crate) fn cents_from_f64(value: f64) -> Option<i64> {
    round_to_i64(value * 100.0)
}

/// Round an already-scaled cent quantity to the nearest whole cent
pub(crate) fn round_to_i64(cents: f64) -> Option<i64> {
    if !cents.is_finite() {
        return None;
    }

    // f64::round is half away from zero
    let rounded = cents.round();
    if rounded < i64::MIN as f64 || rounded >= i64::MAX as f64 {
        return None;
    }

    Some(rounded as i64)
}

/// Convert any raw input into a value in currency units rounded to cents
///
/// Agrees with `cents_from_input` whenever the cent count fits in an `i64`.
/// Finite values beyond that keep their magnitude instead of collapsing to
/// zero.
pub(crate) fn value_from_input(input: MoneyInput<'_>) -> f64 {
    match input {
        MoneyInput::Text(text) => rounded_text(text)
            .and_then(|value| match value.checked_mul(Decimal::ONE_HUNDRED).and_then(|c| c.to_i64()) {
                Some(cents) => Some(cents as f64 / 100.0),
                None => value.to_f64(),
            })
            .unwrap_or(0.0),
        MoneyInput::Number(value) => match cents_from_f64(value) {
            Some(cents) => cents as f64 / 100.0,
            // Past i64 cents an f64 has no fractional digits left to round
            None if value.is_finite() => value,
            None => 0.0,
        },
        MoneyInput::Exact(amount) => amount.to_f64(),
        MoneyInput::Missing => 0.0,
    }
}

/// Read user text ("12,5", " 7.", ".25") into cents
fn cents_from_text(raw: &str) -> i64 {
    rounded_text(raw)
        .and_then(|d| d.checked_mul(Decimal::ONE_HUNDRED))
        .and_then(|d| d.to_i64())
        .unwrap_or(0)
}

/// Read user text as an exact decimal rounded to two places
fn rounded_text(raw: &str) -> Option<Decimal> {
    let normalized = raw.trim().replace(',', ".");
    if !is_decimal_literal(&normalized) {
        return None;
    }

    let (whole, fraction) = normalized
        .split_once('.')
        .unwrap_or((normalized.as_str(), ""));

    if whole.is_empty() && fraction.is_empty() {
        return None;
    }

    let literal = format!(
        "{}.{}",
        if whole.is_empty() { "0" } else { whole },
        if fraction.is_empty() { "0" } else { fraction }
    );

    Decimal::from_str(&literal)
        .ok()
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

/// Optional digits, at most one dot, optional digits
fn is_decimal_literal(s: &str) -> bool {
    !s.is_empty()
        && s.chars().all(|c| c.is_ascii_digit() || c == '.')
        && s.chars().filter(|&c| c == '.').count() <= 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> i64 {
        cents_from_input(MoneyInput::Text(s))
    }

    #[test]
    fn test_text_with_either_separator() {
        assert_eq!(text("10.50"), 1050);
        assert_eq!(text("10,50"), 1050);
        assert_eq!(text("  2,3 "), 230);
        assert_eq!(text("7"), 700);
    }

    #[test]
    fn test_partial_keystrokes() {
        assert_eq!(text("12."), 1200);
        assert_eq!(text(".5"), 50);
        assert_eq!(text(","), 0);
        assert_eq!(text("."), 0);
    }

    #[test]
    fn test_excess_precision_rounds_half_away_from_zero() {
        assert_eq!(text("50.999"), 5100);
        assert_eq!(text("1.005"), 101);
        assert_eq!(text("1.004"), 100);
    }

    #[test]
    fn test_garbage_is_zero() {
        assert_eq!(text(""), 0);
        assert_eq!(text("   "), 0);
        assert_eq!(text("abc"), 0);
        assert_eq!(text("-10.00"), 0);
        assert_eq!(text("1.2.3"), 0);
        assert_eq!(text("1,000.50"), 0);
        assert_eq!(text("R$ 10"), 0);
    }

    #[test]
    fn test_numbers_round_to_cents() {
        assert_eq!(cents_from_input(MoneyInput::Number(0.1 + 0.2)), 30);
        assert_eq!(cents_from_input(MoneyInput::Number(-12.34)), -1234);
        assert_eq!(cents_from_input(MoneyInput::Number(49.99)), 4999);
    }

    #[test]
    fn test_non_finite_numbers() {
        assert_eq!(cents_from_input(MoneyInput::Number(f64::NAN)), 0);
        assert_eq!(cents_from_input(MoneyInput::Number(f64::INFINITY)), 0);
        assert_eq!(cents_from_f64(1e300), None);
    }

    #[test]
    fn test_values_beyond_cent_range_keep_magnitude() {
        let big = MoneyInput::Text("12345678901234567890");
        assert_eq!(cents_from_input(big), 0);
        let value = value_from_input(big);
        assert!((value - 1.2345678901234567e19).abs() < 1e4, "{value}");

        assert_eq!(value_from_input(MoneyInput::Number(1e17)), 1e17);
        assert_eq!(value_from_input(MoneyInput::Number(-1e300)), -1e300);
        assert_eq!(value_from_input(MoneyInput::Number(f64::INFINITY)), 0.0);
        assert_eq!(value_from_input(MoneyInput::Text("12,345")), 12.35);
        assert_eq!(value_from_input(MoneyInput::Text("abc")), 0.0);
    }

    #[test]
    fn test_missing_is_zero() {
        assert_eq!(cents_from_input(MoneyInput::Missing), 0);
    }
}
