//! Drift-free arithmetic on raw monetary input
//!
//! Every operand is normalized to whole cents first, the arithmetic runs on
//! integers, and only the result is converted back to currency units.

use super::amount::Amount;
use super::input::MoneyInput;

/// Sum any number of raw values
///
/// An empty sequence sums to zero.
///
/// # Examples
/// ```
/// use caixa::money::sum_values;
/// assert_eq!(sum_values(["10.10", "20.20", "30.30"]), 60.6);
/// ```
pub fn sum_values<'a, I>(values: I) -> f64
where
    I: IntoIterator,
    I::Item: Into<MoneyInput<'a>>,
{
    values
        .into_iter()
        .map(|value| Amount::parse(value))
        .sum::<Amount>()
        .to_f64()
}

/// Subtract `subtrahend` from `minuend`
///
/// The sign of the result is preserved; nothing is clamped at zero.
pub fn subtract_values<'a, 'b>(
    minuend: impl Into<MoneyInput<'a>>,
    subtrahend: impl Into<MoneyInput<'b>>,
) -> f64 {
    (Amount::parse(minuend) - Amount::parse(subtrahend)).to_f64()
}

/// Multiply a raw value by a unitless factor (quantity, rate, markup)
///
/// The value is normalized to cents, multiplied, and rounded once to the
/// nearest cent.
pub fn multiply_value<'a>(value: impl Into<MoneyInput<'a>>, multiplier: f64) -> f64 {
    Amount::parse(value).mul_rate(multiplier).to_f64()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_has_no_drift() {
        let naive: f64 = ["10.10", "20.20", "30.30"]
            .iter()
            .map(|s| s.parse::<f64>().unwrap())
            .sum();
        assert_ne!(naive, 60.6);

        assert_eq!(sum_values(["10.10", "20.20", "30.30"]), 60.6);
    }

    #[test]
    fn test_sum_repeated_tenths() {
        assert_eq!(sum_values(vec![0.1; 10]), 1.0);
        assert_eq!(sum_values(["49.99", "0.01"]), 50.0);
    }

    #[test]
    fn test_sum_mixed_inputs() {
        let items = [
            MoneyInput::from("12,34"),
            MoneyInput::from(0.66),
            MoneyInput::Missing,
            MoneyInput::from("garbage"),
            MoneyInput::from(Amount::from_cents(8700)),
        ];
        assert_eq!(sum_values(items), 100.0);
    }

    #[test]
    fn test_sum_empty() {
        assert_eq!(sum_values(Vec::<&str>::new()), 0.0);
    }

    #[test]
    fn test_sum_borrowed_strings() {
        let fields = vec![String::from("1,10"), String::from("2,20")];
        assert_eq!(sum_values(&fields), 3.3);
    }

    #[test]
    fn test_subtract_keeps_sign() {
        assert_eq!(subtract_values("10.00", "20.00"), -10.0);
        assert_eq!(subtract_values("100", "0.01"), 99.99);
        assert_eq!(subtract_values(0.3, 0.1), 0.2);
    }

    #[test]
    fn test_multiply_rounds_at_cents() {
        assert_eq!(multiply_value("49.99", 1.1), 54.99);
        assert_eq!(multiply_value("10", 3.0), 30.0);
        assert_eq!(multiply_value("0.10", 0.5), 0.05);
        assert_eq!(multiply_value("10.00", -1.0), -10.0);
    }

    #[test]
    fn test_multiply_bad_factor_is_zero() {
        assert_eq!(multiply_value("10.00", f64::NAN), 0.0);
        assert_eq!(multiply_value("10.00", f64::INFINITY), 0.0);
    }
}
