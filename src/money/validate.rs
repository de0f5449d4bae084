//! Strict monetary string validation
//!
//! Parsing is forgiving; validation is not. Callers use this predicate to
//! decide whether a field may be submitted, and show their own message when
//! it is not.

/// Check that a string is a well-formed, non-negative amount
///
/// Accepts one or more digits, optionally followed by a separator (`.` or
/// `,`) and exactly one or two digits. Rejects signs, thousands separators,
/// currency symbols, surrounding whitespace and a third decimal place.
///
/// # Examples
/// ```
/// use caixa::money::validate_monetary_value;
/// assert!(validate_monetary_value("50,12"));
/// assert!(!validate_monetary_value("50.123"));
/// ```
pub fn validate_monetary_value(raw: &str) -> bool {
    if raw.trim().is_empty() {
        return false;
    }

    let normalized = raw.replace(',', ".");
    let (whole, fraction) = match normalized.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (normalized.as_str(), None),
    };

    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());

    if whole.is_empty() || !all_digits(whole) {
        return false;
    }

    match fraction {
        None => true,
        Some(fraction) => (1..=2).contains(&fraction.len()) && all_digits(fraction),
    }
}
