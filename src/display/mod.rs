//! Display formatting for terminal output
//!
//! Listings are rendered as tables; detail views are plain aligned text.
//! Amounts are shown with the configured currency symbol and dates with the
//! configured date format.

pub mod expense;
pub mod invoice;
pub mod report;
pub mod service_order;

pub use expense::format_expense_list;
pub use invoice::{format_invoice_details, format_invoice_list};
pub use report::format_monthly_report;
pub use service_order::{format_service_order_details, format_service_order_list};

use chrono::NaiveDate;

use crate::config::Settings;
use crate::money::Amount;

/// Currency symbol and date format used when rendering
#[derive(Debug, Clone, Copy)]
pub struct DisplayStyle<'a> {
    pub currency_symbol: &'a str,
    pub date_format: &'a str,
}

impl<'a> DisplayStyle<'a> {
    pub fn from_settings(settings: &'a Settings) -> Self {
        Self {
            currency_symbol: &settings.currency_symbol,
            date_format: &settings.date_format,
        }
    }

    pub fn money(&self, amount: Amount) -> String {
        amount.format_with_symbol(self.currency_symbol)
    }

    pub fn date(&self, date: NaiveDate) -> String {
        date.format(self.date_format).to_string()
    }
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        format!("{}...", s.chars().take(max_len - 3).collect::<String>())
    }
}
