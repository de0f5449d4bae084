//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod expense;
pub mod invoice;
pub mod money;
pub mod order;
pub mod report;

pub use expense::{handle_expense_command, ExpenseCommands};
pub use invoice::{handle_invoice_command, InvoiceCommands};
pub use money::{handle_money_command, MoneyCommands};
pub use order::{handle_order_command, OrderCommands};
pub use report::{handle_report_command, ReportCommands};

use chrono::NaiveDate;

use crate::error::{CaixaError, CaixaResult};

/// Parse a YYYY-MM-DD date argument
pub fn parse_date(s: &str) -> CaixaResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        CaixaError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", s))
    })
}

/// Parse an optional date argument, defaulting to today
pub fn parse_date_or_today(s: Option<&str>) -> CaixaResult<NaiveDate> {
    match s {
        Some(s) => parse_date(s),
        None => Ok(chrono::Local::now().date_naive()),
    }
}
