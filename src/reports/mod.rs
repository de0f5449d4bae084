//! Reports module for caixa
//!
//! Aggregations over expenses and invoices for a calendar month.

pub mod monthly;

pub use monthly::{CategoryRow, DueRow, MonthlyReport, PaymentRow};
