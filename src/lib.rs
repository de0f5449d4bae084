//! caixa - decimal-safe money handling for a small-business back office
//!
//! Monetary values are normalized to whole cents before any arithmetic, so
//! sums like `0.1 + 0.2` come out as exactly `0.30`. The `money` engine is
//! fail-soft: malformed or missing input reads as zero and nothing panics.
//! Around it sit the back-office records that consume it: expenses, supplier
//! invoices and service orders.
//!
//! # Architecture
//!
//! - `money`: parse, format, validate, sum, subtract, multiply and round
//! - `models`: expenses, invoices, service orders
//! - `storage`: JSON file storage layer
//! - `services`: business logic layer
//! - `reports`: monthly summary and CSV export
//! - `audit`: audit trail of every change
//! - `config`: paths, settings and logging setup
//! - `display`, `cli`: terminal presentation and command handlers
//!
//! # Example
//!
//! ```
//! use caixa::money::{format_decimal, sum_values, validate_monetary_value};
//!
//! assert_eq!(format_decimal(sum_values(["10.10", "20.20", "30.30"])), "60.60");
//! assert!(!validate_monetary_value("50.123"));
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod money;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::CaixaError;
