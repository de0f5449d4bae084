//! Expense model
//!
//! An expense ("despesa") is a single categorized outflow with a paid flag.
//! Creation and updates travel as typed payloads: `NewExpense` carries every
//! required field, `ExpenseUpdate` names exactly one change.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExpenseId;
use crate::money::Amount;

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// What was bought or paid for
    pub description: String,

    /// Free-form category ("Aluguel", "Combustível", ...)
    pub category: String,

    /// Amount spent (positive)
    pub amount: Amount,

    /// Date the expense was incurred
    pub date: NaiveDate,

    /// Whether the expense has been settled
    #[serde(default)]
    pub paid: bool,

    /// When the expense was created
    pub created_at: DateTime<Utc>,

    /// When the expense was last modified
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating an expense
///
/// `amount` is kept as the raw text the user typed; the service validates it
/// before normalizing.
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub description: String,
    pub category: String,
    pub amount: String,
    pub date: NaiveDate,
    pub paid: bool,
}

/// A single change to an existing expense
#[derive(Debug, Clone, PartialEq)]
pub enum ExpenseUpdate {
    Description(String),
    Category(String),
    /// Raw amount text, validated like on creation
    Amount(String),
    Date(NaiveDate),
    MarkPaid,
    MarkUnpaid,
}

impl Expense {
    /// Create a new unpaid expense
    pub fn new(
        description: impl Into<String>,
        category: impl Into<String>,
        amount: Amount,
        date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ExpenseId::new(),
            description: description.into(),
            category: category.into(),
            amount,
            date,
            paid: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.description.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyDescription);
        }

        if self.category.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyCategory);
        }

        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }

        Ok(())
    }

    /// Check if the expense falls in the given calendar month
    pub fn is_in_month(&self, year: i32, month: u32) -> bool {
        use chrono::Datelike;
        self.date.year() == year && self.date.month() == month
    }

    /// Mark the record as modified now
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.date, self.description, self.amount)
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyDescription,
    EmptyCategory,
    NonPositiveAmount(Amount),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Expense description cannot be empty"),
            Self::EmptyCategory => write!(f, "Expense category cannot be empty"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Expense amount must be greater than zero (got {})", amount)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
