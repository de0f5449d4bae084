//! Invoice model
//!
//! An invoice ("título") is a supplier bill made of line items and settled by
//! one or more payments. Totals and balances are always derived from the
//! lines and payments, never stored.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::InvoiceId;
use crate::money::Amount;

/// One billed item on an invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub description: String,
    pub amount: Amount,
}

impl InvoiceLine {
    pub fn new(description: impl Into<String>, amount: Amount) -> Self {
        Self {
            description: description.into(),
            amount,
        }
    }
}

/// A payment applied to an invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub date: NaiveDate,
    pub amount: Amount,
    #[serde(default)]
    pub memo: String,
}

/// Settlement state of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Nothing paid yet, not past due
    Open,
    /// Some payments recorded, balance remaining, not past due
    PartiallyPaid,
    /// Balance fully settled
    Paid,
    /// Past the due date with a balance remaining
    Overdue,
}

impl InvoiceStatus {
    /// Parse a status from user input
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "open" | "aberto" => Some(Self::Open),
            "partial" | "partially_paid" | "parcial" => Some(Self::PartiallyPaid),
            "paid" | "pago" => Some(Self::Paid),
            "overdue" | "vencido" => Some(Self::Overdue),
            _ => None,
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "Open"),
            Self::PartiallyPaid => write!(f, "Partially paid"),
            Self::Paid => write!(f, "Paid"),
            Self::Overdue => write!(f, "Overdue"),
        }
    }
}

/// A supplier invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier
    pub id: InvoiceId,

    /// Supplier name
    pub supplier: String,

    /// Supplier document number ("NF 1042")
    #[serde(default)]
    pub document: String,

    /// Date the invoice was issued
    pub issue_date: NaiveDate,

    /// Date payment is due
    pub due_date: NaiveDate,

    /// Billed items
    #[serde(default)]
    pub lines: Vec<InvoiceLine>,

    /// Payments applied so far
    #[serde(default)]
    pub payments: Vec<Payment>,

    /// When the invoice was created
    pub created_at: DateTime<Utc>,

    /// When the invoice was last modified
    pub updated_at: DateTime<Utc>,
}

/// Raw line item as entered, before amount validation
#[derive(Debug, Clone)]
pub struct NewInvoiceLine {
    pub description: String,
    pub amount: String,
}

/// Payload for creating an invoice
#[derive(Debug, Clone)]
pub struct NewInvoice {
    pub supplier: String,
    pub document: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub lines: Vec<NewInvoiceLine>,
}

impl Invoice {
    /// Create an invoice with no payments
    pub fn new(
        supplier: impl Into<String>,
        document: impl Into<String>,
        issue_date: NaiveDate,
        due_date: NaiveDate,
        lines: Vec<InvoiceLine>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: InvoiceId::new(),
            supplier: supplier.into(),
            document: document.into(),
            issue_date,
            due_date,
            lines,
            payments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sum of all line items
    pub fn total(&self) -> Amount {
        self.lines.iter().map(|l| l.amount).sum()
    }

    /// Sum of all payments
    pub fn paid_total(&self) -> Amount {
        self.payments.iter().map(|p| p.amount).sum()
    }

    /// Remaining balance (negative if overpaid)
    pub fn outstanding(&self) -> Amount {
        self.total() - self.paid_total()
    }

    /// Settlement state as of a given date
    pub fn status(&self, as_of: NaiveDate) -> InvoiceStatus {
        if !self.outstanding().is_positive() {
            InvoiceStatus::Paid
        } else if self.due_date < as_of {
            InvoiceStatus::Overdue
        } else if self.paid_total().is_positive() {
            InvoiceStatus::PartiallyPaid
        } else {
            InvoiceStatus::Open
        }
    }

    /// Payments made within a calendar month
    pub fn payments_in_month(&self, year: i32, month: u32) -> impl Iterator<Item = &Payment> {
        use chrono::Datelike;
        self.payments
            .iter()
            .filter(move |p| p.date.year() == year && p.date.month() == month)
    }

    /// Short human label ("ACME Ltda NF 1042")
    pub fn label(&self) -> String {
        if self.document.is_empty() {
            self.supplier.clone()
        } else {
            format!("{} {}", self.supplier, self.document)
        }
    }

    /// Validate the invoice
    pub fn validate(&self) -> Result<(), InvoiceValidationError> {
        if self.supplier.trim().is_empty() {
            return Err(InvoiceValidationError::EmptySupplier);
        }

        if self.lines.is_empty() {
            return Err(InvoiceValidationError::NoLines);
        }

        if let Some(line) = self.lines.iter().find(|l| !l.amount.is_positive()) {
            return Err(InvoiceValidationError::NonPositiveLine(line.description.clone()));
        }

        if self.due_date < self.issue_date {
            return Err(InvoiceValidationError::DueBeforeIssue);
        }

        Ok(())
    }

    /// Mark the record as modified now
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Validation errors for invoices
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvoiceValidationError {
    EmptySupplier,
    NoLines,
    NonPositiveLine(String),
    DueBeforeIssue,
}

impl fmt::Display for InvoiceValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySupplier => write!(f, "Invoice supplier cannot be empty"),
            Self::NoLines => write!(f, "Invoice must have at least one line item"),
            Self::NonPositiveLine(desc) => {
                write!(f, "Line item '{}' must have an amount greater than zero", desc)
            }
            Self::DueBeforeIssue => write!(f, "Due date cannot be before the issue date"),
        }
    }
}

impl std::error::Error for InvoiceValidationError {}
