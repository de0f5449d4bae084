//! Custom error types for caixa
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. The money engine itself never errors; these
//! variants cover storage, configuration and business-rule failures around it.

use thiserror::Error;

/// The main error type for caixa operations
#[derive(Error, Debug)]
pub enum CaixaError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user-supplied data
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// A payment that the invoice cannot take
    #[error("Payment rejected for invoice '{invoice}': {reason}")]
    Payment { invoice: String, reason: String },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl CaixaError {
    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for invoices
    pub fn invoice_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Invoice",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for service orders
    pub fn service_order_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Service order",
            identifier: identifier.into(),
        }
    }

    /// Validation error for a monetary field that failed the strict check
    pub fn invalid_amount(field: &str, raw: &str) -> Self {
        Self::Validation(format!(
            "Invalid {}: '{}'. Use digits with up to two decimals, e.g. '1250,00' or '1250.00'",
            field, raw
        ))
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for CaixaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CaixaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for CaixaError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for caixa operations
pub type CaixaResult<T> = Result<T, CaixaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CaixaError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = CaixaError::invoice_not_found("NF-1042");
        assert_eq!(err.to_string(), "Invoice not found: NF-1042");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_invalid_amount_is_validation() {
        let err = CaixaError::invalid_amount("amount", "12.345");
        assert!(err.is_validation());
        assert!(err.to_string().contains("'12.345'"));
    }

    #[test]
    fn test_payment_error() {
        let err = CaixaError::Payment {
            invoice: "NF-7".into(),
            reason: "exceeds outstanding balance of 10.00".into(),
        };
        assert_eq!(
            err.to_string(),
            "Payment rejected for invoice 'NF-7': exceeds outstanding balance of 10.00"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CaixaError = io_err.into();
        assert!(matches!(err, CaixaError::Io(_)));
    }
}
