//! Invoice service
//!
//! Creates supplier invoices from raw line items and applies payments
//! against their outstanding balance.

use chrono::NaiveDate;

use crate::error::{CaixaError, CaixaResult};
use crate::models::{Invoice, InvoiceLine, InvoiceStatus, NewInvoice, Payment};

use super::expense::checked_amount;
use crate::storage::Storage;

/// Service for invoice management
pub struct InvoiceService<'a> {
    storage: &'a Storage,
}

impl<'a> InvoiceService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create an invoice; every line amount must pass the strict check
    ///
    /// A non-empty document number must not already belong to another
    /// invoice (compared case-insensitively).
    pub fn create(&self, input: NewInvoice) -> CaixaResult<Invoice> {
        let document = input.document.trim();
        if !document.is_empty() && self.storage.invoices.find(document)?.is_some() {
            return Err(CaixaError::Validation(format!(
                "Invoice with document '{}' already exists",
                document
            )));
        }

        let lines = input
            .lines
            .iter()
            .map(|line| {
                let field = format!("amount for '{}'", line.description.trim());
                checked_amount(&field, &line.amount)
                    .map(|amount| InvoiceLine::new(line.description.trim(), amount))
            })
            .collect::<CaixaResult<Vec<_>>>()?;

        let invoice = Invoice::new(
            input.supplier.trim(),
            document,
            input.issue_date,
            input.due_date,
            lines,
        );

        invoice
            .validate()
            .map_err(|e| CaixaError::Validation(e.to_string()))?;

        self.storage.invoices.upsert(invoice.clone())?;
        self.storage.invoices.save()?;
        self.storage.log_create(&invoice)?;

        tracing::info!(id = %invoice.id, total = %invoice.total(), "invoice created");
        Ok(invoice)
    }

    /// Find an invoice by ID or document number
    pub fn find(&self, identifier: &str) -> CaixaResult<Option<Invoice>> {
        self.storage.invoices.find(identifier)
    }

    fn require(&self, identifier: &str) -> CaixaResult<Invoice> {
        self.find(identifier)?
            .ok_or_else(|| CaixaError::invoice_not_found(identifier))
    }

    /// List invoices, optionally only those in a given status as of a date
    pub fn list(
        &self,
        status: Option<InvoiceStatus>,
        as_of: NaiveDate,
    ) -> CaixaResult<Vec<Invoice>> {
        let mut invoices = self.storage.invoices.get_all()?;
        if let Some(status) = status {
            invoices.retain(|i| i.status(as_of) == status);
        }
        Ok(invoices)
    }

    /// Apply a payment to an invoice
    ///
    /// The amount must be well-formed, greater than zero and no larger than
    /// the outstanding balance.
    pub fn register_payment(
        &self,
        identifier: &str,
        raw_amount: &str,
        date: NaiveDate,
        memo: impl Into<String>,
    ) -> CaixaResult<Invoice> {
        let mut invoice = self.require(identifier)?;
        let amount = checked_amount("payment amount", raw_amount)?;

        let reject = |reason: String| CaixaError::Payment {
            invoice: invoice.label(),
            reason,
        };

        if !amount.is_positive() {
            return Err(reject("amount must be greater than zero".into()));
        }

        let outstanding = invoice.outstanding();
        if amount > outstanding {
            return Err(reject(format!(
                "amount {} exceeds outstanding balance {}",
                amount, outstanding
            )));
        }

        let before = invoice.clone();
        invoice.payments.push(Payment {
            date,
            amount,
            memo: memo.into(),
        });
        invoice.touch();

        self.storage.invoices.upsert(invoice.clone())?;
        self.storage.invoices.save()?;
        self.storage.log_update(&before, &invoice)?;

        tracing::info!(
            id = %invoice.id,
            amount = %amount,
            outstanding = %invoice.outstanding(),
            "payment registered"
        );
        Ok(invoice)
    }

    /// Delete an invoice
    pub fn delete(&self, identifier: &str) -> CaixaResult<Invoice> {
        let invoice = self.require(identifier)?;

        self.storage.invoices.delete(invoice.id)?;
        self.storage.invoices.save()?;
        self.storage.log_delete(&invoice)?;

        tracing::info!(id = %invoice.id, "invoice deleted");
        Ok(invoice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::CaixaPaths;
    use crate::models::NewInvoiceLine;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = CaixaPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn new_invoice(lines: &[(&str, &str)]) -> NewInvoice {
        invoice_with_document("NF 1042", lines)
    }

    fn invoice_with_document(document: &str, lines: &[(&str, &str)]) -> NewInvoice {
        NewInvoice {
            supplier: "ACME Ltda".into(),
            document: document.into(),
            issue_date: date(3, 1),
            due_date: date(3, 31),
            lines: lines
                .iter()
                .map(|(d, a)| NewInvoiceLine {
                    description: (*d).into(),
                    amount: (*a).into(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_create_invoice() {
        let (_temp, storage) = create_test_storage();
        let service = InvoiceService::new(&storage);

        let invoice = service
            .create(new_invoice(&[("Peças", "0,10"), ("Serviço", "0.20")]))
            .unwrap();
        assert_eq!(invoice.total().to_string(), "0.30");
        assert!(service.find("nf 1042").unwrap().is_some());
    }

    #[test]
    fn test_create_rejects_bad_line() {
        let (_temp, storage) = create_test_storage();
        let service = InvoiceService::new(&storage);

        let err = service
            .create(new_invoice(&[("Peças", "10"), ("Frete", "5,999")]))
            .unwrap_err();
        assert!(err.to_string().contains("Frete"));

        let err = service.create(new_invoice(&[])).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_duplicate_document_rejected() {
        let (_temp, storage) = create_test_storage();
        let service = InvoiceService::new(&storage);
        let first = service.create(new_invoice(&[("Peças", "10")])).unwrap();

        let err = service
            .create(invoice_with_document(" nf 1042 ", &[("Peças", "99")]))
            .unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("already exists"));
        assert_eq!(storage.invoices.count().unwrap(), 1);

        // Payments by document still reach the original invoice
        let paid = service
            .register_payment("NF 1042", "4", date(3, 2), "")
            .unwrap();
        assert_eq!(paid.id, first.id);
        assert_eq!(paid.outstanding().to_string(), "6.00");

        // Invoices without a document number may coexist
        service.create(invoice_with_document("", &[("A", "1")])).unwrap();
        service.create(invoice_with_document("", &[("B", "2")])).unwrap();
        assert_eq!(storage.invoices.count().unwrap(), 3);
    }

    #[test]
    fn test_partial_then_full_payment() {
        let (_temp, storage) = create_test_storage();
        let service = InvoiceService::new(&storage);
        let invoice = service.create(new_invoice(&[("Peças", "100")])).unwrap();
        let id = invoice.id.to_string();

        let invoice = service.register_payment(&id, "33,33", date(3, 10), "1/3").unwrap();
        assert_eq!(invoice.status(date(3, 10)), InvoiceStatus::PartiallyPaid);
        assert_eq!(invoice.outstanding().to_string(), "66.67");

        let invoice = service.register_payment(&id, "66.67", date(3, 20), "").unwrap();
        assert_eq!(invoice.status(date(3, 20)), InvoiceStatus::Paid);
        assert!(invoice.outstanding().is_zero());
    }

    #[test]
    fn test_payment_rules() {
        let (_temp, storage) = create_test_storage();
        let service = InvoiceService::new(&storage);
        let invoice = service.create(new_invoice(&[("Peças", "50")])).unwrap();
        let id = invoice.id.to_string();

        let err = service.register_payment(&id, "50.01", date(3, 5), "").unwrap_err();
        assert!(matches!(err, CaixaError::Payment { .. }));

        let err = service.register_payment(&id, "0", date(3, 5), "").unwrap_err();
        assert!(matches!(err, CaixaError::Payment { .. }));

        let err = service.register_payment(&id, "10.001", date(3, 5), "").unwrap_err();
        assert!(err.is_validation());

        let err = service.register_payment("tit-ffffffff", "1", date(3, 5), "").unwrap_err();
        assert!(err.is_not_found());

        let unchanged = service.find(&id).unwrap().unwrap();
        assert!(unchanged.payments.is_empty());
    }

    #[test]
    fn test_list_by_status() {
        let (_temp, storage) = create_test_storage();
        let service = InvoiceService::new(&storage);
        let paid = service.create(new_invoice(&[("Peças", "10")])).unwrap();
        service
            .create(invoice_with_document("NF 1043", &[("Peças", "20")]))
            .unwrap();
        service
            .register_payment(&paid.id.to_string(), "10", date(3, 2), "")
            .unwrap();

        let open = service.list(Some(InvoiceStatus::Open), date(3, 5)).unwrap();
        assert_eq!(open.len(), 1);
        let overdue = service.list(Some(InvoiceStatus::Overdue), date(4, 5)).unwrap();
        assert_eq!(overdue.len(), 1);
        assert_eq!(service.list(None, date(3, 5)).unwrap().len(), 2);
    }
}
