//! Monthly report
//!
//! Expenses by category, invoice payments made in the month and invoices
//! falling due in the month, with grand totals.

use std::collections::BTreeMap;
use std::io::Write;

use chrono::{Datelike, NaiveDate};

use crate::error::{CaixaError, CaixaResult};
use crate::models::InvoiceId;
use crate::money::{format_decimal, Amount};
use crate::services::ExpenseService;
use crate::storage::Storage;

/// Expense total for one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRow {
    pub category: String,
    pub count: usize,
    pub total: Amount,
    /// Percentage of the month's expense total
    pub share: f64,
}

/// A payment made during the month
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRow {
    pub invoice_id: InvoiceId,
    pub invoice: String,
    pub date: NaiveDate,
    pub amount: Amount,
}

/// An invoice due during the month that still has a balance
#[derive(Debug, Clone, PartialEq)]
pub struct DueRow {
    pub invoice_id: InvoiceId,
    pub invoice: String,
    pub due_date: NaiveDate,
    pub outstanding: Amount,
}

/// Monthly cash summary
#[derive(Debug, Clone)]
pub struct MonthlyReport {
    pub year: i32,
    pub month: u32,
    pub categories: Vec<CategoryRow>,
    pub payments: Vec<PaymentRow>,
    pub due: Vec<DueRow>,
    pub total_expenses: Amount,
    pub total_paid_expenses: Amount,
    pub total_payments: Amount,
    pub total_due: Amount,
}

impl MonthlyReport {
    /// Generate the report for a calendar month
    pub fn generate(storage: &Storage, year: i32, month: u32) -> CaixaResult<Self> {
        let expenses = ExpenseService::new(storage).for_month(year, month)?;

        let mut by_category: BTreeMap<String, (usize, Amount)> = BTreeMap::new();
        for expense in &expenses {
            let entry = by_category
                .entry(expense.category.clone())
                .or_insert((0, Amount::zero()));
            entry.0 += 1;
            entry.1 += expense.amount;
        }

        let total_expenses: Amount = expenses.iter().map(|e| e.amount).sum();
        let total_paid_expenses: Amount =
            expenses.iter().filter(|e| e.paid).map(|e| e.amount).sum();

        let mut categories: Vec<CategoryRow> = by_category
            .into_iter()
            .map(|(category, (count, total))| CategoryRow {
                share: share_of(total, total_expenses),
                category,
                count,
                total,
            })
            .collect();
        categories.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));

        let invoices = storage.invoices.get_all()?;

        let mut payments: Vec<PaymentRow> = invoices
            .iter()
            .flat_map(|invoice| {
                invoice.payments_in_month(year, month).map(move |p| PaymentRow {
                    invoice_id: invoice.id,
                    invoice: invoice.label(),
                    date: p.date,
                    amount: p.amount,
                })
            })
            .collect();
        payments.sort_by_key(|p| p.date);

        let mut due: Vec<DueRow> = invoices
            .iter()
            .filter(|i| i.due_date.year() == year && i.due_date.month() == month)
            .filter(|i| i.outstanding().is_positive())
            .map(|i| DueRow {
                invoice_id: i.id,
                invoice: i.label(),
                due_date: i.due_date,
                outstanding: i.outstanding(),
            })
            .collect();
        due.sort_by_key(|d| d.due_date);

        let total_payments = payments.iter().map(|p| p.amount).sum();
        let total_due = due.iter().map(|d| d.outstanding).sum();

        tracing::debug!(
            year,
            month,
            expenses = expenses.len(),
            payments = payments.len(),
            due = due.len(),
            "monthly report generated"
        );

        Ok(Self {
            year,
            month,
            categories,
            payments,
            due,
            total_expenses,
            total_paid_expenses,
            total_payments,
            total_due,
        })
    }

    /// `YYYY-MM` label of the report month
    pub fn period(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// Total expenses not yet marked paid
    pub fn total_unpaid_expenses(&self) -> Amount {
        self.total_expenses - self.total_paid_expenses
    }

    /// Money leaving the business this month: paid expenses plus invoice payments
    pub fn cash_out(&self) -> Amount {
        self.total_paid_expenses + self.total_payments
    }

    /// Export the report to CSV
    ///
    /// One row per line of each section; every monetary cell is the canonical
    /// two-decimal string.
    pub fn export_csv<W: Write>(&self, writer: W) -> CaixaResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        let period = self.period();

        csv.write_record(["Period", "Section", "Item", "Date", "Count", "Amount", "Share"])?;

        for row in &self.categories {
            csv.write_record([
                period.as_str(),
                "expenses",
                row.category.as_str(),
                "",
                row.count.to_string().as_str(),
                money_cell(row.total).as_str(),
                format!("{:.1}", row.share).as_str(),
            ])?;
        }

        for row in &self.payments {
            csv.write_record([
                period.as_str(),
                "payments",
                row.invoice.as_str(),
                row.date.to_string().as_str(),
                "",
                money_cell(row.amount).as_str(),
                "",
            ])?;
        }

        for row in &self.due {
            csv.write_record([
                period.as_str(),
                "due",
                row.invoice.as_str(),
                row.due_date.to_string().as_str(),
                "",
                money_cell(row.outstanding).as_str(),
                "",
            ])?;
        }

        for (label, amount) in [
            ("total_expenses", self.total_expenses),
            ("total_paid_expenses", self.total_paid_expenses),
            ("total_payments", self.total_payments),
            ("total_due", self.total_due),
            ("cash_out", self.cash_out()),
        ] {
            csv.write_record([period.as_str(), "totals", label, "", "", money_cell(amount).as_str(), ""])?;
        }

        csv.flush()
            .map_err(|e| CaixaError::Export(format!("Failed to write CSV: {}", e)))?;
        Ok(())
    }
}

fn money_cell(amount: Amount) -> String {
    format_decimal(amount.to_f64())
}

/// Percentage of `part` in `whole`, 0 when `whole` is zero
fn share_of(part: Amount, whole: Amount) -> f64 {
    if whole.is_zero() {
        0.0
    } else {
        part.cents() as f64 / whole.cents() as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::CaixaPaths;
    use crate::models::{ExpenseUpdate, NewExpense, NewInvoice, NewInvoiceLine};
    use crate::services::InvoiceService;
    use tempfile::TempDir;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn seeded_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = CaixaPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        let expenses = ExpenseService::new(&storage);
        for (desc, cat, amount, m, d) in [
            ("Aluguel", "Imóvel", "1500", 3, 5),
            ("Luz", "Utilidades", "0,10", 3, 10),
            ("Água", "Utilidades", "0,20", 3, 12),
            ("Abril", "Imóvel", "1500", 4, 5),
        ] {
            expenses
                .create(NewExpense {
                    description: desc.into(),
                    category: cat.into(),
                    amount: amount.into(),
                    date: date(m, d),
                    paid: false,
                })
                .unwrap();
        }
        let rent = expenses.for_month(2025, 3).unwrap();
        let rent = rent.iter().find(|e| e.description == "Aluguel").unwrap();
        expenses
            .update(&rent.id.to_string(), ExpenseUpdate::MarkPaid)
            .unwrap();

        let invoices = InvoiceService::new(&storage);
        let invoice = invoices
            .create(NewInvoice {
                supplier: "ACME".into(),
                document: "NF 1".into(),
                issue_date: date(2, 20),
                due_date: date(3, 25),
                lines: vec![NewInvoiceLine {
                    description: "Peças".into(),
                    amount: "300".into(),
                }],
            })
            .unwrap();
        invoices
            .register_payment(&invoice.id.to_string(), "100,50", date(3, 15), "")
            .unwrap();

        (temp_dir, storage)
    }

    #[test]
    fn test_generate() {
        let (_temp, storage) = seeded_storage();
        let report = MonthlyReport::generate(&storage, 2025, 3).unwrap();

        assert_eq!(report.total_expenses.to_string(), "1500.30");
        assert_eq!(report.total_paid_expenses.to_string(), "1500.00");
        assert_eq!(report.total_unpaid_expenses().to_string(), "0.30");

        assert_eq!(report.categories[0].category, "Imóvel");
        assert_eq!(report.categories[1].category, "Utilidades");
        assert_eq!(report.categories[1].count, 2);
        assert_eq!(report.categories[1].total.to_string(), "0.30");

        assert_eq!(report.payments.len(), 1);
        assert_eq!(report.total_payments.to_string(), "100.50");
        assert_eq!(report.due.len(), 1);
        assert_eq!(report.total_due.to_string(), "199.50");
        assert_eq!(report.cash_out().to_string(), "1600.50");
    }

    #[test]
    fn test_settled_invoice_is_not_due() {
        let (_temp, storage) = seeded_storage();
        let invoices = InvoiceService::new(&storage);
        let settled = invoices
            .create(NewInvoice {
                supplier: "Gráfica".into(),
                document: "NF 2".into(),
                issue_date: date(3, 1),
                due_date: date(3, 28),
                lines: vec![NewInvoiceLine {
                    description: "Cartões".into(),
                    amount: "80".into(),
                }],
            })
            .unwrap();
        invoices
            .register_payment(&settled.id.to_string(), "80", date(3, 20), "")
            .unwrap();

        let report = MonthlyReport::generate(&storage, 2025, 3).unwrap();
        assert_eq!(report.due.len(), 1);
        assert_eq!(report.due[0].invoice, "ACME NF 1");
        assert_eq!(report.total_due.to_string(), "199.50");
        assert_eq!(report.total_payments.to_string(), "180.50");
    }

    #[test]
    fn test_empty_month() {
        let (_temp, storage) = seeded_storage();
        let report = MonthlyReport::generate(&storage, 2024, 1).unwrap();
        assert!(report.categories.is_empty());
        assert!(report.total_expenses.is_zero());
        assert_eq!(report.period(), "2024-01");
    }

    #[test]
    fn test_export_csv() {
        let (_temp, storage) = seeded_storage();
        let report = MonthlyReport::generate(&storage, 2025, 3).unwrap();

        let mut buffer = Vec::new();
        report.export_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();

        assert!(csv.starts_with("Period,Section,Item,Date,Count,Amount,Share\n"));
        assert!(csv.contains("2025-03,expenses,Utilidades,,2,0.30,0.0\n"));
        assert!(csv.contains("2025-03,payments,ACME NF 1,2025-03-15,,100.50,\n"));
        assert!(csv.contains("2025-03,due,ACME NF 1,2025-03-25,,199.50,\n"));
        assert!(csv.contains("2025-03,totals,total_expenses,,,1500.30,\n"));
    }

    #[test]
    fn test_share_of_zero_total() {
        assert_eq!(share_of(Amount::from_cents(10), Amount::zero()), 0.0);
        assert_eq!(share_of(Amount::from_cents(25), Amount::from_cents(100)), 25.0);
    }
}
