//! Monthly report formatting for terminal output

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::{format_percentage, DisplayStyle};
use crate::reports::MonthlyReport;

#[derive(Tabled)]
struct CategoryLine {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Share")]
    share: String,
}

#[derive(Tabled)]
struct InvoiceLine {
    #[tabled(rename = "Invoice")]
    invoice: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

fn table<T: Tabled>(rows: impl IntoIterator<Item = T>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.to_string()
}

/// Format the monthly report with one section per block
pub fn format_monthly_report(report: &MonthlyReport, style: DisplayStyle) -> String {
    let mut output = String::new();

    output.push_str(&format!("Monthly report: {}\n", report.period()));
    output.push_str(&"=".repeat(60));
    output.push_str("\n\nExpenses by category\n");

    if report.categories.is_empty() {
        output.push_str("  (no expenses)\n");
    } else {
        output.push_str(&table(report.categories.iter().map(|c| CategoryLine {
            category: c.category.clone(),
            count: c.count,
            total: style.money(c.total),
            share: format_percentage(c.share),
        })));
        output.push('\n');
    }

    output.push_str("\nInvoice payments\n");
    if report.payments.is_empty() {
        output.push_str("  (no payments)\n");
    } else {
        output.push_str(&table(report.payments.iter().map(|p| InvoiceLine {
            invoice: p.invoice.clone(),
            date: style.date(p.date),
            amount: style.money(p.amount),
        })));
        output.push('\n');
    }

    output.push_str("\nInvoices due with balance\n");
    if report.due.is_empty() {
        output.push_str("  (none)\n");
    } else {
        output.push_str(&table(report.due.iter().map(|d| InvoiceLine {
            invoice: d.invoice.clone(),
            date: style.date(d.due_date),
            amount: style.money(d.outstanding),
        })));
        output.push('\n');
    }

    output.push('\n');
    output.push_str(&"-".repeat(60));
    output.push('\n');
    for (label, amount) in [
        ("Expenses", report.total_expenses),
        ("  paid", report.total_paid_expenses),
        ("  unpaid", report.total_unpaid_expenses()),
        ("Invoice payments", report.total_payments),
        ("Due with balance", report.total_due),
        ("Cash out", report.cash_out()),
    ] {
        output.push_str(&format!("{:<40} {:>16}\n", label, style.money(amount)));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::money::Amount;
    use crate::reports::CategoryRow;

    fn report() -> MonthlyReport {
        MonthlyReport {
            year: 2025,
            month: 3,
            categories: vec![CategoryRow {
                category: "Utilidades".into(),
                count: 2,
                total: Amount::from_cents(30),
                share: 100.0,
            }],
            payments: Vec::new(),
            due: Vec::new(),
            total_expenses: Amount::from_cents(30),
            total_paid_expenses: Amount::zero(),
            total_payments: Amount::zero(),
            total_due: Amount::zero(),
        }
    }

    #[test]
    fn test_format_sections() {
        let settings = Settings::default();
        let out = format_monthly_report(&report(), DisplayStyle::from_settings(&settings));

        assert!(out.starts_with("Monthly report: 2025-03\n"));
        assert!(out.contains("Utilidades"));
        assert!(out.contains("100%"));
        assert!(out.contains("(no payments)"));
        assert!(out.contains("R$ 0.30"));
    }
}
