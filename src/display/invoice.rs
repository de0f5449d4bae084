//! Invoice display formatting

use chrono::NaiveDate;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::{truncate, DisplayStyle};
use crate::models::Invoice;

#[derive(Tabled)]
struct InvoiceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Supplier")]
    supplier: String,
    #[tabled(rename = "Document")]
    document: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Outstanding")]
    outstanding: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Format a list of invoices as a table, with status as of `today`
pub fn format_invoice_list(invoices: &[Invoice], style: DisplayStyle, today: NaiveDate) -> String {
    if invoices.is_empty() {
        return "No invoices found.".to_string();
    }

    let rows = invoices.iter().map(|i| InvoiceRow {
        id: i.id.to_string(),
        supplier: truncate(&i.supplier, 30),
        document: i.document.clone(),
        due: style.date(i.due_date),
        total: style.money(i.total()),
        outstanding: style.money(i.outstanding()),
        status: i.status(today).to_string(),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.to_string()
}

/// Format a single invoice with its lines and payments
pub fn format_invoice_details(invoice: &Invoice, style: DisplayStyle, today: NaiveDate) -> String {
    let mut output = String::new();

    output.push_str(&format!("Invoice: {}\n", invoice.label()));
    output.push_str(&format!("  ID:          {}\n", invoice.id));
    output.push_str(&format!("  Issued:      {}\n", style.date(invoice.issue_date)));
    output.push_str(&format!("  Due:         {}\n", style.date(invoice.due_date)));
    output.push_str(&format!("  Status:      {}\n", invoice.status(today)));

    output.push_str("\nLines:\n");
    for line in &invoice.lines {
        output.push_str(&format!(
            "  {:<40} {:>14}\n",
            truncate(&line.description, 40),
            style.money(line.amount)
        ));
    }

    if !invoice.payments.is_empty() {
        output.push_str("\nPayments:\n");
        for payment in &invoice.payments {
            output.push_str(&format!(
                "  {:<12} {:<27} {:>14}\n",
                style.date(payment.date),
                truncate(&payment.memo, 27),
                style.money(payment.amount)
            ));
        }
    }

    output.push('\n');
    output.push_str(&format!("  {:<40} {:>14}\n", "Total", style.money(invoice.total())));
    output.push_str(&format!("  {:<40} {:>14}\n", "Paid", style.money(invoice.paid_total())));
    output.push_str(&format!(
        "  {:<40} {:>14}\n",
        "Outstanding",
        style.money(invoice.outstanding())
    ));

    output
}
